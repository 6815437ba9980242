use crate::config::types::Config;
use crate::error::PreviewError;
use crate::tools::validate_template;
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "video_preview_config.yaml";
pub const CONFIG_ENV_VAR: &str = "VIDEO_PREVIEW_CONFIG";

/// 設定檔位置：命令列參數 > 環境變數 > 工作目錄下的預設檔名
#[must_use]
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    std::env::var_os(CONFIG_ENV_VAR).map_or_else(|| PathBuf::from(CONFIG_FILE_NAME), PathBuf::from)
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        info!("已載入設定: {}", path.display());
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), PreviewError> {
        self.webhook_url()?;
        crate::component::preview_generator::GridSpec::parse(&self.preview.default_grid)?;

        if !self.file_operations.is_empty() && self.mattermost.callback_url.is_none() {
            return Err(PreviewError::ConfigMissingKey(
                "Mattermost.callback_url".to_string(),
            ));
        }

        for operation in self.file_operations.values() {
            if let Some(command) = &operation.command {
                validate_template(command)?;
            }
            if let Some(text) = &operation.text {
                validate_template(text)?;
            }
        }

        Ok(())
    }

    /// 實際 POST 的 webhook 網址
    pub fn webhook_url(&self) -> Result<String, PreviewError> {
        let mattermost = &self.mattermost;
        if let Some(hook_url) = &mattermost.hook_url {
            return Ok(hook_url.clone());
        }

        match (&mattermost.url, &mattermost.webhook_code) {
            (Some(url), Some(code)) => Ok(format!("{}/hooks/{code}", url.trim_end_matches('/'))),
            (Some(_), None) => Err(PreviewError::ConfigMissingKey(
                "Mattermost.webhook_code".to_string(),
            )),
            _ => Err(PreviewError::ConfigMissingKey(
                "Mattermost.hook_url".to_string(),
            )),
        }
    }
}
