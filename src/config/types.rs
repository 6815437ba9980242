use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const DEFAULT_GRID: &str = "5x6";
pub const DEFAULT_HEIGHT: u32 = 120;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const PREVIEW_FILENAME: &str = "video_preview.jpg";

/// 整個執行期間只讀的設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "Mattermost")]
    pub mattermost: MattermostConfig,
    #[serde(rename = "DefaultPayload", default)]
    pub default_payload: DefaultPayload,
    #[serde(rename = "WebServer")]
    pub web_server: WebServerConfig,
    #[serde(rename = "PreviewSettings", default)]
    pub preview: PreviewSettings,
    #[serde(rename = "FileOperations", default)]
    pub file_operations: BTreeMap<String, OperationDefinition>,
}

/// Webhook 連線設定
///
/// `hook_url` 直接指定完整網址；否則由 `url` 與 `webhook_code` 組成 `<url>/hooks/<code>`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MattermostConfig {
    pub url: Option<String>,
    pub webhook_code: Option<String>,
    pub hook_url: Option<String>,
    /// 按鈕被按下時 Mattermost 回呼的網址
    pub callback_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// 每則通知預設帶上的欄位
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultPayload {
    pub channel: Option<String>,
    pub username: Option<String>,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebServerConfig {
    pub webroot: PathBuf,
    pub preview_dir: String,
    pub transcode_dir: PathBuf,
    /// 對外公開的網址前綴
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    pub default_grid: String,
    /// 0 表示依影片長度與格數自動計算
    pub default_interval: f64,
    pub default_height: u32,
    pub temp_output: PathBuf,
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            default_grid: DEFAULT_GRID.to_string(),
            default_interval: 0.0,
            default_height: DEFAULT_HEIGHT,
            temp_output: std::env::temp_dir().join(PREVIEW_FILENAME),
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
        }
    }
}

/// 一個具名操作
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDefinition {
    pub command: Option<String>,
    /// 輸出目錄；未設定時使用 `WebServer.transcode_dir`
    pub location: Option<PathBuf>,
    /// 完成時的訊息樣板
    pub text: Option<String>,
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
