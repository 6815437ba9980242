use crate::config::WebServerConfig;
use crate::error::PreviewError;
use crate::tools::ensure_directory_exists;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// 把暫存預覽圖搬到網站目錄並產生公開網址
///
/// 檔名為原始影片檔名的 MD5，同名影片會覆蓋先前的預覽圖
pub struct Publisher {
    preview_root: PathBuf,
    public_base: String,
}

impl Publisher {
    #[must_use]
    pub fn new(web_server: &WebServerConfig) -> Self {
        let preview_dir = web_server.preview_dir.trim_matches('/');
        Self {
            preview_root: web_server.webroot.join(preview_dir),
            public_base: format!("{}/{preview_dir}", web_server.url.trim_end_matches('/')),
        }
    }

    #[must_use]
    pub fn published_name(original_name: &str) -> String {
        format!("{:x}.jpg", md5::compute(original_name.as_bytes()))
    }

    #[must_use]
    pub fn published_path(&self, original_name: &str) -> PathBuf {
        self.preview_root.join(Self::published_name(original_name))
    }

    pub fn publish(&self, temp_image: &Path, original_name: &str) -> Result<String, PreviewError> {
        let name = Self::published_name(original_name);
        let destination = self.preview_root.join(&name);

        ensure_directory_exists(&self.preview_root).map_err(|source| PreviewError::UploadFailure {
            path: self.preview_root.clone(),
            source,
        })?;

        move_file(temp_image, &destination).map_err(|source| PreviewError::UploadFailure {
            path: destination.clone(),
            source,
        })?;

        info!("預覽圖已發佈: {}", destination.display());
        Ok(format!("{}/{name}", self.public_base))
    }
}

/// rename 失敗時（例如跨檔案系統）改為複製後刪除
fn move_file(source: &Path, destination: &Path) -> std::io::Result<()> {
    if fs::rename(source, destination).is_ok() {
        return Ok(());
    }

    debug!("rename 失敗，改用複製: {} -> {}", source.display(), destination.display());
    fs::copy(source, destination)?;
    fs::remove_file(source)
}
