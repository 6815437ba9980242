//! 錯誤分類
//!
//! 元件之間傳遞的領域錯誤；上層流程以 `anyhow` 包裝並在需要時 downcast 判斷類型

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("設定缺少必要欄位: {0}")]
    ConfigMissingKey(String),

    #[error("樣板 `{template}` 含有未知的佔位符 {{{placeholder}}}")]
    UnknownPlaceholder { template: String, placeholder: String },

    #[error("無效的格線設定: {0}（格式應為 RxC，例如 5x6，總格數不超過 1024）")]
    InvalidGrid(String),

    #[error("找不到操作: {0}")]
    UnknownOperation(String),

    #[error("操作 {0} 沒有設定 command")]
    MissingCommand(String),

    #[error("外部程式執行失敗: {tool}")]
    ExternalToolFailure { tool: String },

    #[error("無法發佈預覽圖到 {}: {source}", .path.display())]
    UploadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("通知發送失敗: {0}")]
    NotifyFailure(#[from] reqwest::Error),

    #[error("無法解析回呼內容: {0}")]
    InvalidCallback(#[from] serde_json::Error),

    #[error("無法讀取影片資訊: {0}")]
    MediaProbeFailure(String),
}
