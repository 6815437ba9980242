use crate::error::PreviewError;
use serde::Deserialize;
use std::path::PathBuf;

/// 按鈕回呼送來的 `{"context": {"command": ..., "filename": ...}}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CallbackRequest {
    pub context: CallbackContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CallbackContext {
    pub command: String,
    pub filename: PathBuf,
}

impl CallbackRequest {
    pub fn parse(raw: &str) -> Result<Self, PreviewError> {
        Ok(serde_json::from_str(raw)?)
    }
}
