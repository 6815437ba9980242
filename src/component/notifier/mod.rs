//! 聊天室通知元件
//!
//! 組合預設欄位後以 JSON POST 到 incoming webhook

mod payload;
mod webhook;

use crate::error::PreviewError;
use log::warn;

pub use payload::{Action, ActionContext, Attachment, Integration, NotificationPayload};
pub use webhook::WebhookNotifier;

/// 發送一則通知，成功時回傳伺服器的原始回應內容
pub trait Notify {
    fn notify(&self, payload: NotificationPayload) -> Result<String, PreviewError>;

    /// 失敗只記錄，不中斷流程
    fn notify_best_effort(&self, payload: NotificationPayload) -> bool {
        match self.notify(payload) {
            Ok(_) => true,
            Err(e) => {
                warn!("通知未送出: {e}");
                false
            }
        }
    }
}
