//! 檔案操作元件
//!
//! 由聊天室按鈕觸發，執行設定檔中的命令樣板

mod callback;
mod main;

pub use callback::{CallbackContext, CallbackRequest};
pub use main::{DispatchOutcome, GENERIC_FAILURE, OperationDispatcher};
