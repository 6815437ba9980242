//! 功能元件模組
//!
//! 每個子模組實現一個獨立的功能，包含主要邏輯和專用工具

pub mod notifier;
pub mod operation_dispatcher;
pub mod preview_generator;

pub use notifier::{Notify, WebhookNotifier};
pub use operation_dispatcher::OperationDispatcher;
pub use preview_generator::PreviewGenerator;
