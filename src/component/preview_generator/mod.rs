//! 影片預覽圖元件
//!
//! ffprobe 取得資訊，ffmpeg 拼出格狀預覽圖，發佈到網站後通知聊天室

mod ffmpeg_command;
mod main;
mod message;
mod publisher;

pub use ffmpeg_command::{GridSpec, PreviewCommand, resolve_interval};
pub use main::{PreviewGenerator, PreviewRequest};
pub use message::{
    PreviewMessage, extraction_failed_message, metadata_failed_message, source_unreadable_message,
    upload_failed_message,
};
pub use publisher::Publisher;
