use crate::component::notifier::{
    Action, ActionContext, Attachment, Integration, NotificationPayload,
};
use crate::tools::{MediaInfo, format_duration, format_size};
use std::path::Path;

/// 預覽訊息的內容
pub struct PreviewMessage<'a> {
    pub file_name: &'a str,
    pub size_bytes: u64,
    pub media: &'a MediaInfo,
    pub preview_url: &'a str,
}

impl PreviewMessage<'_> {
    /// Markdown 表格加上預覽圖
    #[must_use]
    pub fn markdown(&self) -> String {
        let mut message = format!("|{}| |\n", self.file_name);
        message.push_str("|---|---:|\n");
        message.push_str(&format!("|File Size| **{}**|\n", format_size(self.size_bytes)));
        message.push_str(&format!(
            "|Duration| **{}**|\n",
            format_duration(self.media.duration_seconds)
        ));
        message.push_str(&format!("|Format| **{}**|\n", self.media.format));
        if let Some(resolution) = self.media.resolution() {
            message.push_str(&format!("|Resolution| **{resolution}**|\n"));
        }
        message.push_str(&format!("\n![{} preview]({})", self.file_name, self.preview_url));
        message
    }

    /// 每個設定好的操作各一個按鈕；沒有操作時不附加 attachments
    #[must_use]
    pub fn into_payload<'n>(
        self,
        operations: impl IntoIterator<Item = &'n String>,
        callback_url: Option<&str>,
        absolute_path: &Path,
    ) -> NotificationPayload {
        let text = self.markdown();

        let actions: Vec<Action> = match callback_url {
            Some(url) => operations
                .into_iter()
                .map(|name| Action {
                    name: name.clone(),
                    integration: Integration {
                        url: url.to_string(),
                        context: ActionContext {
                            command: name.clone(),
                            filename: absolute_path.display().to_string(),
                        },
                    },
                })
                .collect(),
            None => Vec::new(),
        };

        if actions.is_empty() {
            return NotificationPayload::text(text);
        }

        NotificationPayload {
            attachments: Some(vec![Attachment { text, actions }]),
            ..NotificationPayload::default()
        }
    }
}

#[must_use]
pub fn extraction_failed_message(file_name: &str) -> NotificationPayload {
    NotificationPayload::text(format!(
        "### Preview failed\nffmpeg could not generate a preview for **{file_name}**."
    ))
}

#[must_use]
pub fn source_unreadable_message(file_name: &str) -> NotificationPayload {
    NotificationPayload::text(format!(
        "### Preview failed\n**{file_name}** could not be found or read."
    ))
}

#[must_use]
pub fn metadata_failed_message(file_name: &str) -> NotificationPayload {
    NotificationPayload::text(format!(
        "### Preview failed\nffprobe could not read the video details of **{file_name}**."
    ))
}

#[must_use]
pub fn upload_failed_message(file_name: &str) -> NotificationPayload {
    NotificationPayload::text(format!(
        "We ran into a problem uploading the preview for **{file_name}**. Have someone look at this!"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media() -> MediaInfo {
        MediaInfo {
            duration_seconds: 3661.0,
            format: "Matroska / WebM".to_string(),
            width: Some(1920),
            height: Some(1080),
        }
    }

    #[test]
    fn test_markdown_table() {
        let media = media();
        let message = PreviewMessage {
            file_name: "movie.mkv",
            size_bytes: 1536,
            media: &media,
            preview_url: "https://media.example.com/previews/abc.jpg",
        };

        let expected = "|movie.mkv| |\n\
                        |---|---:|\n\
                        |File Size| **1.5 KB**|\n\
                        |Duration| **1 h 1 min**|\n\
                        |Format| **Matroska / WebM**|\n\
                        |Resolution| **1920x1080**|\n\
                        \n\
                        ![movie.mkv preview](https://media.example.com/previews/abc.jpg)";
        assert_eq!(message.markdown(), expected);
    }

    #[test]
    fn test_payload_has_one_button_per_operation() {
        let media = media();
        let operations = vec!["delete".to_string(), "h264".to_string()];
        let payload = PreviewMessage {
            file_name: "movie.mkv",
            size_bytes: 10,
            media: &media,
            preview_url: "https://media.example.com/previews/abc.jpg",
        }
        .into_payload(
            &operations,
            Some("https://hooks.example.com/run"),
            Path::new("/srv/in/movie.mkv"),
        );

        assert!(payload.text.is_none());
        let attachments = payload.attachments.unwrap();
        assert_eq!(attachments.len(), 1);
        assert!(attachments[0].text.contains("|File Size| **10 bytes**|"));

        let actions = &attachments[0].actions;
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[1].name, "h264");
        assert_eq!(actions[1].integration.url, "https://hooks.example.com/run");
        assert_eq!(actions[1].integration.context.command, "h264");
        assert_eq!(actions[1].integration.context.filename, "/srv/in/movie.mkv");
    }

    #[test]
    fn test_payload_without_operations_is_plain_text() {
        let media = media();
        let payload = PreviewMessage {
            file_name: "movie.mkv",
            size_bytes: 10,
            media: &media,
            preview_url: "u",
        }
        .into_payload(&Vec::new(), Some("https://hooks.example.com/run"), Path::new("/m.mkv"));

        assert!(payload.attachments.is_none());
        assert!(payload.text.unwrap().starts_with("|movie.mkv|"));
    }
}
