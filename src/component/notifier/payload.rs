use crate::config::DefaultPayload;
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// 送往 incoming webhook 的 JSON 內容
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub text: String,
    pub actions: Vec<Action>,
}

/// 訊息按鈕；按下後 Mattermost 會把 `integration.context` POST 到 `integration.url`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    pub integration: Integration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    pub url: String,
    pub context: ActionContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionContext {
    pub command: String,
    pub filename: String,
}

impl NotificationPayload {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// 套用預設欄位；請求本身有設定的欄位優先
    #[must_use]
    pub fn merged_with(mut self, defaults: &DefaultPayload) -> Self {
        if self.channel.is_none() {
            self.channel.clone_from(&defaults.channel);
        }
        if self.username.is_none() {
            self.username.clone_from(&defaults.username);
        }
        if self.icon_url.is_none() {
            self.icon_url.clone_from(&defaults.icon_url);
        }
        self
    }

    /// text 與 attachments 都沒有時補上觸發時間
    #[must_use]
    pub fn with_fallback_text<Tz>(mut self, now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        if self.text.is_none() && self.attachments.is_none() {
            self.text = Some(format!(
                "This was triggered on: {}",
                now.format(TIMESTAMP_FORMAT)
            ));
        }
        self
    }
}
