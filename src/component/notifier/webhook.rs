use super::payload::NotificationPayload;
use super::Notify;
use crate::config::{Config, DefaultPayload};
use crate::error::PreviewError;
use chrono::Local;
use log::{debug, error};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderValue};
use std::time::Duration;

/// 透過 Mattermost incoming webhook 發送訊息，不重試
pub struct WebhookNotifier {
    client: Client,
    url: String,
    defaults: DefaultPayload,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>, defaults: DefaultPayload, timeout: Duration) -> Result<Self, PreviewError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            defaults,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, PreviewError> {
        Self::new(
            config.webhook_url()?,
            config.default_payload.clone(),
            Duration::from_secs(config.mattermost.timeout_secs),
        )
    }

    /// 實際送出前的最終內容
    #[must_use]
    pub fn prepare(&self, payload: NotificationPayload) -> NotificationPayload {
        payload
            .merged_with(&self.defaults)
            .with_fallback_text(&Local::now())
    }
}

impl Notify for WebhookNotifier {
    fn notify(&self, payload: NotificationPayload) -> Result<String, PreviewError> {
        let payload = self.prepare(payload);
        debug!("發送通知到 {}: {payload:?}", self.url);

        let result = self
            .client
            .post(&self.url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(&payload)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::text);

        result.map_err(|e| {
            error!("通知發送失敗 {}: {e}", self.url);
            PreviewError::NotifyFailure(e)
        })
    }
}
