use crate::config::WatchConfig;
use crate::domain::ports::Notifier;
use crate::utils::error::{ErrorKind, Result, ResultExt, WatchError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// Posts plain-text messages through the Bot API `sendMessage` method.
pub struct TelegramNotifier {
    client: Client,
    endpoint: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(config: &WatchConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        let endpoint = format!(
            "{}/bot{}/sendMessage",
            config.settings.telegram_api_base.trim_end_matches('/'),
            config.bot_token
        );

        Ok(Self {
            client,
            endpoint,
            chat_id: config.chat_id.clone(),
        })
    }

    async fn post_message(&self, text: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("chat_id", self.chat_id.as_str()), ("text", text)])
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(WatchError::NotificationError {
                message: format!("unexpected HTTP status: {}", status),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        // The endpoint embeds the token, so it is never logged.
        tracing::debug!("Sending notification to chat {}", self.chat_id);
        self.post_message(text)
            .await
            .context(ErrorKind::Notification, "Error sending Telegram message")?;
        tracing::info!("Notification delivered");
        Ok(())
    }
}
