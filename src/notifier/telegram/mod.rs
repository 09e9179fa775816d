pub mod format;
pub mod sender;

use async_trait::async_trait;
use reqwest::Client;

use crate::model::{NotifyError, SignalReport};
use crate::notifier::SignalNotifier;

pub struct TelegramNotifier {
    pub bot_token: String,
    pub chat_id: i64,
    pub client: Client,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, chat_id: i64) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("❗ Failed to create HTTP client");
        Self {
            bot_token,
            chat_id,
            client,
        }
    }

    /// Plain-text message, used for the startup banner.
    pub async fn notify_text(&self, text: &str) -> Result<(), NotifyError> {
        sender::send_text(self, text).await
    }
}

#[async_trait]
impl SignalNotifier for TelegramNotifier {
    async fn deliver(&self, report: &SignalReport) -> Result<(), NotifyError> {
        let message = format::render_signal(report);
        sender::send_html(self, &message).await
    }
}
