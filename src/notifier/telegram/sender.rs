use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::model::NotifyError;
use crate::notifier::telegram::TelegramNotifier;

/// Sends a plain-text message via Telegram.
pub async fn send_text(notifier: &TelegramNotifier, text: &str) -> Result<(), NotifyError> {
    let params = [
        ("chat_id", notifier.chat_id.to_string()),
        ("text", text.to_string()),
    ];
    post_message(notifier, &params).await
}

/// Sends an HTML-formatted message via Telegram.
pub async fn send_html(notifier: &TelegramNotifier, text: &str) -> Result<(), NotifyError> {
    info!("📤 Sending Telegram message:\n{}", text);
    let params = [
        ("chat_id", notifier.chat_id.to_string()),
        ("text", text.to_string()),
        ("parse_mode", "HTML".to_string()),
    ];
    post_message(notifier, &params).await
}

async fn post_message(
    notifier: &TelegramNotifier,
    params: &[(&str, String)],
) -> Result<(), NotifyError> {
    let url = format!("https://api.telegram.org/bot{}/sendMessage", notifier.bot_token);
    let response = match timeout(
        Duration::from_secs(10),
        notifier.client.post(&url).form(params).send(),
    )
    .await
    {
        Ok(Ok(resp)) => resp,
        Ok(Err(e)) => {
            warn!("❌ Telegram send() failed: {:?}", e);
            return Err(NotifyError::ApiError(format!("Send failed: {}", e)));
        }
        Err(_) => {
            warn!("⏳ Telegram send() timed out");
            return Err(NotifyError::Unreachable);
        }
    };

    let status = response.status();
    let body = response.text().await.unwrap_or_else(|_| "unknown".into());
    if !status.is_success() {
        warn!("❌ Telegram API responded [{}]: {}", status, body);
        return Err(NotifyError::ApiError(format!("HTTP {}: {}", status, body)));
    }
    info!("✅ Telegram response [{}]: {}", status, body);
    Ok(())
}
