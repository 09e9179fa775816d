pub mod telegram;

use async_trait::async_trait;

use crate::model::{NotifyError, SignalReport};

pub use telegram::TelegramNotifier;

/// Delivery seam for fired signals. Failures are the caller's problem to
/// log; nothing here retries.
#[async_trait]
pub trait SignalNotifier: Send + Sync {
    async fn deliver(&self, report: &SignalReport) -> Result<(), NotifyError>;
}
