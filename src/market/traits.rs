use async_trait::async_trait;

use crate::model::{AssetSnapshot, FetchError, PriceSeries};

/// Seam between the scheduler and the market-data backend, so cycles can
/// be tested against canned data.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Current quote for one asset.
    async fn fetch_snapshot(&self, asset_id: &str) -> Result<AssetSnapshot, FetchError>;

    /// Price history covering the trailing `window_days`, oldest first.
    async fn fetch_history(&self, asset_id: &str, window_days: u32)
        -> Result<PriceSeries, FetchError>;
}
