use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::market::traits::MarketDataProvider;
use crate::model::{AssetSnapshot, FetchError, PricePoint, PriceSeries};

const COINGECKO_BASE: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko v3 client. The free tier needs no API key; the pacing delay
/// between assets keeps us under its rate limit.
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct CoinResponse {
    market_data: MarketData,
}

#[derive(Debug, Deserialize)]
struct MarketData {
    current_price: UsdQuote,
    total_volume: UsdQuote,
    price_change_percentage_24h: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct UsdQuote {
    usd: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<(i64, f64)>,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        Self::with_base_url(COINGECKO_BASE.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .user_agent("coin-sentinel/0.1")
            .build()
            .expect("❗ Failed to create HTTP client");
        Self { client, base_url }
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
    async fn fetch_snapshot(&self, asset_id: &str) -> Result<AssetSnapshot, FetchError> {
        let url = format!("{}/coins/{}", self.base_url, asset_id);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("localization", "false"),
                ("tickers", "false"),
                ("community_data", "false"),
                ("developer_data", "false"),
            ])
            .send()
            .await
            .map_err(|e| FetchError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::BadStatus(response.status().as_u16()));
        }

        let coin: CoinResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        let price = coin
            .market_data
            .current_price
            .usd
            .ok_or_else(|| FetchError::Malformed(format!("{asset_id}: no USD price")))?;

        let snapshot = AssetSnapshot {
            price,
            volume_24h: coin.market_data.total_volume.usd.unwrap_or(0.0),
            change_24h_pct: coin.market_data.price_change_percentage_24h.unwrap_or(0.0),
        };
        debug!("Snapshot for {}: {:?}", asset_id, snapshot);
        Ok(snapshot)
    }

    async fn fetch_history(
        &self,
        asset_id: &str,
        window_days: u32,
    ) -> Result<PriceSeries, FetchError> {
        let url = format!("{}/coins/{}/market_chart", self.base_url, asset_id);
        // Hourly resolution is only available for short windows.
        let interval = if window_days <= 7 { "hourly" } else { "daily" };
        let response = self
            .client
            .get(&url)
            .query(&[
                ("vs_currency", "usd"),
                ("days", &window_days.to_string()),
                ("interval", interval),
            ])
            .send()
            .await
            .map_err(|e| FetchError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::BadStatus(response.status().as_u16()));
        }

        let chart: MarketChartResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        let mut points = Vec::with_capacity(chart.prices.len());
        for (millis, price) in chart.prices {
            let timestamp = DateTime::from_timestamp_millis(millis)
                .ok_or_else(|| FetchError::Malformed(format!("bad timestamp {millis}")))?;
            points.push(PricePoint { timestamp, price });
        }

        debug!("History for {}: {} points", asset_id, points.len());
        Ok(PriceSeries::new(points))
    }
}
