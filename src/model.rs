// Core structs: price series, indicator snapshot, trade signals
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// One asset's fetched price history, oldest point first.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Close prices in series order.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn last_price(&self) -> Option<f64> {
        self.points.last().map(|p| p.price)
    }
}

/// Current-market quote for one asset, as served by the data provider.
#[derive(Debug, Clone, Copy)]
pub struct AssetSnapshot {
    pub price: f64,
    pub volume_24h: f64,
    pub change_24h_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Macd {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Indicator values derived from exactly one price series. Never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSnapshot {
    pub rsi: f64,
    pub sma20: f64,
    pub sma50: f64,
    pub macd: Macd,
    pub support: f64,
    pub resistance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalCategory {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignalResult {
    pub category: SignalCategory,
    pub strength: i32,
    pub rationale: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

/// Dispatch envelope handed to the notifier for one fired signal.
#[derive(Debug, Clone)]
pub struct SignalReport {
    pub symbol: String,
    pub price: f64,
    pub result: SignalResult,
    pub snapshot: IndicatorSnapshot,
}

/// What one cycle remembers about an asset for the next cycle.
/// Passed into the scheduler explicitly; lost on restart by design.
#[derive(Debug, Clone, Copy)]
pub struct AssetCycleData {
    pub price: f64,
    pub category: Option<SignalCategory>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http request failed: {0}")]
    HttpError(String),
    #[error("provider returned HTTP {0}")]
    BadStatus(u16),
    #[error("malformed market data: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("telegram api error: {0}")]
    ApiError(String),
    #[error("notification channel unreachable")]
    Unreachable,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid {name} override: {value}")]
    BadOverride { name: &'static str, value: String },
}
