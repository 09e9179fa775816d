use crate::model::{IndicatorSnapshot, Macd};

/// Pure indicator math over a close-price series, oldest price first.
/// Every function assumes a non-empty slice; the scheduler skips assets
/// whose fetched history is empty before anything here runs.
pub struct IndicatorEngine;

impl IndicatorEngine {
    pub const RSI_PERIOD: usize = 14;
    pub const SMA_SHORT: usize = 20;
    pub const SMA_LONG: usize = 50;
    pub const MACD_FAST: usize = 12;
    pub const MACD_SLOW: usize = 26;
    pub const BAND_WINDOW: usize = 20;

    /// RSI over a trailing-window average of gains and losses (plain
    /// averages, not Wilder smoothing). Neutral 50.0 when the series is
    /// too short, 100.0 when the window holds no losses.
    pub fn rsi(prices: &[f64], period: usize) -> f64 {
        if prices.len() < period + 1 {
            return 50.0;
        }

        let deltas: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();
        let tail = &deltas[deltas.len() - period..];

        let avg_gain =
            tail.iter().map(|&d| if d > 0.0 { d } else { 0.0 }).sum::<f64>() / period as f64;
        let avg_loss =
            tail.iter().map(|&d| if d < 0.0 { -d } else { 0.0 }).sum::<f64>() / period as f64;

        if avg_loss == 0.0 {
            return 100.0;
        }

        let rs = avg_gain / avg_loss;
        round2(100.0 - 100.0 / (1.0 + rs))
    }

    /// Mean of the trailing `period` prices; a shorter series degrades to
    /// the mean of everything instead of erroring.
    pub fn sma(prices: &[f64], period: usize) -> f64 {
        if prices.len() < period {
            return mean(prices);
        }
        mean(&prices[prices.len() - period..])
    }

    /// EMA seeded from the first price and smoothed across the entire
    /// series, a cheap stand-in for the canonical SMA-seeded warm-up.
    /// Short series degrade to the plain mean.
    pub fn ema(prices: &[f64], period: usize) -> f64 {
        if prices.len() < period {
            return mean(prices);
        }

        let k = 2.0 / (period as f64 + 1.0);
        let mut ema = prices[0];
        for &price in &prices[1..] {
            ema = price * k + ema * (1.0 - k);
        }
        ema
    }

    /// Simplified MACD: the signal line is a fixed 0.8 scaling of the MACD
    /// line standing in for the canonical 9-period EMA. Whether the
    /// canonical form was ever intended is unknowable at this point, so
    /// the scaling stays. Zeroed triple below 26 points.
    pub fn macd(prices: &[f64]) -> Macd {
        if prices.len() < Self::MACD_SLOW {
            return Macd {
                line: 0.0,
                signal: 0.0,
                histogram: 0.0,
            };
        }

        let line = Self::ema(prices, Self::MACD_FAST) - Self::ema(prices, Self::MACD_SLOW);
        let signal = line * 0.8;
        let histogram = line - signal;

        Macd {
            line: round4(line),
            signal: round4(signal),
            histogram: round4(histogram),
        }
    }

    /// Support and resistance as the trailing-window extremes, or a ±5%
    /// band around the latest price when fewer than 20 points exist.
    /// Returns `(support, resistance)`.
    pub fn support_resistance(prices: &[f64]) -> (f64, f64) {
        let last = prices[prices.len() - 1];
        if prices.len() < Self::BAND_WINDOW {
            return (last * 0.95, last * 1.05);
        }

        let window = &prices[prices.len() - Self::BAND_WINDOW..];
        let support = window.iter().copied().fold(f64::INFINITY, f64::min);
        let resistance = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (round4(support), round4(resistance))
    }

    /// One full indicator snapshot for a price series.
    pub fn snapshot(prices: &[f64]) -> IndicatorSnapshot {
        let (support, resistance) = Self::support_resistance(prices);
        IndicatorSnapshot {
            rsi: Self::rsi(prices, Self::RSI_PERIOD),
            sma20: Self::sma(prices, Self::SMA_SHORT),
            sma50: Self::sma(prices, Self::SMA_LONG),
            macd: Self::macd(prices),
            support,
            resistance,
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
