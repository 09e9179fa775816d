use chrono::Utc;
use tracing::debug;

use crate::model::{IndicatorSnapshot, SignalCategory, SignalResult};

/// Turns one indicator snapshot plus the live price into a categorical
/// signal, or nothing at all when no rule has anything to say.
pub struct SignalScorer;

impl SignalScorer {
    /// Additive scoring: each indicator family contributes at most once.
    /// Returns `None` iff the rationale list ends up empty — a zero
    /// strength with a support/resistance note still yields a HOLD,
    /// which is exactly the asymmetry the notifier relies on to stay
    /// quiet on uneventful assets.
    pub fn generate_signal(snapshot: &IndicatorSnapshot, price: f64) -> Option<SignalResult> {
        let mut rationale: Vec<String> = Vec::new();
        let mut strength: i32 = 0;

        if snapshot.rsi < 30.0 {
            rationale.push("🟢 RSI Oversold - Potential BUY".into());
            strength += 2;
        } else if snapshot.rsi > 70.0 {
            rationale.push("🔴 RSI Overbought - Potential SELL".into());
            strength -= 2;
        }

        if snapshot.sma20 > snapshot.sma50 && price > snapshot.sma20 {
            rationale.push("🟢 Bullish MA Cross".into());
            strength += 1;
        } else if snapshot.sma20 < snapshot.sma50 && price < snapshot.sma20 {
            rationale.push("🔴 Bearish MA Cross".into());
            strength -= 1;
        }

        if snapshot.macd.line > snapshot.macd.signal && snapshot.macd.line > 0.0 {
            rationale.push("🟢 MACD Bullish".into());
            strength += 1;
        } else if snapshot.macd.line < snapshot.macd.signal && snapshot.macd.line < 0.0 {
            rationale.push("🔴 MACD Bearish".into());
            strength -= 1;
        }

        if price <= snapshot.support * 1.02 {
            rationale.push(format!("🟡 Near Support Level: ${}", snapshot.support));
        } else if price >= snapshot.resistance * 0.98 {
            rationale.push(format!("🟡 Near Resistance Level: ${}", snapshot.resistance));
        }

        if rationale.is_empty() {
            return None;
        }

        let category = Self::categorize(strength);
        debug!("Scored strength {} -> {:?}", strength, category);

        Some(SignalResult {
            category,
            strength,
            rationale,
            generated_at: Utc::now(),
        })
    }

    /// Priority mapping on the final strength; ties resolve toward the
    /// stronger category.
    fn categorize(strength: i32) -> SignalCategory {
        if strength >= 2 {
            SignalCategory::StrongBuy
        } else if strength >= 1 {
            SignalCategory::Buy
        } else if strength <= -2 {
            SignalCategory::StrongSell
        } else if strength <= -1 {
            SignalCategory::Sell
        } else {
            SignalCategory::Hold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::indicators::IndicatorEngine;
    use crate::model::Macd;

    /// A snapshot no rule reacts to: RSI neutral, MAs equal, MACD flat,
    /// bands far from the reference price of 100.
    fn quiet_snapshot() -> IndicatorSnapshot {
        IndicatorSnapshot {
            rsi: 50.0,
            sma20: 100.0,
            sma50: 100.0,
            macd: Macd {
                line: 0.0,
                signal: 0.0,
                histogram: 0.0,
            },
            support: 80.0,
            resistance: 120.0,
        }
    }

    #[test]
    fn quiet_snapshot_is_suppressed() {
        assert!(SignalScorer::generate_signal(&quiet_snapshot(), 100.0).is_none());
    }

    #[test]
    fn oversold_rsi_scores_plus_two() {
        let snapshot = IndicatorSnapshot {
            rsi: 25.0,
            ..quiet_snapshot()
        };
        let result = SignalScorer::generate_signal(&snapshot, 100.0).unwrap();
        assert_eq!(result.strength, 2);
        assert_eq!(result.category, SignalCategory::StrongBuy);
        assert!(result.rationale[0].contains("Oversold"));
    }

    #[test]
    fn overbought_rsi_scores_minus_two() {
        let snapshot = IndicatorSnapshot {
            rsi: 75.0,
            ..quiet_snapshot()
        };
        let result = SignalScorer::generate_signal(&snapshot, 100.0).unwrap();
        assert_eq!(result.strength, -2);
        assert_eq!(result.category, SignalCategory::StrongSell);
    }

    #[test]
    fn bullish_ma_cross_needs_price_above_the_short_average() {
        let snapshot = IndicatorSnapshot {
            sma20: 102.0,
            sma50: 98.0,
            ..quiet_snapshot()
        };
        // Price below MA20: the cross alone is not enough.
        assert!(SignalScorer::generate_signal(&snapshot, 101.0).is_none());

        let result = SignalScorer::generate_signal(&snapshot, 103.0).unwrap();
        assert_eq!(result.strength, 1);
        assert_eq!(result.category, SignalCategory::Buy);
    }

    #[test]
    fn bearish_ma_cross_scores_minus_one() {
        let snapshot = IndicatorSnapshot {
            sma20: 98.0,
            sma50: 102.0,
            support: 50.0,
            ..quiet_snapshot()
        };
        let result = SignalScorer::generate_signal(&snapshot, 97.0).unwrap();
        assert_eq!(result.strength, -1);
        assert_eq!(result.category, SignalCategory::Sell);
    }

    #[test]
    fn macd_rules_require_a_signed_line() {
        let bullish = IndicatorSnapshot {
            macd: Macd {
                line: 1.5,
                signal: 1.2,
                histogram: 0.3,
            },
            ..quiet_snapshot()
        };
        let result = SignalScorer::generate_signal(&bullish, 100.0).unwrap();
        assert_eq!(result.strength, 1);

        // Line above signal but negative: no bullish note.
        let ambiguous = IndicatorSnapshot {
            macd: Macd {
                line: -0.5,
                signal: -0.8,
                histogram: 0.3,
            },
            ..quiet_snapshot()
        };
        assert!(SignalScorer::generate_signal(&ambiguous, 100.0).is_none());

        let bearish = IndicatorSnapshot {
            macd: Macd {
                line: -1.5,
                signal: -1.2,
                histogram: -0.3,
            },
            ..quiet_snapshot()
        };
        let result = SignalScorer::generate_signal(&bearish, 100.0).unwrap();
        assert_eq!(result.strength, -1);
    }

    #[test]
    fn proximity_notes_hold_without_strength() {
        let snapshot = IndicatorSnapshot {
            support: 99.0,
            ..quiet_snapshot()
        };
        let result = SignalScorer::generate_signal(&snapshot, 100.0).unwrap();
        assert_eq!(result.strength, 0);
        assert_eq!(result.category, SignalCategory::Hold);
        assert_eq!(result.rationale.len(), 1);
        assert!(result.rationale[0].contains("Support"));
    }

    #[test]
    fn support_note_shadows_the_resistance_note() {
        // Bands so tight the price is near both; only support is noted.
        let snapshot = IndicatorSnapshot {
            support: 100.0,
            resistance: 100.0,
            ..quiet_snapshot()
        };
        let result = SignalScorer::generate_signal(&snapshot, 100.0).unwrap();
        assert_eq!(result.rationale.len(), 1);
        assert!(result.rationale[0].contains("Support"));
    }

    #[test]
    fn near_resistance_alone_is_a_hold() {
        let snapshot = IndicatorSnapshot {
            resistance: 101.0,
            ..quiet_snapshot()
        };
        let result = SignalScorer::generate_signal(&snapshot, 100.0).unwrap();
        assert_eq!(result.category, SignalCategory::Hold);
        assert!(result.rationale[0].contains("Resistance"));
    }

    #[test]
    fn strength_maps_to_categories_in_priority_order() {
        assert_eq!(SignalScorer::categorize(3), SignalCategory::StrongBuy);
        assert_eq!(SignalScorer::categorize(2), SignalCategory::StrongBuy);
        assert_eq!(SignalScorer::categorize(1), SignalCategory::Buy);
        assert_eq!(SignalScorer::categorize(0), SignalCategory::Hold);
        assert_eq!(SignalScorer::categorize(-1), SignalCategory::Sell);
        assert_eq!(SignalScorer::categorize(-2), SignalCategory::StrongSell);
        assert_eq!(SignalScorer::categorize(-4), SignalCategory::StrongSell);
    }

    #[test]
    fn flat_series_saturates_rsi_and_sells() {
        // 30 identical closes: RSI hits the avg-loss-zero branch (100.0),
        // firing overbought, and the price sits on the support band.
        let prices = vec![100.0; 30];
        let snapshot = IndicatorEngine::snapshot(&prices);
        assert_eq!(snapshot.rsi, 100.0);
        assert_eq!(snapshot.support, 100.0);
        assert_eq!(snapshot.resistance, 100.0);

        let result = SignalScorer::generate_signal(&snapshot, 100.0).unwrap();
        assert_eq!(result.strength, -2);
        assert_eq!(result.category, SignalCategory::StrongSell);
        assert_eq!(result.rationale.len(), 2);
    }

    #[test]
    fn zig_zag_uptrend_is_a_strong_buy() {
        // Two steps up, one step down: the pullbacks keep RSI moderate
        // (about 65) while MAs and MACD both read bullish.
        let mut prices = vec![100.0];
        for i in 1..60 {
            let delta = if i % 3 == 0 { -4.0 } else { 3.0 };
            prices.push(prices[i - 1] + delta);
        }
        let snapshot = IndicatorEngine::snapshot(&prices);
        let price = *prices.last().unwrap();

        assert!(snapshot.rsi < 70.0, "rsi should stay moderate: {}", snapshot.rsi);
        assert!(snapshot.sma20 > snapshot.sma50);
        assert!(snapshot.macd.line > 0.0);

        let result = SignalScorer::generate_signal(&snapshot, price).unwrap();
        assert!(result.strength >= 2, "strength was {}", result.strength);
        assert_eq!(result.category, SignalCategory::StrongBuy);
    }

    #[test]
    fn identical_inputs_score_identically() {
        let prices: Vec<f64> = (0..60).map(|i| 200.0 + (f64::from(i) * 0.7).sin() * 15.0).collect();
        let a = IndicatorEngine::snapshot(&prices);
        let b = IndicatorEngine::snapshot(&prices);
        assert_eq!(a, b);

        let first = SignalScorer::generate_signal(&a, 200.0);
        let second = SignalScorer::generate_signal(&b, 200.0);
        match (first, second) {
            (None, None) => {}
            (Some(x), Some(y)) => {
                assert_eq!(x.category, y.category);
                assert_eq!(x.strength, y.strength);
                assert_eq!(x.rationale, y.rationale);
            }
            _ => panic!("one run produced a signal and the other did not"),
        }
    }
}
