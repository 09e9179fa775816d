use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::time::{Duration, sleep};
use tracing::{debug, error, info, warn};

use crate::analyzer::indicators::IndicatorEngine;
use crate::analyzer::scoring::SignalScorer;
use crate::market::MarketDataProvider;
use crate::model::{AssetCycleData, SignalReport};
use crate::notifier::SignalNotifier;
use crate::registry::{AssetRegistry, RegisteredAsset};

/// The three named delays of the run loop: the pause between provider
/// calls, the sleep between cycles, and the backoff after a faulted cycle.
#[derive(Debug, Clone, Copy)]
pub struct SchedulerDelays {
    pub asset_pacing: Duration,
    pub cycle_cooldown: Duration,
    pub fault_recovery: Duration,
}

/// Drives one sequential analysis pass over the watchlist per cycle,
/// forever. Per-asset failures are isolated inside the cycle; anything
/// that escapes them is caught at the cycle boundary and answered with
/// the recovery delay instead of a crash.
pub struct AnalysisScheduler {
    registry: AssetRegistry,
    provider: Arc<dyn MarketDataProvider>,
    notifier: Arc<dyn SignalNotifier>,
    delays: SchedulerDelays,
    history_window_days: u32,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct CycleSummary {
    analyzed: usize,
    skipped: usize,
    dispatched: usize,
}

enum AssetOutcome {
    Skipped,
    Analyzed {
        dispatched: bool,
        data: AssetCycleData,
    },
}

impl AnalysisScheduler {
    pub fn new(
        registry: AssetRegistry,
        provider: Arc<dyn MarketDataProvider>,
        notifier: Arc<dyn SignalNotifier>,
        delays: SchedulerDelays,
        history_window_days: u32,
    ) -> Self {
        Self {
            registry,
            provider,
            notifier,
            delays,
            history_window_days,
        }
    }

    /// Main loop; never returns. The carry-over map is owned here and
    /// threaded through each cycle explicitly. A faulted cycle keeps the
    /// map it started with.
    pub async fn run(&self) {
        let mut carry: HashMap<String, AssetCycleData> = HashMap::new();
        loop {
            info!("Starting analysis cycle over {} assets...", self.registry.len());
            match AssertUnwindSafe(self.run_cycle(&carry)).catch_unwind().await {
                Ok((summary, next_carry)) => {
                    info!(
                        "Cycle complete: {} analyzed, {} skipped, {} dispatched.",
                        summary.analyzed, summary.skipped, summary.dispatched
                    );
                    carry = next_carry;
                    info!(
                        "Cooling down for {}s before the next cycle...",
                        self.delays.cycle_cooldown.as_secs()
                    );
                    sleep(self.delays.cycle_cooldown).await;
                }
                Err(_) => {
                    error!(
                        "💥 Analysis cycle panicked; retrying in {}s",
                        self.delays.fault_recovery.as_secs()
                    );
                    sleep(self.delays.fault_recovery).await;
                }
            }
        }
    }

    /// One sequential pass over the registry. The pacing delay applies
    /// after every asset, skipped ones included — a failed fetch still
    /// consumed a provider call.
    async fn run_cycle(
        &self,
        carry: &HashMap<String, AssetCycleData>,
    ) -> (CycleSummary, HashMap<String, AssetCycleData>) {
        let mut summary = CycleSummary::default();
        let mut next_carry = HashMap::new();

        for asset in self.registry.iter() {
            match self.analyze_asset(asset, carry.get(&asset.id)).await {
                AssetOutcome::Skipped => summary.skipped += 1,
                AssetOutcome::Analyzed { dispatched, data } => {
                    summary.analyzed += 1;
                    if dispatched {
                        summary.dispatched += 1;
                    }
                    next_carry.insert(asset.id.clone(), data);
                }
            }
            sleep(self.delays.asset_pacing).await;
        }

        (summary, next_carry)
    }

    /// Fetch, analyze and maybe dispatch one asset. Every failure in here
    /// is contained: the worst outcome is a skip or an undelivered signal.
    async fn analyze_asset(
        &self,
        asset: &RegisteredAsset,
        previous: Option<&AssetCycleData>,
    ) -> AssetOutcome {
        let quote = match self.provider.fetch_snapshot(&asset.id).await {
            Ok(q) => q,
            Err(e) => {
                warn!("Skipping {}: snapshot fetch failed: {}", asset.symbol, e);
                return AssetOutcome::Skipped;
            }
        };

        let history = match self
            .provider
            .fetch_history(&asset.id, self.history_window_days)
            .await
        {
            Ok(h) => h,
            Err(e) => {
                warn!("Skipping {}: history fetch failed: {}", asset.symbol, e);
                return AssetOutcome::Skipped;
            }
        };

        if history.is_empty() {
            warn!("Skipping {}: provider returned no price history", asset.symbol);
            return AssetOutcome::Skipped;
        }

        if let Some(prev) = previous {
            debug!(
                "{}: previous cycle saw ${:.4}, now ${:.4}",
                asset.symbol, prev.price, quote.price
            );
        }
        debug!(
            "{}: ${:.4} | 24h volume ${:.0} | 24h change {:.2}%",
            asset.symbol, quote.price, quote.volume_24h, quote.change_24h_pct
        );

        let closes = history.closes();
        let indicators = IndicatorEngine::snapshot(&closes);

        let mut data = AssetCycleData {
            price: quote.price,
            category: None,
        };

        let Some(result) = SignalScorer::generate_signal(&indicators, quote.price) else {
            return AssetOutcome::Analyzed {
                dispatched: false,
                data,
            };
        };
        data.category = Some(result.category);

        let report = SignalReport {
            symbol: asset.symbol.clone(),
            price: quote.price,
            result,
            snapshot: indicators,
        };

        match self.notifier.deliver(&report).await {
            Ok(()) => {
                info!("Signal dispatched for {}: {:?}", asset.symbol, report.result.category);
                AssetOutcome::Analyzed {
                    dispatched: true,
                    data,
                }
            }
            Err(e) => {
                warn!("Delivery failed for {}: {}", asset.symbol, e);
                AssetOutcome::Analyzed {
                    dispatched: false,
                    data,
                }
            }
        }
    }
}
