mod analyzer;
mod config;
mod market;
mod model;
mod notifier;
mod registry;
mod scheduler;

use std::sync::Arc;

use tracing::{error, info, warn};

use config::load_config;
use market::CoinGeckoProvider;
use notifier::TelegramNotifier;
use notifier::telegram::format;
use registry::AssetRegistry;
use scheduler::{AnalysisScheduler, SchedulerDelays};
use tokio::time::Duration;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Log any panic before the scheduler's supervisor absorbs it
    std::panic::set_hook(Box::new(|panic_info| {
        error!("😱 Panic occurred: {:?}", panic_info);
    }));

    let config = match load_config("config.json") {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let registry = AssetRegistry::from_config(&config.assets);
    info!("Watching {} assets: {}", registry.len(), registry.symbols().join(", "));

    let provider = Arc::new(CoinGeckoProvider::new());
    let notifier = Arc::new(TelegramNotifier::new(
        config.telegram_bot_token.clone(),
        config.telegram_chat_id,
    ));

    info!("Sending startup message...");
    let banner = format::render_banner(&registry.symbols(), config.cycle_cooldown_seconds);
    if let Err(e) = notifier.notify_text(&banner).await {
        warn!("Startup notification failed: {:?}", e);
    }

    let delays = SchedulerDelays {
        asset_pacing: Duration::from_secs(config.asset_pacing_seconds),
        cycle_cooldown: Duration::from_secs(config.cycle_cooldown_seconds),
        fault_recovery: Duration::from_secs(config.fault_recovery_seconds),
    };

    let scheduler = AnalysisScheduler::new(
        registry,
        provider,
        notifier,
        delays,
        config.history_window_days,
    );

    info!("🚀 Coin Sentinel started!");
    scheduler.run().await;
}
