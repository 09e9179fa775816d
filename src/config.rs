use serde::Deserialize;
use std::env;
use std::fs;

use crate::model::ConfigError;

#[derive(Debug, Clone, Deserialize)]
pub struct AssetConfig {
    /// Provider asset id, e.g. "bitcoin".
    pub id: String,
    /// Display symbol, e.g. "BTC".
    pub symbol: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub telegram_bot_token: String,
    pub telegram_chat_id: i64,
    /// Watchlist; empty means the built-in default watchlist.
    #[serde(default)]
    pub assets: Vec<AssetConfig>,
    #[serde(default = "default_history_window_days")]
    pub history_window_days: u32,
    #[serde(default = "default_asset_pacing_seconds")]
    pub asset_pacing_seconds: u64,
    #[serde(default = "default_cycle_cooldown_seconds")]
    pub cycle_cooldown_seconds: u64,
    #[serde(default = "default_fault_recovery_seconds")]
    pub fault_recovery_seconds: u64,
}

fn default_history_window_days() -> u32 {
    30
}

fn default_asset_pacing_seconds() -> u64 {
    2
}

fn default_cycle_cooldown_seconds() -> u64 {
    900
}

fn default_fault_recovery_seconds() -> u64 {
    60
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: AppConfig = serde_json::from_str(&content)?;
    apply_overrides(
        &mut config,
        env::var("TELEGRAM_BOT_TOKEN").ok(),
        env::var("TELEGRAM_CHAT_ID").ok(),
    )?;
    Ok(config)
}

/// Telegram credentials may come from the environment instead of the config
/// file, so deployments can keep secrets out of it.
fn apply_overrides(
    config: &mut AppConfig,
    token: Option<String>,
    chat_id: Option<String>,
) -> Result<(), ConfigError> {
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        config.telegram_bot_token = token;
    }
    if let Some(raw) = chat_id.filter(|c| !c.is_empty()) {
        config.telegram_chat_id = raw.parse().map_err(|_| ConfigError::BadOverride {
            name: "TELEGRAM_CHAT_ID",
            value: raw,
        })?;
    }
    Ok(())
}
