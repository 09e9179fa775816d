use crate::config::AssetConfig;

/// A single watched asset: provider id plus display symbol.
#[derive(Debug, Clone)]
pub struct RegisteredAsset {
    pub id: String,
    pub symbol: String,
}

/// Immutable, ordered watchlist built once at startup.
#[derive(Debug, Clone)]
pub struct AssetRegistry {
    assets: Vec<RegisteredAsset>,
}

impl AssetRegistry {
    pub fn new(assets: Vec<RegisteredAsset>) -> Self {
        Self { assets }
    }

    /// Builds the registry from config, falling back to the default
    /// watchlist when the config lists no assets.
    pub fn from_config(assets: &[AssetConfig]) -> Self {
        if assets.is_empty() {
            return Self::default_watchlist();
        }
        Self::new(
            assets
                .iter()
                .map(|a| RegisteredAsset {
                    id: a.id.clone(),
                    symbol: a.symbol.clone(),
                })
                .collect(),
        )
    }

    /// The ten majors monitored out of the box.
    pub fn default_watchlist() -> Self {
        let assets = [
            ("bitcoin", "BTC"),
            ("ethereum", "ETH"),
            ("binancecoin", "BNB"),
            ("cardano", "ADA"),
            ("polygon", "MATIC"),
            ("dogecoin", "DOGE"),
            ("solana", "SOL"),
            ("chainlink", "LINK"),
            ("avalanche-2", "AVAX"),
            ("polkadot", "DOT"),
        ];
        Self::new(
            assets
                .iter()
                .map(|(id, symbol)| RegisteredAsset {
                    id: (*id).into(),
                    symbol: (*symbol).into(),
                })
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredAsset> {
        self.assets.iter()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Display symbols in watchlist order.
    pub fn symbols(&self) -> Vec<&str> {
        self.assets.iter().map(|a| a.symbol.as_str()).collect()
    }
}
