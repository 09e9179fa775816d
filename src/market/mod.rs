pub mod coingecko;
pub mod traits;

pub use coingecko::CoinGeckoProvider;
pub use traits::MarketDataProvider;
