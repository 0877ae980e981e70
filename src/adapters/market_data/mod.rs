//! Market Data Adapter
//!
//! External aggregator client for token market snapshots:
//! - `DexScreenerClient`: first-listed-pair price, liquidity, volume and
//!   chart link, degrading to an empty snapshot on any failure

mod dexscreener;

pub use dexscreener::{
    DexScreenerClient, DexScreenerConfig, MarketError, PairData, TokenPairsResponse,
    DEFAULT_API_URL, DEFAULT_CHAIN_ID,
};
