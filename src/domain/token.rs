//! Token metadata and market snapshot types.

use serde::{Deserialize, Serialize};

/// Sentinel used when a string field could not be read or decoded.
pub const UNKNOWN_METADATA: &str = "Unknown";

/// Default ERC-20 decimals assumed when the contract does not answer.
pub const DEFAULT_DECIMALS: u8 = 18;

/// On-chain ERC-20 metadata, each field independently defaulted when the
/// corresponding read fails.
///
/// `degraded` lists the wire names of the fields that fell back to their
/// defaults, so consumers can tell real data from placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnchainMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// uint256 rendered as a decimal string
    pub total_supply: String,
    #[serde(default)]
    pub degraded: Vec<String>,
}

impl OnchainMetadata {
    /// True when every field was defaulted.
    pub fn is_fully_degraded(&self) -> bool {
        self.degraded.len() == 4
    }
}

/// Best-effort market data for one token, sourced from the first trading
/// pair the aggregator lists. A fully-empty snapshot is a valid state and is
/// what every failure path produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    #[serde(rename = "price")]
    pub price_usd: Option<String>,
    #[serde(rename = "priceChange24h")]
    pub price_change_24h_pct: Option<f64>,
    #[serde(rename = "liquidity")]
    pub liquidity_usd: f64,
    #[serde(rename = "volume24h")]
    pub volume_24h_usd: f64,
    #[serde(rename = "dex")]
    pub dex_id: Option<String>,
    #[serde(rename = "mainPair")]
    pub pair_label: Option<String>,
    #[serde(rename = "chartUrl")]
    pub chart_url: Option<String>,
}

impl MarketSnapshot {
    pub fn is_empty(&self) -> bool {
        self.price_usd.is_none()
            && self.price_change_24h_pct.is_none()
            && self.liquidity_usd == 0.0
            && self.volume_24h_usd == 0.0
            && self.dex_id.is_none()
            && self.pair_label.is_none()
            && self.chart_url.is_none()
    }
}

/// Links to external explorers for one token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerLinks {
    pub basescan: String,
}

/// The merged token lookup response: on-chain facts plus the market
/// snapshot. Built by the discovery service, served verbatim over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInfo {
    pub address: String,
    pub onchain: OnchainMetadata,
    pub market: MarketSnapshot,
    pub links: ExplorerLinks,
}
