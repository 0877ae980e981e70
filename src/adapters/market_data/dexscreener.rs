//! DexScreener market data client.
//!
//! One GET per token lookup. The aggregator is a free public service and
//! fails often; every failure path (transport, bad status, unparseable
//! payload, zero pairs) degrades to an empty [`MarketSnapshot`] so the token
//! lookup can always answer from on-chain data alone.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::MarketSnapshot;
use crate::ports::market::MarketDataSource;

/// DexScreener public API.
pub const DEFAULT_API_URL: &str = "https://api.dexscreener.com";
/// Chain identifier used in chart URLs.
pub const DEFAULT_CHAIN_ID: &str = "base";

const CHART_BASE_URL: &str = "https://dexscreener.com";

/// Errors from the aggregator. These never leave the adapter; the
/// [`MarketDataSource`] impl swallows them into an empty snapshot.
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("aggregator returned status {0}")]
    Status(u16),

    #[error("failed to parse payload: {0}")]
    Parse(String),
}

/// Configuration for the DexScreener client.
#[derive(Debug, Clone)]
pub struct DexScreenerConfig {
    pub api_url: String,
    pub chain_id: String,
    pub timeout: Duration,
}

impl Default for DexScreenerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// DexScreener REST client.
#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    config: DexScreenerConfig,
    http: Client,
}

impl DexScreenerClient {
    pub fn new(config: DexScreenerConfig) -> Result<Self, MarketError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    pub fn with_defaults() -> Result<Self, MarketError> {
        Self::new(DexScreenerConfig::default())
    }

    /// Fetch all trading pairs the aggregator lists for a token.
    pub async fn token_pairs(&self, address: &str) -> Result<TokenPairsResponse, MarketError> {
        let url = format!("{}/latest/dex/tokens/{}", self.config.api_url, address);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketError::Status(status.as_u16()));
        }

        response
            .json::<TokenPairsResponse>()
            .await
            .map_err(|e| MarketError::Parse(e.to_string()))
    }

    /// Build a snapshot from the first listed pair.
    fn snapshot_from_pair(&self, pair: &PairData) -> MarketSnapshot {
        let pair_label = match (&pair.base_token, &pair.quote_token) {
            (Some(base), Some(quote)) => match (&base.symbol, &quote.symbol) {
                (Some(b), Some(q)) => Some(format!("{b}/{q}")),
                _ => None,
            },
            _ => None,
        };
        let chart_url = pair.pair_address.as_ref().map(|pair_address| {
            format!("{CHART_BASE_URL}/{}/{pair_address}", self.config.chain_id)
        });

        MarketSnapshot {
            price_usd: pair.price_usd.clone(),
            price_change_24h_pct: pair.price_change.as_ref().and_then(|c| c.h24),
            liquidity_usd: pair
                .liquidity
                .as_ref()
                .and_then(|l| l.usd)
                .unwrap_or(0.0),
            volume_24h_usd: pair.volume.as_ref().and_then(|v| v.h24).unwrap_or(0.0),
            dex_id: pair.dex_id.clone(),
            pair_label,
            chart_url,
        }
    }
}

#[async_trait]
impl MarketDataSource for DexScreenerClient {
    async fn snapshot(&self, address: &str) -> MarketSnapshot {
        match self.token_pairs(address).await {
            Ok(payload) => match payload.pairs.as_deref().and_then(|pairs| pairs.first()) {
                Some(pair) => self.snapshot_from_pair(pair),
                None => {
                    tracing::debug!(address, "aggregator lists no pairs for token");
                    MarketSnapshot::default()
                }
            },
            Err(e) => {
                tracing::warn!(address, error = %e, "market data lookup failed");
                MarketSnapshot::default()
            }
        }
    }
}

/// `/latest/dex/tokens/{address}` payload.
#[derive(Debug, Default, Deserialize)]
pub struct TokenPairsResponse {
    #[serde(default)]
    pub pairs: Option<Vec<PairData>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairData {
    #[serde(default)]
    pub pair_address: Option<String>,
    #[serde(default)]
    pub dex_id: Option<String>,
    #[serde(default)]
    pub price_usd: Option<String>,
    #[serde(default)]
    pub price_change: Option<PriceChange>,
    #[serde(default)]
    pub liquidity: Option<Liquidity>,
    #[serde(default)]
    pub volume: Option<Volume>,
    #[serde(default)]
    pub base_token: Option<TokenSide>,
    #[serde(default)]
    pub quote_token: Option<TokenSide>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriceChange {
    #[serde(default)]
    pub h24: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Liquidity {
    #[serde(default)]
    pub usd: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Volume {
    #[serde(default)]
    pub h24: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenSide {
    #[serde(default)]
    pub symbol: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAYLOAD: &str = r#"{
        "schemaVersion": "1.0.0",
        "pairs": [{
            "chainId": "base",
            "dexId": "uniswap",
            "pairAddress": "0xPair111",
            "baseToken": {"address": "0xBase", "name": "Test", "symbol": "TEST"},
            "quoteToken": {"address": "0xQuote", "name": "Wrapped Ether", "symbol": "WETH"},
            "priceUsd": "0.004123",
            "priceChange": {"h1": 1.1, "h24": -12.5},
            "liquidity": {"usd": 54321.5, "base": 100.0, "quote": 10.0},
            "volume": {"h24": 98765.25}
        }]
    }"#;

    fn client() -> DexScreenerClient {
        DexScreenerClient::with_defaults().unwrap()
    }

    #[test]
    fn test_parse_full_payload() {
        let payload: TokenPairsResponse = serde_json::from_str(FULL_PAYLOAD).unwrap();
        let pairs = payload.pairs.unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].dex_id.as_deref(), Some("uniswap"));
        assert_eq!(pairs[0].price_usd.as_deref(), Some("0.004123"));
    }

    #[test]
    fn test_snapshot_from_first_pair() {
        let payload: TokenPairsResponse = serde_json::from_str(FULL_PAYLOAD).unwrap();
        let pair = &payload.pairs.unwrap()[0];
        let snapshot = client().snapshot_from_pair(pair);

        assert_eq!(snapshot.price_usd.as_deref(), Some("0.004123"));
        assert_eq!(snapshot.price_change_24h_pct, Some(-12.5));
        assert_eq!(snapshot.liquidity_usd, 54321.5);
        assert_eq!(snapshot.volume_24h_usd, 98765.25);
        assert_eq!(snapshot.dex_id.as_deref(), Some("uniswap"));
        assert_eq!(snapshot.pair_label.as_deref(), Some("TEST/WETH"));
        assert_eq!(
            snapshot.chart_url.as_deref(),
            Some("https://dexscreener.com/base/0xPair111")
        );
    }

    #[test]
    fn test_parse_null_pairs() {
        // the aggregator answers {"pairs": null} for unknown tokens
        let payload: TokenPairsResponse =
            serde_json::from_str(r#"{"schemaVersion":"1.0.0","pairs":null}"#).unwrap();
        assert!(payload.pairs.is_none());
    }

    #[test]
    fn test_parse_empty_pairs() {
        let payload: TokenPairsResponse = serde_json::from_str(r#"{"pairs":[]}"#).unwrap();
        assert!(payload.pairs.unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_from_sparse_pair() {
        let pair: PairData = serde_json::from_str(r#"{"dexId": "aerodrome"}"#).unwrap();
        let snapshot = client().snapshot_from_pair(&pair);

        assert_eq!(snapshot.dex_id.as_deref(), Some("aerodrome"));
        assert!(snapshot.price_usd.is_none());
        assert!(snapshot.pair_label.is_none());
        assert!(snapshot.chart_url.is_none());
        assert_eq!(snapshot.liquidity_usd, 0.0);
        assert_eq!(snapshot.volume_24h_usd, 0.0);
    }

    #[tokio::test]
    async fn test_unreachable_aggregator_degrades_to_empty() {
        let config = DexScreenerConfig {
            api_url: "http://192.0.2.1:1".to_string(),
            chain_id: "base".to_string(),
            timeout: Duration::from_millis(50),
        };
        let client = DexScreenerClient::new(config).unwrap();

        let snapshot = client.snapshot("0x1111111111111111111111111111111111111111").await;
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_config_default() {
        let config = DexScreenerConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.chain_id, DEFAULT_CHAIN_ID);
    }
}
