//! Discovery service: the composition root for the two public operations.
//!
//! Every upstream touched here is unreliable by nature, so the service
//! degrades instead of failing: a token lookup succeeds with sentinel
//! defaults even when both the node and the aggregator are down. The only
//! user-facing error is a malformed address, rejected before any network
//! call goes out.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::adapters::abi;
use crate::domain::{
    is_valid_address, DiscoveredContract, ExplorerLinks, MarketSnapshot, OnchainMetadata,
    ScanState, TokenInfo, DEFAULT_DECIMALS, UNKNOWN_METADATA,
};
use crate::ports::chain::ChainRpc;
use crate::ports::market::MarketDataSource;

/// Default block explorer for links.
pub const DEFAULT_EXPLORER_URL: &str = "https://basescan.org";

/// Service-level errors, mapped to HTTP statuses at the server boundary.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid contract address")]
    InvalidAddress,

    #[error("upstream pipeline failure: {0}")]
    Upstream(String),
}

/// `GET /discoveries` response body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryListing {
    pub contracts: Vec<DiscoveredContract>,
    pub last_block: u64,
}

/// Composes the scan state, the RPC gateway and the market enricher.
pub struct DiscoveryService {
    rpc: Arc<dyn ChainRpc>,
    market: Arc<dyn MarketDataSource>,
    state: Arc<RwLock<ScanState>>,
    explorer_url: String,
}

impl DiscoveryService {
    pub fn new(
        rpc: Arc<dyn ChainRpc>,
        market: Arc<dyn MarketDataSource>,
        state: Arc<RwLock<ScanState>>,
        explorer_url: impl Into<String>,
    ) -> Self {
        Self {
            rpc,
            market,
            state,
            explorer_url: explorer_url.into(),
        }
    }

    /// Current cache contents plus the cursor. Reads only; the periodic
    /// worker owns all scanning.
    pub async fn recent_discoveries(&self) -> DiscoveryListing {
        let state = self.state.read().await;
        DiscoveryListing {
            contracts: state.cache.snapshot(),
            last_block: state.cursor,
        }
    }

    /// Merged on-chain + market lookup for one token.
    ///
    /// The four metadata reads run concurrently and default independently;
    /// which ones defaulted is recorded in `onchain.degraded`.
    pub async fn token_info(&self, address: &str) -> Result<TokenInfo, ServiceError> {
        if !is_valid_address(address) {
            return Err(ServiceError::InvalidAddress);
        }

        let (name_res, symbol_res, decimals_res, supply_res) = tokio::join!(
            self.rpc.call(address, abi::SELECTOR_NAME),
            self.rpc.call(address, abi::SELECTOR_SYMBOL),
            self.rpc.call(address, abi::SELECTOR_DECIMALS),
            self.rpc.call(address, abi::SELECTOR_TOTAL_SUPPLY),
        );

        let mut degraded = Vec::new();
        let name = match name_res {
            Ok(raw) => abi::decode_string(&raw),
            Err(e) => {
                tracing::debug!(address, error = %e, "name() read failed");
                degraded.push("name".to_string());
                UNKNOWN_METADATA.to_string()
            }
        };
        let symbol = match symbol_res {
            Ok(raw) => abi::decode_string(&raw),
            Err(e) => {
                tracing::debug!(address, error = %e, "symbol() read failed");
                degraded.push("symbol".to_string());
                UNKNOWN_METADATA.to_string()
            }
        };
        let decimals = match decimals_res {
            Ok(raw) => abi::decode_uint(&raw).min(u64::from(u8::MAX)) as u8,
            Err(e) => {
                tracing::debug!(address, error = %e, "decimals() read failed");
                degraded.push("decimals".to_string());
                DEFAULT_DECIMALS
            }
        };
        let total_supply = match supply_res {
            Ok(raw) => abi::decode_uint_dec(&raw),
            Err(e) => {
                tracing::debug!(address, error = %e, "totalSupply() read failed");
                degraded.push("totalSupply".to_string());
                "0".to_string()
            }
        };

        let market = self.market.snapshot(address).await;

        Ok(TokenInfo {
            address: address.to_string(),
            onchain: OnchainMetadata {
                name,
                symbol,
                decimals,
                total_supply,
                degraded,
            },
            market,
            links: ExplorerLinks {
                basescan: format!("{}/address/{}", self.explorer_url, address),
            },
        })
    }

    /// Convenience for callers that only need the market half.
    pub async fn market_snapshot(&self, address: &str) -> Result<MarketSnapshot, ServiceError> {
        if !is_valid_address(address) {
            return Err(ServiceError::InvalidAddress);
        }
        Ok(self.market.snapshot(address).await)
    }
}
