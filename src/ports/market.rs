//! Market data port.

use async_trait::async_trait;

use crate::domain::MarketSnapshot;

/// Best-effort market data for a token address.
///
/// The method is infallible by construction: implementations swallow every
/// upstream failure (network, payload, zero pairs) and hand back an empty
/// snapshot, so a token lookup can always complete on on-chain data alone.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn snapshot(&self, address: &str) -> MarketSnapshot;
}
