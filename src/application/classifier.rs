//! Contract classifier.
//!
//! Runs an ordered chain of speculative read-only probes against a freshly
//! deployed contract. A probe that fails (revert, transport error,
//! undecodable payload) simply yields nothing; the first probe that yields a
//! classification wins and later probes are skipped, which keeps the call
//! count low for the common case of non-token deployments.

use std::sync::Arc;

use crate::adapters::abi;
use crate::domain::ContractType;
use crate::ports::chain::ChainRpc;

/// Token id used for the `tokenURI` probe; any minted id works, 1 is the
/// conventional first mint.
const NFT_PROBE_TOKEN_ID: u64 = 1;

/// Result of classifying one contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub contract_type: ContractType,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

impl Classification {
    fn token(name: String, symbol: String) -> Self {
        Self {
            contract_type: ContractType::Token,
            name: Some(name),
            symbol: Some(symbol),
        }
    }

    fn nft() -> Self {
        Self {
            contract_type: ContractType::Nft,
            name: None,
            symbol: None,
        }
    }

    fn unknown() -> Self {
        Self {
            contract_type: ContractType::Unknown,
            name: None,
            symbol: None,
        }
    }
}

/// Ordered probe chain over untrusted bytecode. Never fails; the fallback
/// is always [`ContractType::Unknown`].
pub struct ContractClassifier {
    rpc: Arc<dyn ChainRpc>,
}

impl ContractClassifier {
    pub fn new(rpc: Arc<dyn ChainRpc>) -> Self {
        Self { rpc }
    }

    pub async fn classify(&self, address: &str) -> Classification {
        if let Some(classification) = self.probe_erc20(address).await {
            return classification;
        }
        if let Some(classification) = self.probe_erc721(address).await {
            return classification;
        }
        Classification::unknown()
    }

    /// ERC-20 probe: both `name()` and `symbol()` must answer with a
    /// decodable string.
    async fn probe_erc20(&self, address: &str) -> Option<Classification> {
        let name = self.read_string(address, abi::SELECTOR_NAME).await?;
        let symbol = self.read_string(address, abi::SELECTOR_SYMBOL).await?;
        Some(Classification::token(name, symbol))
    }

    /// ERC-721 probe: any answer to `tokenURI(1)` counts, the payload is
    /// not inspected.
    async fn probe_erc721(&self, address: &str) -> Option<Classification> {
        let calldata = abi::token_uri_calldata(NFT_PROBE_TOKEN_ID);
        match self.rpc.call(address, &calldata).await {
            Ok(_) => Some(Classification::nft()),
            Err(e) => {
                tracing::trace!(address, error = %e, "tokenURI probe failed");
                None
            }
        }
    }

    async fn read_string(&self, address: &str, selector: &str) -> Option<String> {
        let raw = match self.rpc.call(address, selector).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::trace!(address, selector, error = %e, "string probe failed");
                return None;
            }
        };
        let decoded = abi::decode_string(&raw);
        if decoded == abi::UNKNOWN {
            // an answer we cannot decode is treated as a failed probe
            None
        } else {
            Some(decoded)
        }
    }
}
