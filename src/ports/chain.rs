//! Chain RPC port: the read-only slice of the node API the scanner and the
//! token lookup need.

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by the RPC gateway. Callers decide whether to retry,
/// default, or propagate; nothing here is fatal by itself.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("node returned HTTP status {0}")]
    Status(u16),

    #[error("node error {code}: {message}")]
    Node { code: i64, message: String },

    #[error("missing result in node response")]
    MissingResult,

    #[error("malformed hex quantity: {0}")]
    BadQuantity(String),
}

/// Block header plus full transaction bodies.
#[derive(Debug, Clone)]
pub struct Block {
    pub number: u64,
    /// Unix timestamp
    pub timestamp: u64,
    pub transactions: Vec<Transaction>,
}

/// The transaction fields the scanner cares about.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub hash: String,
    pub from: String,
    /// None marks a contract-creation transaction.
    pub to: Option<String>,
}

impl Transaction {
    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }
}

/// Receipt subset: only the created contract address matters here.
#[derive(Debug, Clone)]
pub struct TxReceipt {
    pub contract_address: Option<String>,
}

/// Read-only access to the blockchain node.
///
/// Each method is a single logical call; implementations may retry
/// internally but expose no other policy.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    async fn latest_block_number(&self) -> Result<u64, RpcError>;

    /// Fetch a block with full transaction bodies.
    async fn block_with_transactions(&self, number: u64) -> Result<Block, RpcError>;

    async fn transaction_receipt(&self, hash: &str) -> Result<TxReceipt, RpcError>;

    /// Read-only contract call against the latest block. `data` is
    /// 0x-prefixed calldata; the raw hex result is returned undecoded.
    async fn call(&self, to: &str, data: &str) -> Result<String, RpcError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_creation_flag() {
        let creation = Transaction {
            hash: "0xabc".to_string(),
            from: "0xfrom".to_string(),
            to: None,
        };
        let transfer = Transaction {
            hash: "0xdef".to_string(),
            from: "0xfrom".to_string(),
            to: Some("0xto".to_string()),
        };

        assert!(creation.is_contract_creation());
        assert!(!transfer.is_contract_creation());
    }

    #[test]
    fn test_error_display() {
        let err = RpcError::Node {
            code: 3,
            message: "execution reverted".to_string(),
        };
        assert!(err.to_string().contains("execution reverted"));

        let err = RpcError::Status(429);
        assert!(err.to_string().contains("429"));
    }
}
