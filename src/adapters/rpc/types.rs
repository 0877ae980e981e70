//! Wire types for the JSON-RPC gateway.

use serde::Deserialize;

use crate::ports::chain::{Block, RpcError, Transaction, TxReceipt};

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct RpcEnvelope<T> {
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// `eth_getBlockByNumber` result with full transaction bodies.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    pub number: String,
    pub timestamp: String,
    #[serde(default)]
    pub transactions: Vec<RawTransaction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub hash: String,
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
}

/// `eth_getTransactionReceipt` result, reduced to the created address.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReceipt {
    #[serde(default)]
    pub contract_address: Option<String>,
}

/// Parse a 0x-prefixed big-endian hex quantity.
pub fn parse_quantity(hex: &str) -> Result<u64, RpcError> {
    let digits = hex
        .strip_prefix("0x")
        .ok_or_else(|| RpcError::BadQuantity(hex.to_string()))?;
    if digits.is_empty() {
        return Err(RpcError::BadQuantity(hex.to_string()));
    }
    u64::from_str_radix(digits, 16).map_err(|_| RpcError::BadQuantity(hex.to_string()))
}

impl TryFrom<RawBlock> for Block {
    type Error = RpcError;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        Ok(Block {
            number: parse_quantity(&raw.number)?,
            timestamp: parse_quantity(&raw.timestamp)?,
            transactions: raw.transactions.into_iter().map(Transaction::from).collect(),
        })
    }
}

impl From<RawTransaction> for Transaction {
    fn from(raw: RawTransaction) -> Self {
        Transaction {
            hash: raw.hash,
            from: raw.from,
            to: raw.to,
        }
    }
}

impl From<RawReceipt> for TxReceipt {
    fn from(raw: RawReceipt) -> Self {
        TxReceipt {
            contract_address: raw.contract_address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("0x0").unwrap(), 0);
        assert_eq!(parse_quantity("0x10").unwrap(), 16);
        assert_eq!(parse_quantity("0x1b4").unwrap(), 436);
    }

    #[test]
    fn test_parse_quantity_rejects_malformed() {
        assert!(matches!(parse_quantity("10"), Err(RpcError::BadQuantity(_))));
        assert!(matches!(parse_quantity("0x"), Err(RpcError::BadQuantity(_))));
        assert!(matches!(parse_quantity("0xzz"), Err(RpcError::BadQuantity(_))));
    }

    #[test]
    fn test_envelope_with_error_object() {
        let json = r#"{"jsonrpc":"2.0","id":1,"error":{"code":3,"message":"execution reverted"}}"#;
        let envelope: RpcEnvelope<String> = serde_json::from_str(json).unwrap();
        assert!(envelope.result.is_none());
        let error = envelope.error.unwrap();
        assert_eq!(error.code, 3);
        assert_eq!(error.message, "execution reverted");
    }

    #[test]
    fn test_envelope_with_null_result() {
        // unknown blocks come back as result: null
        let json = r#"{"jsonrpc":"2.0","id":1,"result":null}"#;
        let envelope: RpcEnvelope<RawBlock> = serde_json::from_str(json).unwrap();
        assert!(envelope.result.is_none());
        assert!(envelope.error.is_none());
    }

    #[test]
    fn test_block_conversion() {
        let json = r#"{
            "number": "0x3e8",
            "timestamp": "0x65b2cdb0",
            "transactions": [
                {"hash": "0xh1", "from": "0xf1", "to": "0xt1"},
                {"hash": "0xh2", "from": "0xf2", "to": null}
            ]
        }"#;
        let raw: RawBlock = serde_json::from_str(json).unwrap();
        let block = Block::try_from(raw).unwrap();

        assert_eq!(block.number, 1000);
        assert_eq!(block.transactions.len(), 2);
        assert!(!block.transactions[0].is_contract_creation());
        assert!(block.transactions[1].is_contract_creation());
    }

    #[test]
    fn test_block_conversion_rejects_bad_number() {
        let raw = RawBlock {
            number: "not-hex".to_string(),
            timestamp: "0x0".to_string(),
            transactions: vec![],
        };
        assert!(Block::try_from(raw).is_err());
    }

    #[test]
    fn test_receipt_without_contract_address() {
        let json = r#"{"status": "0x1"}"#;
        let raw: RawReceipt = serde_json::from_str(json).unwrap();
        let receipt = TxReceipt::from(raw);
        assert!(receipt.contract_address.is_none());
    }
}
