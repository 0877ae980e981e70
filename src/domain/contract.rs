//! Discovered contract types and address validation.

use serde::{Deserialize, Serialize};

/// Heuristic classification of a freshly deployed contract.
///
/// Classification is best-effort: a contract that answers the ERC-20
/// metadata probes is a `Token`, one that answers `tokenURI` is an `Nft`,
/// anything else stays `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractType {
    Token,
    Nft,
    Unknown,
}

impl ContractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Token => "token",
            ContractType::Nft => "nft",
            ContractType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contract picked up by the block scanner.
///
/// Records are immutable once created. Address uniqueness is handled by the
/// cache on insert, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredContract {
    /// Contract address created by the deployment transaction
    pub address: String,
    /// Sender of the deployment transaction
    pub deployer: String,
    /// Block the deployment landed in
    pub block_number: u64,
    /// Unix timestamp of that block
    pub timestamp: u64,
    #[serde(rename = "type")]
    pub contract_type: ContractType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Heuristic interest score in [0, 100]
    pub interest_score: u8,
}

/// Check that `addr` is a 0x-prefixed 20-byte hex address.
pub fn is_valid_address(addr: &str) -> bool {
    match addr.strip_prefix("0x") {
        Some(hex) => hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_type_display() {
        assert_eq!(ContractType::Token.to_string(), "token");
        assert_eq!(ContractType::Nft.to_string(), "nft");
        assert_eq!(ContractType::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_valid_address() {
        assert!(is_valid_address(
            "0x4200000000000000000000000000000000000006"
        ));
        assert!(is_valid_address(
            "0xAbCdEf0123456789abcdef0123456789ABCDEF01"
        ));
    }

    #[test]
    fn test_invalid_addresses() {
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("0x"));
        assert!(!is_valid_address("4200000000000000000000000000000000000006"));
        // one char short
        assert!(!is_valid_address(
            "0x420000000000000000000000000000000000000"
        ));
        // one char long
        assert!(!is_valid_address(
            "0x42000000000000000000000000000000000000066"
        ));
        // non-hex character
        assert!(!is_valid_address(
            "0x42000000000000000000000000000000000000zz"
        ));
        assert!(!is_valid_address("not an address at all"));
    }

    #[test]
    fn test_serialization_shape() {
        let contract = DiscoveredContract {
            address: "0x1111111111111111111111111111111111111111".to_string(),
            deployer: "0x2222222222222222222222222222222222222222".to_string(),
            block_number: 123,
            timestamp: 1700000000,
            contract_type: ContractType::Token,
            name: Some("Test Token".to_string()),
            symbol: Some("TEST".to_string()),
            interest_score: 75,
        };

        let json = serde_json::to_value(&contract).unwrap();
        assert_eq!(json["type"], "token");
        assert_eq!(json["blockNumber"], 123);
        assert_eq!(json["interestScore"], 75);
        assert_eq!(json["name"], "Test Token");
    }

    #[test]
    fn test_optional_metadata_omitted() {
        let contract = DiscoveredContract {
            address: "0x1111111111111111111111111111111111111111".to_string(),
            deployer: "0x2222222222222222222222222222222222222222".to_string(),
            block_number: 1,
            timestamp: 0,
            contract_type: ContractType::Unknown,
            name: None,
            symbol: None,
            interest_score: 50,
        };

        let json = serde_json::to_value(&contract).unwrap();
        assert!(json.get("name").is_none());
        assert!(json.get("symbol").is_none());
    }
}
