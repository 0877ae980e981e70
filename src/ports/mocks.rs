//! Hand-rolled test doubles for the port traits.
//!
//! Mocks record every call and serve responses configured through builder
//! methods, so tests can assert both behavior and the absence of upstream
//! traffic (e.g. validation must reject before any network call).

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::chain::{Block, ChainRpc, RpcError, TxReceipt};
use super::market::MarketDataSource;
use crate::domain::MarketSnapshot;

/// Mock chain RPC backed by maps of canned responses.
#[derive(Debug, Default)]
pub struct MockChainRpc {
    latest_block: Option<u64>,
    blocks: HashMap<u64, Block>,
    receipts: HashMap<String, TxReceipt>,
    /// (to-address, calldata prefix, raw hex result)
    call_responses: Vec<(String, String, String)>,
    fail_all: bool,
    calls: Mutex<Vec<String>>,
}

impl MockChainRpc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latest_block(mut self, number: u64) -> Self {
        self.latest_block = Some(number);
        self
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.insert(block.number, block);
        self
    }

    pub fn with_receipt(mut self, tx_hash: &str, contract_address: Option<&str>) -> Self {
        self.receipts.insert(
            tx_hash.to_string(),
            TxReceipt {
                contract_address: contract_address.map(str::to_string),
            },
        );
        self
    }

    /// Serve `result` for any `eth_call` against `to` whose calldata starts
    /// with `data_prefix` (typically a four-byte selector).
    pub fn with_call_response(mut self, to: &str, data_prefix: &str, result: &str) -> Self {
        self.call_responses.push((
            to.to_string(),
            data_prefix.to_string(),
            result.to_string(),
        ));
        self
    }

    /// Every method fails with a transport error.
    pub fn failing(mut self) -> Self {
        self.fail_all = true;
        self
    }

    /// Everything the mock was asked, in order.
    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_failure(&self) -> Result<(), RpcError> {
        if self.fail_all {
            Err(RpcError::Transport("mock transport failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ChainRpc for MockChainRpc {
    async fn latest_block_number(&self) -> Result<u64, RpcError> {
        self.record("eth_blockNumber".to_string());
        self.check_failure()?;
        self.latest_block.ok_or(RpcError::MissingResult)
    }

    async fn block_with_transactions(&self, number: u64) -> Result<Block, RpcError> {
        self.record(format!("eth_getBlockByNumber:{number}"));
        self.check_failure()?;
        self.blocks.get(&number).cloned().ok_or(RpcError::MissingResult)
    }

    async fn transaction_receipt(&self, hash: &str) -> Result<TxReceipt, RpcError> {
        self.record(format!("eth_getTransactionReceipt:{hash}"));
        self.check_failure()?;
        self.receipts.get(hash).cloned().ok_or(RpcError::MissingResult)
    }

    async fn call(&self, to: &str, data: &str) -> Result<String, RpcError> {
        let selector = &data[..data.len().min(10)];
        self.record(format!("eth_call:{to}:{selector}"));
        self.check_failure()?;
        self.call_responses
            .iter()
            .find(|(addr, prefix, _)| addr == to && data.starts_with(prefix.as_str()))
            .map(|(_, _, result)| result.clone())
            .ok_or(RpcError::Node {
                code: 3,
                message: "execution reverted".to_string(),
            })
    }
}

/// Mock market data source; unknown addresses get an empty snapshot.
#[derive(Debug, Default)]
pub struct MockMarketData {
    snapshots: HashMap<String, MarketSnapshot>,
    calls: Mutex<Vec<String>>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(mut self, address: &str, snapshot: MarketSnapshot) -> Self {
        self.snapshots.insert(address.to_string(), snapshot);
        self
    }

    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketDataSource for MockMarketData {
    async fn snapshot(&self, address: &str) -> MarketSnapshot {
        self.calls.lock().unwrap().push(address.to_string());
        self.snapshots.get(address).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_chain_rpc_responses() {
        let rpc = MockChainRpc::new()
            .with_latest_block(42)
            .with_receipt("0xhash", Some("0xcontract"));

        assert_eq!(rpc.latest_block_number().await.unwrap(), 42);
        let receipt = rpc.transaction_receipt("0xhash").await.unwrap();
        assert_eq!(receipt.contract_address.as_deref(), Some("0xcontract"));
        assert!(rpc.transaction_receipt("0xother").await.is_err());

        let calls = rpc.recorded_calls();
        assert_eq!(calls[0], "eth_blockNumber");
        assert!(calls[1].starts_with("eth_getTransactionReceipt:"));
    }

    #[tokio::test]
    async fn test_mock_call_matches_selector_prefix() {
        let rpc = MockChainRpc::new().with_call_response("0xabc", "0x06fdde03", "0x1234");

        assert_eq!(rpc.call("0xabc", "0x06fdde03").await.unwrap(), "0x1234");
        // unknown selector reverts
        assert!(matches!(
            rpc.call("0xabc", "0x95d89b41").await,
            Err(RpcError::Node { .. })
        ));
    }

    #[tokio::test]
    async fn test_failing_mock() {
        let rpc = MockChainRpc::new().with_latest_block(1).failing();
        assert!(matches!(
            rpc.latest_block_number().await,
            Err(RpcError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_mock_market_data_defaults_empty() {
        let market = MockMarketData::new();
        let snapshot = market.snapshot("0xabc").await;
        assert!(snapshot.is_empty());
        assert_eq!(market.recorded_calls(), vec!["0xabc".to_string()]);
    }
}
