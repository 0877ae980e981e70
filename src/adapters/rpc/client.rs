//! JSON-RPC gateway client.
//!
//! Talks to the configured EVM node over HTTP POST. Public endpoints drop
//! requests and rate-limit freely, so every request carries a timeout and a
//! small bounded retry budget; transport errors, HTTP 429 and 5xx are
//! retried with a linear backoff, everything else surfaces immediately as a
//! typed [`RpcError`].

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::types::{parse_quantity, RawBlock, RawReceipt, RpcEnvelope};
use crate::ports::chain::{Block, ChainRpc, RpcError, TxReceipt};

/// Public Base mainnet endpoint.
pub const DEFAULT_RPC_URL: &str = "https://mainnet.base.org";

/// Configuration for the RPC client.
#[derive(Debug, Clone)]
pub struct RpcClientConfig {
    /// Node JSON-RPC endpoint URL
    pub url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Total attempts per call (1 = no retry)
    pub max_attempts: u32,
    /// Base delay between attempts, scaled linearly
    pub retry_delay_ms: u64,
}

impl Default for RpcClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RPC_URL.to_string(),
            timeout: Duration::from_secs(10),
            max_attempts: 2,
            retry_delay_ms: 250,
        }
    }
}

impl RpcClientConfig {
    /// Create config with a custom endpoint URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Reqwest-backed JSON-RPC client for the blockchain node.
#[derive(Debug, Clone)]
pub struct EvmRpcClient {
    config: RpcClientConfig,
    http: Client,
}

impl EvmRpcClient {
    pub fn new(config: RpcClientConfig) -> Result<Self, RpcError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RpcError::Transport(e.to_string()))?;
        Ok(Self { config, http })
    }

    pub fn with_url(url: impl Into<String>) -> Result<Self, RpcError> {
        Self::new(RpcClientConfig::with_url(url))
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// One JSON-RPC request with the retry budget applied.
    async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, RpcError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let mut last_error = RpcError::MissingResult;
        for attempt in 0..self.config.max_attempts {
            if attempt > 0 {
                let delay = Duration::from_millis(self.config.retry_delay_ms * attempt as u64);
                tokio::time::sleep(delay).await;
            }

            let response = match self.http.post(&self.config.url).json(&body).send().await {
                Ok(response) => response,
                Err(e) => {
                    tracing::debug!(method, error = %e, "rpc transport error");
                    last_error = RpcError::Transport(e.to_string());
                    continue;
                }
            };

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                tracing::warn!(method, %status, attempt, "node returned retryable status");
                last_error = RpcError::Status(status.as_u16());
                continue;
            }
            if !status.is_success() {
                return Err(RpcError::Status(status.as_u16()));
            }

            let envelope: RpcEnvelope<T> = response
                .json()
                .await
                .map_err(|e| RpcError::Transport(e.to_string()))?;
            if let Some(error) = envelope.error {
                return Err(RpcError::Node {
                    code: error.code,
                    message: error.message,
                });
            }
            return envelope.result.ok_or(RpcError::MissingResult);
        }

        Err(last_error)
    }
}

#[async_trait::async_trait]
impl ChainRpc for EvmRpcClient {
    async fn latest_block_number(&self) -> Result<u64, RpcError> {
        let hex: String = self.request("eth_blockNumber", json!([])).await?;
        parse_quantity(&hex)
    }

    async fn block_with_transactions(&self, number: u64) -> Result<Block, RpcError> {
        let raw: RawBlock = self
            .request(
                "eth_getBlockByNumber",
                json!([format!("0x{number:x}"), true]),
            )
            .await?;
        Block::try_from(raw)
    }

    async fn transaction_receipt(&self, hash: &str) -> Result<TxReceipt, RpcError> {
        let raw: RawReceipt = self
            .request("eth_getTransactionReceipt", json!([hash]))
            .await?;
        Ok(TxReceipt::from(raw))
    }

    async fn call(&self, to: &str, data: &str) -> Result<String, RpcError> {
        self.request("eth_call", json!([{"to": to, "data": data}, "latest"]))
            .await
    }
}
