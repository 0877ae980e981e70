//! Adapters Layer - External System Implementations
//!
//! Implementations of the port traits plus the operator-facing surfaces:
//! - `rpc`: JSON-RPC client for the blockchain node
//! - `abi`: manual ABI encoding/decoding for metadata calls
//! - `market_data`: DexScreener aggregator client
//! - `cli`: command-line interface definitions

pub mod abi;
pub mod cli;
pub mod market_data;
pub mod rpc;

pub use cli::CliApp;
pub use market_data::{DexScreenerClient, DexScreenerConfig};
pub use rpc::{EvmRpcClient, RpcClientConfig};
