//! Blockchain node adapter: JSON-RPC over HTTP.

mod client;
mod types;

pub use client::{EvmRpcClient, RpcClientConfig, DEFAULT_RPC_URL};
pub use types::parse_quantity;
