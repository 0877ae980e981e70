//! Ports Layer - Trait definitions for external dependencies
//!
//! Following hexagonal architecture, these traits abstract:
//! - Blockchain node access (`ChainRpc`)
//! - The market data aggregator (`MarketDataSource`)
//!
//! `mocks` holds hand-rolled doubles used across the test suites.

pub mod chain;
pub mod market;
pub mod mocks;

pub use chain::{Block, ChainRpc, RpcError, Transaction, TxReceipt};
pub use market::MarketDataSource;
