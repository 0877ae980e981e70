//! Domain Layer - Core types for contract discovery and token metadata
//!
//! Pure types and logic with no I/O:
//! - `contract`: discovered contract records, classification enum, address
//!   validation
//! - `cache`: the scan cursor and the bounded, newest-first discovery cache
//! - `token`: on-chain metadata, market snapshot and the merged lookup
//!   response
//! - `scoring`: pluggable interest-score hook (placeholder implementation)

pub mod cache;
pub mod contract;
pub mod scoring;
pub mod token;

pub use cache::{DiscoveryCache, ScanState, DEFAULT_CACHE_CAPACITY};
pub use contract::{is_valid_address, ContractType, DiscoveredContract};
pub use scoring::{FixedScorer, InterestScorer, RandomScorer};
pub use token::{
    ExplorerLinks, MarketSnapshot, OnchainMetadata, TokenInfo, DEFAULT_DECIMALS, UNKNOWN_METADATA,
};
