#![allow(dead_code, unused_imports, unused_variables)]
//! Basehound - Base Chain Contract Discovery Scanner Library
//!
//! Scans Base for freshly deployed contracts, classifies them with
//! speculative metadata probes, and serves discoveries plus market-enriched
//! token lookups as JSON over HTTP.
//!
//! # Modules
//!
//! - `domain`: Core types (DiscoveredContract, DiscoveryCache, MarketSnapshot)
//! - `ports`: Trait abstractions (ChainRpc, MarketDataSource) and test mocks
//! - `adapters`: External implementations (node RPC, ABI decoding, DexScreener, CLI)
//! - `application`: Classifier, block scanner and the discovery service
//! - `server`: axum HTTP API
//! - `config`: Configuration loading and validation

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod server;
