//! Configuration Loader
//!
//! Loads and validates configuration from TOML files. Every field has a
//! built-in default so the binary also runs with no config file at all;
//! sections and keys can be specified piecemeal.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::adapters::market_data::{DexScreenerConfig, DEFAULT_API_URL, DEFAULT_CHAIN_ID};
use crate::adapters::rpc::{RpcClientConfig, DEFAULT_RPC_URL};
use crate::application::{ScannerConfig, DEFAULT_EXPLORER_URL};
use crate::domain::DEFAULT_CACHE_CAPACITY;

/// Main configuration structure matching basehound.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub rpc: RpcSection,
    #[serde(default)]
    pub market: MarketSection,
    #[serde(default)]
    pub scanner: ScannerSection,
    #[serde(default)]
    pub explorer: ExplorerSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// HTTP server section
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    /// Listen address
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Blockchain node section
#[derive(Debug, Clone, Deserialize)]
pub struct RpcSection {
    /// JSON-RPC endpoint (public endpoint by default; use a private RPC for
    /// sustained scanning)
    #[serde(default = "default_rpc_url")]
    pub url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_rpc_timeout_secs")]
    pub timeout_secs: u64,
    /// Total attempts per call (1 = no retry)
    #[serde(default = "default_rpc_max_attempts")]
    pub max_attempts: u32,
    /// Base delay between retries in milliseconds
    #[serde(default = "default_rpc_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl RpcSection {
    /// Get RPC URL with environment variable override.
    /// Checks BASEHOUND_RPC_URL first, falls back to the config value.
    pub fn get_url(&self) -> String {
        std::env::var("BASEHOUND_RPC_URL").unwrap_or_else(|_| self.url.clone())
    }
}

/// Market data aggregator section
#[derive(Debug, Clone, Deserialize)]
pub struct MarketSection {
    /// Aggregator REST endpoint
    #[serde(default = "default_market_api_url")]
    pub api_url: String,
    /// Chain identifier used in chart links
    #[serde(default = "default_market_chain_id")]
    pub chain_id: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_market_timeout_secs")]
    pub timeout_secs: u64,
}

/// Block scanner section
#[derive(Debug, Clone, Deserialize)]
pub struct ScannerSection {
    /// Run the periodic scan worker
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Seconds between scan cycles
    #[serde(default = "default_scan_interval_secs")]
    pub interval_secs: u64,
    /// Blocks behind the head the first cycle starts from
    #[serde(default = "default_bootstrap_window")]
    pub bootstrap_window: u64,
    /// Maximum blocks fetched per cycle
    #[serde(default = "default_blocks_per_cycle")]
    pub blocks_per_cycle: u64,
    /// Discovery cache capacity
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

/// Block explorer section
#[derive(Debug, Clone, Deserialize)]
pub struct ExplorerSection {
    /// Explorer base URL used for response links
    #[serde(default = "default_explorer_url")]
    pub base_url: String,
}

/// Logging section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Default log level when RUST_LOG is unset: "trace" .. "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.to_string()
}
fn default_rpc_timeout_secs() -> u64 {
    10
}
fn default_rpc_max_attempts() -> u32 {
    2
}
fn default_rpc_retry_delay_ms() -> u64 {
    250
}
fn default_market_api_url() -> String {
    DEFAULT_API_URL.to_string()
}
fn default_market_chain_id() -> String {
    DEFAULT_CHAIN_ID.to_string()
}
fn default_market_timeout_secs() -> u64 {
    10
}
fn default_true() -> bool {
    true
}
fn default_scan_interval_secs() -> u64 {
    15
}
fn default_bootstrap_window() -> u64 {
    100
}
fn default_blocks_per_cycle() -> u64 {
    20
}
fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}
fn default_explorer_url() -> String {
    DEFAULT_EXPLORER_URL.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for RpcSection {
    fn default() -> Self {
        Self {
            url: default_rpc_url(),
            timeout_secs: default_rpc_timeout_secs(),
            max_attempts: default_rpc_max_attempts(),
            retry_delay_ms: default_rpc_retry_delay_ms(),
        }
    }
}

impl Default for MarketSection {
    fn default() -> Self {
        Self {
            api_url: default_market_api_url(),
            chain_id: default_market_chain_id(),
            timeout_secs: default_market_timeout_secs(),
        }
    }
}

impl Default for ScannerSection {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: default_scan_interval_secs(),
            bootstrap_window: default_bootstrap_window(),
            blocks_per_cycle: default_blocks_per_cycle(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl Default for ExplorerSection {
    fn default() -> Self {
        Self {
            base_url: default_explorer_url(),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Load from `path` when given, otherwise use built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => load_config(path),
            None => Ok(Config::default()),
        }
    }

    /// Validate all configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rpc.url.is_empty() {
            return Err(ConfigError::ValidationError(
                "rpc.url cannot be empty".to_string(),
            ));
        }
        if self.rpc.max_attempts == 0 {
            return Err(ConfigError::ValidationError(format!(
                "rpc.max_attempts must be > 0, got {}",
                self.rpc.max_attempts
            )));
        }
        if self.market.api_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "market.api_url cannot be empty".to_string(),
            ));
        }
        if self.scanner.blocks_per_cycle == 0 {
            return Err(ConfigError::ValidationError(format!(
                "scanner.blocks_per_cycle must be > 0, got {}",
                self.scanner.blocks_per_cycle
            )));
        }
        if self.scanner.cache_capacity == 0 {
            return Err(ConfigError::ValidationError(format!(
                "scanner.cache_capacity must be > 0, got {}",
                self.scanner.cache_capacity
            )));
        }
        if self.scanner.interval_secs == 0 {
            return Err(ConfigError::ValidationError(format!(
                "scanner.interval_secs must be > 0, got {}",
                self.scanner.interval_secs
            )));
        }
        if self.explorer.base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "explorer.base_url cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<&RpcSection> for RpcClientConfig {
    fn from(section: &RpcSection) -> Self {
        RpcClientConfig {
            url: section.get_url(),
            timeout: Duration::from_secs(section.timeout_secs),
            max_attempts: section.max_attempts,
            retry_delay_ms: section.retry_delay_ms,
        }
    }
}

impl From<&MarketSection> for DexScreenerConfig {
    fn from(section: &MarketSection) -> Self {
        DexScreenerConfig {
            api_url: section.api_url.clone(),
            chain_id: section.chain_id.clone(),
            timeout: Duration::from_secs(section.timeout_secs),
        }
    }
}

impl From<&ScannerSection> for ScannerConfig {
    fn from(section: &ScannerSection) -> Self {
        ScannerConfig {
            bootstrap_window: section.bootstrap_window,
            blocks_per_cycle: section.blocks_per_cycle,
            cache_capacity: section.cache_capacity,
            interval: Duration::from_secs(section.interval_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_valid_config() -> String {
        r#"
[server]
host = "0.0.0.0"
port = 9000

[rpc]
url = "https://base-rpc.example.com"
timeout_secs = 5
max_attempts = 3
retry_delay_ms = 100

[market]
api_url = "https://api.dexscreener.com"
chain_id = "base"
timeout_secs = 8

[scanner]
enabled = true
interval_secs = 20
bootstrap_window = 100
blocks_per_cycle = 20
cache_capacity = 100

[explorer]
base_url = "https://basescan.org"

[logging]
level = "debug"
"#
        .to_string()
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(create_valid_config().as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.rpc.url, "https://base-rpc.example.com");
        assert_eq!(config.rpc.max_attempts, 3);
        assert_eq!(config.scanner.interval_secs, 20);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config("/nonexistent/path/basehound.toml");
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_defaults_without_file() {
        let config = Config::load_or_default(None).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.rpc.url, DEFAULT_RPC_URL);
        assert_eq!(config.scanner.blocks_per_cycle, 20);
        assert_eq!(config.scanner.bootstrap_window, 100);
        assert_eq!(config.scanner.cache_capacity, 100);
        assert!(config.scanner.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[server]\nport = 3000\n").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.rpc.url, DEFAULT_RPC_URL);
    }

    #[test]
    fn test_invalid_blocks_per_cycle() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[scanner]\nblocks_per_cycle = 0\n").unwrap();

        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_invalid_cache_capacity() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[scanner]\ncache_capacity = 0\n").unwrap();

        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_invalid_empty_rpc_url() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[rpc]\nurl = \"\"\n").unwrap();

        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[server\nport = oops").unwrap();

        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_section_conversions() {
        let config = Config::default();

        let rpc: RpcClientConfig = (&config.rpc).into();
        assert_eq!(rpc.timeout, Duration::from_secs(10));
        assert_eq!(rpc.max_attempts, 2);

        let market: DexScreenerConfig = (&config.market).into();
        assert_eq!(market.chain_id, "base");

        let scanner: ScannerConfig = (&config.scanner).into();
        assert_eq!(scanner.blocks_per_cycle, 20);
        assert_eq!(scanner.interval, Duration::from_secs(15));
        assert!(scanner.validate().is_ok());
    }
}
