//! Configuration loading and validation.

mod loader;

pub use loader::{load_config, Config, ConfigError};
