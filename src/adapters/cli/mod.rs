//! CLI definitions for the basehound binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Basehound - Contract discovery scanner and token metadata API for Base
#[derive(Parser, Debug)]
#[command(
    name = "basehound",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Contract discovery scanner and token metadata API for Base",
    long_about = "Basehound scans Base for freshly deployed contracts, classifies them \
                  with speculative metadata probes, and serves the discoveries plus \
                  market-enriched token lookups as JSON over HTTP."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API server and the periodic block scanner
    Serve(ServeCmd),

    /// Run scan cycles in the foreground and print discoveries
    Scan(ScanCmd),

    /// Look up one token and print the merged metadata as JSON
    Token(TokenCmd),
}

/// Run the HTTP API server
#[derive(Parser, Debug)]
pub struct ServeCmd {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the listen port from the config
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,
}

/// Run foreground scan cycles
#[derive(Parser, Debug)]
pub struct ScanCmd {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of scan cycles to run
    #[arg(long, value_name = "N", default_value = "1")]
    pub cycles: u32,
}

/// Look up one token
#[derive(Parser, Debug)]
pub struct TokenCmd {
    /// Token contract address (0x-prefixed, 20 bytes)
    #[arg(value_name = "ADDRESS")]
    pub address: String,

    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_defaults() {
        let app = CliApp::try_parse_from(["basehound", "serve"]).unwrap();
        match app.command {
            Command::Serve(cmd) => {
                assert!(cmd.config.is_none());
                assert!(cmd.port.is_none());
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_parse_serve_with_overrides() {
        let app =
            CliApp::try_parse_from(["basehound", "serve", "--config", "base.toml", "--port", "9000"])
                .unwrap();
        match app.command {
            Command::Serve(cmd) => {
                assert_eq!(cmd.config, Some(PathBuf::from("base.toml")));
                assert_eq!(cmd.port, Some(9000));
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_parse_scan_cycles() {
        let app = CliApp::try_parse_from(["basehound", "scan", "--cycles", "3"]).unwrap();
        match app.command {
            Command::Scan(cmd) => assert_eq!(cmd.cycles, 3),
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn test_parse_scan_default_cycles() {
        let app = CliApp::try_parse_from(["basehound", "scan"]).unwrap();
        match app.command {
            Command::Scan(cmd) => assert_eq!(cmd.cycles, 1),
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn test_parse_token() {
        let app = CliApp::try_parse_from([
            "basehound",
            "token",
            "0x4200000000000000000000000000000000000006",
        ])
        .unwrap();
        match app.command {
            Command::Token(cmd) => {
                assert_eq!(cmd.address, "0x4200000000000000000000000000000000000006");
            }
            _ => panic!("Expected Token command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let app = CliApp::try_parse_from(["basehound", "-v", "--debug", "serve"]).unwrap();
        assert!(app.verbose);
        assert!(app.debug);
    }
}
