//! Basehound - Base chain contract discovery scanner and token metadata API

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::RwLock;
use tracing_subscriber::{fmt, EnvFilter};

use basehound::adapters::cli::{CliApp, Command, ScanCmd, ServeCmd, TokenCmd};
use basehound::adapters::market_data::DexScreenerClient;
use basehound::adapters::rpc::EvmRpcClient;
use basehound::application::{BlockScanner, DiscoveryService, ScannerConfig, ServiceError};
use basehound::config::Config;
use basehound::domain::{RandomScorer, ScanState};
use basehound::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present (endpoint overrides live there, not in TOML)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    init_logging(app.verbose, app.debug)?;

    match app.command {
        Command::Serve(cmd) => serve_command(cmd).await,
        Command::Scan(cmd) => scan_command(cmd).await,
        Command::Token(cmd) => token_command(cmd).await,
    }
}

fn init_logging(verbose: bool, debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt().with_env_filter(filter).with_target(false).init();
    Ok(())
}

/// Wire up the shared component stack from config.
struct Components {
    rpc: Arc<EvmRpcClient>,
    market: Arc<DexScreenerClient>,
    state: Arc<RwLock<ScanState>>,
    scanner: Arc<BlockScanner>,
}

fn build_components(config: &Config) -> Result<Components> {
    let rpc = Arc::new(
        EvmRpcClient::new((&config.rpc).into()).context("Failed to create RPC client")?,
    );
    let market = Arc::new(
        DexScreenerClient::new((&config.market).into())
            .context("Failed to create market data client")?,
    );

    let scanner_config: ScannerConfig = (&config.scanner).into();
    scanner_config
        .validate()
        .context("Invalid scanner configuration")?;

    let state = Arc::new(RwLock::new(ScanState::new(scanner_config.cache_capacity)));
    let scanner = Arc::new(BlockScanner::new(
        scanner_config,
        rpc.clone(),
        Arc::new(RandomScorer),
        state.clone(),
    ));

    Ok(Components {
        rpc,
        market,
        state,
        scanner,
    })
}

async fn serve_command(cmd: ServeCmd) -> Result<()> {
    let mut config = Config::load_or_default(cmd.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(port) = cmd.port {
        config.server.port = port;
    }

    let components = build_components(&config)?;

    if config.scanner.enabled {
        let worker = components.scanner.clone();
        tokio::spawn(async move { worker.run().await });
    } else {
        tracing::warn!("scanner disabled, serving an empty discovery cache");
    }

    let service = DiscoveryService::new(
        components.rpc,
        components.market,
        components.state,
        config.explorer.base_url.clone(),
    );
    let app_state = Arc::new(AppState::new(service));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    tokio::select! {
        result = server::serve(addr, app_state) => result.context("HTTP server failed")?,
        _ = tokio::signal::ctrl_c() => tracing::info!("Shutdown signal received"),
    }

    Ok(())
}

async fn scan_command(cmd: ScanCmd) -> Result<()> {
    let config =
        Config::load_or_default(cmd.config.as_deref()).context("Failed to load configuration")?;
    let components = build_components(&config)?;

    for cycle in 1..=cmd.cycles {
        match components.scanner.try_run_cycle().await {
            Ok(Some(report)) => {
                println!(
                    "cycle {}/{}: head={} scanned={} skipped={} discovered={}",
                    cycle,
                    cmd.cycles,
                    report.latest_block,
                    report.scanned,
                    report.skipped,
                    report.discovered
                );
            }
            Ok(None) => println!("cycle {}/{}: skipped (already in flight)", cycle, cmd.cycles),
            Err(e) => tracing::warn!(error = %e, "scan cycle failed"),
        }
        if cycle < cmd.cycles {
            tokio::time::sleep(Duration::from_secs(config.scanner.interval_secs)).await;
        }
    }

    let state = components.state.read().await;
    println!(
        "{}",
        serde_json::to_string_pretty(&state.cache.snapshot())
            .context("Failed to render discoveries")?
    );
    println!("last scanned block: {}", state.cursor);

    Ok(())
}

async fn token_command(cmd: TokenCmd) -> Result<()> {
    let config =
        Config::load_or_default(cmd.config.as_deref()).context("Failed to load configuration")?;
    let components = build_components(&config)?;

    let service = DiscoveryService::new(
        components.rpc,
        components.market,
        components.state,
        config.explorer.base_url.clone(),
    );

    match service.token_info(&cmd.address).await {
        Ok(info) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&info).context("Failed to render token info")?
            );
            Ok(())
        }
        Err(ServiceError::InvalidAddress) => {
            anyhow::bail!(
                "Invalid address '{}': expected 0x followed by 40 hex characters",
                cmd.address
            )
        }
        Err(e) => Err(e).context("Token lookup failed"),
    }
}
