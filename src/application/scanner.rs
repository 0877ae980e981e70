//! Incremental block scanner.
//!
//! Walks the chain head-ward in bounded windows, looking for
//! contract-creation transactions. Each cycle fetches at most
//! `blocks_per_cycle` blocks and then advances the cursor to the latest
//! block regardless of what it skipped: under load the scanner falls behind
//! and stays behind rather than building an unbounded backlog. Skipped
//! blocks are never retried.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tokio::time::MissedTickBehavior;

use super::classifier::ContractClassifier;
use crate::domain::{DiscoveredContract, InterestScorer, ScanState, DEFAULT_CACHE_CAPACITY};
use crate::ports::chain::{ChainRpc, RpcError};

/// Scanner configuration.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Blocks behind the head to start from on the first cycle
    pub bootstrap_window: u64,
    /// Maximum blocks fetched per cycle (bounded lag control)
    pub blocks_per_cycle: u64,
    /// Discovery cache capacity
    pub cache_capacity: usize,
    /// Delay between periodic cycles
    pub interval: Duration,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            bootstrap_window: 100,
            blocks_per_cycle: 20,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            interval: Duration::from_secs(15),
        }
    }
}

#[derive(Debug, Error)]
pub enum ScannerConfigError {
    #[error("blocks_per_cycle must be > 0")]
    ZeroBlocksPerCycle,
    #[error("cache_capacity must be > 0")]
    ZeroCacheCapacity,
}

impl ScannerConfig {
    pub fn validate(&self) -> Result<(), ScannerConfigError> {
        if self.blocks_per_cycle == 0 {
            return Err(ScannerConfigError::ZeroBlocksPerCycle);
        }
        if self.cache_capacity == 0 {
            return Err(ScannerConfigError::ZeroCacheCapacity);
        }
        Ok(())
    }
}

/// Summary of one completed cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// Chain head at the start of the cycle
    pub latest_block: u64,
    /// Blocks actually fetched
    pub scanned: u64,
    /// Window blocks dropped by the per-cycle cap
    pub skipped: u64,
    /// Discoveries produced this cycle (before dedup)
    pub discovered: usize,
}

impl CycleReport {
    fn noop(latest_block: u64) -> Self {
        Self {
            latest_block,
            scanned: 0,
            skipped: 0,
            discovered: 0,
        }
    }
}

/// The block scan worker.
///
/// Shares its [`ScanState`] with the discovery service; a single-flight
/// guard keeps concurrent triggers from scanning the same window twice.
pub struct BlockScanner {
    config: ScannerConfig,
    rpc: Arc<dyn ChainRpc>,
    classifier: ContractClassifier,
    scorer: Arc<dyn InterestScorer>,
    state: Arc<RwLock<ScanState>>,
    cycle_guard: Mutex<()>,
}

impl BlockScanner {
    pub fn new(
        config: ScannerConfig,
        rpc: Arc<dyn ChainRpc>,
        scorer: Arc<dyn InterestScorer>,
        state: Arc<RwLock<ScanState>>,
    ) -> Self {
        let classifier = ContractClassifier::new(rpc.clone());
        Self {
            config,
            rpc,
            classifier,
            scorer,
            state,
            cycle_guard: Mutex::new(()),
        }
    }

    pub fn state(&self) -> Arc<RwLock<ScanState>> {
        self.state.clone()
    }

    /// Run one cycle unless another is already in flight, in which case the
    /// call returns `Ok(None)` immediately instead of queuing.
    pub async fn try_run_cycle(&self) -> Result<Option<CycleReport>, RpcError> {
        let Ok(_guard) = self.cycle_guard.try_lock() else {
            tracing::debug!("scan cycle already in flight, skipping");
            return Ok(None);
        };
        self.run_cycle().await.map(Some)
    }

    async fn run_cycle(&self) -> Result<CycleReport, RpcError> {
        let latest = self.rpc.latest_block_number().await?;
        let cursor = self.state.read().await.cursor;

        let start = if cursor == 0 {
            latest.saturating_sub(self.config.bootstrap_window)
        } else {
            cursor + 1
        };
        if start > latest {
            return Ok(CycleReport::noop(latest));
        }

        let fetch_end = latest.min(start + self.config.blocks_per_cycle - 1);
        let skipped = latest - fetch_end;

        let mut discovered = Vec::new();
        for number in start..=fetch_end {
            match self.scan_block(number).await {
                Ok(mut found) => discovered.append(&mut found),
                Err(e) => {
                    tracing::warn!(block = number, error = %e, "skipping block after scan failure")
                }
            }
        }

        let count = discovered.len();
        {
            let mut state = self.state.write().await;
            for contract in discovered {
                if !state.cache.insert(contract) {
                    tracing::debug!("dropping duplicate discovery");
                }
            }
            // the cursor jumps to the head even when the cap skipped blocks;
            // those blocks are gone for good
            state.cursor = latest;
            state.cache.truncate_to_capacity();
        }

        if skipped > 0 {
            tracing::debug!(skipped, "per-cycle block cap hit, tail of window dropped");
        }

        Ok(CycleReport {
            latest_block: latest,
            scanned: fetch_end - start + 1,
            skipped,
            discovered: count,
        })
    }

    /// Scan one block for contract-creation transactions.
    async fn scan_block(&self, number: u64) -> Result<Vec<DiscoveredContract>, RpcError> {
        let block = self.rpc.block_with_transactions(number).await?;
        let mut found = Vec::new();

        for tx in &block.transactions {
            if !tx.is_contract_creation() {
                continue;
            }
            let receipt = match self.rpc.transaction_receipt(&tx.hash).await {
                Ok(receipt) => receipt,
                Err(e) => {
                    tracing::warn!(tx = %tx.hash, error = %e, "receipt lookup failed");
                    continue;
                }
            };
            let Some(address) = receipt.contract_address else {
                continue;
            };

            let classification = self.classifier.classify(&address).await;
            let interest_score = self.scorer.score(classification.contract_type);
            tracing::info!(
                %address,
                block = block.number,
                contract_type = %classification.contract_type,
                "discovered new contract"
            );

            found.push(DiscoveredContract {
                address,
                deployer: tx.from.clone(),
                block_number: block.number,
                timestamp: block.timestamp,
                contract_type: classification.contract_type,
                name: classification.name,
                symbol: classification.symbol,
                interest_score,
            });
        }

        Ok(found)
    }

    /// Periodic worker loop; runs until the task is dropped.
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(
            interval_secs = self.config.interval.as_secs(),
            "block scanner worker started"
        );

        loop {
            ticker.tick().await;
            match self.try_run_cycle().await {
                Ok(Some(report)) => {
                    tracing::debug!(
                        latest = report.latest_block,
                        scanned = report.scanned,
                        skipped = report.skipped,
                        discovered = report.discovered,
                        "scan cycle complete"
                    );
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, "scan cycle failed"),
            }
        }
    }
}
