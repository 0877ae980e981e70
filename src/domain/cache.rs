//! Scan cursor and the bounded discovery cache.
//!
//! Both live inside [`ScanState`], which the service context owns and shares
//! with the scanner and the HTTP handlers. State is process-lifetime only; a
//! restart starts cold again.

use std::collections::VecDeque;

use super::contract::DiscoveredContract;

/// Default number of discoveries retained.
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Newest-first ring of recent discoveries.
///
/// Inserts deduplicate by contract address; overlapping scan windows would
/// otherwise produce duplicate records for the same deployment.
#[derive(Debug)]
pub struct DiscoveryCache {
    entries: VecDeque<DiscoveredContract>,
    capacity: usize,
}

impl DiscoveryCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Prepend a discovery. Returns false (and drops the record) when a
    /// record with the same address is already cached.
    pub fn insert(&mut self, contract: DiscoveredContract) -> bool {
        if self.contains_address(&contract.address) {
            return false;
        }
        self.entries.push_front(contract);
        true
    }

    /// Drop the oldest entries until the cache fits its capacity.
    pub fn truncate_to_capacity(&mut self) {
        self.entries.truncate(self.capacity);
    }

    pub fn contains_address(&self, address: &str) -> bool {
        self.entries
            .iter()
            .any(|c| c.address.eq_ignore_ascii_case(address))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clone out the current contents, newest first.
    pub fn snapshot(&self) -> Vec<DiscoveredContract> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for DiscoveryCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

/// Shared mutable scan state: the block cursor plus the discovery cache.
///
/// `cursor` is 0 until the first cycle completes and only ever moves forward.
#[derive(Debug)]
pub struct ScanState {
    pub cursor: u64,
    pub cache: DiscoveryCache,
}

impl ScanState {
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            cursor: 0,
            cache: DiscoveryCache::new(cache_capacity),
        }
    }

    /// True until the first completed scan cycle.
    pub fn is_cold(&self) -> bool {
        self.cursor == 0
    }
}

impl Default for ScanState {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
