//! Cache Store Module
//!
//! The unsynchronized map behind a [`Cache`](super::Cache). Every method is a
//! single map operation; callers hold the store's mutex for exactly one call.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::time::Instant;
use tracing::trace;

use crate::cache::{CacheEntry, CacheStats};

// == Store ==
/// Key to entry mapping plus counters.
#[derive(Debug, Default)]
pub struct Store {
    entries: HashMap<String, CacheEntry>,
    stats: CacheStats,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Inserts or replaces the entry for `key`, stamped with the current time.
    pub fn insert(&mut self, key: String, value: Vec<u8>) {
        self.insert_entry(key, CacheEntry::new(value));
    }

    /// Inserts or replaces the entry for `key` as given.
    pub fn insert_entry(&mut self, key: String, entry: CacheEntry) {
        self.entries.insert(key, entry);
    }

    // == Get ==
    /// Returns a copy of the payload for `key`, recording a hit or a miss.
    ///
    /// Lookups never refresh the entry's creation time.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        match self.entries.get(key) {
            Some(entry) => {
                trace!(key, age_ms = entry.age().as_millis() as u64, "cache hit");
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                trace!(key, "cache miss");
                self.stats.record_miss();
                None
            }
        }
    }

    // == Expired Keys ==
    /// Keys whose entries were created strictly before `cutoff`.
    pub fn expired_keys(&self, cutoff: Instant) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.is_older_than(cutoff))
            .map(|(key, _)| key.clone())
            .collect()
    }

    // == Remove If Older ==
    /// Removes `key` only if its current entry is still older than `cutoff`.
    ///
    /// Returns true if an entry was removed. A key re-added after the sweep
    /// scanned it is left alone.
    pub fn remove_if_older(&mut self, key: String, cutoff: Instant) -> bool {
        match self.entries.entry(key) {
            Entry::Occupied(occupied) if occupied.get().is_older_than(cutoff) => {
                occupied.remove();
                self.stats.record_eviction();
                true
            }
            _ => false,
        }
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats;
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Locks a shared store.
///
/// A panic while holding the lock cannot leave a half-written entry behind
/// (every mutation is a single map call), so a poisoned lock is recovered.
pub fn lock(store: &Mutex<Store>) -> MutexGuard<'_, Store> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}
