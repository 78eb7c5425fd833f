//! Cache Entry Module
//!
//! Defines the timestamped record stored for every cached key.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A single cached payload together with the moment it was added.
///
/// Entries are never mutated after creation. Adding the same key again
/// replaces the whole entry, including `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// When the entry was added
    pub created_at: Instant,
    /// The raw payload
    pub value: Vec<u8>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with the current time.
    pub fn new(value: Vec<u8>) -> Self {
        Self::with_created_at(value, Instant::now())
    }

    /// Creates an entry with an explicit creation time.
    pub fn with_created_at(value: Vec<u8>, created_at: Instant) -> Self {
        Self { created_at, value }
    }

    // == Is Older Than ==
    /// Returns true if the entry was created strictly before `cutoff`.
    ///
    /// An entry created exactly at the cutoff is kept.
    pub fn is_older_than(&self, cutoff: Instant) -> bool {
        self.created_at < cutoff
    }

    // == Age ==
    /// Time elapsed since the entry was added.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}
