//! Cache Module
//!
//! Provides the expiring in-memory cache shared by every API lookup.

mod entry;
mod handle;
mod stats;
pub(crate) mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use handle::Cache;
pub use stats::CacheStats;

// == Public Constants ==
/// Retention interval used when none is configured.
pub const DEFAULT_INTERVAL_SECS: u64 = 60;
