//! Cache Handle Module
//!
//! The shared, cloneable handle callers use to add and look up payloads.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::store::{self, Store};
use crate::cache::CacheStats;
use crate::tasks::spawn_sweep_task;

// == Cache ==
/// Expiring in-memory cache of raw byte payloads.
///
/// Cloning is cheap and every clone talks to the same map. A background
/// sweep removes entries created more than `interval` before each tick, so
/// an entry stays visible for between one interval and one interval plus one
/// sweep period after its last [`add`](Cache::add).
///
/// The sweep task stops when the last handle is dropped or on
/// [`shutdown`](Cache::shutdown). It never keeps the runtime alive.
#[derive(Debug, Clone)]
pub struct Cache {
    store: Arc<Mutex<Store>>,
    interval: Duration,
    sweeper: Arc<Sweeper>,
}

impl Cache {
    // == Constructor ==
    /// Creates an empty cache that sweeps once per `interval`.
    ///
    /// `interval` must be non-zero. Must be called from within a Tokio
    /// runtime; returns without waiting for the first sweep.
    pub fn new(interval: Duration) -> Self {
        Self::with_sweep_period(interval, interval)
    }

    /// Creates an empty cache with a sweep period independent of the
    /// retention interval.
    pub fn with_sweep_period(interval: Duration, period: Duration) -> Self {
        let store = Arc::new(Mutex::new(Store::new()));
        let handle = spawn_sweep_task(Arc::downgrade(&store), interval, period);
        debug!(?interval, ?period, "cache created");

        Self {
            store,
            interval,
            sweeper: Arc::new(Sweeper(handle)),
        }
    }

    // == Add ==
    /// Inserts or replaces the payload for `key`, resetting its age.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        store::lock(&self.store).insert(key.into(), value.into());
    }

    // == Get ==
    /// Returns the payload for `key`, or `None` on a miss.
    ///
    /// Does not refresh the entry: age always counts from the last `add`.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        store::lock(&self.store).get(key)
    }

    /// Retention interval set at construction.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn len(&self) -> usize {
        store::lock(&self.store).len()
    }

    pub fn is_empty(&self) -> bool {
        store::lock(&self.store).is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        store::lock(&self.store).stats()
    }

    // == Shutdown ==
    /// Stops the background sweep for every clone of this cache.
    ///
    /// Entries stay readable afterwards but are no longer expired.
    pub fn shutdown(&self) {
        self.sweeper.0.abort();
        debug!("cache sweep stopped");
    }

    /// Whether the background sweep has stopped.
    pub fn is_sweeping(&self) -> bool {
        !self.sweeper.0.is_finished()
    }
}

/// Aborts the sweep task once the last handle goes away.
#[derive(Debug)]
struct Sweeper(JoinHandle<()>);

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.0.abort();
    }
}
