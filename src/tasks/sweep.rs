//! Expiry Sweep Task
//!
//! Background task that periodically removes cache entries older than the
//! retention interval.

use std::sync::{Mutex, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::store::{self, Store};

/// Spawns the sweep task for a cache store.
///
/// The first sweep runs one `period` after spawning. On every tick the
/// cutoff is `tick - interval`, computed once, and every entry created
/// strictly before it is removed. Each removal takes the lock on its own, so
/// readers and writers are never blocked for a whole scan.
///
/// The task holds only a weak reference and exits once the store is gone.
/// Aborting the returned handle stops it earlier.
pub(crate) fn spawn_sweep_task(
    store: Weak<Mutex<Store>>,
    interval: Duration,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!(?interval, ?period, "starting cache sweep task");

        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let tick = ticker.tick().await;

            let Some(store) = store.upgrade() else {
                debug!("cache dropped, stopping sweep task");
                break;
            };
            // Nothing can be older than the retention interval yet
            let Some(cutoff) = tick.checked_sub(interval) else {
                continue;
            };

            let removed = sweep_once(&store, cutoff);
            if removed > 0 {
                info!("cache sweep: removed {} expired entries", removed);
            } else {
                debug!("cache sweep: no expired entries found");
            }
        }
    })
}

/// Removes every entry created before `cutoff`, returning how many went.
fn sweep_once(store: &Mutex<Store>, cutoff: Instant) -> usize {
    let expired = store::lock(store).expired_keys(cutoff);

    expired
        .into_iter()
        .map(|key| store::lock(store).remove_if_older(key, cutoff))
        .filter(|&removed| removed)
        .count()
}
