//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - Sweep: Removes entries older than the retention interval on every tick

mod sweep;

pub(crate) use sweep::spawn_sweep_task;
