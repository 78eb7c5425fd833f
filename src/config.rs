//! Configuration Module
//!
//! Handles loading Pokedex settings from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::api::DEFAULT_BASE_URL;
use crate::cache::DEFAULT_INTERVAL_SECS;

/// Pokedex configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// How long, in seconds, a fetched response stays cached
    pub cache_interval: u64,
    /// Seconds between expiry sweeps
    pub sweep_interval: u64,
    /// PokeAPI base URL
    pub base_url: String,
    /// HTTP request timeout in seconds
    pub request_timeout: u64,
    /// Pause before a catch attempt resolves, in milliseconds
    pub catch_delay_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_INTERVAL` - Retention interval in seconds (default: 60)
    /// - `SWEEP_INTERVAL` - Sweep period in seconds (default: `CACHE_INTERVAL`)
    /// - `POKEAPI_BASE_URL` - API base URL (default: https://pokeapi.co/api/v2)
    /// - `REQUEST_TIMEOUT` - HTTP timeout in seconds (default: 10)
    /// - `CATCH_DELAY_MS` - Catch suspense delay (default: 1000)
    ///
    /// Zero intervals are ignored in favor of the defaults.
    pub fn from_env() -> Self {
        let cache_interval = match env_or("CACHE_INTERVAL", DEFAULT_INTERVAL_SECS) {
            0 => DEFAULT_INTERVAL_SECS,
            secs => secs,
        };
        let sweep_interval = match env_or("SWEEP_INTERVAL", cache_interval) {
            0 => cache_interval,
            secs => secs,
        };

        Self {
            cache_interval,
            sweep_interval,
            base_url: env::var("POKEAPI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            request_timeout: env_or("REQUEST_TIMEOUT", 10),
            catch_delay_ms: env_or("CATCH_DELAY_MS", 1000),
        }
    }

    pub fn cache_interval(&self) -> Duration {
        Duration::from_secs(self.cache_interval)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn catch_delay(&self) -> Duration {
        Duration::from_millis(self.catch_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_interval: DEFAULT_INTERVAL_SECS,
            sweep_interval: DEFAULT_INTERVAL_SECS,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: 10,
            catch_delay_ms: 1000,
        }
    }
}

/// Parses an environment variable, falling back to `default` when unset or invalid.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
