//! Pokedex - an interactive PokeAPI browser
//!
//! Fetched responses are kept in an expiring in-memory cache, so repeated
//! lookups inside the retention interval skip the network.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repl;
mod tasks;

pub use api::{HttpFetcher, PokeApi};
pub use cache::Cache;
pub use config::Config;
pub use error::{PokedexError, Result};
pub use repl::Session;
