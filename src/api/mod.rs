//! API Module
//!
//! PokeAPI access through the expiring cache.
//!
//! # Resources
//! - `GET /location-area` - Paginated list of location areas
//! - `GET /location-area/{name}` - Pokemon encountered in an area
//! - `GET /pokemon/{name}` - Pokemon details

pub mod client;
pub mod fetcher;

pub use client::{PokeApi, DEFAULT_BASE_URL};
pub use fetcher::{Fetcher, HttpFetcher};
