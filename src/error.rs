//! Error types for the Pokedex
//!
//! The cache itself never fails; these cover fetching, decoding and terminal
//! output around it.

use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for API lookups and REPL commands.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// The HTTP request failed or returned a non-success status
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not the expected JSON
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the Pokedex.
pub type Result<T> = std::result::Result<T, PokedexError>;
