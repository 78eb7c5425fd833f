//! PokeAPI response models
//!
//! Typed views of the JSON bodies the cache stores as raw bytes. Only the
//! fields the REPL prints are decoded; everything else is ignored.

pub mod location;
pub mod pokemon;

// Re-export commonly used types
pub use location::{LocationAreas, LocationInfo, NamedResource, PokemonEncounter};
pub use pokemon::{Pokemon, PokemonStat, PokemonType};
