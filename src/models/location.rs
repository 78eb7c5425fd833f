//! Location area models
//!
//! `GET /location-area` pages and `GET /location-area/{name}` details.

use serde::Deserialize;

/// A name plus the URL of the full resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// One page of location areas.
///
/// `next` and `previous` are absent on the last and first page.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationAreas {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// Details of a single location area.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationInfo {
    #[serde(default)]
    pub name: String,
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
}
