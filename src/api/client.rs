//! Cached PokeAPI client
//!
//! Every lookup is keyed by its full request URL. A cache hit is decoded
//! straight from the stored bytes; a miss goes to the fetcher and stores the
//! body before decoding it.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::{Fetcher, HttpFetcher};
use crate::cache::Cache;
use crate::error::{PokedexError, Result};
use crate::models::{LocationAreas, LocationInfo, Pokemon};

/// Base URL of the public PokeAPI.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// PokeAPI client sharing one [`Cache`] across all lookups.
#[derive(Debug, Clone)]
pub struct PokeApi<F = HttpFetcher> {
    fetcher: F,
    cache: Cache,
    base_url: String,
}

impl<F: Fetcher> PokeApi<F> {
    pub fn new(fetcher: F, cache: Cache, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            fetcher,
            cache,
            base_url,
        }
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// URL of the first page of location areas.
    pub fn first_page_url(&self) -> String {
        format!("{}/location-area", self.base_url)
    }

    /// Fetches a page of location areas. `url` comes from
    /// [`first_page_url`](Self::first_page_url) or a previous page's links.
    pub async fn location_areas(&self, url: &str) -> Result<LocationAreas> {
        self.cached_json(url).await
    }

    /// Fetches the pokemon encounters of one location area.
    pub async fn location_area(&self, name: &str) -> Result<LocationInfo> {
        let url = format!("{}/location-area/{}", self.base_url, name);
        self.cached_json(&url).await
    }

    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        let url = format!("{}/pokemon/{}", self.base_url, name);
        self.cached_json(&url).await
    }

    async fn cached_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = match self.cache.get(url) {
            Some(body) => {
                debug!(url, "cache hit");
                body
            }
            None => {
                let body = self.fetcher.fetch(url).await?;
                self.cache.add(url, body.clone());
                body
            }
        };

        serde_json::from_slice(&body).map_err(|source| PokedexError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Serves canned bodies and counts calls.
    #[derive(Clone, Default)]
    struct FakeFetcher {
        bodies: HashMap<String, Vec<u8>>,
        calls: Arc<AtomicUsize>,
    }

    impl FakeFetcher {
        fn with_body(mut self, url: &str, body: &str) -> Self {
            self.bodies.insert(url.to_string(), body.as_bytes().to_vec());
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Fetcher for FakeFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.bodies.get(url).cloned().unwrap_or_default())
        }
    }

    const BASE: &str = "http://pokeapi.test/api/v2";
    const AREA_BODY: &str = r#"{"name": "mt-coronet-1f", "pokemon_encounters": [
        {"pokemon": {"name": "geodude", "url": "http://pokeapi.test/api/v2/pokemon/74/"}}
    ]}"#;

    fn api(fetcher: FakeFetcher) -> PokeApi<FakeFetcher> {
        PokeApi::new(fetcher, Cache::new(Duration::from_secs(60)), format!("{BASE}/"))
    }

    #[tokio::test]
    async fn test_second_lookup_is_served_from_cache() {
        let fetcher = FakeFetcher::default()
            .with_body(&format!("{BASE}/location-area/mt-coronet-1f"), AREA_BODY);
        let api = api(fetcher.clone());

        let first = api.location_area("mt-coronet-1f").await.unwrap();
        let second = api.location_area("mt-coronet-1f").await.unwrap();

        assert_eq!(fetcher.calls(), 1);
        assert_eq!(first.pokemon_encounters[0].pokemon.name, "geodude");
        assert_eq!(second.pokemon_encounters.len(), 1);
        assert_eq!(api.cache().stats().hits, 1);
    }

    #[tokio::test]
    async fn test_cache_key_is_request_url() {
        let fetcher = FakeFetcher::default()
            .with_body(&format!("{BASE}/location-area/mt-coronet-1f"), AREA_BODY);
        let api = api(fetcher);

        api.location_area("mt-coronet-1f").await.unwrap();

        assert!(api
            .cache()
            .get(&format!("{BASE}/location-area/mt-coronet-1f"))
            .is_some());
    }

    #[tokio::test]
    async fn test_first_page_url_trims_trailing_slash() {
        let api = api(FakeFetcher::default());
        assert_eq!(api.first_page_url(), format!("{BASE}/location-area"));
    }

    #[tokio::test]
    async fn test_decode_error_names_url() {
        let fetcher =
            FakeFetcher::default().with_body(&format!("{BASE}/pokemon/missingno"), "not json");
        let api = api(fetcher);

        let err = api.pokemon("missingno").await.unwrap_err();

        assert!(matches!(err, PokedexError::Decode { ref url, .. } if url.ends_with("missingno")));
    }
}
