//! Pokedex Service
//!
//! Read-through caching over a [`CatalogSource`] and the incremental
//! substring search built on top of it.
//!
//! # Search
//! A search term is first resolved into a list of candidate names by scanning
//! a bounded prefix of the catalog listing (`initial_scan` entries, widened
//! once to `expanded_scan` when that is not enough to fill the requested
//! page). The candidate list is cached per term, so later pages of the same
//! term only resolve the names in their window. Matches beyond
//! `expanded_scan` are never found.

use std::future::Future;
use std::ops::Range;
use std::sync::Arc;

use tracing::{debug, warn};

use super::keys;
use super::layers::CacheLayers;
use crate::cache::BoundedCache;
use crate::catalog::CatalogSource;
use crate::error::CatalogResult;
use crate::models::{Pokemon, PokemonList, StatsResponse};

// == Search Config ==
/// Bounds of the candidate scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Listing entries scanned on the first attempt
    pub initial_scan: usize,
    /// Listing entries scanned when the first attempt comes up short
    pub expanded_scan: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            initial_scan: 100,
            expanded_scan: 500,
        }
    }
}

// == Pokedex Service ==
#[derive(Clone)]
pub struct PokedexService {
    source: Arc<dyn CatalogSource>,
    caches: CacheLayers,
    search: SearchConfig,
}

impl PokedexService {
    pub fn new(source: Arc<dyn CatalogSource>, caches: CacheLayers) -> Self {
        Self {
            source,
            caches,
            search: SearchConfig::default(),
        }
    }

    pub fn with_search_config(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn caches(&self) -> &CacheLayers {
        &self.caches
    }

    // == Point Lookups ==
    /// Returns the item with `id`, fetching and caching it on a miss.
    pub async fn get_by_id(&self, id: u32) -> CatalogResult<Arc<Pokemon>> {
        read_through(&self.caches.items, keys::item_by_id(id), || {
            self.source.fetch_by_id(id)
        })
        .await
    }

    /// Returns the item named `name` (case-insensitive), fetching and caching
    /// it on a miss.
    pub async fn get_by_name(&self, name: &str) -> CatalogResult<Arc<Pokemon>> {
        read_through(&self.caches.items, keys::item_by_name(name), || {
            self.source.fetch_by_name(name)
        })
        .await
    }

    // == List ==
    /// Returns one listing page, cached by the exact `(limit, offset)` pair.
    pub async fn get_list(&self, limit: usize, offset: usize) -> CatalogResult<Arc<PokemonList>> {
        read_through(&self.caches.lists, keys::list_page(limit, offset), || {
            self.source.fetch_page(limit, offset)
        })
        .await
    }

    // == Search ==
    /// Returns the `limit` items starting at `offset` among catalog entries
    /// whose name contains `term`, in catalog order.
    ///
    /// # Errors
    /// Only a failure of the initial listing scan is returned. A failed
    /// widening scan keeps the candidates already found, and candidates whose
    /// details cannot be fetched are left out of the page.
    pub async fn search_by_title(
        &self,
        term: &str,
        limit: usize,
        offset: usize,
    ) -> CatalogResult<Arc<Vec<Arc<Pokemon>>>> {
        let term = term.to_lowercase();
        let result_key = keys::search_page(&term, limit, offset);

        if let Some(hit) = self.caches.searches.get(&result_key).await {
            debug!("Search cache hit: {}", result_key);
            return Ok(hit);
        }

        let candidates_key = keys::search_candidates(&term);
        let (candidates, fresh) = match self.caches.candidates.get(&candidates_key).await {
            Some(cached) => {
                debug!("Reusing {} cached candidates for '{}'", cached.len(), term);
                (cached, false)
            }
            None => {
                let found = self
                    .discover_candidates(&term, limit.saturating_add(offset))
                    .await?;
                (Arc::new(found), true)
            }
        };

        let window = page_window(candidates.len(), limit, offset);
        let mut results = Vec::with_capacity(window.len());
        for name in &candidates[window] {
            match self.get_by_name(name).await {
                Ok(pokemon) => results.push(pokemon),
                Err(err) => warn!("Skipping search candidate '{}': {}", name, err),
            }
        }

        let results = Arc::new(results);
        store(&self.caches.searches, &result_key, Arc::clone(&results)).await;
        if fresh {
            store(&self.caches.candidates, &candidates_key, candidates).await;
        }

        Ok(results)
    }

    /// Scans the catalog prefix for names containing `term`. `wanted` is the
    /// number of candidates needed to fill the requested page.
    async fn discover_candidates(&self, term: &str, wanted: usize) -> CatalogResult<Vec<String>> {
        let SearchConfig {
            initial_scan,
            expanded_scan,
        } = self.search;

        let initial = self.source.fetch_page(initial_scan, 0).await?;
        let candidates = initial.names_containing(term);
        debug!(
            "Initial scan of {} entries found {} candidates for '{}'",
            initial.results.len(),
            candidates.len(),
            term
        );

        if candidates.len() >= wanted || initial.count <= initial_scan || expanded_scan <= initial_scan
        {
            return Ok(candidates);
        }

        // The wider scan covers the initial range, so its matches replace the
        // initial ones rather than extending them
        match self.source.fetch_page(expanded_scan, 0).await {
            Ok(expanded) => {
                let widened = expanded.names_containing(term);
                debug!(
                    "Expanded scan of {} entries found {} candidates for '{}'",
                    expanded.results.len(),
                    widened.len(),
                    term
                );
                Ok(widened)
            }
            Err(err) => {
                warn!(
                    "Expanded scan for '{}' failed, keeping {} initial candidates: {}",
                    term,
                    candidates.len(),
                    err
                );
                Ok(candidates)
            }
        }
    }

    // == Cache Management ==
    /// Drops the cached candidate list for `term`, leaving cached result
    /// pages in place. Returns whether a list was cached.
    pub async fn invalidate_candidates(&self, term: &str) -> bool {
        let key = keys::search_candidates(&term.to_lowercase());
        self.caches.candidates.delete(&key).await
    }

    pub async fn clear_caches(&self) {
        self.caches.clear().await;
    }

    pub async fn stats(&self) -> StatsResponse {
        self.caches.stats().await
    }
}

/// Serves `key` from `cache`, or fetches, stores and returns it.
async fn read_through<V, F, Fut>(
    cache: &BoundedCache<Arc<V>>,
    key: String,
    fetch: F,
) -> CatalogResult<Arc<V>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = CatalogResult<V>>,
{
    if let Some(hit) = cache.get(&key).await {
        debug!("Cache hit: {}", key);
        return Ok(hit);
    }

    debug!("Cache miss: {}", key);
    let value = Arc::new(fetch().await?);
    store(cache, &key, Arc::clone(&value)).await;
    Ok(value)
}

/// Writes to the cache; a failed write is logged and otherwise ignored.
async fn store<V: Clone>(cache: &BoundedCache<V>, key: &str, value: V) {
    if let Err(err) = cache.set(key, value).await {
        warn!("Failed to cache '{}': {}", key, err);
    }
}

/// Index range of the page `[offset, offset + limit)` clamped to `len`.
fn page_window(len: usize, limit: usize, offset: usize) -> Range<usize> {
    let start = offset.min(len);
    let end = offset.saturating_add(limit).min(len);
    start..end
}
