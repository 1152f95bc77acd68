//! Typed cache layers
//!
//! One [`BoundedCache`] per kind of cached value, so each lookup gets its
//! concrete type back without any downcasting. All layers share the same
//! capacity and TTL policy.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::BoundedCache;
use crate::error::Result;
use crate::models::{LayerStats, Pokemon, PokemonList, StatsResponse};
use crate::tasks::{spawn_cleanup_task, CleanupTask};

#[derive(Debug, Clone)]
pub struct CacheLayers {
    /// Point lookups, keyed by id and by name
    pub items: BoundedCache<Arc<Pokemon>>,
    /// Listing pages, keyed by (limit, offset)
    pub lists: BoundedCache<Arc<PokemonList>>,
    /// Paginated search results, keyed by (term, limit, offset)
    pub searches: BoundedCache<Arc<Vec<Arc<Pokemon>>>>,
    /// Candidate names per search term
    pub candidates: BoundedCache<Arc<Vec<String>>>,
}

impl CacheLayers {
    /// Builds every layer with the same `capacity` and `ttl`.
    ///
    /// # Errors
    /// Fails if `capacity` or `ttl` is zero.
    pub fn new(capacity: usize, ttl: Duration) -> Result<Self> {
        Ok(Self {
            items: BoundedCache::new(capacity, ttl)?,
            lists: BoundedCache::new(capacity, ttl)?,
            searches: BoundedCache::new(capacity, ttl)?,
            candidates: BoundedCache::new(capacity, ttl)?,
        })
    }

    /// Starts one expiry sweep per layer. The returned tasks stop when shut
    /// down, dropped, or when the layers themselves are dropped.
    pub fn spawn_cleanup_tasks(&self, interval: Duration) -> Vec<CleanupTask> {
        vec![
            spawn_cleanup_task("items", &self.items, interval),
            spawn_cleanup_task("lists", &self.lists, interval),
            spawn_cleanup_task("searches", &self.searches, interval),
            spawn_cleanup_task("candidates", &self.candidates, interval),
        ]
    }

    pub async fn clear(&self) {
        self.items.clear().await;
        self.lists.clear().await;
        self.searches.clear().await;
        self.candidates.clear().await;
    }

    pub async fn stats(&self) -> StatsResponse {
        StatsResponse {
            items: LayerStats::from(self.items.stats().await),
            lists: LayerStats::from(self.lists.stats().await),
            searches: LayerStats::from(self.searches.stats().await),
            candidates: LayerStats::from(self.candidates.stats().await),
        }
    }
}
