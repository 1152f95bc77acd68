//! In-process catalog
//!
//! A [`CatalogSource`] over a fixed list of items. It counts every call, so
//! tests can assert exactly how often the cache let a request through, and it
//! can be told to fail specific lookups or oversized pages.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::CatalogSource;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{NamedResource, Pokemon, PokemonList};

const RESOURCE_BASE: &str = "memory://pokemon";

#[derive(Debug, Default)]
struct CallCounts {
    by_id: AtomicUsize,
    by_name: AtomicUsize,
    pages: AtomicUsize,
}

#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    items: Vec<Pokemon>,
    calls: CallCounts,
    failing_names: HashSet<String>,
    max_page_size: Option<usize>,
    latency: Duration,
}

impl InMemoryCatalog {
    pub fn new(items: Vec<Pokemon>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }

    /// Builds a catalog of bare items named `names`, with ids starting at 1.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Pokemon {
                id: i as u32 + 1,
                name: name.into(),
                height: 0,
                weight: 0,
                types: Vec::new(),
                sprites: Default::default(),
                base_experience: None,
            })
            .collect();
        Self::new(items)
    }

    /// Makes lookups of `name` fail with a 500 status.
    pub fn with_failing_name(mut self, name: &str) -> Self {
        self.failing_names.insert(name.to_lowercase());
        self
    }

    /// Makes page requests larger than `limit` fail with a 503 status.
    pub fn with_max_page_size(mut self, limit: usize) -> Self {
        self.max_page_size = Some(limit);
        self
    }

    /// Delays every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn id_calls(&self) -> usize {
        self.calls.by_id.load(Ordering::SeqCst)
    }

    pub fn name_calls(&self) -> usize {
        self.calls.by_name.load(Ordering::SeqCst)
    }

    pub fn page_calls(&self) -> usize {
        self.calls.pages.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn resource(pokemon: &Pokemon) -> NamedResource {
        NamedResource {
            name: pokemon.name.clone(),
            url: format!("{}/{}/", RESOURCE_BASE, pokemon.id),
        }
    }

    fn page_link(&self, limit: usize, offset: usize) -> String {
        format!("{}?limit={}&offset={}", RESOURCE_BASE, limit, offset)
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn fetch_by_id(&self, id: u32) -> CatalogResult<Pokemon> {
        self.calls.by_id.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        self.items
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    async fn fetch_by_name(&self, name: &str) -> CatalogResult<Pokemon> {
        self.calls.by_name.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        let name = name.to_lowercase();
        if self.failing_names.contains(&name) {
            return Err(CatalogError::Status {
                status: 500,
                url: format!("{}/{}", RESOURCE_BASE, name),
            });
        }

        self.items
            .iter()
            .find(|p| p.name.to_lowercase() == name)
            .cloned()
            .ok_or(CatalogError::NotFound(name))
    }

    async fn fetch_page(&self, limit: usize, offset: usize) -> CatalogResult<PokemonList> {
        self.calls.pages.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if self.max_page_size.is_some_and(|max| limit > max) {
            return Err(CatalogError::Status {
                status: 503,
                url: self.page_link(limit, offset),
            });
        }

        let count = self.items.len();
        let results = self
            .items
            .iter()
            .skip(offset)
            .take(limit)
            .map(Self::resource)
            .collect();

        let end = offset.saturating_add(limit);
        Ok(PokemonList {
            count,
            next: (end < count).then(|| self.page_link(limit, end)),
            previous: (offset > 0)
                .then(|| self.page_link(limit, offset.saturating_sub(limit))),
            results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_by_id_and_name() {
        let catalog = InMemoryCatalog::from_names(["bulbasaur", "Ivysaur"]);

        assert_eq!(catalog.fetch_by_id(2).await.unwrap().name, "Ivysaur");
        assert_eq!(catalog.fetch_by_name("IVYSAUR").await.unwrap().id, 2);
        assert!(catalog.fetch_by_id(3).await.unwrap_err().is_not_found());
        assert!(catalog.fetch_by_name("mew").await.unwrap_err().is_not_found());
        assert_eq!(catalog.id_calls(), 2);
        assert_eq!(catalog.name_calls(), 2);
    }

    #[tokio::test]
    async fn test_pages_report_total_count_and_links() {
        let catalog = InMemoryCatalog::from_names((0..25).map(|i| format!("mon{i}")));

        let first = catalog.fetch_page(10, 0).await.unwrap();
        assert_eq!(first.count, 25);
        assert_eq!(first.results.len(), 10);
        assert!(first.next.is_some());
        assert!(first.previous.is_none());

        let last = catalog.fetch_page(10, 20).await.unwrap();
        assert_eq!(last.results.len(), 5);
        assert_eq!(last.results[0].name, "mon20");
        assert!(last.next.is_none());
        assert!(last.previous.is_some());
        assert_eq!(catalog.page_calls(), 2);
    }

    #[tokio::test]
    async fn test_configured_failures() {
        let catalog = InMemoryCatalog::from_names(["pikachu"])
            .with_failing_name("Pikachu")
            .with_max_page_size(100);

        assert!(matches!(
            catalog.fetch_by_name("pikachu").await,
            Err(CatalogError::Status { status: 500, .. })
        ));
        assert!(catalog.fetch_page(100, 0).await.is_ok());
        assert!(matches!(
            catalog.fetch_page(500, 0).await,
            Err(CatalogError::Status { status: 503, .. })
        ));
    }
}
