//! Catalog Source Module
//!
//! Abstracts the remote paginated catalog behind [`CatalogSource`] so the
//! service can be driven by the real PokeAPI client or an in-process catalog.

mod http;
mod memory;

use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::models::{Pokemon, PokemonList};

pub use http::PokeApiClient;
pub use memory::InMemoryCatalog;

/// Default upstream catalog
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Read access to the catalog.
///
/// Implementations must be safe to call concurrently. Callers bound each call
/// with their own deadline; dropping the returned future cancels the call.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches one item by numeric id.
    async fn fetch_by_id(&self, id: u32) -> CatalogResult<Pokemon>;

    /// Fetches one item by name. Names are matched case-insensitively.
    async fn fetch_by_name(&self, name: &str) -> CatalogResult<Pokemon>;

    /// Fetches `limit` listing entries starting at `offset`, along with the
    /// total catalog size.
    async fn fetch_page(&self, limit: usize, offset: usize) -> CatalogResult<PokemonList>;
}
