//! Catalog entities and HTTP request/response models
//!
//! `pokemon` holds the upstream payload shapes; `requests` and `responses`
//! are the DTOs used by the HTTP layer.

pub mod pokemon;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use pokemon::{NamedResource, Pokemon, PokemonList, PokemonType, Sprites};
pub use requests::{ListQuery, SearchQuery};
pub use responses::{
    ClearResponse, DataResponse, HealthResponse, LayerStats, ListResponse, Pagination,
    SearchResponse, StatsResponse,
};
