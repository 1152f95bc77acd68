//! Service Module
//!
//! Read-through caching and incremental search over the catalog.

pub mod keys;
mod layers;
mod pokedex;

pub use layers::CacheLayers;
pub use pokedex::{PokedexService, SearchConfig};
