//! Pokedex Cache - read-through caching backend for the PokeAPI catalog
//!
//! Serves point lookups, listing pages and substring search from a bounded
//! TTL/LRU cache, falling back to the upstream catalog on a miss.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::{CacheLayers, PokedexService, SearchConfig};
pub use tasks::spawn_cleanup_task;
