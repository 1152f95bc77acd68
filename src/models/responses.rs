//! Response DTOs for the catalog API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::sync::Arc;

use serde::Serialize;

use crate::cache::CacheStats;

/// Wrapper for single-item responses: `{"data": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Pagination {
    pub limit: usize,
    pub offset: usize,
}

/// Response body for `GET /api/v1/pokemon`
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T> {
    pub data: T,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchMeta {
    pub query: String,
    pub limit: usize,
    pub offset: usize,
    /// Number of items in this page of results
    pub count: usize,
}

/// Response body for `GET /api/v1/pokemon/search`
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse<T> {
    pub data: Arc<Vec<T>>,
    pub search: SearchMeta,
}

impl<T> SearchResponse<T> {
    pub fn new(data: Arc<Vec<T>>, query: impl Into<String>, limit: usize, offset: usize) -> Self {
        let count = data.len();
        Self {
            data,
            search: SearchMeta {
                query: query.into(),
                limit,
                offset,
                count,
            },
        }
    }
}

/// Statistics for one cache layer, with the derived hit rate
#[derive(Debug, Clone, Serialize)]
pub struct LayerStats {
    #[serde(flatten)]
    pub stats: CacheStats,
    pub hit_rate: f64,
}

impl From<CacheStats> for LayerStats {
    fn from(stats: CacheStats) -> Self {
        let hit_rate = stats.hit_rate();
        Self { stats, hit_rate }
    }
}

/// Response body for `GET /api/v1/cache/stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub items: LayerStats,
    pub lists: LayerStats,
    pub searches: LayerStats,
    pub candidates: LayerStats,
}

/// Response body for `DELETE /api/v1/cache`
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
}

impl ClearResponse {
    pub fn cleared() -> Self {
        Self {
            message: "All cache layers cleared".to_string(),
        }
    }
}

/// Response body for `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status ("ok")
    pub status: String,
    pub service: String,
    /// Current timestamp in RFC 3339 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            service: "pokedex-cache".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
