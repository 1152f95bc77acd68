//! API Handlers
//!
//! HTTP request handlers for each catalog endpoint. Every call into the
//! service runs under the configured request deadline.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::warn;

use crate::config::Config;
use crate::error::{ApiError, ApiResult, CatalogResult};
use crate::models::{
    ClearResponse, DataResponse, HealthResponse, ListQuery, ListResponse, Pagination, Pokemon,
    PokemonList, SearchQuery, SearchResponse, StatsResponse,
};
use crate::service::PokedexService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: PokedexService,
    /// Deadline applied to each request's catalog work
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(service: PokedexService, request_timeout: Duration) -> Self {
        Self {
            service,
            request_timeout,
        }
    }

    /// Creates a new AppState using the deadline from `config`.
    pub fn from_config(service: PokedexService, config: &Config) -> Self {
        Self::new(service, config.request_timeout())
    }

    /// Runs `work` under the request deadline. When the deadline fires the
    /// work future is dropped, cancelling any outstanding catalog call.
    async fn within_deadline<T, F>(&self, work: F) -> ApiResult<T>
    where
        F: Future<Output = CatalogResult<T>>,
    {
        match tokio::time::timeout(self.request_timeout, work).await {
            Ok(result) => result.map_err(ApiError::from),
            Err(_) => {
                warn!("Request exceeded deadline of {:?}", self.request_timeout);
                Err(ApiError::Timeout(self.request_timeout.as_secs()))
            }
        }
    }
}

/// Handler for GET /api/v1/pokemon?limit&offset
pub async fn list_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ListResponse<Arc<PokemonList>>>> {
    let limit = query.limit();
    let offset = query.offset();

    let page = state
        .within_deadline(state.service.get_list(limit, offset))
        .await?;

    Ok(Json(ListResponse {
        data: page,
        pagination: Pagination { limit, offset },
    }))
}

/// Handler for GET /api/v1/pokemon/search?q&limit&offset
pub async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<SearchResponse<Arc<Pokemon>>>> {
    let term = query.term().map_err(ApiError::InvalidRequest)?;
    let limit = query.limit();
    let offset = query.offset();

    let results = state
        .within_deadline(state.service.search_by_title(term, limit, offset))
        .await?;

    Ok(Json(SearchResponse::new(results, term, limit, offset)))
}

/// Handler for GET /api/v1/pokemon/:id
pub async fn get_by_id_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<Arc<Pokemon>>>> {
    let id: u32 = id
        .parse()
        .map_err(|_| ApiError::InvalidRequest(format!("Invalid Pokemon ID: {}", id)))?;

    let pokemon = state.within_deadline(state.service.get_by_id(id)).await?;
    Ok(Json(DataResponse::new(pokemon)))
}

/// Handler for GET /api/v1/pokemon/name/:name
pub async fn get_by_name_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<DataResponse<Arc<Pokemon>>>> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::InvalidRequest(
            "Pokemon name is required".to_string(),
        ));
    }

    let pokemon = state
        .within_deadline(state.service.get_by_name(name))
        .await?;
    Ok(Json(DataResponse::new(pokemon)))
}

/// Handler for GET /api/v1/cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.service.stats().await)
}

/// Handler for DELETE /api/v1/cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.service.clear_caches().await;
    Json(ClearResponse::cleared())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
