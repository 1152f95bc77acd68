//! Integration Tests for API Endpoints
//!
//! Tests the full request/response cycle for each endpoint against an
//! in-process catalog.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use pokedex_cache::{
    api::create_router, catalog::InMemoryCatalog, AppState, CacheLayers, PokedexService,
};
use serde_json::Value;
use tower::ServiceExt;

const NAMES: [&str; 9] = [
    "bulbasaur",
    "ivysaur",
    "venusaur",
    "charmander",
    "charmeleon",
    "charizard",
    "squirtle",
    "wartortle",
    "blastoise",
];

// == Helper Functions ==

fn create_test_app(catalog: InMemoryCatalog) -> (Router, Arc<InMemoryCatalog>) {
    let catalog = Arc::new(catalog);
    let caches = CacheLayers::new(100, Duration::from_secs(300)).unwrap();
    let service = PokedexService::new(catalog.clone(), caches);
    let app = create_router(AppState::new(service, Duration::from_secs(5)));
    (app, catalog)
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri).await
}

// == Health ==

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = create_test_app(InMemoryCatalog::from_names(NAMES));

    let (status, json) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "pokedex-cache");
    assert!(json["timestamp"].is_string());
}

// == Point Lookups ==

#[tokio::test]
async fn test_get_by_id_cached_after_first_call() {
    let (app, catalog) = create_test_app(InMemoryCatalog::from_names(NAMES));

    let (status, json) = get(&app, "/api/v1/pokemon/4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["name"], "charmander");

    let (status, _) = get(&app, "/api/v1/pokemon/4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(catalog.id_calls(), 1);
}

#[tokio::test]
async fn test_get_by_id_invalid() {
    let (app, _) = create_test_app(InMemoryCatalog::from_names(NAMES));

    let (status, json) = get(&app, "/api/v1/pokemon/abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn test_get_by_id_not_found() {
    let (app, _) = create_test_app(InMemoryCatalog::from_names(NAMES));

    let (status, json) = get(&app, "/api/v1/pokemon/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_get_by_name_case_insensitive_cache() {
    let (app, catalog) = create_test_app(InMemoryCatalog::from_names(NAMES));

    let (status, json) = get(&app, "/api/v1/pokemon/name/Squirtle").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["id"], 7);

    let (status, _) = get(&app, "/api/v1/pokemon/name/squirtle").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(catalog.name_calls(), 1);
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway() {
    let (app, _) =
        create_test_app(InMemoryCatalog::from_names(NAMES).with_failing_name("pikachu"));

    let (status, json) = get(&app, "/api/v1/pokemon/name/pikachu").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json["error"].as_str().unwrap().contains("500"));
}

// == List ==

#[tokio::test]
async fn test_list_endpoint_with_paging() {
    let (app, _) = create_test_app(InMemoryCatalog::from_names(NAMES));

    let (status, json) = get(&app, "/api/v1/pokemon?limit=3&offset=3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pagination"]["limit"], 3);
    assert_eq!(json["pagination"]["offset"], 3);
    assert_eq!(json["data"]["count"], 9);
    let names: Vec<&str> = json["data"]["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["charmander", "charmeleon", "charizard"]);
}

#[tokio::test]
async fn test_list_endpoint_clamps_bad_params() {
    let (app, _) = create_test_app(InMemoryCatalog::from_names(NAMES));

    let (status, json) = get(&app, "/api/v1/pokemon?limit=500&offset=-3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pagination"]["limit"], 20);
    assert_eq!(json["pagination"]["offset"], 0);
}

// == Search ==

#[tokio::test]
async fn test_search_endpoint() {
    let (app, catalog) = create_test_app(InMemoryCatalog::from_names(NAMES));

    let (status, json) = get(&app, "/api/v1/pokemon/search?q=Char&limit=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["search"]["query"], "Char");
    assert_eq!(json["search"]["limit"], 2);
    assert_eq!(json["search"]["offset"], 0);
    assert_eq!(json["search"]["count"], 2);
    assert_eq!(json["data"][0]["name"], "charmander");
    assert_eq!(json["data"][1]["name"], "charmeleon");

    // second page reuses the candidate scan
    let (status, json) = get(&app, "/api/v1/pokemon/search?q=char&limit=2&offset=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["search"]["count"], 1);
    assert_eq!(json["data"][0]["name"], "charizard");
    assert_eq!(catalog.page_calls(), 1);
}

#[tokio::test]
async fn test_search_endpoint_requires_query() {
    let (app, _) = create_test_app(InMemoryCatalog::from_names(NAMES));

    let (status, json) = get(&app, "/api/v1/pokemon/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("'q'"));

    let (status, _) = get(&app, "/api/v1/pokemon/search?q=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_endpoint_no_matches() {
    let (app, _) = create_test_app(InMemoryCatalog::from_names(NAMES));

    let (status, json) = get(&app, "/api/v1/pokemon/search?q=mewtwo").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["search"]["count"], 0);
    assert_eq!(json["search"]["limit"], 10);
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_endpoint_upstream_down() {
    let (app, _) = create_test_app(InMemoryCatalog::from_names(NAMES).with_max_page_size(10));

    let (status, _) = get(&app, "/api/v1/pokemon/search?q=char").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

// == Cache Management ==

#[tokio::test]
async fn test_stats_and_clear_endpoints() {
    let (app, catalog) = create_test_app(InMemoryCatalog::from_names(NAMES));

    get(&app, "/api/v1/pokemon/1").await;
    get(&app, "/api/v1/pokemon/1").await;

    let (status, json) = get(&app, "/api/v1/cache/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["items"]["hits"], 1);
    assert_eq!(json["items"]["misses"], 1);
    assert_eq!(json["items"]["total_entries"], 1);
    assert_eq!(json["items"]["hit_rate"], 0.5);

    let (status, json) = send(&app, "DELETE", "/api/v1/cache").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["message"].as_str().unwrap().contains("cleared"));

    get(&app, "/api/v1/pokemon/1").await;
    assert_eq!(catalog.id_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_request_deadline_returns_504() {
    let catalog = Arc::new(
        InMemoryCatalog::from_names(NAMES).with_latency(Duration::from_secs(60)),
    );
    let caches = CacheLayers::new(100, Duration::from_secs(300)).unwrap();
    let service = PokedexService::new(catalog, caches);
    let app = create_router(AppState::new(service, Duration::from_secs(2)));

    let (status, json) = get(&app, "/api/v1/pokemon/search?q=char").await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert!(json["error"].as_str().unwrap().contains("timed out"));
}
