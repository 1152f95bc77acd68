//! API Module
//!
//! HTTP handlers and routing for the catalog REST API.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /api/v1/pokemon?limit&offset` - Paginated catalog listing
//! - `GET /api/v1/pokemon/search?q&limit&offset` - Substring search by name
//! - `GET /api/v1/pokemon/:id` - Lookup by numeric id
//! - `GET /api/v1/pokemon/name/:name` - Lookup by name
//! - `GET /api/v1/cache/stats` - Per-layer cache statistics
//! - `DELETE /api/v1/cache` - Clear every cache layer

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
