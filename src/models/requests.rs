//! Request DTOs for the catalog API
//!
//! Query parameters arrive as raw strings so that malformed values fall back
//! to defaults instead of rejecting the request.

use serde::Deserialize;

// == Paging Limits ==
pub const LIST_DEFAULT_LIMIT: usize = 20;
pub const LIST_MAX_LIMIT: usize = 100;
pub const SEARCH_DEFAULT_LIMIT: usize = 10;
pub const SEARCH_MAX_LIMIT: usize = 50;

/// Parses a limit, falling back to `default` when missing, malformed, zero
/// or above `max`.
fn clamp_limit(raw: Option<&str>, default: usize, max: usize) -> usize {
    match raw.and_then(|v| v.trim().parse::<i64>().ok()) {
        Some(limit) if limit > 0 && limit as u64 <= max as u64 => limit as usize,
        _ => default,
    }
}

/// Parses an offset, falling back to zero when missing, malformed or negative.
fn clamp_offset(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0)
}

/// Query string for `GET /api/v1/pokemon`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl ListQuery {
    pub fn limit(&self) -> usize {
        clamp_limit(self.limit.as_deref(), LIST_DEFAULT_LIMIT, LIST_MAX_LIMIT)
    }

    pub fn offset(&self) -> usize {
        clamp_offset(self.offset.as_deref())
    }
}

/// Query string for `GET /api/v1/pokemon/search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Search term
    pub q: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl SearchQuery {
    /// Returns the search term, or an error message if it is missing or blank.
    pub fn term(&self) -> Result<&str, String> {
        match self.q.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => Ok(term),
            _ => Err("Search query 'q' is required".to_string()),
        }
    }

    pub fn limit(&self) -> usize {
        clamp_limit(self.limit.as_deref(), SEARCH_DEFAULT_LIMIT, SEARCH_MAX_LIMIT)
    }

    pub fn offset(&self) -> usize {
        clamp_offset(self.offset.as_deref())
    }
}
