//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::catalog::DEFAULT_BASE_URL;
use crate::service::SearchConfig;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries each cache layer can hold
    pub cache_capacity: usize,
    /// TTL in seconds applied to every cache entry
    pub cache_ttl: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the upstream catalog API
    pub catalog_base_url: String,
    /// Deadline in seconds for each inbound request and each upstream call
    pub request_timeout: u64,
    /// Listing entries scanned on a search's first attempt
    pub search_initial_scan: usize,
    /// Listing entries scanned when widening a search
    pub search_expanded_scan: usize,
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum entries per cache layer (default: 1000)
    /// - `CACHE_TTL` - Entry TTL in seconds (default: 900)
    /// - `CLEANUP_INTERVAL` - Expiry sweep frequency in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `CATALOG_BASE_URL` - Upstream API (default: https://pokeapi.co/api/v2)
    /// - `REQUEST_TIMEOUT` - Request deadline in seconds (default: 30)
    /// - `SEARCH_INITIAL_SCAN` - First search scan size (default: 100)
    /// - `SEARCH_EXPANDED_SCAN` - Widened search scan size (default: 500)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_capacity: env_or("CACHE_CAPACITY", defaults.cache_capacity),
            cache_ttl: env_or("CACHE_TTL", defaults.cache_ttl),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            catalog_base_url: env::var("CATALOG_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.catalog_base_url),
            request_timeout: env_or("REQUEST_TIMEOUT", defaults.request_timeout),
            search_initial_scan: env_or("SEARCH_INITIAL_SCAN", defaults.search_initial_scan),
            search_expanded_scan: env_or("SEARCH_EXPANDED_SCAN", defaults.search_expanded_scan),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Sweep interval, never shorter than one second.
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn search(&self) -> SearchConfig {
        SearchConfig {
            initial_scan: self.search_initial_scan,
            expanded_scan: self.search_expanded_scan,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: 1000,
            cache_ttl: 900,
            cleanup_interval: 300,
            server_port: 8080,
            catalog_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: 30,
            search_initial_scan: 100,
            search_expanded_scan: 500,
        }
    }
}
