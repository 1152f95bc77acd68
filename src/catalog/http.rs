//! PokeAPI HTTP client
//!
//! This is the only place that interprets upstream status codes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::CatalogSource;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{Pokemon, PokemonList};

/// [`CatalogSource`] backed by the PokeAPI REST endpoints.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl PokeApiClient {
    /// Creates a client for `base_url` (e.g. `https://pokeapi.co/api/v2`)
    /// whose requests give up after `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> CatalogResult<Self> {
        let raw = base_url.into();
        let base_url = Url::parse(raw.trim_end_matches('/'))
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| CatalogError::Transport(format!("invalid catalog base URL: {}", raw)))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pokedex-cache/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CatalogError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Appends `segments` to the base path, percent-encoding each one so a
    /// segment can never introduce `/`, `..`, `?` or `#`.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, subject: &str) -> CatalogResult<T> {
        debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                CatalogError::Transport(format!("request to {} timed out", url))
            } else {
                CatalogError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(subject.to_string()));
        }
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::Transport(format!("failed to read response body: {}", e)))?;

        serde_json::from_slice(&body).map_err(|e| CatalogError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CatalogSource for PokeApiClient {
    async fn fetch_by_id(&self, id: u32) -> CatalogResult<Pokemon> {
        let id = id.to_string();
        let url = self.endpoint(&["pokemon", id.as_str()]);
        self.get_json(url, &id).await
    }

    async fn fetch_by_name(&self, name: &str) -> CatalogResult<Pokemon> {
        let name = name.to_lowercase();
        let url = self.endpoint(&["pokemon", name.as_str()]);
        self.get_json(url, &name).await
    }

    async fn fetch_page(&self, limit: usize, offset: usize) -> CatalogResult<PokemonList> {
        let mut url = self.endpoint(&["pokemon"]);
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());
        self.get_json(url, "pokemon list").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = PokeApiClient::new("http://localhost:1234/api/v2/", Duration::from_secs(1))
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234/api/v2");
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        assert!(PokeApiClient::new("not a url", Duration::from_secs(1)).is_err());
        assert!(PokeApiClient::new("mailto:ash@example.com", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_endpoint_escapes_each_segment() {
        let client = PokeApiClient::new("http://localhost:1234/api/v2/", Duration::from_secs(1))
            .unwrap();

        assert_eq!(
            client.endpoint(&["pokemon", "mr-mime"]).as_str(),
            "http://localhost:1234/api/v2/pokemon/mr-mime"
        );
        assert_eq!(
            client.endpoint(&["pokemon", "../berry/1?x#y"]).path(),
            "/api/v2/pokemon/..%2Fberry%2F1%3Fx%23y"
        );
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_transport_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let client = PokeApiClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let result = client.fetch_by_id(1).await;
        assert!(matches!(result, Err(CatalogError::Transport(_))));
    }
}
