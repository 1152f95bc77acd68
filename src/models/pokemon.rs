//! Catalog entities
//!
//! Shapes of the PokeAPI payloads this service caches. Values are treated as
//! immutable once fetched.

use serde::{Deserialize, Serialize};

/// A single catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub types: Vec<PokemonType>,
    #[serde(default)]
    pub sprites: Sprites,
    /// Some entries upstream report `null` here
    #[serde(default)]
    pub base_experience: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonType {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub back_default: Option<String>,
}

/// Name plus the upstream URL that resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// One page of the catalog listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonList {
    /// Total number of items in the catalog, not in this page
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

impl PokemonList {
    /// Names on this page containing `term`, in page order.
    ///
    /// `term` must already be lowercase; names are compared lowercased.
    pub fn names_containing(&self, term: &str) -> Vec<String> {
        self.results
            .iter()
            .filter(|entry| entry.name.to_lowercase().contains(term))
            .map(|entry| entry.name.clone())
            .collect()
    }
}
