//! Domain types shared by the indexing and query pipelines.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type MovieId = String;

/// Raw query as received by the query pipeline, keyed by field name.
pub type QueryRecord = HashMap<String, String>;

/// Field of a `QueryRecord` holding the free-text query.
pub const QUERY_TEXT_KEY: &str = "query";

/// A catalogue entry that the indexing pipeline turns into embedding text.
///
/// Only `id` and `title` are required when deserializing; everything else
/// defaults to empty so sparse catalogue rows still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: String,
    pub genres: Vec<String>,
    pub release_year: Option<u16>,
    pub director: Option<String>,
    pub cast: Vec<String>,
    pub keywords: Vec<String>,
}

impl Movie {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Build a `QueryRecord` carrying just the free-text query.
pub fn query_record(text: impl Into<String>) -> QueryRecord {
    let mut record = QueryRecord::new();
    record.insert(QUERY_TEXT_KEY.to_string(), text.into());
    record
}
