use std::fmt;

use retrieval_core::types::{QueryRecord, QUERY_TEXT_KEY};
use retrieval_core::{Error, Result};

/// Named query preprocessors. Bound into an `ExperimentConfig` after
/// construction via `ExperimentConfig::initialize_preprocessor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryPreprocessFn {
    CleanQueryTxt,
}

impl QueryPreprocessFn {
    pub fn name(self) -> &'static str {
        match self {
            QueryPreprocessFn::CleanQueryTxt => "clean_query_txt",
        }
    }

    pub fn apply(self, query: &QueryRecord) -> Result<String> {
        match self {
            QueryPreprocessFn::CleanQueryTxt => clean_query_txt(query),
        }
    }
}

impl fmt::Display for QueryPreprocessFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The preprocessor the query pipeline uses.
pub fn resolve_query_preprocessor() -> QueryPreprocessFn {
    QueryPreprocessFn::CleanQueryTxt
}

/// Lowercase the `query` field, turn punctuation into spaces and collapse
/// whitespace runs.
pub fn clean_query_txt(query: &QueryRecord) -> Result<String> {
    let raw = query
        .get(QUERY_TEXT_KEY)
        .ok_or_else(|| Error::MissingQueryField(QUERY_TEXT_KEY.to_string()))?;
    let replaced: String = raw
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    Ok(replaced.split_whitespace().collect::<Vec<_>>().join(" "))
}
