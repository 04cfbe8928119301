//! Experiment configuration and the identifiers derived from it.
//!
//! The query preprocessor is not known at construction. It is bound once,
//! later, by [`ExperimentConfig::initialize_preprocessor`]; until then
//! invoking it fails while [`ExperimentConfig::exp_params`] reports it as
//! [`UNBOUND_FN_NAME`].

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use retrieval_core::config::{ExperimentSettings, DEFAULT_MODEL_NAME};
use retrieval_core::types::{Movie, QueryRecord};
use retrieval_core::{Error, Result};

use crate::query_prepro::{resolve_query_preprocessor, QueryPreprocessFn};
use crate::text_to_embed::TextToEmbedFn;

/// Reported in place of a function name for a preprocessor that is not bound yet.
pub const UNBOUND_FN_NAME: &str = "None";

/// Provenance snapshot of an experiment, serialized alongside its results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpParams {
    pub model_name: String,
    pub text_to_embed_fn: String,
    pub normalize_embeddings: bool,
    pub query_prepro_fn: String,
}

#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    text_to_embed_fn: TextToEmbedFn,
    pub model_name: String,
    /// Whether embedding vectors are scaled to unit length.
    pub normalize_embeddings: bool,
    query_prepro_fn: OnceLock<QueryPreprocessFn>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self::new(TextToEmbedFn::default(), DEFAULT_MODEL_NAME, true)
    }
}

impl ExperimentConfig {
    pub fn new(text_to_embed_fn: TextToEmbedFn, model_name: impl Into<String>, normalize_embeddings: bool) -> Self {
        Self {
            text_to_embed_fn,
            model_name: model_name.into(),
            normalize_embeddings,
            query_prepro_fn: OnceLock::new(),
        }
    }

    pub fn from_settings(settings: &ExperimentSettings) -> Result<Self> {
        let text_to_embed_fn = settings.text_to_embed_fn.parse()?;
        Ok(Self::new(text_to_embed_fn, settings.model_name.clone(), settings.normalize_embeddings))
    }

    /// Bind the query preprocessor. Safe to call repeatedly and from several
    /// threads; only the first call binds.
    pub fn initialize_preprocessor(&self) {
        let bound = self.query_prepro_fn.get_or_init(|| {
            let resolved = resolve_query_preprocessor();
            tracing::debug!(query_prepro_fn = resolved.name(), "query preprocessor bound");
            resolved
        });
        tracing::trace!(query_prepro_fn = bound.name(), "initialize_preprocessor");
    }

    pub fn is_preprocessor_initialized(&self) -> bool {
        self.query_prepro_fn.get().is_some()
    }

    pub fn text_to_embed_fn(&self) -> TextToEmbedFn {
        self.text_to_embed_fn
    }

    pub fn query_prepro_fn(&self) -> Option<QueryPreprocessFn> {
        self.query_prepro_fn.get().copied()
    }

    pub fn text_to_embed(&self, movie: &Movie) -> String {
        self.text_to_embed_fn.apply(movie)
    }

    pub fn query_prepro(&self, query: &QueryRecord) -> Result<String> {
        let prepro = self.query_prepro_fn.get().ok_or(Error::PreprocessorUninitialized)?;
        prepro.apply(query)
    }

    /// Cache key for index artifacts built under this configuration.
    ///
    /// `/` in the model name becomes `_` so the key is usable as a directory
    /// name. The query preprocessor does not take part: it never changes what
    /// gets indexed.
    pub fn index_config_unique_id(&self) -> String {
        let model = self.model_name.replace('/', "_");
        let id = format!(
            "{}_{}_{}",
            model,
            self.text_to_embed_fn.name(),
            flag_str(self.normalize_embeddings)
        );
        tracing::trace!(index_config_unique_id = %id, "derived index config id");
        id
    }

    pub fn exp_params(&self) -> ExpParams {
        ExpParams {
            model_name: self.model_name.clone(),
            text_to_embed_fn: self.text_to_embed_fn.name().to_string(),
            normalize_embeddings: self.normalize_embeddings,
            query_prepro_fn: self
                .query_prepro_fn
                .get()
                .map_or(UNBOUND_FN_NAME, |f| f.name())
                .to_string(),
        }
    }
}

// Capitalized to stay compatible with cache directories already on disk.
fn flag_str(flag: bool) -> &'static str {
    if flag {
        "True"
    } else {
        "False"
    }
}
