//! Retrieval experiment configuration.
//!
//! `ExperimentConfig` bundles the text-to-embed strategy, the embedding model
//! parameters and a lazily bound query preprocessor, and derives the index
//! cache key and provenance summary from them.

pub mod exp_config;
pub mod query_prepro;
pub mod text_to_embed;

pub use exp_config::{ExpParams, ExperimentConfig, UNBOUND_FN_NAME};
pub use query_prepro::{clean_query_txt, resolve_query_preprocessor, QueryPreprocessFn};
pub use text_to_embed::{get_enriched_text, get_plain_title, get_title_and_overview, TextToEmbedFn};
