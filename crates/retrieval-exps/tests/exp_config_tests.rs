use std::sync::Arc;

use retrieval_core::config::ExperimentSettings;
use retrieval_core::types::{query_record, Movie};
use retrieval_core::Error;
use retrieval_exps::{clean_query_txt, ExperimentConfig, QueryPreprocessFn, TextToEmbedFn, UNBOUND_FN_NAME};

const DEFAULT_ID: &str = "sentence-transformers_multi-qa-MiniLM-L6-cos-v1_get_enriched_text_True";

fn sample_queries() -> Vec<&'static str> {
    vec!["Space Opera!", "  films   about DREAMS ", "", "¿Qué pasa?", "R2-D2 & C-3PO"]
}

#[test]
fn preprocessor_unbound_after_construction() {
    let config = ExperimentConfig::default();
    assert!(!config.is_preprocessor_initialized());
    assert_eq!(config.query_prepro_fn(), None);

    let err = config.query_prepro(&query_record("anything")).unwrap_err();
    assert!(matches!(err, Error::PreprocessorUninitialized));
    let msg = err.to_string();
    assert!(msg.contains("not initialized"), "got: {}", msg);
    assert!(msg.contains("initialize_preprocessor()"), "got: {}", msg);
}

#[test]
fn bound_preprocessor_matches_clean_query_txt() {
    let config = ExperimentConfig::default();
    config.initialize_preprocessor();
    assert_eq!(config.query_prepro_fn(), Some(QueryPreprocessFn::CleanQueryTxt));

    for q in sample_queries() {
        let record = query_record(q);
        assert_eq!(
            config.query_prepro(&record).unwrap(),
            clean_query_txt(&record).unwrap(),
            "query {:?}",
            q
        );
    }
}

#[test]
fn bound_preprocessor_errors_pass_through() {
    let config = ExperimentConfig::default();
    config.initialize_preprocessor();
    let err = config.query_prepro(&Default::default()).unwrap_err();
    assert!(matches!(err, Error::MissingQueryField(_)));
}

#[test]
fn default_unique_id() {
    let config = ExperimentConfig::default();
    assert_eq!(config.index_config_unique_id(), DEFAULT_ID);
}

#[test]
fn unique_id_is_stable_and_ignores_preprocessor() {
    let config = ExperimentConfig::default();
    let before = config.index_config_unique_id();
    assert_eq!(before, config.index_config_unique_id());

    config.initialize_preprocessor();
    assert_eq!(before, config.index_config_unique_id());
}

#[test]
fn unique_id_replaces_every_slash() {
    let config = ExperimentConfig::new(TextToEmbedFn::PlainTitle, "org/team/model-v2", false);
    assert_eq!(config.index_config_unique_id(), "org_team_model-v2_get_plain_title_False");
}

#[test]
fn unique_id_tracks_governing_attributes() {
    let base = ExperimentConfig::default();
    let other_fn = ExperimentConfig::new(TextToEmbedFn::TitleAndOverview, base.model_name.clone(), true);
    let mut other_flag = ExperimentConfig::default();
    other_flag.normalize_embeddings = false;

    assert_ne!(base.index_config_unique_id(), other_fn.index_config_unique_id());
    assert_ne!(base.index_config_unique_id(), other_flag.index_config_unique_id());
    assert_eq!(
        ExperimentConfig::default().index_config_unique_id(),
        base.index_config_unique_id(),
        "equal attributes give equal ids"
    );
}

#[test]
fn exp_params_reports_binding_state() {
    let config = ExperimentConfig::default();
    let params = config.exp_params();
    assert_eq!(params.query_prepro_fn, UNBOUND_FN_NAME);
    assert_eq!(params.query_prepro_fn, "None");

    config.initialize_preprocessor();
    assert_eq!(config.exp_params().query_prepro_fn, "clean_query_txt");
}

#[test]
fn exp_params_keeps_raw_model_name() {
    let config = ExperimentConfig::default();
    let params = config.exp_params();
    assert_eq!(params.model_name, "sentence-transformers/multi-qa-MiniLM-L6-cos-v1");
    assert!(config.index_config_unique_id().starts_with("sentence-transformers_"));
    assert_eq!(params.text_to_embed_fn, "get_enriched_text");
    assert!(params.normalize_embeddings);
}

#[test]
fn exp_params_serializes_to_four_entries() {
    let config = ExperimentConfig::default();
    let value = serde_json::to_value(config.exp_params()).unwrap();
    let map = value.as_object().expect("object");
    assert_eq!(map.len(), 4);
    assert_eq!(map["model_name"], "sentence-transformers/multi-qa-MiniLM-L6-cos-v1");
    assert_eq!(map["text_to_embed_fn"], "get_enriched_text");
    assert_eq!(map["normalize_embeddings"], true);
    assert_eq!(map["query_prepro_fn"], "None");
}

#[test]
fn initialize_twice_keeps_binding() {
    let config = ExperimentConfig::default();
    config.initialize_preprocessor();
    let first = config.query_prepro_fn();
    config.initialize_preprocessor();
    assert_eq!(config.query_prepro_fn(), first);
    assert_eq!(config.query_prepro(&query_record("Hello, World")).unwrap(), "hello world");
}

#[test]
fn concurrent_initialization_binds_once() {
    let config = Arc::new(ExperimentConfig::default());
    std::thread::scope(|s| {
        for _ in 0..8 {
            let config = Arc::clone(&config);
            s.spawn(move || {
                config.initialize_preprocessor();
                assert_eq!(config.query_prepro(&query_record("A-B")).unwrap(), "a b");
            });
        }
    });
    assert_eq!(config.exp_params().query_prepro_fn, "clean_query_txt");
}

#[test]
fn text_to_embed_uses_bound_strategy() {
    let movie = Movie {
        id: "tt0816692".to_string(),
        title: "Interstellar".to_string(),
        overview: "Explorers travel through a wormhole.".to_string(),
        release_year: Some(2014),
        ..Movie::default()
    };
    let enriched = ExperimentConfig::default();
    assert_eq!(
        enriched.text_to_embed(&movie),
        "Title: Interstellar\nYear: 2014\nOverview: Explorers travel through a wormhole."
    );
    let plain = ExperimentConfig::new(TextToEmbedFn::PlainTitle, "m", true);
    assert_eq!(plain.text_to_embed(&movie), "Interstellar");
}

#[test]
fn from_settings_parses_function_name() {
    let settings = ExperimentSettings {
        model_name: "BAAI/bge-m3".to_string(),
        text_to_embed_fn: "get_title_and_overview".to_string(),
        normalize_embeddings: false,
    };
    let config = ExperimentConfig::from_settings(&settings).unwrap();
    assert_eq!(config.text_to_embed_fn(), TextToEmbedFn::TitleAndOverview);
    assert_eq!(config.index_config_unique_id(), "BAAI_bge-m3_get_title_and_overview_False");
    assert!(!config.is_preprocessor_initialized());

    let from_defaults = ExperimentConfig::from_settings(&ExperimentSettings::default()).unwrap();
    assert_eq!(from_defaults.index_config_unique_id(), DEFAULT_ID);
}

#[test]
fn from_settings_rejects_unknown_function() {
    let settings = ExperimentSettings { text_to_embed_fn: "get_poster".to_string(), ..Default::default() };
    let err = ExperimentConfig::from_settings(&settings).unwrap_err();
    assert!(matches!(err, Error::UnknownFunction(ref name) if name == "get_poster"));
}
