use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

pub const DEFAULT_MODEL_NAME: &str = "sentence-transformers/multi-qa-MiniLM-L6-cos-v1";
pub const DEFAULT_TEXT_TO_EMBED_FN: &str = "get_enriched_text";

/// The `[experiment]` table. Missing keys fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentSettings {
    pub model_name: String,
    pub text_to_embed_fn: String,
    pub normalize_embeddings: bool,
}

impl Default for ExperimentSettings {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL_NAME.to_string(),
            text_to_embed_fn: DEFAULT_TEXT_TO_EMBED_FN.to_string(),
            normalize_embeddings: true,
        }
    }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_from(Path::new("."), &env_name)
    }

    pub fn load_from(dir: &Path, env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::new()
            .merge(Serialized::default("experiment", ExperimentSettings::default()))
            .merge(Toml::file(dir.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("config.test.toml"))),
            other => tracing::warn!(env = other, "unknown RUST_ENV, using base config only"),
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.validate()?;
        tracing::debug!(env = env_name, dir = %dir.display(), "configuration loaded");
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn experiment(&self) -> anyhow::Result<ExperimentSettings> {
        self.get("experiment")
    }

    fn validate(&self) -> anyhow::Result<()> {
        let experiment = self
            .experiment()
            .map_err(|e| crate::Error::InvalidConfig(e.to_string()))?;
        if experiment.model_name.trim().is_empty() {
            return Err(crate::Error::InvalidConfig("experiment.model_name is empty".to_string()).into());
        }
        Ok(())
    }
}
