use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Query preprocessing function is not initialized. Call `initialize_preprocessor()` first.")]
    PreprocessorUninitialized,

    #[error("Query record has no `{0}` field")]
    MissingQueryField(String),

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
