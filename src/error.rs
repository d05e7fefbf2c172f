use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("grammar error: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type MetricsResult<T> = Result<T, MetricsError>;
