use thiserror::Error;

/// Errors returned while generating or emitting an embed document.
#[derive(Debug, Error)]
pub enum FederError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("display error: {0}")]
    Display(String),
}

/// Result alias for feder operations.
pub type Result<T> = std::result::Result<T, FederError>;
