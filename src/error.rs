use thiserror::Error;

/// Error taxonomy for page evaluation.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("page parse error: {0}")]
    Parse(String),

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias used throughout the library.
pub type Result<T> = std::result::Result<T, EvalError>;
