//! Error types for codex-core

use crate::pagination::PageError;
use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Unknown entity kind: {0}")]
    UnknownKind(String),

    #[error("Missing translation for locale {0}")]
    MissingTranslation(String),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error("Config IO error: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),

    #[error("Invalid config: {0}")]
    ConfigValidation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
