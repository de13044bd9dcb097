//! Error types for the read API

use codex_core::{AnkamaId, EntityKind, PageError};
use thiserror::Error;

/// A request rejected before any data was read
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RequestError {
    #[error(transparent)]
    Page(#[from] PageError),

    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Unknown entity kind: {0}")]
    UnknownKind(String),
}

/// Read API error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Bad request: {0}")]
    Rejected(#[from] RequestError),

    #[error("No {kind} with id {id}")]
    NotFound { kind: EntityKind, id: AnkamaId },

    /// Reload failed; the active generation is unchanged
    #[error("Generation build failed: {0}")]
    BuildFailed(#[source] codex_db::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] codex_db::Error),

    #[error("Configuration error: {0}")]
    Config(codex_core::Error),
}

impl Error {
    /// Whether the caller is at fault (bad request or unknown record)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Rejected(_) | Error::NotFound { .. })
    }
}

impl From<PageError> for Error {
    fn from(err: PageError) -> Self {
        Error::Rejected(RequestError::Page(err))
    }
}

impl From<codex_core::Error> for Error {
    fn from(err: codex_core::Error) -> Self {
        use codex_core::Error as Core;
        match err {
            Core::Page(e) => RequestError::Page(e).into(),
            Core::UnsupportedLocale(s) => RequestError::UnsupportedLocale(s).into(),
            Core::InvalidId(s) => RequestError::InvalidId(s).into(),
            Core::UnknownKind(s) => RequestError::UnknownKind(s).into(),
            other => Error::Config(other),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
