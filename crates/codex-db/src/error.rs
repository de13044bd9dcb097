//! Error types for generation storage and dataset builds.

use codex_core::{AnkamaId, EntityKind};
use thiserror::Error;

/// Errors that can occur while building, publishing or reading a generation.
#[derive(Debug, Error)]
pub enum Error {
    /// Native DB error.
    #[error("Database error: {0}")]
    Database(String),

    /// IO error while reading a dataset file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// RON dataset could not be parsed (includes missing translations).
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// JSON dataset could not be parsed (includes missing translations).
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The dataset lacks a whole entity kind.
    #[error("Dataset has no {0} collection")]
    MissingKind(EntityKind),

    /// Two records of one kind share an id.
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: EntityKind, id: AnkamaId },

    /// A set lists the same member twice.
    #[error("Set {set} lists member {member} more than once")]
    DuplicateSetMember { set: AnkamaId, member: AnkamaId },

    /// A recipe names a component that no item table holds.
    #[error("Recipe component {0} not found")]
    MissingComponent(AnkamaId),

    /// Generation has more records of one kind than positions can address.
    #[error("Too many {0} records")]
    TooManyRecords(EntityKind),
}

impl Error {
    /// Whether this error means the dataset itself is unusable (as opposed to storage faults)
    pub fn is_dataset_error(&self) -> bool {
        !matches!(self, Error::Database(_))
    }
}

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<native_db::db_type::Error> for Error {
    fn from(err: native_db::db_type::Error) -> Self {
        Error::Database(err.to_string())
    }
}
