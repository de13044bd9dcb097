//! Codex DB - dual-generation indexed tables using native_db
//!
//! Provides:
//! - One in-memory table per entity kind, indexed by position and external id
//! - Immutable generations built from a complete dataset
//! - A generation store that publishes new generations atomically
//! - Recipe resolution against the item tables
//! - The effect/condition element catalog of each generation

mod dataset;
mod error;
#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;
mod generation;
mod models;
mod queries;
pub mod recipe;
mod store;

pub use dataset::{Dataset, DatasetSource, JsonFile, RonFile};
pub use error::{Error, Result};
pub use generation::{Generation, GenerationInfo, Slot};
pub use queries::{ReadTxn, Scan};
pub use recipe::ResolvedComponent;
pub use store::GenerationStore;
