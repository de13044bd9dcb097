//! Codex Render - localized projections and the public read API
//!
//! [`Codex`] answers list and detail requests from the active generation of a
//! [`codex_db::GenerationStore`], projecting multilingual records into one
//! locale and attaching pagination links.

mod engine;
mod error;
pub mod project;
pub mod representation;

pub use engine::{parse_target, Codex};
pub use error::{Error, RequestError, Result};
pub use project::Projector;
pub use representation::{Detail, ListPage, NonEmpty, Summary};
