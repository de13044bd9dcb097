//! Codex Core - domain model and request-independent logic
//!
//! This crate holds everything the read engine needs that does not touch
//! storage:
//! - Supported locales and complete per-locale strings (`Locale`, `Translations`)
//! - Multilingual records for every entity kind
//! - Category → subtype labels and image URL sets
//! - The pagination engine (validation, slicing, navigation links)
//! - RON configuration with environment overrides

pub mod category;
pub mod config;
mod error;
mod identity;
pub mod image;
mod locale;
pub mod pagination;
pub mod record;

pub use config::{ApiConfig, CodexConfig, ImageConfig, PaginationConfig};
pub use error::{Error, Result};
pub use identity::{parse_ankama_id, AnkamaId, EntityKind};
pub use image::{ImageKind, ImageSet};
pub use locale::{Locale, Translations};
pub use pagination::{LinkBuilder, Page, PageError, PageLinks, PageRequest, PaginationLinks};
pub use record::{
    Condition, Effect, EquipmentRecord, ItemRecord, ItemType, MountRecord, RecipeEntry, Record,
    SetLink, SetRecord, WeaponRecord, WeaponStats,
};
