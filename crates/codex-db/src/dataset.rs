//! Dataset sources feeding generation builds
//!
//! The ingestion pipeline that turns game files into records lives outside this
//! crate. It hands over a [`Dataset`] through a [`DatasetSource`]: in memory, or
//! as a RON or JSON file.

use crate::error::{Error, Result};
use codex_core::{
    AnkamaId, EntityKind, EquipmentRecord, ItemRecord, MountRecord, SetRecord, WeaponRecord,
};
use ron::extensions::Extensions;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// Every record of one generation, grouped by kind.
///
/// A kind that is `None` was not delivered at all, which fails the build. An
/// empty list is a valid, empty table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub items: Option<Vec<ItemRecord>>,
    #[serde(default)]
    pub equipment: Option<Vec<EquipmentRecord>>,
    #[serde(default)]
    pub weapons: Option<Vec<WeaponRecord>>,
    #[serde(default)]
    pub mounts: Option<Vec<MountRecord>>,
    #[serde(default)]
    pub sets: Option<Vec<SetRecord>>,
    /// Names of the elements effects and conditions refer to; may be empty
    #[serde(default)]
    pub elements: Vec<String>,
}

impl Dataset {
    /// A dataset where every kind is present and empty
    pub fn empty() -> Self {
        Self {
            items: Some(Vec::new()),
            equipment: Some(Vec::new()),
            weapons: Some(Vec::new()),
            mounts: Some(Vec::new()),
            sets: Some(Vec::new()),
            elements: Vec::new(),
        }
    }

    /// Parse a RON dataset; `Some(..)` may be omitted around collections
    pub fn from_ron(content: &str) -> Result<Self> {
        Ok(ron::Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str(content)?)
    }

    /// Parse a JSON dataset
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Check completeness and uniqueness before anything is written
    pub fn validate(&self) -> Result<()> {
        let items = present(EntityKind::Item, &self.items)?;
        let equipment = present(EntityKind::Equipment, &self.equipment)?;
        let weapons = present(EntityKind::Weapon, &self.weapons)?;
        let mounts = present(EntityKind::Mount, &self.mounts)?;
        let sets = present(EntityKind::Set, &self.sets)?;

        unique_ids(EntityKind::Item, items.iter().map(|r| r.ankama_id))?;
        unique_ids(EntityKind::Equipment, equipment.iter().map(|r| r.item.ankama_id))?;
        unique_ids(EntityKind::Weapon, weapons.iter().map(|r| r.item.ankama_id))?;
        unique_ids(EntityKind::Mount, mounts.iter().map(|r| r.ankama_id))?;
        unique_ids(EntityKind::Set, sets.iter().map(|r| r.ankama_id))?;

        for set in sets {
            let mut members = HashSet::new();
            for &member in &set.item_ids {
                if !members.insert(member) {
                    return Err(Error::DuplicateSetMember {
                        set: set.ankama_id,
                        member,
                    });
                }
            }
        }
        Ok(())
    }
}

fn present<T>(kind: EntityKind, collection: &Option<Vec<T>>) -> Result<&[T]> {
    collection.as_deref().ok_or(Error::MissingKind(kind))
}

fn unique_ids(kind: EntityKind, ids: impl Iterator<Item = AnkamaId>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(Error::DuplicateId { kind, id });
        }
    }
    Ok(())
}

/// Something that can produce a complete dataset on demand
pub trait DatasetSource {
    /// Produce the dataset for the next generation
    fn load(&self) -> Result<Dataset>;

    /// Short description for logs
    fn describe(&self) -> String {
        "dataset".to_string()
    }
}

impl DatasetSource for Dataset {
    fn load(&self) -> Result<Dataset> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        "in-memory dataset".to_string()
    }
}

/// A dataset stored as a RON file
#[derive(Debug, Clone)]
pub struct RonFile(pub PathBuf);

impl DatasetSource for RonFile {
    fn load(&self) -> Result<Dataset> {
        let content = fs::read_to_string(&self.0)?;
        Dataset::from_ron(&content)
    }

    fn describe(&self) -> String {
        self.0.display().to_string()
    }
}

/// A dataset stored as a JSON file
#[derive(Debug, Clone)]
pub struct JsonFile(pub PathBuf);

impl DatasetSource for JsonFile {
    fn load(&self) -> Result<Dataset> {
        let content = fs::read_to_string(&self.0)?;
        Dataset::from_json(&content)
    }

    fn describe(&self) -> String {
        self.0.display().to_string()
    }
}
