//! Mount, set and element tables.

use codex_core::{MountRecord, Record, SetRecord};
use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};

/// Stored mount.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 10, version = 1)]
#[native_db]
pub struct StoredMount {
    #[primary_key]
    pub position: u32,
    #[secondary_key(unique)]
    pub ankama_id: u32,
    pub record: MountRecord,
}

impl StoredMount {
    pub fn new(position: u32, record: MountRecord) -> Self {
        Self {
            position,
            ankama_id: record.ankama_id,
            record,
        }
    }

    pub fn into_record(self) -> Record {
        Record::Mount(self.record)
    }
}

/// Stored equipment set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 11, version = 1)]
#[native_db]
pub struct StoredSet {
    #[primary_key]
    pub position: u32,
    #[secondary_key(unique)]
    pub ankama_id: u32,
    pub record: SetRecord,
}

impl StoredSet {
    pub fn new(position: u32, record: SetRecord) -> Self {
        Self {
            position,
            ankama_id: record.ankama_id,
            record,
        }
    }

    pub fn into_record(self) -> Record {
        Record::Set(self.record)
    }
}

/// Stored effect/condition element name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 12, version = 1)]
#[native_db]
pub struct StoredElement {
    #[primary_key]
    pub position: u32,
    pub name: String,
}
