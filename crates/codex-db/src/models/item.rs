//! Item-like tables: items, equipment and weapons.
//!
//! Every table uses the insertion ordinal as primary key so scans come back in
//! dataset order, and indexes the external id as a unique secondary key.

use codex_core::{EquipmentRecord, ItemRecord, Record, WeaponRecord};
use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};

/// Stored plain item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 1, version = 1)]
#[native_db]
pub struct StoredItem {
    /// Primary key - insertion ordinal.
    #[primary_key]
    pub position: u32,
    /// External id.
    #[secondary_key(unique)]
    pub ankama_id: u32,
    pub record: ItemRecord,
}

impl StoredItem {
    pub fn new(position: u32, record: ItemRecord) -> Self {
        Self {
            position,
            ankama_id: record.ankama_id,
            record,
        }
    }

    pub fn into_record(self) -> Record {
        Record::Item(self.record)
    }
}

/// Stored equipment piece.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 2, version = 1)]
#[native_db]
pub struct StoredEquipment {
    #[primary_key]
    pub position: u32,
    #[secondary_key(unique)]
    pub ankama_id: u32,
    pub record: EquipmentRecord,
}

impl StoredEquipment {
    pub fn new(position: u32, record: EquipmentRecord) -> Self {
        Self {
            position,
            ankama_id: record.item.ankama_id,
            record,
        }
    }

    pub fn into_record(self) -> Record {
        Record::Equipment(self.record)
    }
}

/// Stored weapon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 3, version = 1)]
#[native_db]
pub struct StoredWeapon {
    #[primary_key]
    pub position: u32,
    #[secondary_key(unique)]
    pub ankama_id: u32,
    pub record: WeaponRecord,
}

impl StoredWeapon {
    pub fn new(position: u32, record: WeaponRecord) -> Self {
        Self {
            position,
            ankama_id: record.item.ankama_id,
            record,
        }
    }

    pub fn into_record(self) -> Record {
        Record::Weapon(self.record)
    }
}
