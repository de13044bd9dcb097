//! Multilingual records as published in a generation
//!
//! Records are immutable once a generation is built. Every per-locale field is
//! a [`Translations`], so all supported locales are present by construction.

use crate::identity::{AnkamaId, EntityKind};
use crate::locale::Translations;
use serde::{Deserialize, Serialize};

/// `min_max_irrelevant` value meaning both bounds carry meaning
pub const BOUNDS_RELEVANT: i32 = 0;
/// `min_max_irrelevant` value meaning the min bound is meaningless
pub const MIN_IRRELEVANT: i32 = -2;

/// Type descriptor shared by item-like records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemType {
    pub id: u32,
    pub name: Translations,
    pub category_id: u32,
}

/// A magnitude effect with its display template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub element_id: i32,
    /// Localized effect type name
    pub name: Translations,
    pub min: i32,
    pub max: i32,
    #[serde(default)]
    pub is_meta: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Sentinel: 0 both bounds meaningful, -2 min meaningless, <= -1 max meaningless
    #[serde(default)]
    pub min_max_irrelevant: i32,
    pub templated: Translations,
}

fn default_active() -> bool {
    true
}

impl Effect {
    /// Whether consumers should ignore the min bound
    pub fn ignore_min(&self) -> bool {
        self.is_meta || self.min_max_irrelevant == MIN_IRRELEVANT
    }

    /// Whether consumers should ignore the max bound
    ///
    /// -2 is its own state (min meaningless), so it does not fall into the
    /// `<= -1` max-meaningless range.
    pub fn ignore_max(&self) -> bool {
        self.is_meta
            || (self.min_max_irrelevant <= -1 && self.min_max_irrelevant != MIN_IRRELEVANT)
    }
}

/// A requirement to equip or use an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub element_id: i32,
    pub operator: String,
    pub value: i32,
    pub templated: Translations,
}

/// One component of a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeEntry {
    pub item_id: AnkamaId,
    pub quantity: u32,
}

/// Back-reference from an equipment piece to its set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetLink {
    pub id: AnkamaId,
    pub name: Translations,
}

/// A plain item (resource, consumable, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub ankama_id: AnkamaId,
    pub name: Translations,
    pub description: Translations,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub level: u32,
    pub pods: u32,
    pub icon_id: u32,
    #[serde(default)]
    pub effects: Vec<Effect>,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub recipe: Vec<RecipeEntry>,
}

/// A wearable piece that may belong to a set
///
/// The shared item fields nest under `item`; records are stored with a
/// non-self-describing codec, so they are not flattened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    pub item: ItemRecord,
    #[serde(default)]
    pub parent_set: Option<SetLink>,
}

/// Combat attributes only weapons carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub critical_hit_probability: i32,
    pub critical_hit_bonus: i32,
    pub two_handed: bool,
    pub max_cast_per_turn: i32,
    pub ap_cost: i32,
    pub min_range: i32,
    pub max_range: i32,
}

/// A weapon: an equipment piece with combat attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponRecord {
    pub item: ItemRecord,
    #[serde(default)]
    pub parent_set: Option<SetLink>,
    pub stats: WeaponStats,
}

/// A mount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountRecord {
    pub ankama_id: AnkamaId,
    pub name: Translations,
    pub family_name: Translations,
    #[serde(default)]
    pub effects: Vec<Effect>,
}

/// An equipment set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetRecord {
    pub ankama_id: AnkamaId,
    pub name: Translations,
    /// Member equipment ids, ordered and unique
    pub item_ids: Vec<AnkamaId>,
    /// Bonus effects; index = number of equipped pieces
    #[serde(default)]
    pub effects: Vec<Vec<Effect>>,
    /// Highest member level
    pub level: u32,
}

/// Any record, tagged with its kind
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Item(ItemRecord),
    Equipment(EquipmentRecord),
    Weapon(WeaponRecord),
    Mount(MountRecord),
    Set(SetRecord),
}

impl Record {
    /// Kind of this record
    pub fn kind(&self) -> EntityKind {
        match self {
            Record::Item(_) => EntityKind::Item,
            Record::Equipment(_) => EntityKind::Equipment,
            Record::Weapon(_) => EntityKind::Weapon,
            Record::Mount(_) => EntityKind::Mount,
            Record::Set(_) => EntityKind::Set,
        }
    }

    /// External id of this record
    pub fn ankama_id(&self) -> AnkamaId {
        match self {
            Record::Item(r) => r.ankama_id,
            Record::Equipment(r) => r.item.ankama_id,
            Record::Weapon(r) => r.item.ankama_id,
            Record::Mount(r) => r.ankama_id,
            Record::Set(r) => r.ankama_id,
        }
    }

    /// Item-like view, when this record has one
    pub fn as_item(&self) -> Option<&ItemRecord> {
        match self {
            Record::Item(r) => Some(r),
            Record::Equipment(r) => Some(&r.item),
            Record::Weapon(r) => Some(&r.item),
            Record::Mount(_) | Record::Set(_) => None,
        }
    }
}
