//! Public, locale-specific representations.
//!
//! Optional pieces are `Option` fields skipped when `None`. Collections that
//! may be empty are `Option<NonEmpty<T>>`: an empty list cannot be built, so
//! "no elements" always serializes as an absent field.

use codex_core::{AnkamaId, EntityKind, ImageSet, PaginationLinks};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A vector with at least one element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NonEmpty<T>(Vec<T>);

impl<T> NonEmpty<T> {
    /// `None` when `items` is empty
    pub fn new(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self(items))
        }
    }

    /// Collect an iterator; `None` when it yields nothing
    pub fn collect(iter: impl IntoIterator<Item = T>) -> Option<Self> {
        Self::new(iter.into_iter().collect())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiType {
    pub name: String,
    pub id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiEffectType {
    pub name: String,
    pub id: i32,
    pub is_meta: bool,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiEffect {
    pub int_minimum: i32,
    pub int_maximum: i32,
    #[serde(rename = "type")]
    pub effect_type: ApiEffectType,
    pub ignore_int_min: bool,
    pub ignore_int_max: bool,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiConditionElement {
    pub name: String,
    pub id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiCondition {
    pub operator: String,
    pub int_value: i32,
    pub element: ApiConditionElement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiRecipeEntry {
    pub item_ankama_id: AnkamaId,
    pub item_subtype: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiSetLink {
    pub id: AnkamaId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApiRange {
    pub min: i32,
    pub max: i32,
}

/// Detail view of a plain item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResource {
    pub ankama_id: AnkamaId,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub item_type: ApiType,
    pub level: u32,
    pub pods: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<ImageSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effects: Option<NonEmpty<ApiEffect>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<NonEmpty<ApiCondition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<NonEmpty<ApiRecipeEntry>>,
}

/// Detail view of an equipment piece
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiEquipment {
    pub ankama_id: AnkamaId,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub item_type: ApiType,
    pub is_weapon: bool,
    pub level: u32,
    pub pods: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<ImageSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effects: Option<NonEmpty<ApiEffect>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<NonEmpty<ApiCondition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<NonEmpty<ApiRecipeEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_set: Option<ApiSetLink>,
}

/// Detail view of a weapon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiWeapon {
    pub ankama_id: AnkamaId,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub item_type: ApiType,
    pub is_weapon: bool,
    pub level: u32,
    pub pods: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<ImageSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effects: Option<NonEmpty<ApiEffect>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<NonEmpty<ApiCondition>>,
    pub critical_hit_probability: i32,
    pub critical_hit_bonus: i32,
    pub is_two_handed: bool,
    pub max_cast_per_turn: i32,
    pub ap_cost: i32,
    pub range: ApiRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<NonEmpty<ApiRecipeEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_set: Option<ApiSetLink>,
}

/// Detail view of a mount
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiMount {
    pub ankama_id: AnkamaId,
    pub name: String,
    pub family_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<ImageSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effects: Option<NonEmpty<ApiEffect>>,
}

/// Detail view of a set.
///
/// `effects[n]` are the bonuses with `n` pieces equipped; a tier without
/// bonuses is `null` so later tiers keep their index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiSet {
    pub ankama_id: AnkamaId,
    pub name: String,
    pub equipment_ids: Vec<AnkamaId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effects: Option<NonEmpty<Option<NonEmpty<ApiEffect>>>>,
    pub highest_equipment_level: u32,
}

/// Any detail view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Detail {
    Resource(ApiResource),
    Equipment(ApiEquipment),
    Weapon(ApiWeapon),
    Mount(ApiMount),
    Set(ApiSet),
}

/// List entry for item-like kinds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiItemSummary {
    pub ankama_id: AnkamaId,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ApiType,
    pub item_subtype: String,
    pub level: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<ImageSet>,
}

/// List entry for mounts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiMountSummary {
    pub ankama_id: AnkamaId,
    pub name: String,
    pub family_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<ImageSet>,
}

/// List entry for sets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiSetSummary {
    pub ankama_id: AnkamaId,
    pub name: String,
    /// Number of member pieces
    pub items: usize,
    pub level: u32,
}

/// Any list entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Summary {
    Item(ApiItemSummary),
    Mount(ApiMountSummary),
    Set(ApiSetSummary),
}

impl Summary {
    pub fn ankama_id(&self) -> AnkamaId {
        match self {
            Summary::Item(s) => s.ankama_id,
            Summary::Mount(s) => s.ankama_id,
            Summary::Set(s) => s.ankama_id,
        }
    }
}

/// One page of a list.
///
/// Serializes as `{"_links": {...}, "<items|mounts|sets>": [...]}`; `_links`
/// is omitted when the whole collection fits on one page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage {
    pub kind: EntityKind,
    pub links: Option<PaginationLinks>,
    pub items: Vec<Summary>,
}

impl ListPage {
    fn items_key(&self) -> &'static str {
        match self.kind {
            EntityKind::Mount => "mounts",
            EntityKind::Set => "sets",
            EntityKind::Item | EntityKind::Equipment | EntityKind::Weapon => "items",
        }
    }
}

impl Serialize for ListPage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + usize::from(self.links.is_some())))?;
        if let Some(links) = &self.links {
            map.serialize_entry("_links", links)?;
        }
        map.serialize_entry(self.items_key(), &self.items)?;
        map.end()
    }
}
