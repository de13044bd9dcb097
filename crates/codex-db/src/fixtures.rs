//! Sample records for tests.
//!
//! Localized strings are `"{text} [{locale}]"` so tests can tell locales apart.

use crate::dataset::Dataset;
use codex_core::{
    AnkamaId, Condition, Effect, EquipmentRecord, ItemRecord, ItemType, MountRecord, RecipeEntry,
    SetLink, SetRecord, Translations, WeaponRecord, WeaponStats,
};

/// Per-locale text tagged with the locale code
pub fn text(text: &str) -> Translations {
    Translations::from_fn(|locale| format!("{} [{}]", text, locale))
}

pub fn item_type(id: u32, category_id: u32) -> ItemType {
    ItemType {
        id,
        name: text(&format!("Type {}", id)),
        category_id,
    }
}

pub fn effect(element_id: i32, min: i32, max: i32, is_meta: bool, sentinel: i32) -> Effect {
    Effect {
        element_id,
        name: text("Vitality"),
        min,
        max,
        is_meta,
        is_active: true,
        min_max_irrelevant: sentinel,
        templated: text(&format!("{} to {} Vitality", min, max)),
    }
}

pub fn condition(element_id: i32, operator: &str, value: i32) -> Condition {
    Condition {
        element_id,
        operator: operator.to_string(),
        value,
        templated: text(&format!("Level {} {}", operator, value)),
    }
}

/// A resource item (category 2) with no effects, conditions or recipe
pub fn item(id: AnkamaId, name: &str) -> ItemRecord {
    ItemRecord {
        ankama_id: id,
        name: text(name),
        description: text(&format!("{} description", name)),
        item_type: item_type(48, 2),
        level: 1,
        pods: 1,
        icon_id: id + 1000,
        effects: Vec::new(),
        conditions: Vec::new(),
        recipe: Vec::new(),
    }
}

pub fn equipment(id: AnkamaId, name: &str, parent_set: Option<(AnkamaId, &str)>) -> EquipmentRecord {
    let mut item = item(id, name);
    item.item_type = item_type(16, 0);
    item.level = 20;
    item.effects = vec![effect(125, 10, 20, false, 0)];
    item.conditions = vec![condition(1, ">", 10)];
    EquipmentRecord {
        item,
        parent_set: parent_set.map(|(id, name)| SetLink {
            id,
            name: text(name),
        }),
    }
}

pub fn weapon(id: AnkamaId, name: &str) -> WeaponRecord {
    let mut item = item(id, name);
    item.item_type = item_type(6, 0);
    item.level = 30;
    WeaponRecord {
        item,
        parent_set: None,
        stats: WeaponStats {
            critical_hit_probability: 5,
            critical_hit_bonus: 10,
            two_handed: false,
            max_cast_per_turn: 2,
            ap_cost: 4,
            min_range: 1,
            max_range: 1,
        },
    }
}

pub fn mount(id: AnkamaId, name: &str) -> MountRecord {
    MountRecord {
        ankama_id: id,
        name: text(name),
        family_name: text("Dragoturkey"),
        effects: Vec::new(),
    }
}

pub fn set(id: AnkamaId, name: &str, item_ids: Vec<AnkamaId>) -> SetRecord {
    SetRecord {
        ankama_id: id,
        name: text(name),
        effects: vec![Vec::new(), vec![effect(125, 30, 30, false, -1)]],
        item_ids,
        level: 20,
    }
}

/// A small complete dataset.
///
/// Item 3 is crafted from items 1 and 2 plus equipment 10; equipment 10 and 11
/// belong to set 100.
pub fn dataset() -> Dataset {
    let mut crafted = item(3, "Crafted");
    crafted.item_type = item_type(12, 1);
    crafted.recipe = vec![
        RecipeEntry { item_id: 1, quantity: 5 },
        RecipeEntry { item_id: 2, quantity: 1 },
        RecipeEntry { item_id: 10, quantity: 1 },
    ];
    Dataset {
        items: Some(vec![item(1, "Wheat"), item(2, "Iron"), crafted]),
        equipment: Some(vec![
            equipment(10, "Amulet", Some((100, "Adventurer Set"))),
            equipment(11, "Ring", Some((100, "Adventurer Set"))),
            equipment(12, "Belt", None),
        ]),
        weapons: Some(vec![weapon(20, "Sword")]),
        mounts: Some(vec![mount(30, "Golden Dragoturkey")]),
        sets: Some(vec![set(100, "Adventurer Set", vec![10, 11])]),
        elements: vec!["Vitality".to_string(), "Level".to_string()],
    }
}

/// A dataset with `count` plain items, ids `1..=count`, names tagged with `tag`
pub fn numbered_items(count: u32, tag: &str) -> Dataset {
    let mut dataset = Dataset::empty();
    dataset.items = Some(
        (1..=count)
            .map(|id| item(id, &format!("{} {}", tag, id)))
            .collect(),
    );
    dataset
}
