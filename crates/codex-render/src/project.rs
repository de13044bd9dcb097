//! Projection of multilingual records into locale-specific representations.
//!
//! Everything here is pure: recipes arrive already resolved, and no storage is
//! touched.

use crate::representation::*;
use codex_core::category::subtype_for_category;
use codex_core::image::{image_set, ImageKind};
use codex_core::{
    Condition, Effect, EquipmentRecord, ImageConfig, ItemRecord, ItemType, Locale, MountRecord,
    Record, SetLink, SetRecord, WeaponRecord,
};
use codex_db::ResolvedComponent;

/// Projects records for one locale
#[derive(Debug, Clone, Copy)]
pub struct Projector<'a> {
    pub locale: Locale,
    pub images: &'a ImageConfig,
}

impl<'a> Projector<'a> {
    pub fn new(locale: Locale, images: &'a ImageConfig) -> Self {
        Self { locale, images }
    }

    fn item_type(&self, item_type: &ItemType) -> ApiType {
        ApiType {
            name: item_type.name.get(self.locale).to_string(),
            id: item_type.id,
        }
    }

    fn set_link(&self, link: &Option<SetLink>) -> Option<ApiSetLink> {
        link.as_ref().map(|link| ApiSetLink {
            id: link.id,
            name: link.name.get(self.locale).to_string(),
        })
    }

    /// One effect with its bound-suppression flags
    pub fn effect(&self, effect: &Effect) -> ApiEffect {
        ApiEffect {
            int_minimum: effect.min,
            int_maximum: effect.max,
            effect_type: ApiEffectType {
                name: effect.name.get(self.locale).to_string(),
                id: effect.element_id,
                is_meta: effect.is_meta,
                is_active: effect.is_active,
            },
            ignore_int_min: effect.ignore_min(),
            ignore_int_max: effect.ignore_max(),
            formatted: effect.templated.get(self.locale).to_string(),
        }
    }

    pub fn effects(&self, effects: &[Effect]) -> Option<NonEmpty<ApiEffect>> {
        NonEmpty::collect(effects.iter().map(|e| self.effect(e)))
    }

    pub fn conditions(&self, conditions: &[Condition]) -> Option<NonEmpty<ApiCondition>> {
        NonEmpty::collect(conditions.iter().map(|c| ApiCondition {
            operator: c.operator.clone(),
            int_value: c.value,
            element: ApiConditionElement {
                name: c.templated.get(self.locale).to_string(),
                id: c.element_id,
            },
        }))
    }

    pub fn resource(
        &self,
        item: &ItemRecord,
        recipe: Option<NonEmpty<ApiRecipeEntry>>,
    ) -> ApiResource {
        ApiResource {
            ankama_id: item.ankama_id,
            name: item.name.get(self.locale).to_string(),
            description: item.description.get(self.locale).to_string(),
            item_type: self.item_type(&item.item_type),
            level: item.level,
            pods: item.pods,
            image_urls: image_set(self.images, ImageKind::Item, item.icon_id),
            effects: self.effects(&item.effects),
            conditions: self.conditions(&item.conditions),
            recipe,
        }
    }

    pub fn equipment(
        &self,
        equipment: &EquipmentRecord,
        recipe: Option<NonEmpty<ApiRecipeEntry>>,
    ) -> ApiEquipment {
        let item = &equipment.item;
        ApiEquipment {
            ankama_id: item.ankama_id,
            name: item.name.get(self.locale).to_string(),
            description: item.description.get(self.locale).to_string(),
            item_type: self.item_type(&item.item_type),
            is_weapon: false,
            level: item.level,
            pods: item.pods,
            image_urls: image_set(self.images, ImageKind::Item, item.icon_id),
            effects: self.effects(&item.effects),
            conditions: self.conditions(&item.conditions),
            recipe,
            parent_set: self.set_link(&equipment.parent_set),
        }
    }

    pub fn weapon(
        &self,
        weapon: &WeaponRecord,
        recipe: Option<NonEmpty<ApiRecipeEntry>>,
    ) -> ApiWeapon {
        let item = &weapon.item;
        let stats = &weapon.stats;
        ApiWeapon {
            ankama_id: item.ankama_id,
            name: item.name.get(self.locale).to_string(),
            description: item.description.get(self.locale).to_string(),
            item_type: self.item_type(&item.item_type),
            is_weapon: true,
            level: item.level,
            pods: item.pods,
            image_urls: image_set(self.images, ImageKind::Item, item.icon_id),
            effects: self.effects(&item.effects),
            conditions: self.conditions(&item.conditions),
            critical_hit_probability: stats.critical_hit_probability,
            critical_hit_bonus: stats.critical_hit_bonus,
            is_two_handed: stats.two_handed,
            max_cast_per_turn: stats.max_cast_per_turn,
            ap_cost: stats.ap_cost,
            range: ApiRange {
                min: stats.min_range,
                max: stats.max_range,
            },
            recipe,
            parent_set: self.set_link(&weapon.parent_set),
        }
    }

    pub fn mount(&self, mount: &MountRecord) -> ApiMount {
        ApiMount {
            ankama_id: mount.ankama_id,
            name: mount.name.get(self.locale).to_string(),
            family_name: mount.family_name.get(self.locale).to_string(),
            image_urls: image_set(self.images, ImageKind::Mount, mount.ankama_id),
            effects: self.effects(&mount.effects),
        }
    }

    pub fn set(&self, set: &SetRecord) -> ApiSet {
        ApiSet {
            ankama_id: set.ankama_id,
            name: set.name.get(self.locale).to_string(),
            equipment_ids: set.item_ids.clone(),
            effects: NonEmpty::collect(set.effects.iter().map(|tier| self.effects(tier))),
            highest_equipment_level: set.level,
        }
    }

    pub fn item_summary(&self, item: &ItemRecord) -> ApiItemSummary {
        ApiItemSummary {
            ankama_id: item.ankama_id,
            name: item.name.get(self.locale).to_string(),
            item_type: self.item_type(&item.item_type),
            item_subtype: subtype_for_category(item.item_type.category_id).to_string(),
            level: item.level,
            image_urls: image_set(self.images, ImageKind::Item, item.icon_id),
        }
    }

    pub fn mount_summary(&self, mount: &MountRecord) -> ApiMountSummary {
        ApiMountSummary {
            ankama_id: mount.ankama_id,
            name: mount.name.get(self.locale).to_string(),
            family_name: mount.family_name.get(self.locale).to_string(),
            image_urls: image_set(self.images, ImageKind::Mount, mount.ankama_id),
        }
    }

    pub fn set_summary(&self, set: &SetRecord) -> ApiSetSummary {
        ApiSetSummary {
            ankama_id: set.ankama_id,
            name: set.name.get(self.locale).to_string(),
            items: set.item_ids.len(),
            level: set.level,
        }
    }

    /// Reduced list projection of any record
    pub fn summary(&self, record: &Record) -> Summary {
        match record {
            Record::Item(item) => Summary::Item(self.item_summary(item)),
            Record::Equipment(e) => Summary::Item(self.item_summary(&e.item)),
            Record::Weapon(w) => Summary::Item(self.item_summary(&w.item)),
            Record::Mount(mount) => Summary::Mount(self.mount_summary(mount)),
            Record::Set(set) => Summary::Set(self.set_summary(set)),
        }
    }

    /// Full detail projection of any record
    pub fn detail(&self, record: &Record, recipe: Option<NonEmpty<ApiRecipeEntry>>) -> Detail {
        match record {
            Record::Item(item) => Detail::Resource(self.resource(item, recipe)),
            Record::Equipment(e) => Detail::Equipment(self.equipment(e, recipe)),
            Record::Weapon(w) => Detail::Weapon(self.weapon(w, recipe)),
            Record::Mount(mount) => Detail::Mount(self.mount(mount)),
            Record::Set(set) => Detail::Set(self.set(set)),
        }
    }
}

/// Public recipe entries from resolved components
pub fn recipe(components: Vec<ResolvedComponent>) -> Option<NonEmpty<ApiRecipeEntry>> {
    NonEmpty::collect(components.into_iter().map(|c| ApiRecipeEntry {
        item_ankama_id: c.item_id,
        item_subtype: c.subtype.to_string(),
        quantity: c.quantity,
    }))
}
