//! Recipe resolution against the item tables.

use crate::error::{Error, Result};
use crate::queries::ReadTxn;
use codex_core::category::subtype_for_category;
use codex_core::{AnkamaId, RecipeEntry};

/// One recipe component with its display subtype
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedComponent {
    pub item_id: AnkamaId,
    pub quantity: u32,
    pub subtype: &'static str,
}

/// Resolve every entry of a recipe within one read transaction.
///
/// All or nothing: a single unknown component fails the whole recipe with
/// [`Error::MissingComponent`].
pub fn resolve(txn: &ReadTxn<'_>, entries: &[RecipeEntry]) -> Result<Vec<ResolvedComponent>> {
    entries
        .iter()
        .map(|entry| {
            let record = txn
                .first_match_component(entry.item_id)?
                .ok_or(Error::MissingComponent(entry.item_id))?;
            // first_match_component only returns item-like records
            let category_id = record
                .as_item()
                .map_or(u32::MAX, |item| item.item_type.category_id);
            Ok(ResolvedComponent {
                item_id: entry.item_id,
                quantity: entry.quantity,
                subtype: subtype_for_category(category_id),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::generation::{Generation, Slot};
    use codex_core::{EntityKind, Record};

    #[test]
    fn test_resolve_recipe() {
        let generation = Generation::build(Slot::A, 1, fixtures::dataset()).unwrap();
        let txn = generation.begin_read().unwrap();
        let Some(Record::Item(crafted)) = txn.get(EntityKind::Item, 3).unwrap() else {
            panic!("crafted item missing");
        };

        let resolved = resolve(&txn, &crafted.recipe).unwrap();
        assert_eq!(
            resolved,
            vec![
                ResolvedComponent { item_id: 1, quantity: 5, subtype: "resources" },
                ResolvedComponent { item_id: 2, quantity: 1, subtype: "resources" },
                ResolvedComponent { item_id: 10, quantity: 1, subtype: "equipment" },
            ]
        );
    }

    #[test]
    fn test_missing_component_fails_whole_recipe() {
        let generation = Generation::build(Slot::A, 1, fixtures::dataset()).unwrap();
        let txn = generation.begin_read().unwrap();
        let entries = [
            RecipeEntry { item_id: 1, quantity: 2 },
            RecipeEntry { item_id: 404, quantity: 1 },
        ];
        assert!(matches!(
            resolve(&txn, &entries),
            Err(Error::MissingComponent(404))
        ));
    }

    #[test]
    fn test_empty_recipe() {
        let generation = Generation::empty(Slot::A, 0).unwrap();
        let txn = generation.begin_read().unwrap();
        assert!(resolve(&txn, &[]).unwrap().is_empty());
    }
}
