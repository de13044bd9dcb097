//! The public read API.
//!
//! Every call pins the active generation once and does all of its reads in a
//! single transaction on it, so one response never mixes two generations.

use crate::error::{Error, Result};
use crate::project::{recipe, Projector};
use crate::representation::{ApiRecipeEntry, Detail, ListPage, NonEmpty};
use codex_core::{AnkamaId, CodexConfig, EntityKind, LinkBuilder, Locale, Page, PageRequest};
use codex_db::{DatasetSource, GenerationInfo, GenerationStore, ReadTxn};
use tracing::{debug, warn};

/// Read engine over a generation store
pub struct Codex {
    store: GenerationStore,
    config: CodexConfig,
    links: LinkBuilder,
}

impl Codex {
    /// Engine with an empty active generation
    pub fn new(config: CodexConfig) -> Result<Self> {
        Self::with_store(config, GenerationStore::new()?)
    }

    /// Engine over an existing store
    pub fn with_store(config: CodexConfig, store: GenerationStore) -> Result<Self> {
        config.validate()?;
        let links = LinkBuilder::new(&config.api)?;
        Ok(Self {
            store,
            config,
            links,
        })
    }

    pub fn config(&self) -> &CodexConfig {
        &self.config
    }

    /// Summary of the active generation
    pub fn generation(&self) -> GenerationInfo {
        self.store.info()
    }

    /// One page of a kind's summaries, in insertion order
    pub fn render_list(
        &self,
        kind: EntityKind,
        locale: Locale,
        request: PageRequest,
    ) -> Result<ListPage> {
        let generation = self.store.pin();
        let txn = generation.begin_read()?;

        let len = txn.count(kind)?;
        let page = Page::validate(request, self.config.pagination.max_page_size, len)?;
        let records = txn.slice(kind, page.bounds(len))?;

        let projector = self.projector(locale);
        let items = records.iter().map(|r| projector.summary(r)).collect();
        let links = self.links.links(locale, kind, &page, len);
        debug!(
            %kind,
            %locale,
            generation = generation.number(),
            number = page.number(),
            size = page.size(),
            len,
            "rendered list"
        );

        Ok(ListPage {
            kind,
            links: (!links.single_page).then_some(links.links),
            items,
        })
    }

    /// Full representation of one record
    pub fn render_detail(&self, kind: EntityKind, locale: Locale, id: AnkamaId) -> Result<Detail> {
        let generation = self.store.pin();
        let txn = generation.begin_read()?;

        let record = txn.get(kind, id)?.ok_or(Error::NotFound { kind, id })?;
        let recipe = match record.as_item() {
            Some(item) => resolve_recipe(&txn, kind, id, &item.recipe)?,
            None => None,
        };
        Ok(self.projector(locale).detail(&record, recipe))
    }

    /// Names of every effect/condition element, in dataset order
    pub fn list_elements(&self) -> Result<Vec<String>> {
        let generation = self.store.pin();
        let txn = generation.begin_read()?;
        Ok(txn.elements()?)
    }

    /// Build and publish a new generation from `source`.
    ///
    /// On failure the active generation keeps serving.
    pub fn reload(&self, source: &dyn DatasetSource) -> Result<GenerationInfo> {
        self.store.reload(source).map_err(|e| match e {
            codex_db::Error::Database(_) => Error::Storage(e),
            e => Error::BuildFailed(e),
        })
    }

    fn projector(&self, locale: Locale) -> Projector<'_> {
        Projector::new(locale, &self.config.images)
    }
}

/// Resolve a recipe; a dangling component drops the recipe with a warning
fn resolve_recipe(
    txn: &ReadTxn<'_>,
    kind: EntityKind,
    id: AnkamaId,
    entries: &[codex_core::RecipeEntry],
) -> Result<Option<NonEmpty<ApiRecipeEntry>>> {
    match codex_db::recipe::resolve(txn, entries) {
        Ok(components) => Ok(recipe(components)),
        Err(codex_db::Error::MissingComponent(component)) => {
            warn!(
                %kind,
                id,
                component,
                generation = txn.generation().number,
                "recipe references unknown component, omitting recipe"
            );
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Shorthand used by request layers holding raw path segments
pub fn parse_target(kind: &str, locale: &str) -> Result<(EntityKind, Locale)> {
    Ok((kind.parse()?, locale.parse()?))
}

impl std::fmt::Debug for Codex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codex")
            .field("generation", &self.store.info())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RequestError;
    use crate::representation::Summary;
    use codex_core::{PageError, RecipeEntry};
    use codex_db::{fixtures, Dataset};
    use serde_json::Value;

    fn config() -> CodexConfig {
        let mut config = CodexConfig::default();
        config.api.scheme = "https".to_string();
        config.api.host = "api.example.org".to_string();
        config.api.port = None;
        config.api.path_prefix = "/v1".to_string();
        config.images.base_url = "https://img.example.org".to_string();
        config.pagination.max_page_size = 32;
        config
    }

    fn codex(source: &dyn DatasetSource) -> Codex {
        let codex = Codex::new(config()).unwrap();
        codex.reload(source).unwrap();
        codex
    }

    fn ids(page: &ListPage) -> Vec<AnkamaId> {
        page.items.iter().map(Summary::ankama_id).collect()
    }

    #[test]
    fn test_list_slice_and_links() {
        let codex = codex(&fixtures::numbered_items(100, "item"));
        let page = codex
            .render_list(EntityKind::Item, Locale::En, PageRequest::new(4, 32))
            .unwrap();

        assert_eq!(ids(&page), (97..=100).collect::<Vec<_>>());
        let links = page.links.unwrap();
        assert_eq!(
            links.first,
            "https://api.example.org/v1/en/items?page%5Bnumber%5D=1&page%5Bsize%5D=32"
        );
        assert_eq!(
            links.prev.as_deref(),
            Some("https://api.example.org/v1/en/items?page%5Bnumber%5D=3&page%5Bsize%5D=32")
        );
        assert!(links.next.is_none());
        assert_eq!(
            links.last,
            "https://api.example.org/v1/en/items?page%5Bnumber%5D=4&page%5Bsize%5D=32"
        );
    }

    #[test]
    fn test_list_page_sizes() {
        let codex = codex(&fixtures::numbered_items(100, "item"));
        for (number, size) in [(1, 10), (2, 32), (3, 7), (4, 25)] {
            let page = codex
                .render_list(EntityKind::Item, Locale::Fr, PageRequest::new(number, size))
                .unwrap();
            let start = ((number - 1) * size) as usize;
            let expected = size.min(100 - start as i64) as usize;
            assert_eq!(page.items.len(), expected);
            assert_eq!(page.items[0].ankama_id() as usize, start + 1);

            let links = page.links.unwrap();
            assert_eq!(links.prev.is_some(), number > 1);
        }
    }

    #[test]
    fn test_list_defaults() {
        let codex = codex(&fixtures::numbered_items(40, "item"));
        let page = codex
            .render_list(EntityKind::Item, Locale::En, PageRequest::default())
            .unwrap();
        // default size is half the maximum
        assert_eq!(ids(&page), (1..=16).collect::<Vec<_>>());
        let links = page.links.unwrap();
        assert!(links.prev.is_none());
        assert!(links.next.unwrap().contains("page%5Bnumber%5D=2"));
    }

    #[test]
    fn test_single_page_omits_links() {
        let codex = codex(&fixtures::dataset());
        let page = codex
            .render_list(EntityKind::Equipment, Locale::De, PageRequest::new(1, 10))
            .unwrap();
        assert!(page.links.is_none());
        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("_links").is_none());
        assert_eq!(json["items"].as_array().unwrap().len(), 3);
        assert_eq!(json["items"][0]["name"], "Amulet [de]");
        assert_eq!(json["items"][0]["item_subtype"], "equipment");
    }

    #[test]
    fn test_list_envelope_keys() {
        let codex = codex(&fixtures::dataset());
        let mounts = codex
            .render_list(EntityKind::Mount, Locale::En, PageRequest::default())
            .unwrap();
        let json = serde_json::to_value(&mounts).unwrap();
        assert_eq!(json["mounts"][0]["family_name"], "Dragoturkey [en]");

        let sets = codex
            .render_list(EntityKind::Set, Locale::En, PageRequest::default())
            .unwrap();
        let json = serde_json::to_value(&sets).unwrap();
        assert_eq!(json["sets"][0]["items"], 2);
    }

    #[test]
    fn test_empty_collection_lists_empty_page() {
        let codex = Codex::new(config()).unwrap();
        let page = codex
            .render_list(EntityKind::Weapon, Locale::En, PageRequest::default())
            .unwrap();
        assert!(page.items.is_empty());
        assert!(page.links.is_none());
    }

    #[test]
    fn test_oversized_page_rejected() {
        let codex = codex(&fixtures::numbered_items(100, "item"));
        let err = codex
            .render_list(EntityKind::Item, Locale::En, PageRequest::new(1, 33))
            .unwrap_err();
        assert!(err.is_client_error());
        assert!(matches!(
            err,
            Error::Rejected(RequestError::Page(PageError::PageSizeTooLarge {
                requested: 33,
                max: 32
            }))
        ));

        let err = codex
            .render_list(EntityKind::Item, Locale::En, PageRequest::new(5, 10))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Rejected(RequestError::Page(PageError::PageOutOfRange { number: 5, len: 100 }))
        ));
    }

    #[test]
    fn test_detail_not_found() {
        let codex = codex(&fixtures::dataset());
        let err = codex
            .render_detail(EntityKind::Weapon, Locale::En, 10)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::NotFound {
                kind: EntityKind::Weapon,
                id: 10
            }
        ));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_detail_with_recipe() {
        let codex = codex(&fixtures::dataset());
        let Detail::Resource(resource) = codex
            .render_detail(EntityKind::Item, Locale::It, 3)
            .unwrap()
        else {
            panic!("item 3 should render as a resource");
        };
        let recipe: Vec<_> = resource
            .recipe
            .unwrap()
            .into_vec()
            .into_iter()
            .map(|e| (e.item_ankama_id, e.item_subtype, e.quantity))
            .collect();
        assert_eq!(
            recipe,
            vec![
                (1, "resources".to_string(), 5),
                (2, "resources".to_string(), 1),
                (10, "equipment".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_missing_recipe_component_drops_recipe() {
        let mut dataset = fixtures::dataset();
        if let Some(items) = dataset.items.as_mut() {
            items[2].recipe.push(RecipeEntry {
                item_id: 404,
                quantity: 1,
            });
        }
        let codex = codex(&dataset);

        let detail = codex.render_detail(EntityKind::Item, Locale::En, 3).unwrap();
        let json = serde_json::to_value(&detail).unwrap();
        assert!(json.get("recipe").is_none());
        assert_eq!(json["name"], "Crafted [en]");
    }

    #[test]
    fn test_detail_empty_fields_absent() {
        let codex = codex(&fixtures::dataset());
        let json = serde_json::to_value(
            codex
                .render_detail(EntityKind::Item, Locale::En, 1)
                .unwrap(),
        )
        .unwrap();
        let object = json.as_object().unwrap();
        for field in ["effects", "conditions", "recipe", "parent_set"] {
            assert!(!object.contains_key(field), "{} should be absent", field);
        }

        let json = serde_json::to_value(
            codex
                .render_detail(EntityKind::Equipment, Locale::En, 12)
                .unwrap(),
        )
        .unwrap();
        assert!(json.get("parent_set").is_none());
        assert_eq!(json["is_weapon"], Value::Bool(false));

        let json = serde_json::to_value(
            codex
                .render_detail(EntityKind::Equipment, Locale::En, 10)
                .unwrap(),
        )
        .unwrap();
        assert_eq!(json["parent_set"]["id"], 100);
    }

    #[test]
    fn test_reload_visible_to_new_requests_only() {
        let codex = codex(&fixtures::numbered_items(5, "old"));
        let before = codex
            .render_list(EntityKind::Item, Locale::En, PageRequest::default())
            .unwrap();

        codex.reload(&fixtures::numbered_items(7, "new")).unwrap();
        let after = codex
            .render_list(EntityKind::Item, Locale::En, PageRequest::default())
            .unwrap();

        let Summary::Item(first) = &before.items[0] else {
            panic!("item summary expected");
        };
        assert_eq!(first.name, "old 1 [en]");
        assert_eq!(after.items.len(), 7);
        assert_eq!(codex.generation().number, 2);
    }

    #[test]
    fn test_failed_reload_keeps_serving() {
        let codex = codex(&fixtures::dataset());
        let before = codex.generation();

        let mut broken = fixtures::dataset();
        broken.mounts = None;
        let err = codex.reload(&broken).unwrap_err();
        assert!(matches!(
            err,
            Error::BuildFailed(codex_db::Error::MissingKind(EntityKind::Mount))
        ));
        assert!(!err.is_client_error());

        assert_eq!(codex.generation(), before);
        assert!(codex.render_detail(EntityKind::Mount, Locale::En, 30).is_ok());
    }

    #[test]
    fn test_reload_empty_dataset() {
        let codex = codex(&fixtures::dataset());
        let info = codex.reload(&Dataset::empty()).unwrap();
        assert_eq!(info.count(EntityKind::Item), 0);
        assert!(codex
            .render_detail(EntityKind::Item, Locale::En, 1)
            .is_err());
    }

    #[test]
    fn test_list_elements() {
        let codex = codex(&fixtures::dataset());
        assert_eq!(codex.list_elements().unwrap(), vec!["Vitality", "Level"]);
        codex.reload(&Dataset::empty()).unwrap();
        assert!(codex.list_elements().unwrap().is_empty());
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(
            parse_target("weapons", "PT").unwrap(),
            (EntityKind::Weapon, Locale::Pt)
        );
        assert!(matches!(
            parse_target("pets", "en"),
            Err(Error::Rejected(RequestError::UnknownKind(_)))
        ));
        assert!(matches!(
            parse_target("items", "jp"),
            Err(Error::Rejected(RequestError::UnsupportedLocale(_)))
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut bad = config();
        bad.pagination.max_page_size = 0;
        assert!(matches!(Codex::new(bad), Err(Error::Config(_))));
    }
}
