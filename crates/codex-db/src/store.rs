//! Generation store: the active generation and its atomic replacement.
//!
//! Readers pin the active generation with a wait-free `ArcSwap` load and open
//! a read transaction on it. A reload builds the next generation on the other
//! slot, entirely off the read path, then publishes it with one pointer swap.
//! Transactions opened before the swap keep reading the generation they
//! pinned; the replaced generation is freed once its last reader is gone.

use crate::dataset::DatasetSource;
use crate::error::Result;
use crate::generation::{Generation, GenerationInfo, Slot};
use arc_swap::ArcSwap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

/// Owner of the active generation.
pub struct GenerationStore {
    active: ArcSwap<Generation>,
    /// Generation replaced by the last publish; kept until the next one
    retired: Mutex<Option<Arc<Generation>>>,
    /// Serializes builds; never taken by readers
    build: Mutex<()>,
}

impl GenerationStore {
    /// Start with an empty generation on slot A
    pub fn new() -> Result<Self> {
        Ok(Self::with_generation(Generation::empty(Slot::A, 0)?))
    }

    /// Start with an already built generation
    pub fn with_generation(generation: Generation) -> Self {
        Self {
            active: ArcSwap::from_pointee(generation),
            retired: Mutex::new(None),
            build: Mutex::new(()),
        }
    }

    /// Pin the active generation.
    ///
    /// The returned handle keeps that generation readable for as long as it
    /// is held; open transactions with [`Generation::begin_read`].
    pub fn pin(&self) -> Arc<Generation> {
        self.active.load_full()
    }

    /// Summary of the active generation
    pub fn info(&self) -> GenerationInfo {
        self.active.load().info().clone()
    }

    /// Build a new generation from `source` and publish it.
    ///
    /// On any failure the active generation is left untouched.
    pub fn reload(&self, source: &dyn DatasetSource) -> Result<GenerationInfo> {
        let _build = self.build.lock().unwrap_or_else(PoisonError::into_inner);

        let current = self.active.load();
        let slot = current.slot().other();
        let number = current.number() + 1;
        drop(current);

        debug!(source = %source.describe(), %slot, number, "building generation");
        let generation = source
            .load()
            .and_then(|dataset| Generation::build(slot, number, dataset))
            .inspect_err(|e| {
                warn!(source = %source.describe(), error = %e, "generation build failed, keeping active generation");
            })?;

        Ok(self.publish(generation))
    }

    fn publish(&self, generation: Generation) -> GenerationInfo {
        let info = generation.info().clone();
        let previous = self.active.swap(Arc::new(generation));
        info!(
            slot = %info.slot,
            number = info.number,
            replaced = previous.number(),
            "published generation"
        );

        let mut retired = self.retired.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(old) = retired.take() {
            let readers = Arc::strong_count(&old) - 1;
            if readers > 0 {
                debug!(number = old.number(), readers, "retired generation still pinned");
            }
        }
        *retired = Some(previous);
        info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::error::Error;
    use crate::fixtures;
    use codex_core::{EntityKind, Locale, Record};

    fn names(generation: &Generation) -> Vec<String> {
        let txn = generation.begin_read().unwrap();
        txn.scan(EntityKind::Item)
            .map(|r| r.unwrap().as_item().unwrap().name.get(Locale::En).to_string())
            .collect()
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = GenerationStore::new().unwrap();
        let info = store.info();
        assert_eq!(info.slot, Slot::A);
        assert_eq!(info.number, 0);
        assert_eq!(info.count(EntityKind::Item), 0);
    }

    #[test]
    fn test_reload_alternates_slots() {
        let store = GenerationStore::new().unwrap();
        let first = store.reload(&fixtures::numbered_items(3, "g1")).unwrap();
        assert_eq!((first.slot, first.number), (Slot::B, 1));
        let second = store.reload(&fixtures::numbered_items(3, "g2")).unwrap();
        assert_eq!((second.slot, second.number), (Slot::A, 2));
        assert_eq!(store.info().number, 2);
    }

    #[test]
    fn test_snapshot_isolation() {
        let store = GenerationStore::new().unwrap();
        store.reload(&fixtures::numbered_items(3, "old")).unwrap();

        let pinned = store.pin();
        let old_txn = pinned.begin_read().unwrap();

        store.reload(&fixtures::numbered_items(4, "new")).unwrap();

        // the transaction opened before the reload still sees the old data
        let Some(Record::Item(item)) = old_txn.get(EntityKind::Item, 1).unwrap() else {
            panic!("item 1 missing");
        };
        assert_eq!(item.name.get(Locale::En), "old 1 [en]");
        assert_eq!(old_txn.count(EntityKind::Item).unwrap(), 3);
        assert!(old_txn.get(EntityKind::Item, 4).unwrap().is_none());

        // new pins see only the new generation
        let fresh = store.pin();
        assert_eq!(fresh.number(), 2);
        assert!(names(&fresh).iter().all(|n| n.starts_with("new")));
        assert_eq!(names(&fresh).len(), 4);
    }

    #[test]
    fn test_failed_reload_keeps_active_generation() {
        let store = GenerationStore::new().unwrap();
        store.reload(&fixtures::dataset()).unwrap();
        let before_info = store.info();
        let before = names(&store.pin());

        let mut incomplete = fixtures::dataset();
        incomplete.sets = None;
        assert!(matches!(
            store.reload(&incomplete),
            Err(Error::MissingKind(EntityKind::Set))
        ));

        let bad_json = crate::dataset::JsonFile("/nonexistent/codex.json".into());
        assert!(matches!(store.reload(&bad_json), Err(Error::Io(_))));

        assert_eq!(store.info(), before_info);
        assert_eq!(names(&store.pin()), before);
    }

    #[test]
    fn test_retired_generation_outlives_publish() {
        let store = GenerationStore::new().unwrap();
        store.reload(&fixtures::numbered_items(2, "a")).unwrap();
        let pinned = store.pin();
        store.reload(&fixtures::numbered_items(2, "b")).unwrap();
        store.reload(&fixtures::numbered_items(2, "c")).unwrap();

        // two publishes later the pinned generation is still readable
        assert_eq!(names(&pinned), vec!["a 1 [en]", "a 2 [en]"]);
    }

    #[test]
    fn test_concurrent_readers_never_see_torn_generation() {
        let store = GenerationStore::new().unwrap();
        store.reload(&fixtures::numbered_items(20, "gen0")).unwrap();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        let generation = store.pin();
                        let names = names(&generation);
                        let tag = names[0].split(' ').next().unwrap().to_string();
                        assert!(names.iter().all(|n| n.starts_with(&tag)));
                        assert_eq!(names.len(), 20);
                    }
                });
            }
            scope.spawn(|| {
                for i in 1..=10 {
                    let tag = format!("gen{}", i);
                    store.reload(&fixtures::numbered_items(20, &tag)).unwrap();
                }
            });
        });

        assert_eq!(store.info().number, 11);
    }

    #[test]
    fn test_reload_from_empty_dataset() {
        let store = GenerationStore::new().unwrap();
        let info = store.reload(&Dataset::empty()).unwrap();
        assert_eq!(info.count(EntityKind::Mount), 0);
    }
}
