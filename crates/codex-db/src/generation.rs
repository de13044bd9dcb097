//! One immutable snapshot of the whole dataset.

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::models::*;
use crate::queries::ReadTxn;
use chrono::{DateTime, Utc};
use codex_core::EntityKind;
use native_db::*;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

// Static models for every generation database
static MODELS: LazyLock<Models> = LazyLock::new(|| {
    let mut models = Models::new();
    models.define::<StoredItem>().unwrap();
    models.define::<StoredEquipment>().unwrap();
    models.define::<StoredWeapon>().unwrap();
    models.define::<StoredMount>().unwrap();
    models.define::<StoredSet>().unwrap();
    models.define::<StoredElement>().unwrap();
    models
});

/// Which of the two buffers a generation was built into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    /// The other buffer
    pub fn other(self) -> Self {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::A => f.write_str("A"),
            Slot::B => f.write_str("B"),
        }
    }
}

/// Summary of a generation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationInfo {
    pub slot: Slot,
    pub number: u64,
    pub built_at: DateTime<Utc>,
    /// Record count per kind
    pub counts: Vec<(EntityKind, usize)>,
}

impl GenerationInfo {
    /// Record count for one kind
    pub fn count(&self, kind: EntityKind) -> usize {
        self.counts
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(0, |(_, count)| *count)
    }
}

/// A complete, immutable set of tables.
///
/// Tables are written once inside [`Generation::build`] and only read afterwards.
pub struct Generation {
    info: GenerationInfo,
    db: Database<'static>,
}

impl Generation {
    /// Build a generation from a dataset.
    ///
    /// The dataset is validated first; any failure leaves nothing behind.
    pub fn build(slot: Slot, number: u64, dataset: Dataset) -> Result<Self> {
        dataset.validate()?;
        let Dataset {
            items,
            equipment,
            weapons,
            mounts,
            sets,
            elements,
        } = dataset;

        let db = Builder::new().create_in_memory(&MODELS)?;
        let mut counts = Vec::with_capacity(EntityKind::ALL.len());

        let rw = db.rw_transaction()?;
        counts.push((
            EntityKind::Item,
            insert_all(&rw, EntityKind::Item, items, StoredItem::new)?,
        ));
        counts.push((
            EntityKind::Equipment,
            insert_all(&rw, EntityKind::Equipment, equipment, StoredEquipment::new)?,
        ));
        counts.push((
            EntityKind::Weapon,
            insert_all(&rw, EntityKind::Weapon, weapons, StoredWeapon::new)?,
        ));
        counts.push((
            EntityKind::Mount,
            insert_all(&rw, EntityKind::Mount, mounts, StoredMount::new)?,
        ));
        counts.push((
            EntityKind::Set,
            insert_all(&rw, EntityKind::Set, sets, StoredSet::new)?,
        ));
        for (position, name) in (0u32..).zip(elements) {
            rw.insert(StoredElement { position, name })?;
        }
        rw.commit()?;

        Ok(Self {
            info: GenerationInfo {
                slot,
                number,
                built_at: Utc::now(),
                counts,
            },
            db,
        })
    }

    /// An empty generation with every table present
    pub fn empty(slot: Slot, number: u64) -> Result<Self> {
        Self::build(slot, number, Dataset::empty())
    }

    /// Open a read transaction on this generation
    pub fn begin_read(&self) -> Result<ReadTxn<'_>> {
        Ok(ReadTxn::new(&self.info, self.db.r_transaction()?))
    }

    pub fn info(&self) -> &GenerationInfo {
        &self.info
    }

    pub fn slot(&self) -> Slot {
        self.info.slot
    }

    pub fn number(&self) -> u64 {
        self.info.number
    }
}

impl fmt::Debug for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generation").field("info", &self.info).finish()
    }
}

fn insert_all<R, S: ToInput>(
    rw: &transaction::RwTransaction<'_>,
    kind: EntityKind,
    records: Option<Vec<R>>,
    wrap: fn(u32, R) -> S,
) -> Result<usize> {
    let records = records.ok_or(Error::MissingKind(kind))?;
    let len = records.len();
    for (position, record) in records.into_iter().enumerate() {
        let position = u32::try_from(position).map_err(|_| Error::TooManyRecords(kind))?;
        rw.insert(wrap(position, record))?;
    }
    Ok(len)
}
