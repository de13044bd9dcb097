//! Read transactions and the table operations they support.

use crate::error::Result;
use crate::generation::GenerationInfo;
use crate::models::*;
use codex_core::{AnkamaId, EntityKind, Record};
use native_db::transaction::RTransaction;
use std::ops::Range;

/// Collect a primary-key range scan of one table into records.
macro_rules! range_scan {
    ($txn:expr, $model:ty, $range:expr) => {{
        let scan = $txn.scan().primary::<$model>()?;
        let stored = scan.range($range)?.collect::<std::result::Result<Vec<$model>, _>>()?;
        stored.into_iter().map(<$model>::into_record).collect::<Vec<_>>()
    }};
}

/// A read transaction bound to one generation.
///
/// Everything read through it comes from the generation it was opened on,
/// whatever has been published since.
pub struct ReadTxn<'g> {
    info: &'g GenerationInfo,
    txn: RTransaction<'g>,
}

impl<'g> ReadTxn<'g> {
    pub(crate) fn new(info: &'g GenerationInfo, txn: RTransaction<'g>) -> Self {
        Self { info, txn }
    }

    /// Generation this transaction reads from
    pub fn generation(&self) -> &GenerationInfo {
        self.info
    }

    /// Point lookup by external id
    pub fn get(&self, kind: EntityKind, id: AnkamaId) -> Result<Option<Record>> {
        let r = &self.txn;
        Ok(match kind {
            EntityKind::Item => r
                .get()
                .secondary::<StoredItem>(StoredItemKey::ankama_id, id)?
                .map(StoredItem::into_record),
            EntityKind::Equipment => r
                .get()
                .secondary::<StoredEquipment>(StoredEquipmentKey::ankama_id, id)?
                .map(StoredEquipment::into_record),
            EntityKind::Weapon => r
                .get()
                .secondary::<StoredWeapon>(StoredWeaponKey::ankama_id, id)?
                .map(StoredWeapon::into_record),
            EntityKind::Mount => r
                .get()
                .secondary::<StoredMount>(StoredMountKey::ankama_id, id)?
                .map(StoredMount::into_record),
            EntityKind::Set => r
                .get()
                .secondary::<StoredSet>(StoredSetKey::ankama_id, id)?
                .map(StoredSet::into_record),
        })
    }

    /// Lookup by insertion position
    pub fn at(&self, kind: EntityKind, position: u32) -> Result<Option<Record>> {
        let r = &self.txn;
        Ok(match kind {
            EntityKind::Item => r
                .get()
                .primary::<StoredItem>(position)?
                .map(StoredItem::into_record),
            EntityKind::Equipment => r
                .get()
                .primary::<StoredEquipment>(position)?
                .map(StoredEquipment::into_record),
            EntityKind::Weapon => r
                .get()
                .primary::<StoredWeapon>(position)?
                .map(StoredWeapon::into_record),
            EntityKind::Mount => r
                .get()
                .primary::<StoredMount>(position)?
                .map(StoredMount::into_record),
            EntityKind::Set => r
                .get()
                .primary::<StoredSet>(position)?
                .map(StoredSet::into_record),
        })
    }

    /// Number of records of a kind
    pub fn count(&self, kind: EntityKind) -> Result<usize> {
        let r = &self.txn;
        let len = match kind {
            EntityKind::Item => r.len().primary::<StoredItem>()?,
            EntityKind::Equipment => r.len().primary::<StoredEquipment>()?,
            EntityKind::Weapon => r.len().primary::<StoredWeapon>()?,
            EntityKind::Mount => r.len().primary::<StoredMount>()?,
            EntityKind::Set => r.len().primary::<StoredSet>()?,
        };
        Ok(len as usize)
    }

    /// Records at positions `[start, end)`, in insertion order
    pub fn slice(&self, kind: EntityKind, range: Range<usize>) -> Result<Vec<Record>> {
        if range.is_empty() {
            return Ok(Vec::new());
        }
        let start = u32::try_from(range.start).unwrap_or(u32::MAX);
        let end = u32::try_from(range.end).unwrap_or(u32::MAX);
        let r = &self.txn;
        Ok(match kind {
            EntityKind::Item => range_scan!(r, StoredItem, start..end),
            EntityKind::Equipment => range_scan!(r, StoredEquipment, start..end),
            EntityKind::Weapon => range_scan!(r, StoredWeapon, start..end),
            EntityKind::Mount => range_scan!(r, StoredMount, start..end),
            EntityKind::Set => range_scan!(r, StoredSet, start..end),
        })
    }

    /// Lazy scan of every record of a kind, in insertion order.
    ///
    /// Each call starts a fresh pass.
    pub fn scan(&self, kind: EntityKind) -> Scan<'_, 'g> {
        Scan {
            txn: self,
            kind,
            next: 0,
        }
    }

    /// Effect/condition element names, in dataset order
    pub fn elements(&self) -> Result<Vec<String>> {
        let scan = self.txn.scan().primary::<StoredElement>()?;
        let stored = scan.all()?.collect::<std::result::Result<Vec<StoredElement>, _>>()?;
        Ok(stored.into_iter().map(|e| e.name).collect())
    }

    /// First item-like record with this id, searching items, then equipment,
    /// then weapons
    pub fn first_match_component(&self, id: AnkamaId) -> Result<Option<Record>> {
        for kind in [EntityKind::Item, EntityKind::Equipment, EntityKind::Weapon] {
            if let Some(record) = self.get(kind, id)? {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }
}

/// Iterator over one table; see [`ReadTxn::scan`]
pub struct Scan<'t, 'g> {
    txn: &'t ReadTxn<'g>,
    kind: EntityKind,
    next: u32,
}

impl Iterator for Scan<'_, '_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.txn.at(self.kind, self.next) {
            Ok(Some(record)) => {
                self.next += 1;
                Some(Ok(record))
            }
            Ok(None) => None,
            Err(e) => {
                // stop after reporting the fault once
                self.next = u32::MAX;
                Some(Err(e))
            }
        }
    }
}
