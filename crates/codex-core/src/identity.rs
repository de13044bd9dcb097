//! Identity types for entity kinds and records

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable external identifier of a record within its kind.
pub type AnkamaId = u32;

/// Parse an id as it arrives in a request path
pub fn parse_ankama_id(raw: &str) -> Result<AnkamaId> {
    raw.trim()
        .parse::<AnkamaId>()
        .map_err(|_| Error::InvalidId(raw.to_string()))
}

/// The kinds of records the dataset holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Item,
    Equipment,
    Weapon,
    Mount,
    Set,
}

impl EntityKind {
    /// Every kind, in build order
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Item,
        EntityKind::Equipment,
        EntityKind::Weapon,
        EntityKind::Mount,
        EntityKind::Set,
    ];

    /// Path segment for list links
    pub fn slug(&self) -> &'static str {
        match self {
            EntityKind::Item => "items",
            EntityKind::Equipment => "equipment",
            EntityKind::Weapon => "weapons",
            EntityKind::Mount => "mounts",
            EntityKind::Set => "sets",
        }
    }

    /// Whether records of this kind are item-like (can appear in recipes)
    pub fn is_item_like(&self) -> bool {
        matches!(
            self,
            EntityKind::Item | EntityKind::Equipment | EntityKind::Weapon
        )
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_ankama_id("44").unwrap(), 44);
        assert!(matches!(parse_ankama_id("-1"), Err(Error::InvalidId(_))));
        assert!(matches!(parse_ankama_id("abc"), Err(Error::InvalidId(_))));
    }

    #[test]
    fn test_kind_slug() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.slug().parse::<EntityKind>().unwrap(), kind);
        }
        assert_eq!(EntityKind::Weapon.to_string(), "weapons");
        assert!(!EntityKind::Mount.is_item_like());
    }
}
