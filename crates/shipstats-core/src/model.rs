//! Data file names and the loadout/overlay models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// The two fixed-named JSON files the tool relocates and serves.
///
/// Their contents are opaque to the copy and unpack paths; only the
/// overlay endpoint ever parses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFile {
    Ships,
    Items,
}

impl DataFile {
    /// All data files, in the order they are processed.
    pub const ALL: [Self; 2] = [Self::Ships, Self::Items];

    /// File name on disk.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Ships => "ships.json",
            Self::Items => "items.json",
        }
    }

    /// HTTP route the file is served under.
    #[must_use]
    pub const fn route(self) -> &'static str {
        match self {
            Self::Ships => "/api/ships",
            Self::Items => "/api/items",
        }
    }
}

impl fmt::Display for DataFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// A ship record from `ships.json`.
///
/// Only `id` and `name` are inspected; everything else is carried through
/// untouched so the overlay can echo the full record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Ship {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Remaining fields of the record, re-serialized verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An item record from `items.json`. Same shape rules as [`Ship`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Current ship and equipped component counts, as tracked by the log watcher.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Loadout {
    /// Active ship name, if one has been observed.
    #[serde(default)]
    pub ship: Option<String>,

    /// Equipped component name -> count.
    #[serde(default)]
    pub components: BTreeMap<String, u64>,
}

/// On-disk shape of `loadout.json` as written by the log watcher.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoadoutFile {
    #[serde(default)]
    pub loadout: Option<Loadout>,

    /// When the watcher last updated the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

/// A loadout component joined against the items data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlayComponent {
    pub name: String,
    pub count: u64,
    /// Matched item record, or `None` if nothing in the data matched.
    pub item: Option<Item>,
}

/// A loadout enriched with stats from the ships/items data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Overlay {
    /// Matched ship record, or `None` if nothing in the data matched.
    pub ship: Option<Ship>,
    pub components: Vec<OverlayComponent>,
    /// The loadout the overlay was built from.
    pub raw: Loadout,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_data_file_names() {
        assert_eq!(DataFile::Ships.file_name(), "ships.json");
        assert_eq!(DataFile::Items.file_name(), "items.json");
        assert_eq!(DataFile::Ships.route(), "/api/ships");
        assert_eq!(DataFile::Items.route(), "/api/items");
    }

    #[test]
    fn test_loadout_file_tolerates_missing_fields() {
        let parsed: LoadoutFile = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, LoadoutFile::default());

        let parsed: LoadoutFile = serde_json::from_str(r#"{"loadout": null}"#).unwrap();
        assert!(parsed.loadout.is_none());
    }

    #[test]
    fn test_ship_preserves_extra_fields() {
        let raw = r#"{"id": "mako", "name": "Mako", "crew": 2, "cargo": {"scu": 0}}"#;
        let ship: Ship = serde_json::from_str(raw).unwrap();

        assert_eq!(ship.id.as_deref(), Some("mako"));
        assert_eq!(ship.name.as_deref(), Some("Mako"));
        assert_eq!(ship.extra.get("crew"), Some(&Value::from(2)));

        let back = serde_json::to_value(&ship).unwrap();
        assert_eq!(back["cargo"]["scu"], Value::from(0));
    }

    #[test]
    fn test_loadout_roundtrip() {
        let raw = r#"{"loadout": {"ship": "Avenger Titan", "components": {"LaserCannon": 2}}, "updated": "2024-05-01T12:00:00Z"}"#;
        let parsed: LoadoutFile = serde_json::from_str(raw).unwrap();

        let loadout = parsed.loadout.unwrap();
        assert_eq!(loadout.ship.as_deref(), Some("Avenger Titan"));
        assert_eq!(loadout.components.get("LaserCannon"), Some(&2));
        assert!(parsed.updated.is_some());
    }
}
