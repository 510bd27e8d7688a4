//! Overlay matching: join a loadout against the ships/items data.
//!
//! Matching is intentionally permissive. Component and ship names come from
//! free-form game log lines, so an exact case-insensitive match on `name` or
//! `id` is tried first, then a case-insensitive substring match on `name`.

use crate::model::{Item, Loadout, Overlay, OverlayComponent, Ship};

/// Find the ship record matching `query`, exact match preferred.
#[must_use]
pub fn find_ship<'a>(ships: &'a [Ship], query: &str) -> Option<&'a Ship> {
    let query = query.to_lowercase();

    let exact = ships.iter().find(|s| {
        s.name.as_deref().is_some_and(|n| n.to_lowercase() == query)
            || s.id.as_deref().is_some_and(|i| i.to_lowercase() == query)
    });

    exact.or_else(|| {
        ships
            .iter()
            .find(|s| s.name.as_deref().is_some_and(|n| n.to_lowercase().contains(&query)))
    })
}

/// Find the item record matching `query`, exact match preferred.
#[must_use]
pub fn find_item<'a>(items: &'a [Item], query: &str) -> Option<&'a Item> {
    let query = query.to_lowercase();

    let exact = items.iter().find(|it| {
        it.id.as_deref().is_some_and(|i| i.to_lowercase() == query)
            || it.name.as_deref().is_some_and(|n| n.to_lowercase() == query)
    });

    exact.or_else(|| {
        items
            .iter()
            .find(|it| it.name.as_deref().is_some_and(|n| n.to_lowercase().contains(&query)))
    })
}

/// Build an overlay from a loadout and the current ships/items data.
///
/// Components with no matching item keep their count and carry `item: None`.
#[must_use]
pub fn build_overlay(loadout: &Loadout, ships: &[Ship], items: &[Item]) -> Overlay {
    let ship = loadout
        .ship
        .as_deref()
        .and_then(|name| find_ship(ships, name))
        .cloned();

    let components = loadout
        .components
        .iter()
        .map(|(name, count)| OverlayComponent {
            name: name.clone(),
            count: *count,
            item: find_item(items, name).cloned(),
        })
        .collect();

    Overlay {
        ship,
        components,
        raw: loadout.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ship(id: &str, name: &str) -> Ship {
        Ship {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            ..Ship::default()
        }
    }

    fn item(id: &str, name: &str) -> Item {
        Item {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            ..Item::default()
        }
    }

    #[test]
    fn test_find_ship_exact_by_name() {
        let ships = vec![ship("mako", "Mako"), ship("mako-se", "Mako SE")];

        let found = find_ship(&ships, "mako").unwrap();
        assert_eq!(found.id.as_deref(), Some("mako"));
    }

    #[test]
    fn test_find_ship_exact_beats_substring() {
        // "Mako SE" contains "mako se", but the exact id match must win.
        let ships = vec![ship("other", "Mako SE Deluxe"), ship("mako se", "Unrelated")];

        let found = find_ship(&ships, "Mako SE").unwrap();
        assert_eq!(found.id.as_deref(), Some("mako se"));
    }

    #[test]
    fn test_find_ship_substring_fallback() {
        let ships = vec![ship("avenger-titan", "Avenger Titan Renegade")];

        let found = find_ship(&ships, "titan").unwrap();
        assert_eq!(found.id.as_deref(), Some("avenger-titan"));
    }

    #[test]
    fn test_find_ship_no_match() {
        let ships = vec![ship("mako", "Mako")];
        assert!(find_ship(&ships, "reclaimer").is_none());
    }

    #[test]
    fn test_build_overlay_joins_components() {
        let ships = vec![ship("mako", "Mako")];
        let items = vec![item("lasercannon_m02", "LaserCannon Medium")];

        let loadout = Loadout {
            ship: Some("mako".to_string()),
            components: [
                ("LaserCannon Medium".to_string(), 2),
                ("MysteryPart".to_string(), 1),
            ]
            .into_iter()
            .collect(),
        };

        let overlay = build_overlay(&loadout, &ships, &items);

        assert_eq!(overlay.ship.unwrap().id.as_deref(), Some("mako"));
        assert_eq!(overlay.components.len(), 2);

        let matched = &overlay.components[0];
        assert_eq!(matched.name, "LaserCannon Medium");
        assert_eq!(matched.count, 2);
        assert!(matched.item.is_some());

        let unmatched = &overlay.components[1];
        assert_eq!(unmatched.name, "MysteryPart");
        assert_eq!(unmatched.count, 1);
        assert!(unmatched.item.is_none());

        assert_eq!(overlay.raw, loadout);
    }

    #[test]
    fn test_build_overlay_empty_data() {
        let loadout = Loadout {
            ship: Some("mako".to_string()),
            components: [("Shield".to_string(), 1)].into_iter().collect(),
        };

        let overlay = build_overlay(&loadout, &[], &[]);

        assert!(overlay.ship.is_none());
        assert!(overlay.components[0].item.is_none());
    }
}
