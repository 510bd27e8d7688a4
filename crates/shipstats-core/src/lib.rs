//! shipstats-core: Domain models and overlay matching for game data serving.
//!
//! This crate provides:
//! - `DataFile`: The two fixed-named JSON files the tool relocates and serves
//! - `Loadout` / `LoadoutFile`: The loadout snapshot written by the log watcher
//! - `Ship` / `Item`: Tolerant views of the extracted game data records
//! - Overlay matching that joins a loadout against the ships/items data

pub mod model;
pub mod overlay;

pub use model::{DataFile, Item, Loadout, LoadoutFile, Overlay, OverlayComponent, Ship};
pub use overlay::{build_overlay, find_item, find_ship};
