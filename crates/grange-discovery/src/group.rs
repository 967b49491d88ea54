//! The discovered connected component.

use grange_core::automatable::{Container, Machine};
use grange_core::grid::{GridPosition, TileArea};
use grange_core::location::LocationKey;
use grange_core::storage::SharedStorage;
use std::rc::Rc;

/// A maximal connected group of machines, containers, and connectors.
///
/// Immutable once yielded by a scan: entities may move or be added and
/// removed afterwards, so callers re-run discovery (e.g. at the start of
/// the next in-game day) rather than mutating a group.
#[derive(Debug)]
pub struct MachineGroup {
    key: LocationKey,
    machines: Vec<Rc<dyn Machine>>,
    containers: Vec<Rc<dyn Container>>,
    areas: Vec<TileArea>,
    storage: SharedStorage,
}

impl MachineGroup {
    pub(crate) fn new(
        key: LocationKey,
        machines: Vec<Rc<dyn Machine>>,
        containers: Vec<Rc<dyn Container>>,
        areas: Vec<TileArea>,
        storage: SharedStorage,
    ) -> Self {
        Self {
            key,
            machines,
            containers,
            areas,
            storage,
        }
    }

    /// The key of the location this group was discovered in.
    pub fn location_key(&self) -> &LocationKey {
        &self.key
    }

    /// Member machines, sorted by descending configured priority (ties in
    /// discovery order).
    pub fn machines(&self) -> &[Rc<dyn Machine>] {
        &self.machines
    }

    /// Member containers.
    pub fn containers(&self) -> &[Rc<dyn Container>] {
        &self.containers
    }

    /// The tile areas composing the group's footprint.
    pub fn tile_areas(&self) -> &[TileArea] {
        &self.areas
    }

    /// The shared storage facade over the member containers.
    pub fn storage(&self) -> &SharedStorage {
        &self.storage
    }

    /// Whether the group's footprint covers the given tile.
    pub fn contains_tile(&self, tile: GridPosition) -> bool {
        self.areas.iter().any(|area| area.contains(tile))
    }

    /// Whether there is anything to automate: at least one machine to feed
    /// or drain.
    pub fn has_machines(&self) -> bool {
        !self.machines.is_empty()
    }
}
