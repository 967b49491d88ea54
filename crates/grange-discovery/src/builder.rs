//! The reusable group accumulator.
//!
//! One builder serves every flood fill within a scan: the engine adds
//! members as tiles resolve, drains the newly-added area buffer each round
//! to drive expansion, finalizes with [`GroupBuilder::build`], and calls
//! [`GroupBuilder::reset`] before the next fill. `reset` must fully clear
//! the round buffer, or tile areas would leak into the next group.

use crate::group::MachineGroup;
use grange_core::automatable::{Container, Machine};
use grange_core::grid::TileArea;
use grange_core::location::LocationKey;
use grange_core::rules::RuleSet;
use grange_core::storage::StorageFactory;
use std::cmp::Reverse;
use std::rc::Rc;

/// Accumulates one group-in-progress during a flood fill.
///
/// Gating is the caller's job: machines are added only when rule-enabled,
/// containers only when at least one capability flag is set.
pub struct GroupBuilder<'a> {
    key: LocationKey,
    rules: &'a RuleSet,
    storage_factory: &'a dyn StorageFactory,
    machines: Vec<Rc<dyn Machine>>,
    containers: Vec<Rc<dyn Container>>,
    areas: Vec<TileArea>,
    new_areas: Vec<TileArea>,
}

impl<'a> GroupBuilder<'a> {
    pub fn new(
        key: LocationKey,
        rules: &'a RuleSet,
        storage_factory: &'a dyn StorageFactory,
    ) -> Self {
        Self {
            key,
            rules,
            storage_factory,
            machines: Vec::new(),
            containers: Vec::new(),
            areas: Vec::new(),
            new_areas: Vec::new(),
        }
    }

    /// Append a machine; its footprint joins the group and the round
    /// buffer.
    pub fn add_machine(&mut self, machine: Rc<dyn Machine>) {
        let area = machine.tile_area();
        self.machines.push(machine);
        self.push_area(area);
    }

    /// Append a container; its footprint joins the group and the round
    /// buffer.
    pub fn add_container(&mut self, container: Rc<dyn Container>) {
        let area = container.tile_area();
        self.containers.push(container);
        self.push_area(area);
    }

    /// Record a connector's or bare footprint's area without attaching
    /// inventory.
    pub fn add_area(&mut self, area: TileArea) {
        self.push_area(area);
    }

    fn push_area(&mut self, area: TileArea) {
        self.areas.push(area);
        self.new_areas.push(area);
    }

    /// True once any tile area has been recorded this fill.
    pub fn has_tiles(&self) -> bool {
        !self.areas.is_empty()
    }

    /// Drain the tile areas added since the last drain. The caller marks
    /// their tiles visited and expands the traversal along their borders.
    pub fn take_new_areas(&mut self) -> Vec<TileArea> {
        std::mem::take(&mut self.new_areas)
    }

    /// Finalize the accumulated state into an immutable group.
    ///
    /// Machines are stable-sorted by descending configured priority
    /// (default 0), so ties keep their discovery order; the storage facade
    /// is built from the collected containers.
    pub fn build(&mut self) -> MachineGroup {
        let rules = self.rules;
        self.machines
            .sort_by_key(|machine| Reverse(rules.priority(machine.machine_type())));

        let machines = std::mem::take(&mut self.machines);
        let containers = std::mem::take(&mut self.containers);
        let areas = std::mem::take(&mut self.areas);
        let storage = self.storage_factory.build(containers.clone());
        MachineGroup::new(self.key.clone(), machines, containers, areas, storage)
    }

    /// Clear all accumulated state, including the round buffer, keeping
    /// the location key, rules, and storage factory for the next fill.
    pub fn reset(&mut self) {
        self.machines.clear();
        self.containers.clear();
        self.areas.clear();
        self.new_areas.clear();
    }
}
