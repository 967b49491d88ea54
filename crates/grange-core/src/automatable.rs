//! Resolved automatable entities: machines, containers, connectors.
//!
//! Factories translate raw [`WorldEntity`](crate::entity::WorldEntity)
//! values into this closed variant set. Discovery classifies via exhaustive
//! match; machine processing behaviour is exercised by the automation tick,
//! not by discovery.

use crate::grid::TileArea;
use std::rc::Rc;

// ---------------------------------------------------------------------------
// Machine
// ---------------------------------------------------------------------------

/// Where a machine is in its processing cycle.
///
/// Discovery never reads this; it is the contract the automation tick uses
/// to decide whether to feed inputs or collect outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MachineState {
    /// Waiting for inputs.
    #[default]
    Idle,
    /// Mid-cycle; neither accepts inputs nor has outputs ready.
    Processing,
    /// Finished; output ready for collection.
    Done,
}

/// An automatable machine: consumes inputs, produces outputs.
pub trait Machine: std::fmt::Debug {
    /// Stable identifier for this machine kind, used for rule-override
    /// lookup and priority.
    fn machine_type(&self) -> &str;

    /// The footprint this machine occupies.
    fn tile_area(&self) -> TileArea;

    /// Current processing state.
    fn state(&self) -> MachineState {
        MachineState::Idle
    }
}

// ---------------------------------------------------------------------------
// Container
// ---------------------------------------------------------------------------

/// A named item stack held by a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStack {
    pub item: String,
    pub quantity: u32,
}

/// An automatable storage container.
///
/// The two capability flags are independent; a container must have at
/// least one of them set to join a group.
pub trait Container: std::fmt::Debug {
    /// The footprint this container occupies.
    fn tile_area(&self) -> TileArea;

    /// Whether machines may push finished items into this container.
    fn accepts_input(&self) -> bool;

    /// Whether machines may pull ingredients out of this container.
    fn provides_output(&self) -> bool;

    /// Current contents, for the shared storage facade.
    fn items(&self) -> Vec<ItemStack> {
        Vec::new()
    }
}

// ---------------------------------------------------------------------------
// Automatable
// ---------------------------------------------------------------------------

/// A resolved automatable entity.
///
/// Connectors are passive: a bare footprint that extends connectivity
/// without holding inventory.
#[derive(Debug, Clone)]
pub enum Automatable {
    Machine(Rc<dyn Machine>),
    Container(Rc<dyn Container>),
    Connector(TileArea),
}

impl Automatable {
    /// The footprint of the resolved entity.
    pub fn tile_area(&self) -> TileArea {
        match self {
            Automatable::Machine(machine) => machine.tile_area(),
            Automatable::Container(container) => container.tile_area(),
            Automatable::Connector(area) => *area,
        }
    }
}
