//! Shared test helpers for unit, integration, and property tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so the same
//! locations, machines, and factories are available to every crate in the
//! workspace (via the `test-utils` feature) and to benchmarks.

use crate::automatable::{Automatable, Container, ItemStack, Machine, MachineState};
use crate::entity::{Building, TerrainFeature, WorldEntity, WorldObject};
use crate::factory::{AutomationFactory, FactoryResult};
use crate::grid::{GridPosition, TileArea};
use crate::location::{EnumerationError, Location};
use std::collections::HashMap;
use std::rc::Rc;

// ===========================================================================
// TestLocation
// ===========================================================================

/// An in-memory location with a fixed entity list.
#[derive(Debug)]
pub struct TestLocation {
    name: String,
    qualifier: Option<String>,
    bounds: TileArea,
    entities: Vec<WorldEntity>,
    fail_enumeration: bool,
}

impl TestLocation {
    /// A `width` x `height` location anchored at the grid origin.
    pub fn new(name: &str, width: u32, height: u32) -> Self {
        Self {
            name: name.to_string(),
            qualifier: None,
            bounds: TileArea::new(GridPosition::new(0, 0), width, height),
            entities: Vec::new(),
            fail_enumeration: false,
        }
    }

    pub fn with_qualifier(mut self, qualifier: &str) -> Self {
        self.qualifier = Some(qualifier.to_string());
        self
    }

    /// Place a 1x1 object of the given kind.
    pub fn with_object(self, kind: &str, x: i32, y: i32) -> Self {
        let area = TileArea::single(GridPosition::new(x, y));
        self.with_entity(WorldEntity::Object(WorldObject::new(kind, area)))
    }

    /// Place a 1x1 terrain feature of the given kind.
    pub fn with_terrain(self, kind: &str, x: i32, y: i32) -> Self {
        let area = TileArea::single(GridPosition::new(x, y));
        self.with_entity(WorldEntity::TerrainFeature(TerrainFeature::new(kind, area)))
    }

    /// Place a multi-tile building of the given kind.
    pub fn with_building(self, kind: &str, area: TileArea) -> Self {
        self.with_entity(WorldEntity::Building(Building::new(kind, area)))
    }

    pub fn with_entity(mut self, entity: WorldEntity) -> Self {
        self.entities.push(entity);
        self
    }

    /// Make `entities()` fail, for index-construction error tests.
    pub fn failing_enumeration(mut self) -> Self {
        self.fail_enumeration = true;
        self
    }
}

impl Location for TestLocation {
    fn name(&self) -> &str {
        &self.name
    }

    fn instance_qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    fn bounds(&self) -> TileArea {
        self.bounds
    }

    fn entities(&self) -> Result<Vec<WorldEntity>, EnumerationError> {
        if self.fail_enumeration {
            return Err("entity enumeration unavailable".into());
        }
        Ok(self.entities.clone())
    }
}

// ===========================================================================
// TestMachine / TestContainer
// ===========================================================================

/// A machine stub with a fixed type and footprint.
#[derive(Debug, Clone)]
pub struct TestMachine {
    machine_type: String,
    area: TileArea,
    state: MachineState,
}

impl TestMachine {
    pub fn new(machine_type: &str, area: TileArea) -> Self {
        Self {
            machine_type: machine_type.to_string(),
            area,
            state: MachineState::Idle,
        }
    }

    pub fn with_state(mut self, state: MachineState) -> Self {
        self.state = state;
        self
    }
}

impl Machine for TestMachine {
    fn machine_type(&self) -> &str {
        &self.machine_type
    }

    fn tile_area(&self) -> TileArea {
        self.area
    }

    fn state(&self) -> MachineState {
        self.state
    }
}

/// A container stub with configurable capability flags and contents.
#[derive(Debug, Clone)]
pub struct TestContainer {
    area: TileArea,
    provides_output: bool,
    accepts_input: bool,
    items: Vec<ItemStack>,
}

impl TestContainer {
    pub fn new(area: TileArea, provides_output: bool, accepts_input: bool) -> Self {
        Self {
            area,
            provides_output,
            accepts_input,
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: &str, quantity: u32) -> Self {
        self.items.push(ItemStack {
            item: item.to_string(),
            quantity,
        });
        self
    }
}

impl Container for TestContainer {
    fn tile_area(&self) -> TileArea {
        self.area
    }

    fn accepts_input(&self) -> bool {
        self.accepts_input
    }

    fn provides_output(&self) -> bool {
        self.provides_output
    }

    fn items(&self) -> Vec<ItemStack> {
        self.items.clone()
    }
}

// ===========================================================================
// KindFactory
// ===========================================================================

#[derive(Debug, Clone, Copy)]
enum Role {
    Machine,
    Container {
        provides_output: bool,
        accepts_input: bool,
    },
    Connector,
}

/// A factory that resolves entities by kind string, regardless of source
/// (object, terrain feature, or building).
#[derive(Debug, Default)]
pub struct KindFactory {
    name: String,
    roles: HashMap<String, Role>,
    tile_connectors: Vec<GridPosition>,
}

impl KindFactory {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            roles: HashMap::new(),
            tile_connectors: Vec::new(),
        }
    }

    /// Recognize `kind` as a machine (machine type = kind).
    pub fn machine(mut self, kind: &str) -> Self {
        self.roles.insert(kind.to_string(), Role::Machine);
        self
    }

    /// Recognize `kind` as a container accepting input and providing output.
    pub fn container(self, kind: &str) -> Self {
        self.container_flags(kind, true, true)
    }

    /// Recognize `kind` as a container with explicit capability flags.
    pub fn container_flags(mut self, kind: &str, provides_output: bool, accepts_input: bool) -> Self {
        self.roles.insert(
            kind.to_string(),
            Role::Container {
                provides_output,
                accepts_input,
            },
        );
        self
    }

    /// Recognize `kind` as a passive connector.
    pub fn connector(mut self, kind: &str) -> Self {
        self.roles.insert(kind.to_string(), Role::Connector);
        self
    }

    /// Resolve the given bare tile to a 1x1 connector (tile-sourced path).
    pub fn tile_connector_at(mut self, x: i32, y: i32) -> Self {
        self.tile_connectors.push(GridPosition::new(x, y));
        self
    }

    fn resolve_kind(&self, kind: &str, area: TileArea) -> Option<Automatable> {
        match self.roles.get(kind)? {
            Role::Machine => Some(Automatable::Machine(Rc::new(TestMachine::new(kind, area)))),
            Role::Container {
                provides_output,
                accepts_input,
            } => Some(Automatable::Container(Rc::new(TestContainer::new(
                area,
                *provides_output,
                *accepts_input,
            )))),
            Role::Connector => Some(Automatable::Connector(area)),
        }
    }
}

impl AutomationFactory for KindFactory {
    fn name(&self) -> &str {
        &self.name
    }

    fn from_object(&self, obj: &WorldObject, _location: &dyn Location) -> FactoryResult {
        Ok(self.resolve_kind(&obj.kind, obj.area))
    }

    fn from_terrain_feature(
        &self,
        feature: &TerrainFeature,
        _location: &dyn Location,
    ) -> FactoryResult {
        Ok(self.resolve_kind(&feature.kind, feature.area))
    }

    fn from_building(&self, building: &Building, _location: &dyn Location) -> FactoryResult {
        Ok(self.resolve_kind(&building.kind, building.area))
    }

    fn from_tile(&self, tile: GridPosition, _location: &dyn Location) -> FactoryResult {
        if self.tile_connectors.contains(&tile) {
            Ok(Some(Automatable::Connector(TileArea::single(tile))))
        } else {
            Ok(None)
        }
    }
}

// ===========================================================================
// FailingFactory
// ===========================================================================

/// A factory that fails on matching inputs, for fault-isolation tests.
#[derive(Debug, Default)]
pub struct FailingFactory {
    name: String,
    fail_kind: Option<String>,
    fail_tile: Option<GridPosition>,
}

impl FailingFactory {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fail_kind: None,
            fail_tile: None,
        }
    }

    /// Fail whenever an entity of this kind is resolved.
    pub fn on_kind(mut self, kind: &str) -> Self {
        self.fail_kind = Some(kind.to_string());
        self
    }

    /// Fail whenever this bare tile is resolved.
    pub fn on_tile(mut self, x: i32, y: i32) -> Self {
        self.fail_tile = Some(GridPosition::new(x, y));
        self
    }

    fn check_kind(&self, kind: &str) -> FactoryResult {
        match &self.fail_kind {
            Some(fail) if fail == kind => Err(format!("cannot inspect '{kind}'").into()),
            _ => Ok(None),
        }
    }
}

impl AutomationFactory for FailingFactory {
    fn name(&self) -> &str {
        &self.name
    }

    fn from_object(&self, obj: &WorldObject, _location: &dyn Location) -> FactoryResult {
        self.check_kind(&obj.kind)
    }

    fn from_terrain_feature(
        &self,
        feature: &TerrainFeature,
        _location: &dyn Location,
    ) -> FactoryResult {
        self.check_kind(&feature.kind)
    }

    fn from_building(&self, building: &Building, _location: &dyn Location) -> FactoryResult {
        self.check_kind(&building.kind)
    }

    fn from_tile(&self, tile: GridPosition, _location: &dyn Location) -> FactoryResult {
        match self.fail_tile {
            Some(fail) if fail == tile => Err(format!("cannot inspect tile {tile}").into()),
            _ => Ok(None),
        }
    }
}
