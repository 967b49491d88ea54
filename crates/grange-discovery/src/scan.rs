//! The group discovery engine: a lazy scan over one location.
//!
//! The scan walks the location's tile range row-major; each unvisited tile
//! seeds a breadth-first flood fill that resolves tiles through the
//! factory chain and accumulates members in the shared [`GroupBuilder`].
//! Visited marking happens per tile *area*, not per single tile, so
//! multi-tile entities are processed once and the traversal frontier
//! expands along their full borders. Each non-empty fill yields one
//! immutable [`MachineGroup`].
//!
//! The scan is an ordinary `Iterator`: callers may stop requesting groups
//! at any point, and dropping the scan releases all scan-local state (the
//! entity index and visited set are rebuilt on the next scan).

use crate::builder::GroupBuilder;
use crate::group::MachineGroup;
use crate::index::EntityIndex;
use crate::resolve::TileResolver;
use grange_core::automatable::Automatable;
use grange_core::factory::FactoryChain;
use grange_core::grid::{GridPosition, TileArea};
use grange_core::location::{EnumerationError, Location, LocationKey};
use grange_core::rules::RuleSet;
use grange_core::storage::{MergedStorageFactory, StorageFactory};
use std::collections::{HashSet, VecDeque};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that abort a whole location scan.
///
/// Factory failures never surface here; they are logged and skipped
/// per tile. Only index construction is unrecoverable.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("entity enumeration failed for {location}")]
    Enumeration {
        location: LocationKey,
        #[source]
        source: EnumerationError,
    },
}

// ---------------------------------------------------------------------------
// Tile cursor
// ---------------------------------------------------------------------------

/// Row-major cursor over a location's tile range. Deterministic iteration
/// order fixes group emission order (not membership).
struct TileCursor {
    bounds: TileArea,
    next: usize,
}

impl TileCursor {
    fn new(bounds: TileArea) -> Self {
        Self { bounds, next: 0 }
    }
}

impl Iterator for TileCursor {
    type Item = GridPosition;

    fn next(&mut self) -> Option<GridPosition> {
        if self.next >= self.bounds.tile_count() {
            return None;
        }
        let width = self.bounds.width as usize;
        let dx = (self.next % width) as i32;
        let dy = (self.next / width) as i32;
        self.next += 1;
        Some(GridPosition::new(
            self.bounds.origin.x + dx,
            self.bounds.origin.y + dy,
        ))
    }
}

// ---------------------------------------------------------------------------
// GroupScan
// ---------------------------------------------------------------------------

/// A lazy sequence of machine groups discovered in one location.
///
/// Each `next()` call resumes the outer tile loop where it left off and
/// performs flood fills until one produces a group. The factory chain and
/// rule set are read-only for the duration of the scan.
pub struct GroupScan<'a> {
    location: &'a dyn Location,
    chain: &'a FactoryChain,
    rules: &'a RuleSet,
    key: LocationKey,
    index: EntityIndex,
    visited: HashSet<GridPosition>,
    builder: GroupBuilder<'a>,
    cursor: TileCursor,
}

impl<'a> GroupScan<'a> {
    /// Start a scan: enumerate the location's entities and build the
    /// spatial index. Fails if enumeration fails.
    pub fn new(
        location: &'a dyn Location,
        chain: &'a FactoryChain,
        rules: &'a RuleSet,
        storage_factory: &'a dyn StorageFactory,
    ) -> Result<Self, ScanError> {
        let key = location.key();
        let index = EntityIndex::build(location)?;
        let builder = GroupBuilder::new(key.clone(), rules, storage_factory);
        Ok(Self {
            location,
            chain,
            rules,
            key,
            index,
            visited: HashSet::new(),
            builder,
            cursor: TileCursor::new(location.bounds()),
        })
    }

    /// Breadth-first fill from `origin`, accumulating into the builder.
    fn flood_fill(&mut self, origin: GridPosition) {
        if self.visited.contains(&origin) {
            return;
        }
        let bounds = self.location.bounds();
        let mut queue = VecDeque::new();
        queue.push_back(origin);

        while let Some(tile) = queue.pop_front() {
            // Already handled via a prior tile's footprint.
            if !self.visited.insert(tile) {
                continue;
            }

            let resolved = {
                let resolver = TileResolver::new(self.location, &self.key, &self.index, self.chain);
                resolver.resolve(tile)
            };
            if !self.add_resolved(resolved) {
                continue;
            }

            for area in self.builder.take_new_areas() {
                for covered in area.tiles() {
                    self.visited.insert(covered);
                }
                for neighbor in area.surrounding() {
                    if bounds.contains(neighbor) && !self.visited.contains(&neighbor) {
                        queue.push_back(neighbor);
                    }
                }
            }
        }
    }

    /// Classify and gate resolved automatables. Returns whether anything
    /// joined the group this round.
    fn add_resolved(&mut self, resolved: Vec<Automatable>) -> bool {
        let mut any_added = false;
        for automatable in resolved {
            match automatable {
                Automatable::Machine(machine) => {
                    if self.rules.is_enabled(machine.machine_type()) {
                        self.builder.add_machine(machine);
                        any_added = true;
                    }
                }
                Automatable::Container(container) => {
                    if container.accepts_input() || container.provides_output() {
                        self.builder.add_container(container);
                        any_added = true;
                    }
                }
                Automatable::Connector(area) => {
                    self.builder.add_area(area);
                    any_added = true;
                }
            }
        }
        any_added
    }
}

impl Iterator for GroupScan<'_> {
    type Item = MachineGroup;

    fn next(&mut self) -> Option<MachineGroup> {
        while let Some(tile) = self.cursor.next() {
            if self.visited.contains(&tile) {
                continue;
            }
            self.flood_fill(tile);
            let group = self.builder.has_tiles().then(|| self.builder.build());
            self.builder.reset();
            if group.is_some() {
                return group;
            }
        }
        None
    }
}

/// Run a full scan with the default merged storage facade and collect
/// every group.
pub fn discover(
    location: &dyn Location,
    chain: &FactoryChain,
    rules: &RuleSet,
) -> Result<Vec<MachineGroup>, ScanError> {
    let storage_factory = MergedStorageFactory;
    let scan = GroupScan::new(location, chain, rules, &storage_factory)?;
    Ok(scan.collect())
}
