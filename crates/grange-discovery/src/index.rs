//! The per-scan spatial entity index.
//!
//! Built once per location scan by enumerating all placed entities and
//! recording each under every tile its footprint covers, so traversal
//! lookups are O(1) instead of re-scanning the whole location. The index
//! never mutates after construction; the next scan rebuilds it fully.

use crate::scan::ScanError;
use grange_core::entity::WorldEntity;
use grange_core::grid::GridPosition;
use grange_core::location::Location;
use slotmap::{SlotMap, new_key_type};
use std::collections::HashMap;

new_key_type! {
    /// Identifies one enumerated entity within a single scan.
    pub struct EntityId;
}

/// Maps tile coordinates to the raw entities occupying them.
///
/// Does not filter by type; filtering happens during entity resolution.
#[derive(Debug, Default)]
pub struct EntityIndex {
    entities: SlotMap<EntityId, WorldEntity>,
    tiles: HashMap<GridPosition, Vec<EntityId>>,
}

impl EntityIndex {
    /// Enumerate the location's entities and index them by footprint tile.
    ///
    /// An enumeration failure aborts the whole scan: no partial index can
    /// be trusted.
    pub fn build(location: &dyn Location) -> Result<Self, ScanError> {
        let entities = location
            .entities()
            .map_err(|source| ScanError::Enumeration {
                location: location.key(),
                source,
            })?;

        let mut index = Self::default();
        for entity in entities {
            let area = entity.area();
            let id = index.entities.insert(entity);
            for tile in area.tiles() {
                index.tiles.entry(tile).or_default().push(id);
            }
        }
        Ok(index)
    }

    /// The raw entities occupying a tile, in enumeration order. Empty for
    /// unoccupied tiles.
    pub fn entities_at(&self, tile: GridPosition) -> impl Iterator<Item = &WorldEntity> {
        self.tiles
            .get(&tile)
            .into_iter()
            .flatten()
            .map(|id| &self.entities[*id])
    }

    /// Number of enumerated entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of occupied tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grange_core::grid::TileArea;
    use grange_core::test_utils::TestLocation;

    #[test]
    fn empty_location_indexes_nothing() {
        let location = TestLocation::new("Farm", 8, 8);
        let index = EntityIndex::build(&location).unwrap();
        assert_eq!(index.entity_count(), 0);
        assert_eq!(index.tile_count(), 0);
        assert_eq!(index.entities_at(GridPosition::new(0, 0)).count(), 0);
    }

    #[test]
    fn single_tile_entity_indexed_at_its_tile() {
        let location = TestLocation::new("Farm", 8, 8).with_object("keg", 3, 4);
        let index = EntityIndex::build(&location).unwrap();
        assert_eq!(index.entity_count(), 1);
        let found: Vec<_> = index.entities_at(GridPosition::new(3, 4)).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind(), "keg");
        assert_eq!(index.entities_at(GridPosition::new(4, 4)).count(), 0);
    }

    #[test]
    fn multi_tile_entity_indexed_under_every_footprint_tile() {
        let area = TileArea::new(GridPosition::new(2, 2), 3, 2);
        let location = TestLocation::new("Farm", 8, 8).with_building("mill", area);
        let index = EntityIndex::build(&location).unwrap();
        assert_eq!(index.entity_count(), 1);
        assert_eq!(index.tile_count(), 6);
        for tile in area.tiles() {
            let found: Vec<_> = index.entities_at(tile).collect();
            assert_eq!(found.len(), 1, "missing at {tile}");
            assert_eq!(found[0].kind(), "mill");
        }
    }

    #[test]
    fn overlapping_entities_share_a_tile() {
        // A planter object sitting inside a greenhouse building footprint.
        let location = TestLocation::new("Farm", 8, 8)
            .with_building("greenhouse", TileArea::new(GridPosition::new(0, 0), 4, 4))
            .with_object("planter", 1, 1);
        let index = EntityIndex::build(&location).unwrap();
        let kinds: Vec<_> = index
            .entities_at(GridPosition::new(1, 1))
            .map(|e| e.kind().to_string())
            .collect();
        assert_eq!(kinds, vec!["greenhouse", "planter"]);
    }

    #[test]
    fn enumeration_failure_aborts_index_construction() {
        let location = TestLocation::new("Farm", 8, 8)
            .with_qualifier("Farm7")
            .failing_enumeration();
        let err = EntityIndex::build(&location).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Farm (Farm7)"), "got: {message}");
    }
}
