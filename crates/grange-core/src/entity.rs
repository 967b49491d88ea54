//! Raw world entities as enumerated from a location.
//!
//! These are the closed set of placement kinds a location can report:
//! placed objects, terrain features, and buildings. Factories translate
//! them into automatables; discovery itself never inspects kinds beyond
//! logging descriptors.

use crate::grid::TileArea;

// ---------------------------------------------------------------------------
// WorldEntity
// ---------------------------------------------------------------------------

/// A raw placed entity, before factory resolution.
#[derive(Debug, Clone)]
pub enum WorldEntity {
    Object(WorldObject),
    TerrainFeature(TerrainFeature),
    Building(Building),
}

impl WorldEntity {
    /// The footprint this entity occupies.
    pub fn area(&self) -> TileArea {
        match self {
            WorldEntity::Object(obj) => obj.area,
            WorldEntity::TerrainFeature(feature) => feature.area,
            WorldEntity::Building(building) => building.area,
        }
    }

    /// The entity's kind identifier.
    pub fn kind(&self) -> &str {
        match self {
            WorldEntity::Object(obj) => &obj.kind,
            WorldEntity::TerrainFeature(feature) => &feature.kind,
            WorldEntity::Building(building) => &building.kind,
        }
    }

    /// A short descriptor for diagnostics, e.g. `object:keg`.
    pub fn descriptor(&self) -> String {
        match self {
            WorldEntity::Object(obj) => format!("object:{}", obj.kind),
            WorldEntity::TerrainFeature(feature) => format!("terrain:{}", feature.kind),
            WorldEntity::Building(building) => format!("building:{}", building.kind),
        }
    }
}

/// A placed object (machine shells, chests, planters).
///
/// An object may hold one secondary entity — a planter holding a crop is
/// the canonical case. The held entity resolves through the factory chain
/// in addition to its holder.
#[derive(Debug, Clone)]
pub struct WorldObject {
    pub kind: String,
    pub area: TileArea,
    pub held: Option<Box<WorldEntity>>,
}

impl WorldObject {
    pub fn new(kind: impl Into<String>, area: TileArea) -> Self {
        Self {
            kind: kind.into(),
            area,
            held: None,
        }
    }

    pub fn holding(mut self, held: WorldEntity) -> Self {
        self.held = Some(Box::new(held));
        self
    }
}

/// A terrain feature (trees, bushes, paths laid on the ground).
#[derive(Debug, Clone)]
pub struct TerrainFeature {
    pub kind: String,
    pub area: TileArea,
}

impl TerrainFeature {
    pub fn new(kind: impl Into<String>, area: TileArea) -> Self {
        Self {
            kind: kind.into(),
            area,
        }
    }
}

/// A constructed building, typically spanning multiple tiles.
#[derive(Debug, Clone)]
pub struct Building {
    pub kind: String,
    pub area: TileArea,
}

impl Building {
    pub fn new(kind: impl Into<String>, area: TileArea) -> Self {
        Self {
            kind: kind.into(),
            area,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridPosition;

    #[test]
    fn descriptor_per_variant() {
        let area = TileArea::single(GridPosition::new(0, 0));
        let obj = WorldEntity::Object(WorldObject::new("keg", area));
        let feature = WorldEntity::TerrainFeature(TerrainFeature::new("fruit-tree", area));
        let building = WorldEntity::Building(Building::new("mill", area));
        assert_eq!(obj.descriptor(), "object:keg");
        assert_eq!(feature.descriptor(), "terrain:fruit-tree");
        assert_eq!(building.descriptor(), "building:mill");
    }

    #[test]
    fn held_entity_attaches() {
        let pot = TileArea::single(GridPosition::new(2, 3));
        let obj = WorldObject::new("planter", pot)
            .holding(WorldEntity::TerrainFeature(TerrainFeature::new("tea-bush", pot)));
        let held = obj.held.as_deref().unwrap();
        assert_eq!(held.kind(), "tea-bush");
        assert_eq!(held.area(), pot);
    }

    #[test]
    fn area_reported_per_variant() {
        let area = TileArea::new(GridPosition::new(4, 4), 3, 2);
        let building = WorldEntity::Building(Building::new("barn", area));
        assert_eq!(building.area(), area);
        assert_eq!(building.kind(), "barn");
    }
}
