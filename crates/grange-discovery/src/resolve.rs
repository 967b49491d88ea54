//! Tile resolution: mapping one tile to its automatable entities.
//!
//! Two sources are merged per tile: the raw entities occupying it (from
//! the [`EntityIndex`]) and the bare tile position itself (for entities
//! with no discrete world-object backing, e.g. terrain-only connectors).
//! Factories are consulted in registration order; the first non-empty
//! result wins per raw entity. Every factory call is isolated: a failure
//! is logged with its context and treated as a decline.

use crate::index::EntityIndex;
use grange_core::automatable::Automatable;
use grange_core::entity::WorldEntity;
use grange_core::factory::{AutomationFactory, FactoryChain};
use grange_core::grid::GridPosition;
use grange_core::location::{Location, LocationKey};

/// Resolves tiles against one location's entity index and the factory
/// chain. Scan-local; holds only borrows.
pub struct TileResolver<'a> {
    location: &'a dyn Location,
    key: &'a LocationKey,
    index: &'a EntityIndex,
    chain: &'a FactoryChain,
}

impl<'a> TileResolver<'a> {
    pub fn new(
        location: &'a dyn Location,
        key: &'a LocationKey,
        index: &'a EntityIndex,
        chain: &'a FactoryChain,
    ) -> Self {
        Self {
            location,
            key,
            index,
            chain,
        }
    }

    /// All automatables anchored at this tile.
    ///
    /// Multiple distinct raw entities at the same tile each resolve
    /// independently through the full chain, and an object holding a
    /// secondary entity (a planter holding a crop) yields an additional
    /// automatable for the held entity.
    pub fn resolve(&self, tile: GridPosition) -> Vec<Automatable> {
        let mut resolved = Vec::new();

        for entity in self.index.entities_at(tile) {
            if let Some(automatable) = self.resolve_entity(entity, tile) {
                resolved.push(automatable);
            }
            if let WorldEntity::Object(obj) = entity {
                if let Some(held) = obj.held.as_deref() {
                    if let Some(automatable) = self.resolve_entity(held, tile) {
                        resolved.push(automatable);
                    }
                }
            }
        }

        if let Some(automatable) = self.resolve_bare_tile(tile) {
            resolved.push(automatable);
        }

        resolved
    }

    /// Run one raw entity through the chain; first match wins.
    fn resolve_entity(&self, entity: &WorldEntity, tile: GridPosition) -> Option<Automatable> {
        for factory in self.chain.iter() {
            let result = match entity {
                WorldEntity::Object(obj) => factory.from_object(obj, self.location),
                WorldEntity::TerrainFeature(feature) => {
                    factory.from_terrain_feature(feature, self.location)
                }
                WorldEntity::Building(building) => factory.from_building(building, self.location),
            };
            match result {
                Ok(Some(automatable)) => return Some(automatable),
                Ok(None) => {}
                Err(err) => self.log_failure(factory, tile, Some(entity), &err),
            }
        }
        None
    }

    /// Ask the chain about the bare tile position; first match wins.
    fn resolve_bare_tile(&self, tile: GridPosition) -> Option<Automatable> {
        for factory in self.chain.iter() {
            match factory.from_tile(tile, self.location) {
                Ok(Some(automatable)) => return Some(automatable),
                Ok(None) => {}
                Err(err) => self.log_failure(factory, tile, None, &err),
            }
        }
        None
    }

    /// One warn record per failure occurrence; deduplication, if any,
    /// belongs to the log consumer.
    fn log_failure(
        &self,
        factory: &dyn AutomationFactory,
        tile: GridPosition,
        entity: Option<&WorldEntity>,
        err: &grange_core::factory::FactoryError,
    ) {
        match entity {
            Some(entity) => log::warn!(
                "automation factory '{}' failed resolving {} at {} in {}: {err}",
                factory.name(),
                entity.descriptor(),
                tile,
                self.key,
            ),
            None => log::warn!(
                "automation factory '{}' failed resolving tile {} in {}: {err}",
                factory.name(),
                tile,
                self.key,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grange_core::entity::{TerrainFeature, WorldObject};
    use grange_core::grid::TileArea;
    use grange_core::test_utils::{FailingFactory, KindFactory, TestLocation};

    fn resolve_at(
        location: &TestLocation,
        chain: &FactoryChain,
        x: i32,
        y: i32,
    ) -> Vec<Automatable> {
        let key = location.key();
        let index = EntityIndex::build(location).unwrap();
        let resolver = TileResolver::new(location, &key, &index, chain);
        resolver.resolve(GridPosition::new(x, y))
    }

    #[test]
    fn empty_tile_resolves_to_nothing() {
        let location = TestLocation::new("Farm", 4, 4);
        let mut chain = FactoryChain::new();
        chain.register(Box::new(KindFactory::new("kit").machine("keg")));
        assert!(resolve_at(&location, &chain, 0, 0).is_empty());
    }

    #[test]
    fn index_sourced_entity_resolves() {
        let location = TestLocation::new("Farm", 4, 4).with_object("keg", 1, 2);
        let mut chain = FactoryChain::new();
        chain.register(Box::new(KindFactory::new("kit").machine("keg")));
        let resolved = resolve_at(&location, &chain, 1, 2);
        assert_eq!(resolved.len(), 1);
        assert!(matches!(resolved[0], Automatable::Machine(_)));
    }

    #[test]
    fn tile_sourced_connector_resolves_without_entity() {
        let location = TestLocation::new("Farm", 4, 4);
        let mut chain = FactoryChain::new();
        chain.register(Box::new(KindFactory::new("kit").tile_connector_at(2, 2)));
        let resolved = resolve_at(&location, &chain, 2, 2);
        assert_eq!(resolved.len(), 1);
        assert!(matches!(resolved[0], Automatable::Connector(_)));
    }

    #[test]
    fn first_registered_factory_wins_per_entity() {
        let location = TestLocation::new("Farm", 4, 4).with_object("keg", 0, 0);
        let mut chain = FactoryChain::new();
        chain.register(Box::new(KindFactory::new("a").connector("keg")));
        chain.register(Box::new(KindFactory::new("b").machine("keg")));
        let resolved = resolve_at(&location, &chain, 0, 0);
        assert_eq!(resolved.len(), 1);
        assert!(matches!(resolved[0], Automatable::Connector(_)));
    }

    #[test]
    fn distinct_entities_on_one_tile_each_resolve() {
        let area = TileArea::single(GridPosition::new(1, 1));
        let location = TestLocation::new("Farm", 4, 4)
            .with_object("keg", 1, 1)
            .with_entity(WorldEntity::TerrainFeature(TerrainFeature::new(
                "fence", area,
            )));
        let mut chain = FactoryChain::new();
        chain.register(Box::new(
            KindFactory::new("kit").machine("keg").connector("fence"),
        ));
        let resolved = resolve_at(&location, &chain, 1, 1);
        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn held_entity_resolves_in_addition_to_holder() {
        let area = TileArea::single(GridPosition::new(2, 2));
        let planter = WorldObject::new("planter", area).holding(WorldEntity::TerrainFeature(
            TerrainFeature::new("tea-bush", area),
        ));
        let location =
            TestLocation::new("Greenhouse", 4, 4).with_entity(WorldEntity::Object(planter));
        let mut chain = FactoryChain::new();
        chain.register(Box::new(
            KindFactory::new("kit")
                .container("planter")
                .machine("tea-bush"),
        ));
        let resolved = resolve_at(&location, &chain, 2, 2);
        assert_eq!(resolved.len(), 2);
        assert!(matches!(resolved[0], Automatable::Container(_)));
        assert!(matches!(resolved[1], Automatable::Machine(_)));
    }

    #[test]
    fn factory_failure_falls_through_to_later_factories() {
        let location = TestLocation::new("Farm", 4, 4).with_object("keg", 3, 3);
        let mut chain = FactoryChain::new();
        chain.register(Box::new(FailingFactory::new("broken").on_kind("keg")));
        chain.register(Box::new(KindFactory::new("kit").machine("keg")));
        let resolved = resolve_at(&location, &chain, 3, 3);
        assert_eq!(resolved.len(), 1);
        assert!(matches!(resolved[0], Automatable::Machine(_)));
    }

    #[test]
    fn bare_tile_failure_falls_through() {
        let location = TestLocation::new("Farm", 4, 4);
        let mut chain = FactoryChain::new();
        chain.register(Box::new(FailingFactory::new("broken").on_tile(1, 1)));
        chain.register(Box::new(KindFactory::new("kit").tile_connector_at(1, 1)));
        let resolved = resolve_at(&location, &chain, 1, 1);
        assert_eq!(resolved.len(), 1);
        assert!(matches!(resolved[0], Automatable::Connector(_)));
    }
}
