//! The pluggable resolver chain turning raw entities into automatables.
//!
//! Factories are registered once at startup and consulted in registration
//! order during every scan. Each resolution operation is independently
//! fallible; a failing factory never aborts a scan — the chain logs the
//! failure and moves on. New entity kinds are supported by registering new
//! factories, never by modifying the discovery engine.

use crate::automatable::Automatable;
use crate::entity::{Building, TerrainFeature, WorldObject};
use crate::grid::GridPosition;
use crate::location::Location;

/// Error raised inside a single factory resolution call.
///
/// Factories are third-party code; their failures are arbitrary.
pub type FactoryError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result of one factory resolution call: an automatable, a decline, or a
/// failure.
pub type FactoryResult = Result<Option<Automatable>, FactoryError>;

// ---------------------------------------------------------------------------
// AutomationFactory
// ---------------------------------------------------------------------------

/// A pluggable resolver recognizing specific machine/container/connector
/// kinds.
///
/// Every operation defaults to a decline (`Ok(None)`), so factories only
/// override the sources they understand.
pub trait AutomationFactory {
    /// The factory's name, used in scan diagnostics.
    fn name(&self) -> &str;

    /// Resolve a placed object.
    fn from_object(&self, obj: &WorldObject, location: &dyn Location) -> FactoryResult {
        let _ = (obj, location);
        Ok(None)
    }

    /// Resolve a terrain feature.
    fn from_terrain_feature(
        &self,
        feature: &TerrainFeature,
        location: &dyn Location,
    ) -> FactoryResult {
        let _ = (feature, location);
        Ok(None)
    }

    /// Resolve a building.
    fn from_building(&self, building: &Building, location: &dyn Location) -> FactoryResult {
        let _ = (building, location);
        Ok(None)
    }

    /// Resolve a bare tile position with no discrete entity backing
    /// (e.g. terrain-only connectors).
    fn from_tile(&self, tile: GridPosition, location: &dyn Location) -> FactoryResult {
        let _ = (tile, location);
        Ok(None)
    }
}

// ---------------------------------------------------------------------------
// FactoryChain
// ---------------------------------------------------------------------------

/// The ordered list of registered factories.
///
/// Registration happens at startup; during scans the chain is read-only
/// and may be shared by reference across concurrent scans of different
/// locations.
#[derive(Default)]
pub struct FactoryChain {
    factories: Vec<Box<dyn AutomationFactory>>,
}

impl FactoryChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a factory. Earlier registrations win on ties.
    pub fn register(&mut self, factory: Box<dyn AutomationFactory>) {
        self.factories.push(factory);
    }

    /// Iterate factories in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn AutomationFactory> {
        self.factories.iter().map(|f| f.as_ref())
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for FactoryChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.factories.iter().map(|factory| factory.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TileArea;
    use crate::test_utils::{KindFactory, TestLocation};

    struct DeclineEverything;

    impl AutomationFactory for DeclineEverything {
        fn name(&self) -> &str {
            "decline"
        }
    }

    #[test]
    fn default_operations_decline() {
        let factory = DeclineEverything;
        let location = TestLocation::new("Farm", 4, 4);
        let obj = WorldObject::new("keg", TileArea::single(GridPosition::new(0, 0)));
        assert!(factory.from_object(&obj, &location).unwrap().is_none());
        assert!(
            factory
                .from_tile(GridPosition::new(1, 1), &location)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn registration_order_preserved() {
        let mut chain = FactoryChain::new();
        chain.register(Box::new(KindFactory::new("first")));
        chain.register(Box::new(KindFactory::new("second")));
        chain.register(Box::new(DeclineEverything));
        let names: Vec<&str> = chain.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["first", "second", "decline"]);
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn first_matching_factory_wins() {
        let mut chain = FactoryChain::new();
        chain.register(Box::new(KindFactory::new("a").machine("keg")));
        chain.register(Box::new(KindFactory::new("b").connector("keg")));
        let location = TestLocation::new("Farm", 4, 4);
        let obj = WorldObject::new("keg", TileArea::single(GridPosition::new(0, 0)));

        let mut resolved = None;
        for factory in chain.iter() {
            if let Ok(Some(result)) = factory.from_object(&obj, &location) {
                resolved = Some(result);
                break;
            }
        }
        assert!(matches!(resolved, Some(Automatable::Machine(_))));
    }

    #[test]
    fn empty_chain() {
        let chain = FactoryChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.iter().count(), 0);
    }
}
