//! The location contract: the world surface a scan runs over.

use crate::entity::WorldEntity;
use crate::grid::TileArea;
use serde::{Deserialize, Serialize};

/// Error raised while enumerating a location's placed entities.
///
/// Enumeration is implemented by the host game; its failures are arbitrary,
/// so the seam is a boxed error.
pub type EnumerationError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// A scannable game-world location.
///
/// Discovery consumes this contract once per scan: the bounds drive the
/// outer tile loop, and `entities()` seeds the spatial entity index.
pub trait Location {
    /// The location's display name.
    fn name(&self) -> &str;

    /// Distinguishes multiple instances of the same named location type
    /// (e.g. several cellars). `None` for singleton locations.
    fn instance_qualifier(&self) -> Option<&str> {
        None
    }

    /// The full tile range of this location.
    fn bounds(&self) -> TileArea;

    /// Enumerate every placed entity with its footprint. Called once per
    /// scan; a failure here aborts the scan, since no partial index can be
    /// trusted.
    fn entities(&self) -> Result<Vec<WorldEntity>, EnumerationError>;

    /// The stable key identifying this location instance.
    fn key(&self) -> LocationKey {
        LocationKey::new(self.name(), self.instance_qualifier())
    }
}

// ---------------------------------------------------------------------------
// LocationKey
// ---------------------------------------------------------------------------

/// A string key uniquely identifying one location instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationKey(String);

impl LocationKey {
    /// Build a key from a display name and an optional instance qualifier.
    pub fn new(name: &str, qualifier: Option<&str>) -> Self {
        match qualifier {
            Some(q) => Self(format!("{name} ({q})")),
            None => Self(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LocationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_without_qualifier() {
        let key = LocationKey::new("Farm", None);
        assert_eq!(key.as_str(), "Farm");
        assert_eq!(key.to_string(), "Farm");
    }

    #[test]
    fn key_with_qualifier() {
        let key = LocationKey::new("Cellar", Some("Cellar2"));
        assert_eq!(key.as_str(), "Cellar (Cellar2)");
    }

    #[test]
    fn keys_disambiguate_instances() {
        let a = LocationKey::new("Cellar", Some("Cellar2"));
        let b = LocationKey::new("Cellar", Some("Cellar3"));
        let c = LocationKey::new("Cellar", None);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }
}
