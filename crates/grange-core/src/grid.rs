//! Tile-grid primitives: positions and axis-aligned footprint rectangles.
//!
//! Every placed entity occupies a [`TileArea`] — a rectangle of tiles
//! anchored at its top-left origin. Group discovery expands along the
//! one-ring border of each area via [`TileArea::surrounding`], which
//! includes the four corner tiles: diagonal touches count as connectivity.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// GridPosition
// ---------------------------------------------------------------------------

/// A position on the 2D tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev (chessboard) distance to another position. Two tiles are
    /// ring-adjacent exactly when their Chebyshev distance is 1.
    pub fn chebyshev_distance(&self, other: &GridPosition) -> u32 {
        (self.x - other.x)
            .unsigned_abs()
            .max((self.y - other.y).unsigned_abs())
    }
}

impl std::fmt::Display for GridPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// TileArea
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle of tiles: an entity's full footprint.
///
/// The origin is the top-left corner; width and height are at least 1 for
/// any placed entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileArea {
    pub origin: GridPosition,
    pub width: u32,
    pub height: u32,
}

impl TileArea {
    pub fn new(origin: GridPosition, width: u32, height: u32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// A 1x1 area covering a single tile.
    pub fn single(tile: GridPosition) -> Self {
        Self {
            origin: tile,
            width: 1,
            height: 1,
        }
    }

    /// Rightmost column index covered by this area.
    fn right(&self) -> i32 {
        self.origin.x + self.width as i32 - 1
    }

    /// Bottom row index covered by this area.
    fn bottom(&self) -> i32 {
        self.origin.y + self.height as i32 - 1
    }

    /// Whether the given tile lies inside this area.
    pub fn contains(&self, tile: GridPosition) -> bool {
        tile.x >= self.origin.x
            && tile.x <= self.right()
            && tile.y >= self.origin.y
            && tile.y <= self.bottom()
    }

    /// Whether this area shares at least one tile with another.
    pub fn intersects(&self, other: &TileArea) -> bool {
        self.origin.x <= other.right()
            && other.origin.x <= self.right()
            && self.origin.y <= other.bottom()
            && other.origin.y <= self.bottom()
    }

    /// Iterate over all tiles covered by this area, row-major.
    pub fn tiles(&self) -> impl Iterator<Item = GridPosition> {
        let w = self.width as i32;
        let h = self.height as i32;
        let ox = self.origin.x;
        let oy = self.origin.y;
        (0..h).flat_map(move |dy| (0..w).map(move |dx| GridPosition::new(ox + dx, oy + dy)))
    }

    /// Iterate over the one-ring border around this area, corners included.
    ///
    /// Anything whose footprint touches any of these tiles — edge or
    /// diagonal — is connected to this area.
    pub fn surrounding(&self) -> impl Iterator<Item = GridPosition> {
        let area = *self;
        let left = area.origin.x - 1;
        let right = area.right() + 1;
        let top = area.origin.y - 1;
        let bottom = area.bottom() + 1;
        (top..=bottom)
            .flat_map(move |y| (left..=right).map(move |x| GridPosition::new(x, y)))
            .filter(move |tile| !area.contains(*tile))
    }

    /// Number of tiles covered.
    pub fn tile_count(&self) -> usize {
        (self.width * self.height) as usize
    }
}

impl std::fmt::Display for TileArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} at {}", self.width, self.height, self.origin)
    }
}
