//! Grange Core -- entity and collaborator contracts for machine-group
//! discovery on tile grids.
//!
//! A game location places machines, storage containers, and passive
//! connectors on a 2D tile grid. This crate defines the vocabulary the
//! discovery engine (in `grange-discovery`) consumes:
//!
//! - [`grid`] -- tile coordinates and axis-aligned footprint rectangles.
//! - [`location`] -- the scannable-location contract and stable location
//!   keys.
//! - [`entity`] -- the closed set of raw placed entities (objects, terrain
//!   features, buildings).
//! - [`automatable`] -- the closed set of resolved entities (machines,
//!   containers, connectors).
//! - [`factory`] -- the pluggable resolver chain translating raw entities
//!   and bare tiles into automatables.
//! - [`rules`] -- per-machine-type enable/priority overrides.
//! - [`storage`] -- the shared storage facade built over a group's
//!   containers.
//!
//! Factories and rule sets are registered/loaded once at startup and are
//! read-only during scans, so concurrent scans of different locations may
//! share them freely.

pub mod automatable;
pub mod entity;
pub mod factory;
pub mod grid;
pub mod location;
pub mod rules;
pub mod storage;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
