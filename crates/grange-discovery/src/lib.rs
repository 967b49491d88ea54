//! Grange Discovery -- machine-group discovery over tile-grid locations.
//!
//! Given a [`Location`](grange_core::location::Location), a registered
//! [`FactoryChain`](grange_core::factory::FactoryChain), and a
//! [`RuleSet`](grange_core::rules::RuleSet), a scan partitions the
//! location's automatable entities into maximal connected
//! [`MachineGroup`]s: machines and containers linked directly or through
//! passive connectors, with diagonal footprint touches counting as
//! connectivity.
//!
//! # One scan
//!
//! 1. [`EntityIndex`] enumerates the location's entities once and indexes
//!    them under every tile of their footprints.
//! 2. [`GroupScan`] walks the tile range row-major; each unvisited tile
//!    seeds a breadth-first flood fill.
//! 3. [`TileResolver`] maps each reached tile to automatables through the
//!    factory chain, isolating per-factory failures.
//! 4. [`GroupBuilder`] accumulates members and drives frontier expansion
//!    along newly covered tile areas; every non-empty fill yields one
//!    immutable group.
//!
//! Scans are synchronous and lazy: groups are yielded one at a time, and
//! abandoning the iterator drops all scan-local state. Nothing is cached
//! across scans -- callers re-run discovery after any placement change
//! (typically once per in-game day).
//!
//! ```rust,ignore
//! let mut chain = FactoryChain::new();
//! chain.register(Box::new(MyMachineFactory));
//! let groups = discover(&location, &chain, &rules)?;
//! ```

pub mod builder;
pub mod group;
pub mod index;
pub mod resolve;
pub mod scan;

pub use builder::GroupBuilder;
pub use group::MachineGroup;
pub use index::{EntityId, EntityIndex};
pub use resolve::TileResolver;
pub use scan::{GroupScan, ScanError, discover};
