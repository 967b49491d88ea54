//! The shared storage facade over a group's containers.
//!
//! Discovery only supplies the finalized container list; the facade itself
//! is constructed by a pluggable [`StorageFactory`] so the automation tick
//! can substitute its own merging strategy. [`MergedStorageFactory`] is the
//! provided default.

use crate::automatable::{Container, ItemStack};
use std::rc::Rc;

// ---------------------------------------------------------------------------
// SharedStorage
// ---------------------------------------------------------------------------

/// A merged read facade over all containers in one machine group.
#[derive(Debug, Clone, Default)]
pub struct SharedStorage {
    containers: Vec<Rc<dyn Container>>,
}

impl SharedStorage {
    pub fn new(containers: Vec<Rc<dyn Container>>) -> Self {
        Self { containers }
    }

    /// All member containers.
    pub fn containers(&self) -> &[Rc<dyn Container>] {
        &self.containers
    }

    /// Containers machines may pull ingredients from.
    pub fn output_containers(&self) -> impl Iterator<Item = &Rc<dyn Container>> {
        self.containers.iter().filter(|c| c.provides_output())
    }

    /// Containers machines may push finished items into.
    pub fn input_containers(&self) -> impl Iterator<Item = &Rc<dyn Container>> {
        self.containers.iter().filter(|c| c.accepts_input())
    }

    /// Merged contents across every member container.
    pub fn items(&self) -> Vec<ItemStack> {
        self.containers.iter().flat_map(|c| c.items()).collect()
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }
}

// ---------------------------------------------------------------------------
// StorageFactory
// ---------------------------------------------------------------------------

/// Builds the shared storage facade for a finalized group.
pub trait StorageFactory {
    fn build(&self, containers: Vec<Rc<dyn Container>>) -> SharedStorage;
}

/// The default storage factory: merges the container list as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergedStorageFactory;

impl StorageFactory for MergedStorageFactory {
    fn build(&self, containers: Vec<Rc<dyn Container>>) -> SharedStorage {
        SharedStorage::new(containers)
    }
}
