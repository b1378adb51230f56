//! Cell size oracle: how many pixels an item occupies along the scroll axis.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use super::accountant::{resolve_anchor, resolve_uniform, AlignError, Anchor};
use super::host::{ChildBounds, ListHost, Listener};
use super::orientation::{Orientation, OrientationExt};
use crate::config::{CellSizerKind, SyncConfig};

/// Every item has the same size.
///
/// A size of 0 means "not known yet" and answers `None` for every position,
/// so resolution fails instead of walking zero-width items forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedCellSizer {
    size: u32,
}

impl FixedCellSizer {
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn size_at(&self, _position: usize) -> Option<u32> {
        (self.size > 0).then_some(self.size)
    }

    /// Anchor for `displacement` by division
    pub fn resolve(&self, displacement: i64) -> Result<Anchor, AlignError> {
        resolve_uniform(displacement, self.size)
    }
}

/// Sizes measured from the children of included lists.
///
/// Measurements are shared by the whole group: all members display the same
/// items, so a size seen on any of them holds for all of them.
#[derive(Debug, Clone)]
pub struct DynamicCellSizer<Id> {
    orientation: Orientation,
    sizes: BTreeMap<usize, u32>,
    sources: HashSet<Id>,
}

impl<Id: Copy + Eq + Hash + Debug> DynamicCellSizer<Id> {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            sizes: BTreeMap::new(),
            sources: HashSet::new(),
        }
    }

    /// Number of positions with a known size
    pub fn known(&self) -> usize {
        self.sizes.len()
    }

    fn record(&mut self, child: ChildBounds) {
        let size = self.orientation.extent(child.width, child.height);
        if let Some(previous) = self.sizes.insert(child.position, size) {
            if previous != size {
                tracing::trace!(
                    position = child.position,
                    previous,
                    size,
                    "Cell size changed"
                );
            }
        }
    }
}

/// Closed set of sizing strategies
#[derive(Debug, Clone)]
pub enum CellSizer<Id> {
    Fixed(FixedCellSizer),
    Dynamic(DynamicCellSizer<Id>),
}

impl<Id: Copy + Eq + Hash + Debug> CellSizer<Id> {
    pub fn fixed(size: u32) -> Self {
        CellSizer::Fixed(FixedCellSizer::new(size))
    }

    pub fn dynamic(orientation: Orientation) -> Self {
        CellSizer::Dynamic(DynamicCellSizer::new(orientation))
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        match config.cell_sizer.kind {
            CellSizerKind::Fixed => Self::fixed(config.cell_sizer.size),
            CellSizerKind::Dynamic => Self::dynamic(config.orientation),
        }
    }

    /// Size of the item at `position`, if it has ever been known
    pub fn size_at(&self, position: usize) -> Option<u32> {
        match self {
            CellSizer::Fixed(fixed) => fixed.size_at(position),
            CellSizer::Dynamic(dynamic) => dynamic.sizes.get(&position).copied(),
        }
    }

    /// Anchor for `displacement`. Fixed sizes divide; measured sizes are
    /// walked from position 0.
    pub fn resolve(&self, displacement: i64) -> Result<Anchor, AlignError> {
        match self {
            CellSizer::Fixed(fixed) => fixed.resolve(displacement),
            CellSizer::Dynamic(dynamic) => {
                resolve_anchor(displacement, |position| dynamic.sizes.get(&position).copied())
            }
        }
    }

    /// Register a list as a size source
    pub fn include<H: ListHost<Id = Id>>(&mut self, host: &mut H, id: Id) {
        let CellSizer::Dynamic(dynamic) = self else {
            return;
        };
        if !dynamic.sources.insert(id) {
            return;
        }

        host.add_listener(id, Listener::ChildAttach);
        for index in 0..host.child_count(id) {
            if let Some(child) = host.child_at(id, index) {
                dynamic.record(child);
            }
        }
    }

    /// Unregister a list as a size source. Sizes it contributed are kept.
    pub fn exclude<H: ListHost<Id = Id>>(&mut self, host: &mut H, id: Id) {
        let CellSizer::Dynamic(dynamic) = self else {
            return;
        };
        if dynamic.sources.remove(&id) {
            host.remove_listener(id, Listener::ChildAttach);
        }
    }

    /// A child was attached to `id` while laying out or scrolling
    pub fn on_child_attached(&mut self, id: Id, child: ChildBounds) {
        if let CellSizer::Dynamic(dynamic) = self {
            if dynamic.sources.contains(&id) {
                dynamic.record(child);
            }
        }
    }

    /// Drop all cached sizes
    pub fn clear(&mut self) {
        if let CellSizer::Dynamic(dynamic) = self {
            dynamic.sizes.clear();
        }
    }
}
