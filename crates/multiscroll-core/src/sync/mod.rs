//! Scroll synchronization for groups of lists
//!
//! Keeps any number of independently scrollable lists moving together, pixel
//! for pixel, along one axis.
//!
//! # Components
//!
//! - `cell_sizer` - Cell size oracle (fixed or measured item sizes)
//! - `registry` - Group membership and the listener slots it occupies
//! - `arbiter` - Single active driver, re-entrancy suppression
//! - `accountant` - Cumulative displacement and its (position, offset) resolution
//! - `touch_guard` - Stops a coasting list when another one is touched
//! - `scroller` - [`MultiScroller`], the group tying them together
//!
//! # Usage
//!
//! ```ignore
//! use multiscroll_core::sync::{MultiScroller, Orientation};
//!
//! let mut scroller = MultiScroller::with_orientation(Orientation::Horizontal);
//! scroller.add(&mut host, header_row);
//! scroller.add(&mut host, body_row);
//!
//! // The host routes its notifications back to the group
//! host.dispatch(&mut scroller);
//! ```

pub mod accountant;
pub mod arbiter;
pub mod cell_sizer;
pub mod host;
pub mod orientation;
pub mod registry;
pub mod scroller;
pub mod touch_guard;

#[cfg(test)]
pub(crate) mod test_host;

pub use accountant::{resolve_anchor, resolve_uniform, AlignError, Anchor};
pub use cell_sizer::{CellSizer, DynamicCellSizer, FixedCellSizer};
pub use host::{
    AttachObserver, ChildBounds, HostObserver, LayoutObserver, ListHost, Listener, ScrollObserver,
    ScrollState, TouchAction, TouchObserver,
};
pub use orientation::{Orientation, OrientationExt};
pub use scroller::MultiScroller;
