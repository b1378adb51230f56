//! Boundary between the engine and the UI toolkit that owns the lists.
//!
//! The toolkit implements [`ListHost`]: it owns the scrollable lists, exposes
//! the handful of primitives the engine needs, and routes its notifications
//! back through the observer traits for every list where the engine holds the
//! matching [`Listener`] slot. Notifications must be delivered in the order the
//! toolkit produces them, and a notification caused by an engine call (for
//! example the scroll event a broadcast `scroll_by` produces) must be
//! delivered before any notification that was already waiting.

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::orientation::Orientation;

/// Scroll state reported by a list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollState {
    /// Not moving
    #[default]
    Idle,
    /// Moving under direct user input
    Dragging,
    /// Moving under inertia after the user let go
    Settling,
}

/// Raw touch action seen by a list before it handles the gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchAction {
    Down,
    Move,
    Up,
    Cancel,
}

/// Listener slots the engine can occupy on a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    /// Scroll deltas and scroll state changes
    Scroll,
    /// Touch interception
    Touch,
    /// Attach to / detach from the view hierarchy
    AttachState,
    /// Completed layout passes
    Layout,
    /// Children attached while laying out or scrolling
    ChildAttach,
}

/// A rendered child of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildBounds {
    /// Adapter position of the item the child displays
    pub position: usize,
    pub width: u32,
    pub height: u32,
}

/// Capabilities the engine consumes from the toolkit
pub trait ListHost {
    /// Stable identity of a list
    type Id: Copy + Eq + Hash + Debug;

    fn add_listener(&mut self, id: Self::Id, listener: Listener);

    fn remove_listener(&mut self, id: Self::Id, listener: Listener);

    /// Whether the list has completed a layout pass and none is pending
    fn is_laid_out(&self, id: Self::Id) -> bool;

    fn request_layout(&mut self, id: Self::Id);

    /// Number of children currently rendered
    fn child_count(&self, id: Self::Id) -> usize;

    /// Rendered child at `index` in viewport order
    fn child_at(&self, id: Self::Id, index: usize) -> Option<ChildBounds>;

    /// Scroll immediately, without animation
    fn scroll_by(&mut self, id: Self::Id, dx: i32, dy: i32);

    /// Stop any scroll in progress, including a fling
    fn stop_scroll(&mut self, id: Self::Id);

    /// Place the item at `position` at the viewport start, shifted by `offset`
    /// pixels. Must not produce a scroll notification.
    fn scroll_to_position_with_offset(&mut self, id: Self::Id, position: usize, offset: i32);
}

/// Measured extent of the first rendered child of `id` along `orientation`
pub fn first_child_extent<H: ListHost>(host: &H, id: H::Id, orientation: Orientation) -> u32 {
    use super::orientation::OrientationExt;

    host.child_at(id, 0)
        .map(|child| orientation.extent(child.width, child.height))
        .unwrap_or(0)
}

/// Receives scroll notifications for lists holding the [`Listener::Scroll`] slot
pub trait ScrollObserver<H: ListHost> {
    fn on_scrolled(&mut self, host: &mut H, id: H::Id, dx: i32, dy: i32);

    fn on_scroll_state_changed(&mut self, host: &mut H, id: H::Id, state: ScrollState);
}

/// Receives hierarchy changes for lists holding the [`Listener::AttachState`] slot
pub trait AttachObserver<H: ListHost> {
    fn on_attached(&mut self, host: &mut H, id: H::Id);

    fn on_detached(&mut self, host: &mut H, id: H::Id);
}

/// Receives layout passes and child attachment for lists holding the
/// [`Listener::Layout`] and [`Listener::ChildAttach`] slots
pub trait LayoutObserver<H: ListHost> {
    fn on_layout(&mut self, host: &mut H, id: H::Id);

    fn on_child_attached(&mut self, host: &mut H, id: H::Id, child: ChildBounds);
}

/// Intercepts raw touches for lists holding the [`Listener::Touch`] slot
pub trait TouchObserver<H: ListHost> {
    /// Returns true when the observer consumed the touch
    fn on_intercept_touch(&mut self, host: &mut H, id: H::Id, action: TouchAction) -> bool;
}

/// Everything a host needs to drive the engine
pub trait HostObserver<H: ListHost>:
    ScrollObserver<H> + AttachObserver<H> + LayoutObserver<H> + TouchObserver<H>
{
}

impl<H, T> HostObserver<H> for T
where
    H: ListHost,
    T: ScrollObserver<H> + AttachObserver<H> + LayoutObserver<H> + TouchObserver<H>,
{
}
