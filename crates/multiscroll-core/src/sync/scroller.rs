//! The synchronization group.

use std::fmt::Debug;
use std::hash::Hash;

use super::accountant::{Accountant, AlignError, Anchor};
use super::arbiter::Arbiter;
use super::cell_sizer::CellSizer;
use super::host::{
    first_child_extent, AttachObserver, ChildBounds, LayoutObserver, ListHost, ScrollObserver,
    ScrollState, TouchAction, TouchObserver,
};
use super::orientation::{Orientation, OrientationExt};
use super::registry::{self, Registry};
use super::touch_guard;
use crate::config::SyncConfig;

/// Keeps a group of lists scrolled by the same number of pixels.
///
/// The lists are expected to display the same items in the same order. Sizes
/// may differ per item; the [`CellSizer`] answers for them. A list joining
/// late, or coming back after a detach, is placed at the group's current
/// [`displacement`](Self::displacement) before it starts relaying scrolls.
///
/// All methods must be called from the thread that owns the host and in the
/// order the host emits notifications.
#[derive(Debug, Clone)]
pub struct MultiScroller<Id> {
    orientation: Orientation,
    cell_sizer: CellSizer<Id>,
    registry: Registry<Id>,
    arbiter: Arbiter<Id>,
    accountant: Accountant,
}

impl<Id: Copy + Eq + Hash + Debug> MultiScroller<Id> {
    pub fn new(orientation: Orientation, cell_sizer: CellSizer<Id>) -> Self {
        Self {
            orientation,
            cell_sizer,
            registry: Registry::new(),
            arbiter: Arbiter::new(),
            accountant: Accountant::new(),
        }
    }

    /// Group measuring item sizes from its members
    pub fn with_orientation(orientation: Orientation) -> Self {
        Self::new(orientation, CellSizer::dynamic(orientation))
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(config.orientation, CellSizer::from_config(config))
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Pixels scrolled by the group since creation
    #[inline]
    pub fn displacement(&self) -> i64 {
        self.accountant.displacement()
    }

    /// List whose deltas are currently broadcast
    #[inline]
    pub fn active_driver(&self) -> Option<Id> {
        self.arbiter.active()
    }

    /// Lists currently synchronized
    pub fn members(&self) -> Vec<Id> {
        self.registry.included()
    }

    pub fn is_included(&self, id: Id) -> bool {
        self.registry.is_included(id)
    }

    pub fn cell_sizer(&self) -> &CellSizer<Id> {
        &self.cell_sizer
    }

    /// Item and offset every member should show for the current displacement
    pub fn anchor(&self) -> Result<Anchor, AlignError> {
        self.cell_sizer.resolve(self.displacement())
    }

    /// Add a list to the group. It joins on its next layout pass, or right
    /// away when it is already laid out. Adding a known list does nothing.
    pub fn add<H: ListHost<Id = Id>>(&mut self, host: &mut H, id: Id) {
        if !self.registry.register(id) {
            tracing::trace!(?id, "List already in group");
            return;
        }

        tracing::debug!(?id, "Adding list to group");
        registry::watch(host, id);
        self.include(host, id);
    }

    /// Remove every list from the group. The displacement is kept.
    pub fn clear<H: ListHost<Id = Id>>(&mut self, host: &mut H) {
        for id in self.registry.registered() {
            self.exclude(host, id);
            registry::unwatch(host, id);
        }
        self.registry.clear();
        self.cell_sizer.clear();
        self.arbiter.reset();
        tracing::debug!(displacement = self.displacement(), "Group cleared");
    }

    fn include<H: ListHost<Id = Id>>(&mut self, host: &mut H, id: Id) {
        let laid_out = host.is_laid_out(id);
        let Some(member) = self.registry.get_mut(id) else {
            return;
        };
        if member.included {
            return;
        }

        if laid_out {
            self.complete_inclusion(host, id);
        } else {
            member.awaiting_layout = true;
            host.request_layout(id);
        }
    }

    /// Align first, then attach the scroll listener, so the alignment never
    /// reaches arbitration.
    fn complete_inclusion<H: ListHost<Id = Id>>(&mut self, host: &mut H, id: Id) {
        self.measure(host, id);
        let pending = self.align(host, id);

        if let Some(member) = self.registry.get_mut(id) {
            member.awaiting_layout = false;
            member.needs_alignment = pending;
            member.included = true;
        }
        self.cell_sizer.include(host, id);
        registry::attach_sync_listeners(host, id);
        tracing::debug!(?id, "List included");
    }

    fn exclude<H: ListHost<Id = Id>>(&mut self, host: &mut H, id: Id) {
        let Some(member) = self.registry.get_mut(id) else {
            return;
        };
        let was_included = member.included;
        member.included = false;
        member.awaiting_layout = false;
        member.needs_alignment = false;
        if !was_included {
            return;
        }

        registry::detach_sync_listeners(host, id);
        self.cell_sizer.exclude(host, id);
        self.arbiter.forget(id);
        tracing::debug!(?id, "List excluded");
    }

    fn measure<H: ListHost<Id = Id>>(&mut self, host: &H, id: Id) {
        let orientation = self.orientation;
        if let Some(member) = self.registry.get_mut(id) {
            if member.measured_child_size == 0 {
                member.measured_child_size = first_child_extent(host, id, orientation);
            }
        }
    }

    /// Place `id` at the current displacement. Returns true when alignment
    /// has to be retried on a later layout pass.
    fn align<H: ListHost<Id = Id>>(&mut self, host: &mut H, id: Id) -> bool {
        let (measured, retrying) = self
            .registry
            .get(id)
            .map(|member| (member.measured_child_size, member.needs_alignment))
            .unwrap_or((0, false));
        if measured == 0 {
            tracing::debug!(?id, "No child measured yet, deferring alignment");
            return true;
        }

        match self.anchor() {
            Ok(anchor) => {
                tracing::debug!(
                    ?id,
                    displacement = self.displacement(),
                    position = anchor.position,
                    offset = anchor.offset,
                    "Aligning list"
                );
                host.scroll_to_position_with_offset(id, anchor.position, -(anchor.offset as i32));
                false
            }
            Err(err @ AlignError::UnknownExtent { .. }) => {
                if retrying {
                    tracing::debug!(?id, "Still cannot align list: {}", err);
                } else {
                    tracing::warn!(?id, "Cannot align list yet: {}", err);
                }
                true
            }
            Err(err) => {
                tracing::warn!(?id, "Cannot align list: {}", err);
                false
            }
        }
    }
}

impl<H: ListHost> ScrollObserver<H> for MultiScroller<H::Id> {
    fn on_scrolled(&mut self, host: &mut H, id: H::Id, dx: i32, dy: i32) {
        if !self.registry.is_included(id) {
            return;
        }

        let delta = self.orientation.along(dx, dy);
        if delta == 0 {
            return;
        }
        if !self.arbiter.claim(id) {
            return;
        }

        let (dx, dy) = self.orientation.split(delta);
        for other in self.registry.included() {
            if other != id {
                host.scroll_by(other, dx, dy);
            }
        }
        self.accountant.advance(delta);
        tracing::trace!(?id, delta, displacement = self.displacement(), "Broadcast scroll");
    }

    fn on_scroll_state_changed(&mut self, _host: &mut H, id: H::Id, state: ScrollState) {
        if self.registry.is_included(id) {
            self.arbiter.on_state_changed(id, state);
        }
    }
}

impl<H: ListHost> AttachObserver<H> for MultiScroller<H::Id> {
    fn on_attached(&mut self, host: &mut H, id: H::Id) {
        if self.registry.is_registered(id) {
            tracing::debug!(?id, "List re-attached");
            self.include(host, id);
        }
    }

    fn on_detached(&mut self, host: &mut H, id: H::Id) {
        self.exclude(host, id);
    }
}

impl<H: ListHost> LayoutObserver<H> for MultiScroller<H::Id> {
    fn on_layout(&mut self, host: &mut H, id: H::Id) {
        let Some(member) = self.registry.get(id).copied() else {
            return;
        };

        if member.awaiting_layout {
            self.complete_inclusion(host, id);
        } else if member.included && member.needs_alignment {
            self.measure(host, id);
            let pending = self.align(host, id);
            if let Some(member) = self.registry.get_mut(id) {
                member.needs_alignment = pending;
            }
        }
    }

    fn on_child_attached(&mut self, _host: &mut H, id: H::Id, child: ChildBounds) {
        self.cell_sizer.on_child_attached(id, child);
    }
}

impl<H: ListHost> TouchObserver<H> for MultiScroller<H::Id> {
    fn on_intercept_touch(&mut self, host: &mut H, id: H::Id, action: TouchAction) -> bool {
        if !self.registry.is_included(id) {
            return false;
        }
        touch_guard::intercept(&mut self.arbiter, host, id, action)
    }
}
