//! Simulated toolkit owning a set of [`SimList`]s.
//!
//! User input (drags, releases, touches, hierarchy changes) and engine calls
//! mutate the lists and queue notifications. [`SimHost::dispatch`] delivers
//! them to an observer for every list where the observer holds the matching
//! listener slot. Notifications raised while a notification is being handled
//! are delivered right after it, ahead of anything already queued, the way a
//! toolkit calling listeners synchronously would.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::time::Duration;

use serde::Serialize;

use multiscroll_core::sync::{
    AttachObserver, ChildBounds, HostObserver, LayoutObserver, ListHost, Listener, Orientation,
    OrientationExt, ScrollObserver, ScrollState, TouchAction, TouchObserver,
};
use multiscroll_core::FlingConfig;

use super::list::SimList;
use crate::scroll::FlingAnimator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ListId(pub usize);

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Notification waiting for delivery
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    Scrolled { id: ListId, dx: i32, dy: i32 },
    StateChanged { id: ListId, state: ScrollState },
    Touch { id: ListId, action: TouchAction },
    Attached(ListId),
    Detached(ListId),
    Layout(ListId),
    ChildAttached { id: ListId, child: ChildBounds },
}

/// Counters for diagnostics and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HostStats {
    /// `scroll_by` calls made by the engine
    pub scroll_by_calls: usize,
    /// `stop_scroll` calls made by the engine
    pub stop_calls: usize,
    /// `scroll_to_position_with_offset` calls made by the engine
    pub alignments: usize,
    pub delivered: usize,
    /// Notifications for lists without the matching listener slot
    pub unobserved: usize,
}

#[derive(Debug)]
pub struct SimHost {
    orientation: Orientation,
    fling_config: FlingConfig,
    lists: Vec<SimList>,
    listeners: HashMap<ListId, HashSet<Listener>>,
    queue: VecDeque<HostEvent>,
    nested: Vec<HostEvent>,
    dispatching: bool,
    stats: HostStats,
}

impl SimHost {
    pub fn new(orientation: Orientation, fling_config: FlingConfig) -> Self {
        Self {
            orientation,
            fling_config,
            lists: Vec::new(),
            listeners: HashMap::new(),
            queue: VecDeque::new(),
            nested: Vec::new(),
            dispatching: false,
            stats: HostStats::default(),
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn push(&mut self, mut list: SimList) -> ListId {
        list.fling = FlingAnimator::new(self.fling_config.clone());
        self.lists.push(list);
        ListId(self.lists.len() - 1)
    }

    pub fn list(&self, id: ListId) -> Option<&SimList> {
        self.lists.get(id.0)
    }

    pub fn ids(&self) -> impl Iterator<Item = ListId> {
        (0..self.lists.len()).map(ListId)
    }

    pub fn stats(&self) -> HostStats {
        self.stats
    }

    pub fn has_listener(&self, id: ListId, listener: Listener) -> bool {
        self.listeners
            .get(&id)
            .is_some_and(|listeners| listeners.contains(&listener))
    }

    /// Notifications waiting for [`dispatch`](Self::dispatch)
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Any list still moving under inertia
    pub fn is_flinging(&self) -> bool {
        self.lists.iter().any(SimList::is_flinging)
    }

    /// Move `id` under the user's finger
    pub fn drag(&mut self, id: ListId, delta: i32) {
        let Some(list) = self.lists.get_mut(id.0) else {
            return;
        };
        if !list.attached {
            return;
        }
        list.fling.cancel();
        self.set_state(id, ScrollState::Dragging);
        self.scroll_list(id, delta);
    }

    /// Let go of `id`; a non-zero velocity (px/s) starts a fling
    pub fn release(&mut self, id: ListId, velocity: f64) {
        let Some(list) = self.lists.get_mut(id.0) else {
            return;
        };
        if list.state != ScrollState::Dragging {
            return;
        }
        let state = if list.fling.start(velocity) {
            ScrollState::Settling
        } else {
            ScrollState::Idle
        };
        self.set_state(id, state);
    }

    pub fn touch(&mut self, id: ListId, action: TouchAction) {
        if self.lists.get(id.0).is_some_and(|list| list.attached) {
            self.emit(HostEvent::Touch { id, action });
        }
    }

    /// Remove `id` from the hierarchy
    pub fn detach(&mut self, id: ListId) {
        let Some(list) = self.lists.get_mut(id.0) else {
            return;
        };
        if !list.attached {
            return;
        }
        list.attached = false;
        list.fling.cancel();
        self.emit(HostEvent::Detached(id));
        self.set_state(id, ScrollState::Idle);
    }

    /// Put `id` back into the hierarchy; it lays out again
    pub fn attach(&mut self, id: ListId) {
        let Some(list) = self.lists.get_mut(id.0) else {
            return;
        };
        if list.attached {
            return;
        }
        list.attached = true;
        list.layout_requested = true;
        self.emit(HostEvent::Attached(id));
    }

    pub fn set_viewport(&mut self, id: ListId, viewport: u32) {
        if let Some(list) = self.lists.get_mut(id.0) {
            if list.viewport() != viewport {
                list.set_viewport(viewport);
                list.layout_requested = true;
            }
        }
    }

    /// Run a layout pass on `id`
    pub fn layout(&mut self, id: ListId) {
        let Some(list) = self.lists.get_mut(id.0) else {
            return;
        };
        if !list.attached {
            return;
        }
        list.laid_out = true;
        list.layout_requested = false;
        self.realize(id);
        self.emit(HostEvent::Layout(id));
    }

    /// Lay out every attached list that needs it
    pub fn layout_pending(&mut self) {
        let pending: Vec<ListId> = self
            .ids()
            .filter(|id| {
                let list = &self.lists[id.0];
                list.attached && (!list.laid_out || list.layout_requested)
            })
            .collect();
        for id in pending {
            self.layout(id);
        }
    }

    /// Advance running flings by `dt`
    pub fn tick(&mut self, dt: Duration) {
        for index in 0..self.lists.len() {
            let id = ListId(index);
            let list = &mut self.lists[index];
            if !list.fling.is_active() {
                continue;
            }

            let delta = list.fling.advance(dt);
            let finished = !list.fling.is_active();
            let consumed = if delta != 0 { self.scroll_list(id, delta) } else { 0 };

            // Hitting either end stops the fling early
            if finished || (delta != 0 && consumed == 0) {
                self.lists[index].fling.cancel();
                self.set_state(id, ScrollState::Idle);
            }
        }
    }

    /// Deliver every queued notification to `observer`
    pub fn dispatch<O: HostObserver<Self>>(&mut self, observer: &mut O) {
        self.dispatching = true;
        while let Some(event) = self.queue.pop_front() {
            self.deliver(observer, event);
            let nested = std::mem::take(&mut self.nested);
            for event in nested.into_iter().rev() {
                self.queue.push_front(event);
            }
        }
        self.dispatching = false;
    }

    fn deliver<O: HostObserver<Self>>(&mut self, observer: &mut O, event: HostEvent) {
        let (id, listener) = match event {
            HostEvent::Scrolled { id, .. } | HostEvent::StateChanged { id, .. } => (id, Listener::Scroll),
            HostEvent::Touch { id, .. } => (id, Listener::Touch),
            HostEvent::Attached(id) | HostEvent::Detached(id) => (id, Listener::AttachState),
            HostEvent::Layout(id) => (id, Listener::Layout),
            HostEvent::ChildAttached { id, .. } => (id, Listener::ChildAttach),
        };
        let observed = self.has_listener(id, listener);
        if observed {
            self.stats.delivered += 1;
        } else {
            self.stats.unobserved += 1;
        }

        match event {
            HostEvent::Scrolled { id, dx, dy } if observed => observer.on_scrolled(self, id, dx, dy),
            HostEvent::StateChanged { id, state } if observed => {
                observer.on_scroll_state_changed(self, id, state)
            }
            HostEvent::Touch { id, action } => {
                let consumed = observed && observer.on_intercept_touch(self, id, action);
                if !consumed {
                    self.handle_touch(id, action);
                }
            }
            HostEvent::Attached(id) if observed => observer.on_attached(self, id),
            HostEvent::Detached(id) if observed => observer.on_detached(self, id),
            HostEvent::Layout(id) if observed => observer.on_layout(self, id),
            HostEvent::ChildAttached { id, child } if observed => {
                observer.on_child_attached(self, id, child)
            }
            _ => {}
        }
    }

    /// The list's own reaction to a touch nobody intercepted
    fn handle_touch(&mut self, id: ListId, action: TouchAction) {
        let Some(list) = self.lists.get_mut(id.0) else {
            return;
        };
        match action {
            TouchAction::Down if list.state == ScrollState::Settling => {
                list.fling.cancel();
                self.set_state(id, ScrollState::Dragging);
            }
            TouchAction::Up | TouchAction::Cancel if list.state == ScrollState::Dragging => {
                self.set_state(id, ScrollState::Idle);
            }
            _ => {}
        }
    }

    fn emit(&mut self, event: HostEvent) {
        if self.dispatching {
            self.nested.push(event);
        } else {
            self.queue.push_back(event);
        }
    }

    fn set_state(&mut self, id: ListId, state: ScrollState) {
        let Some(list) = self.lists.get_mut(id.0) else {
            return;
        };
        if list.state != state {
            list.state = state;
            self.emit(HostEvent::StateChanged { id, state });
        }
    }

    fn scroll_list(&mut self, id: ListId, delta: i32) -> i32 {
        let Some(list) = self.lists.get_mut(id.0) else {
            return 0;
        };
        let consumed = list.scroll(delta);
        if consumed != 0 {
            let (dx, dy) = self.orientation.split(consumed);
            self.emit(HostEvent::Scrolled { id, dx, dy });
            self.realize(id);
        }
        consumed
    }

    /// Attach children for positions that came into view
    fn realize(&mut self, id: ListId) {
        let orientation = self.orientation;
        let Some(list) = self.lists.get_mut(id.0) else {
            return;
        };
        let visible = list.visible_range();
        let previous = std::mem::replace(&mut list.realized, visible.clone());
        let attached: Vec<ChildBounds> = visible
            .filter(|position| !previous.contains(position))
            .map(|position| list.bounds(position, orientation))
            .collect();

        for child in attached {
            self.emit(HostEvent::ChildAttached { id, child });
        }
    }
}

impl ListHost for SimHost {
    type Id = ListId;

    fn add_listener(&mut self, id: ListId, listener: Listener) {
        self.listeners.entry(id).or_default().insert(listener);
    }

    fn remove_listener(&mut self, id: ListId, listener: Listener) {
        if let Some(listeners) = self.listeners.get_mut(&id) {
            listeners.remove(&listener);
        }
    }

    fn is_laid_out(&self, id: ListId) -> bool {
        self.lists
            .get(id.0)
            .is_some_and(|list| list.attached && list.laid_out && !list.layout_requested)
    }

    fn request_layout(&mut self, id: ListId) {
        if let Some(list) = self.lists.get_mut(id.0) {
            list.layout_requested = true;
        }
    }

    fn child_count(&self, id: ListId) -> usize {
        self.lists.get(id.0).map(|list| list.realized.len()).unwrap_or(0)
    }

    fn child_at(&self, id: ListId, index: usize) -> Option<ChildBounds> {
        let list = self.lists.get(id.0)?;
        let position = list.realized.clone().nth(index)?;
        Some(list.bounds(position, self.orientation))
    }

    fn scroll_by(&mut self, id: ListId, dx: i32, dy: i32) {
        self.stats.scroll_by_calls += 1;
        let delta = self.orientation.along(dx, dy);
        self.scroll_list(id, delta);
    }

    fn stop_scroll(&mut self, id: ListId) {
        self.stats.stop_calls += 1;
        if let Some(list) = self.lists.get_mut(id.0) {
            list.fling.cancel();
            self.set_state(id, ScrollState::Idle);
        }
    }

    fn scroll_to_position_with_offset(&mut self, id: ListId, position: usize, offset: i32) {
        self.stats.alignments += 1;
        let Some(list) = self.lists.get_mut(id.0) else {
            return;
        };
        list.fling.cancel();
        list.place(position, offset);
        self.realize(id);
    }
}
