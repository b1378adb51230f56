//! Membership bookkeeping for a synchronized group.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use super::host::{ListHost, Listener};

/// Per-list state kept by the group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Member {
    /// Participates in synchronization (scroll and touch listeners attached)
    pub included: bool,
    /// Waiting for a layout pass before it can be included
    pub awaiting_layout: bool,
    /// Included before any child could be measured; align on the next layout
    pub needs_alignment: bool,
    /// Extent of the first rendered child, 0 until measured
    pub measured_child_size: u32,
}

#[derive(Debug, Clone)]
pub struct Registry<Id> {
    members: HashMap<Id, Member>,
}

impl<Id: Copy + Eq + Hash + Debug> Default for Registry<Id> {
    fn default() -> Self {
        Self {
            members: HashMap::new(),
        }
    }
}

impl<Id: Copy + Eq + Hash + Debug> Registry<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `id`. Returns false when it was already tracked.
    pub fn register(&mut self, id: Id) -> bool {
        if self.members.contains_key(&id) {
            return false;
        }
        self.members.insert(id, Member::default());
        true
    }

    pub fn is_registered(&self, id: Id) -> bool {
        self.members.contains_key(&id)
    }

    pub fn is_included(&self, id: Id) -> bool {
        self.members.get(&id).is_some_and(|member| member.included)
    }

    pub fn get(&self, id: Id) -> Option<&Member> {
        self.members.get(&id)
    }

    pub fn get_mut(&mut self, id: Id) -> Option<&mut Member> {
        self.members.get_mut(&id)
    }

    /// Snapshot of included lists, safe to hold while the group mutates
    pub fn included(&self) -> Vec<Id> {
        self.members
            .iter()
            .filter(|(_, member)| member.included)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Snapshot of every tracked list
    pub fn registered(&self) -> Vec<Id> {
        self.members.keys().copied().collect()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }
}

/// Listener slots held for the whole time a list is registered
pub fn watch<H: ListHost>(host: &mut H, id: H::Id) {
    host.add_listener(id, Listener::AttachState);
    host.add_listener(id, Listener::Layout);
}

pub fn unwatch<H: ListHost>(host: &mut H, id: H::Id) {
    host.remove_listener(id, Listener::Layout);
    host.remove_listener(id, Listener::AttachState);
}

/// Listener slots held only while a list is included
pub fn attach_sync_listeners<H: ListHost>(host: &mut H, id: H::Id) {
    host.add_listener(id, Listener::Scroll);
    host.add_listener(id, Listener::Touch);
}

pub fn detach_sync_listeners<H: ListHost>(host: &mut H, id: H::Id) {
    host.remove_listener(id, Listener::Touch);
    host.remove_listener(id, Listener::Scroll);
}
