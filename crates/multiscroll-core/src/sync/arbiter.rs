//! Active-driver arbitration.
//!
//! Only one list at a time may originate deltas that get broadcast to the
//! rest of the group. Every broadcast `scroll_by` makes the receiving list
//! report a scroll of its own; those reports come from non-drivers and are
//! dropped here, which is what keeps the relay from feeding back on itself.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use super::host::ScrollState;

#[derive(Debug, Clone)]
pub struct Arbiter<Id> {
    active: Option<Id>,
    states: HashMap<Id, ScrollState>,
}

impl<Id: Copy + Eq + Hash + Debug> Default for Arbiter<Id> {
    fn default() -> Self {
        Self {
            active: None,
            states: HashMap::new(),
        }
    }
}

impl<Id: Copy + Eq + Hash + Debug> Arbiter<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current driver, if any
    #[inline]
    pub fn active(&self) -> Option<Id> {
        self.active
    }

    /// Try to make `id` the driver. Fails when another list drives.
    pub fn claim(&mut self, id: Id) -> bool {
        match self.active {
            Some(active) if active != id => {
                tracing::trace!(?id, ?active, "Scroll from non-driver ignored");
                false
            }
            Some(_) => true,
            None => {
                tracing::trace!(?id, "Driver claimed");
                self.active = Some(id);
                true
            }
        }
    }

    /// Record a scroll state change. The driver going idle frees the group.
    pub fn on_state_changed(&mut self, id: Id, state: ScrollState) {
        self.states.insert(id, state);
        if self.active == Some(id) && state == ScrollState::Idle {
            tracing::trace!(?id, "Driver released");
            self.active = None;
        }
    }

    /// Last reported state of `id`
    pub fn state_of(&self, id: Id) -> ScrollState {
        self.states.get(&id).copied().unwrap_or_default()
    }

    /// Lists other than `id` still moving under inertia
    pub fn settling_except(&self, id: Id) -> Vec<Id> {
        self.states
            .iter()
            .filter(|(other, state)| **other != id && **state == ScrollState::Settling)
            .map(|(other, _)| *other)
            .collect()
    }

    /// Forget `id`, releasing the group if it was driving
    pub fn forget(&mut self, id: Id) {
        self.states.remove(&id);
        if self.active == Some(id) {
            tracing::trace!(?id, "Driver left the group");
            self.active = None;
        }
    }

    pub fn reset(&mut self) {
        self.active = None;
        self.states.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_driver() {
        let mut arbiter = Arbiter::new();
        assert!(arbiter.claim(1));
        assert!(arbiter.claim(1));
        assert!(!arbiter.claim(2));
        assert_eq!(arbiter.active(), Some(1));
    }

    #[test]
    fn test_only_driver_idle_releases() {
        let mut arbiter = Arbiter::new();
        arbiter.claim(1);

        arbiter.on_state_changed(2, ScrollState::Idle);
        assert_eq!(arbiter.active(), Some(1));

        arbiter.on_state_changed(1, ScrollState::Settling);
        assert_eq!(arbiter.active(), Some(1));

        arbiter.on_state_changed(1, ScrollState::Idle);
        assert_eq!(arbiter.active(), None);
        assert!(arbiter.claim(2));
    }

    #[test]
    fn test_settling_except() {
        let mut arbiter = Arbiter::new();
        arbiter.on_state_changed(1, ScrollState::Settling);
        arbiter.on_state_changed(2, ScrollState::Dragging);
        arbiter.on_state_changed(3, ScrollState::Settling);

        let mut settling = arbiter.settling_except(3);
        settling.sort();
        assert_eq!(settling, vec![1]);
    }

    #[test]
    fn test_forget_releases_driver() {
        let mut arbiter = Arbiter::new();
        arbiter.claim(1);
        arbiter.forget(2);
        assert_eq!(arbiter.active(), Some(1));
        arbiter.forget(1);
        assert_eq!(arbiter.active(), None);
    }
}
