//! Stops a coasting list when the user grabs another one.

use std::fmt::Debug;
use std::hash::Hash;

use super::arbiter::Arbiter;
use super::host::{ListHost, TouchAction};

/// Stops every list other than `id` that is still flinging when `id` sees a
/// touch-down. The touch itself is never consumed.
pub fn intercept<H, Id>(arbiter: &mut Arbiter<Id>, host: &mut H, id: Id, action: TouchAction) -> bool
where
    H: ListHost<Id = Id>,
    Id: Copy + Eq + Hash + Debug,
{
    if action != TouchAction::Down {
        return false;
    }

    for settling in arbiter.settling_except(id) {
        tracing::debug!(touched = ?id, stopped = ?settling, "Stopping fling");
        host.stop_scroll(settling);
        arbiter.on_state_changed(settling, super::host::ScrollState::Idle);
    }

    false
}
