//! Host double that records every call the engine makes.

use std::collections::{HashMap, HashSet};

use super::host::{ChildBounds, ListHost, Listener};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    AddListener(u32, Listener),
    RemoveListener(u32, Listener),
    RequestLayout(u32),
    ScrollBy { id: u32, dx: i32, dy: i32 },
    StopScroll(u32),
    ScrollToPosition { id: u32, position: usize, offset: i32 },
}

#[derive(Debug, Default)]
pub struct RecordingHost {
    calls: Vec<Call>,
    listeners: HashMap<u32, HashSet<Listener>>,
    laid_out: HashSet<u32>,
    layout_requested: HashSet<u32>,
    children: HashMap<u32, Vec<ChildBounds>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    pub fn listeners(&self, id: u32) -> HashSet<Listener> {
        self.listeners.get(&id).cloned().unwrap_or_default()
    }

    /// Complete a layout pass showing one square child of `size` (none when 0)
    pub fn lay_out(&mut self, id: u32, size: u32) {
        let children = if size > 0 {
            vec![ChildBounds {
                position: 0,
                width: size,
                height: size,
            }]
        } else {
            Vec::new()
        };
        self.children.insert(id, children);
        self.mark_laid_out(id);
    }

    pub fn mark_laid_out(&mut self, id: u32) {
        self.laid_out.insert(id);
        self.layout_requested.remove(&id);
    }

    pub fn mark_layout_requested(&mut self, id: u32) {
        self.layout_requested.insert(id);
    }

    pub fn set_children(&mut self, id: u32, children: Vec<ChildBounds>) {
        self.children.insert(id, children);
    }
}

impl ListHost for RecordingHost {
    type Id = u32;

    fn add_listener(&mut self, id: u32, listener: Listener) {
        self.listeners.entry(id).or_default().insert(listener);
        self.calls.push(Call::AddListener(id, listener));
    }

    fn remove_listener(&mut self, id: u32, listener: Listener) {
        if let Some(listeners) = self.listeners.get_mut(&id) {
            listeners.remove(&listener);
        }
        self.calls.push(Call::RemoveListener(id, listener));
    }

    fn is_laid_out(&self, id: u32) -> bool {
        self.laid_out.contains(&id) && !self.layout_requested.contains(&id)
    }

    fn request_layout(&mut self, id: u32) {
        self.layout_requested.insert(id);
        self.calls.push(Call::RequestLayout(id));
    }

    fn child_count(&self, id: u32) -> usize {
        self.children.get(&id).map(Vec::len).unwrap_or(0)
    }

    fn child_at(&self, id: u32, index: usize) -> Option<ChildBounds> {
        self.children.get(&id)?.get(index).copied()
    }

    fn scroll_by(&mut self, id: u32, dx: i32, dy: i32) {
        self.calls.push(Call::ScrollBy { id, dx, dy });
    }

    fn stop_scroll(&mut self, id: u32) {
        self.calls.push(Call::StopScroll(id));
    }

    fn scroll_to_position_with_offset(&mut self, id: u32, position: usize, offset: i32) {
        self.calls.push(Call::ScrollToPosition {
            id,
            position,
            offset,
        });
    }
}
