//! A headless scrollable list.

use std::ops::Range;

use multiscroll_core::sync::{resolve_anchor, Anchor, ChildBounds, Orientation, ScrollState};

use crate::scroll::FlingAnimator;

/// Items laid out end to end along one axis, seen through a viewport
#[derive(Debug, Clone)]
pub struct SimList {
    item_sizes: Vec<u32>,
    /// Size of every item across the scroll axis
    cross_size: u32,
    viewport: u32,
    offset: i64,
    pub(crate) state: ScrollState,
    pub(crate) attached: bool,
    pub(crate) laid_out: bool,
    pub(crate) layout_requested: bool,
    pub(crate) realized: Range<usize>,
    pub(crate) fling: FlingAnimator,
}

impl SimList {
    pub fn new(item_sizes: Vec<u32>, viewport: u32) -> Self {
        Self {
            item_sizes,
            cross_size: 1,
            viewport,
            offset: 0,
            state: ScrollState::Idle,
            attached: true,
            laid_out: false,
            layout_requested: true,
            realized: 0..0,
            fling: FlingAnimator::default(),
        }
    }

    pub fn uniform(count: usize, size: u32, viewport: u32) -> Self {
        Self::new(vec![size; count], viewport)
    }

    pub fn with_cross_size(mut self, cross_size: u32) -> Self {
        self.cross_size = cross_size;
        self
    }

    pub fn item_sizes(&self) -> &[u32] {
        &self.item_sizes
    }

    pub fn item_count(&self) -> usize {
        self.item_sizes.len()
    }

    pub fn viewport(&self) -> u32 {
        self.viewport
    }

    pub(crate) fn set_viewport(&mut self, viewport: u32) {
        self.viewport = viewport;
        self.offset = self.offset.clamp(0, self.max_offset());
    }

    /// Pixels scrolled past the start of the content
    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_flinging(&self) -> bool {
        self.fling.is_active()
    }

    pub fn content_extent(&self) -> i64 {
        self.item_sizes.iter().map(|size| *size as i64).sum()
    }

    pub fn max_offset(&self) -> i64 {
        (self.content_extent() - self.viewport as i64).max(0)
    }

    /// Start of `position` measured from the start of the content
    pub fn item_start(&self, position: usize) -> i64 {
        self.item_sizes
            .iter()
            .take(position)
            .map(|size| *size as i64)
            .sum()
    }

    /// Item at the viewport start and how far it is scrolled past
    pub fn anchor(&self) -> Anchor {
        resolve_anchor(self.offset, |position| self.item_sizes.get(position).copied())
            .unwrap_or(Anchor {
                position: self.item_sizes.len(),
                offset: 0,
            })
    }

    /// Positions intersecting the viewport
    pub fn visible_range(&self) -> Range<usize> {
        let end_px = self.offset + self.viewport as i64;
        let mut start = None;
        let mut end = 0;
        let mut item_start = 0i64;

        for (position, size) in self.item_sizes.iter().enumerate() {
            let item_end = item_start + *size as i64;
            let visible = item_start < end_px && (item_end > self.offset || item_start >= self.offset);
            if visible {
                start.get_or_insert(position);
                end = position + 1;
            } else if item_start >= end_px {
                break;
            }
            item_start = item_end;
        }

        match start {
            Some(start) => start..end,
            None => 0..0,
        }
    }

    /// Rendered children in viewport order
    pub fn children(&self, orientation: Orientation) -> Vec<ChildBounds> {
        self.realized
            .clone()
            .map(|position| self.bounds(position, orientation))
            .collect()
    }

    pub(crate) fn bounds(&self, position: usize, orientation: Orientation) -> ChildBounds {
        let size = self.item_sizes.get(position).copied().unwrap_or(0);
        let (width, height) = match orientation {
            Orientation::Horizontal => (size, self.cross_size),
            Orientation::Vertical => (self.cross_size, size),
        };
        ChildBounds {
            position,
            width,
            height,
        }
    }

    /// Move by `delta` pixels within bounds and return the pixels consumed
    pub(crate) fn scroll(&mut self, delta: i32) -> i32 {
        let target = (self.offset + delta as i64).clamp(0, self.max_offset());
        let consumed = target - self.offset;
        self.offset = target;
        consumed as i32
    }

    /// Put `position` at `offset` pixels from the viewport start
    pub(crate) fn place(&mut self, position: usize, offset: i32) {
        let target = self.item_start(position) - offset as i64;
        self.offset = target.clamp(0, self.max_offset());
    }
}
