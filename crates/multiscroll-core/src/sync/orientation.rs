//! Axis helpers for [`Orientation`].

pub use crate::config::Orientation;

/// Extension trait mapping two-dimensional deltas and sizes onto the scroll axis
pub trait OrientationExt {
    /// Component of a `(dx, dy)` delta along the scroll axis
    fn along(&self, dx: i32, dy: i32) -> i32;

    /// Axis-aligned `(dx, dy)` for a delta along the scroll axis
    fn split(&self, delta: i32) -> (i32, i32);

    /// Extent of a `width x height` box along the scroll axis
    fn extent(&self, width: u32, height: u32) -> u32;
}

impl OrientationExt for Orientation {
    #[inline]
    fn along(&self, dx: i32, dy: i32) -> i32 {
        match self {
            Orientation::Horizontal => dx,
            Orientation::Vertical => dy,
        }
    }

    #[inline]
    fn split(&self, delta: i32) -> (i32, i32) {
        match self {
            Orientation::Horizontal => (delta, 0),
            Orientation::Vertical => (0, delta),
        }
    }

    #[inline]
    fn extent(&self, width: u32, height: u32) -> u32 {
        match self {
            Orientation::Horizontal => width,
            Orientation::Vertical => height,
        }
    }
}
