//! Fling physics for simulated lists
//!
//! - `config` - Derived fling settings (re-exported from multiscroll-core)
//! - `fling` - Easing curves and the frame-stepped fling animator

pub mod config;
pub mod fling;

pub use config::{EasingType, FlingConfig, FlingConfigExt};
pub use fling::{EasingTypeExt, FlingAnimator};
