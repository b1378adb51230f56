//! Fling configuration helpers
//!
//! Re-exports configuration from multiscroll-core and provides derived values.

use std::time::Duration;

pub use multiscroll_core::{EasingType, FlingConfig};

/// Extension trait for FlingConfig with utility methods
pub trait FlingConfigExt {
    /// How long a fling runs
    fn fling_duration(&self) -> Duration;

    /// Frame interval while a fling runs
    fn frame_duration(&self) -> Duration;

    /// Check if releasing with velocity starts a fling
    fn flings(&self) -> bool;
}

impl FlingConfigExt for FlingConfig {
    #[inline]
    fn fling_duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    #[inline]
    fn frame_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }

    #[inline]
    fn flings(&self) -> bool {
        self.enabled && self.duration_ms > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_duration() {
        let mut config = FlingConfig::default();
        assert_eq!(config.frame_duration(), Duration::from_millis(16));
        config.animation_fps = 0;
        assert_eq!(config.frame_duration(), Duration::from_millis(16));
        config.animation_fps = 20;
        assert_eq!(config.frame_duration(), Duration::from_millis(50));
    }

    #[test]
    fn test_flings() {
        let mut config = FlingConfig::default();
        assert!(config.flings());

        config.enabled = false;
        assert!(!config.flings());

        config.enabled = true;
        config.duration_ms = 0;
        assert!(!config.flings());
    }
}
