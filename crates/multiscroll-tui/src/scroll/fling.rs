//! Fling deceleration
//!
//! A fling covers the distance a linearly decaying velocity would travel over
//! the configured duration, distributed over frames by an easing curve.
//! Time is supplied by the caller so simulations stay deterministic.

use std::time::Duration;

use super::config::{EasingType, FlingConfig, FlingConfigExt};

/// Extension trait for EasingType with calculation methods
pub trait EasingTypeExt {
    /// Fraction of the distance covered at progress `t` in [0, 1]
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::None => {
                if t > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            EasingType::Linear => t,
            EasingType::Cubic => 1.0 - (1.0 - t).powi(3),
            EasingType::Quintic => 1.0 - (1.0 - t).powi(5),
            EasingType::EaseOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f64.powf(-10.0 * t)
                }
            }
        }
    }
}

/// Distance in pixels travelled by a fling released at `velocity` px/s,
/// capped to what a single scroll can carry
pub fn fling_distance(velocity: f64, duration: Duration) -> i64 {
    let distance = (velocity * duration.as_secs_f64() / 2.0).round();
    distance.clamp(i32::MIN as f64, i32::MAX as f64) as i64
}

#[derive(Debug, Clone)]
struct ActiveFling {
    elapsed: Duration,
    duration: Duration,
    distance: i64,
    covered: i64,
    easing: EasingType,
}

/// Frame-stepped fling for one list
#[derive(Debug, Clone, Default)]
pub struct FlingAnimator {
    fling: Option<ActiveFling>,
    config: FlingConfig,
}

impl FlingAnimator {
    pub fn new(config: FlingConfig) -> Self {
        Self { fling: None, config }
    }

    pub fn config(&self) -> &FlingConfig {
        &self.config
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.fling.is_some()
    }

    /// Pixels still to travel
    pub fn remaining(&self) -> i64 {
        self.fling
            .as_ref()
            .map(|fling| fling.distance - fling.covered)
            .unwrap_or(0)
    }

    /// Start a fling. Returns false when flinging is disabled or the
    /// velocity is too small to move a pixel.
    pub fn start(&mut self, velocity: f64) -> bool {
        self.fling = None;
        if !self.config.flings() {
            return false;
        }

        let duration = self.config.fling_duration();
        let distance = fling_distance(velocity, duration);
        if distance == 0 {
            return false;
        }

        self.fling = Some(ActiveFling {
            elapsed: Duration::ZERO,
            duration,
            distance,
            covered: 0,
            easing: self.config.easing,
        });
        true
    }

    /// Advance by `dt` and return the pixels to scroll this frame
    pub fn advance(&mut self, dt: Duration) -> i32 {
        let Some(fling) = self.fling.as_mut() else {
            return 0;
        };

        fling.elapsed += dt;
        let done = fling.elapsed >= fling.duration;
        let target = if done {
            fling.distance
        } else {
            let t = fling.elapsed.as_secs_f64() / fling.duration.as_secs_f64();
            (fling.distance as f64 * fling.easing.apply(t)).round() as i64
        };

        let delta = target - fling.covered;
        fling.covered = target;
        if done {
            self.fling = None;
        }
        delta.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    pub fn cancel(&mut self) {
        self.fling = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn animator(easing: EasingType) -> FlingAnimator {
        FlingAnimator::new(FlingConfig {
            duration_ms: 400,
            easing,
            ..Default::default()
        })
    }

    fn run_to_rest(animator: &mut FlingAnimator) -> Vec<i32> {
        let mut deltas = Vec::new();
        while animator.is_active() {
            deltas.push(animator.advance(FRAME));
        }
        deltas
    }

    #[test]
    fn test_easing_boundaries() {
        for easing in [
            EasingType::Linear,
            EasingType::Cubic,
            EasingType::Quintic,
            EasingType::EaseOut,
        ] {
            assert!(easing.apply(0.0).abs() < 0.001, "{:?} at t=0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{:?} at t=1", easing);
        }
        assert_eq!(EasingType::None.apply(0.01), 1.0);
    }

    #[test]
    fn test_fling_covers_whole_distance() {
        for easing in [EasingType::Linear, EasingType::Cubic, EasingType::EaseOut] {
            let mut animator = animator(easing);
            assert!(animator.start(1000.0));
            assert_eq!(animator.remaining(), 200);

            let total: i32 = run_to_rest(&mut animator).iter().sum();
            assert_eq!(total, 200, "{:?}", easing);
            assert_eq!(animator.remaining(), 0);
        }
    }

    #[test]
    fn test_negative_velocity() {
        let mut animator = animator(EasingType::Cubic);
        assert!(animator.start(-500.0));
        let deltas = run_to_rest(&mut animator);
        assert!(deltas.iter().all(|delta| *delta <= 0));
        assert_eq!(deltas.iter().sum::<i32>(), -100);
    }

    #[test]
    fn test_cubic_decelerates() {
        let mut animator = animator(EasingType::Cubic);
        animator.start(2000.0);
        let deltas = run_to_rest(&mut animator);
        assert!(deltas.first() > deltas.last());
    }

    #[test]
    fn test_none_jumps_to_rest() {
        let mut animator = animator(EasingType::None);
        animator.start(1000.0);
        assert_eq!(animator.advance(FRAME), 200);
    }

    #[test]
    fn test_disabled_does_not_start() {
        let mut animator = FlingAnimator::new(FlingConfig {
            enabled: false,
            ..Default::default()
        });
        assert!(!animator.start(1000.0));
        assert_eq!(animator.advance(FRAME), 0);
    }

    #[test]
    fn test_tiny_velocity_does_not_start() {
        let mut animator = animator(EasingType::Cubic);
        assert!(!animator.start(0.5));
    }

    #[test]
    fn test_cancel() {
        let mut animator = animator(EasingType::Linear);
        animator.start(1000.0);
        animator.advance(FRAME);
        animator.cancel();
        assert!(!animator.is_active());
        assert_eq!(animator.advance(FRAME), 0);
    }

    #[test]
    fn test_huge_velocity_is_capped() {
        assert_eq!(fling_distance(1e300, Duration::from_millis(400)), i32::MAX as i64);
        assert_eq!(fling_distance(-1e300, Duration::from_millis(400)), i32::MIN as i64);

        let mut animator = FlingAnimator::new(FlingConfig {
            duration_ms: 16,
            easing: EasingType::Linear,
            ..Default::default()
        });
        assert!(animator.start(f64::MAX));
        assert_eq!(animator.remaining(), i32::MAX as i64);
        assert_eq!(animator.advance(FRAME), i32::MAX);
        assert!(!animator.is_active());
    }
}
