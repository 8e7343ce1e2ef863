//! Ease-to-home animation.

use std::time::{Duration, Instant};

use crate::geom::Point;
use crate::view::Viewport;

/// Cubic ease-in-out over `t ∈ [0, 1]`.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// The animated part of the viewport state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSnapshot {
    /// Nominal world bounds.
    pub world: Viewport,
    /// Pan offset.
    pub translation: Point,
    /// Curve samples per world unit.
    pub resolution: f64,
}

impl ViewSnapshot {
    /// Interpolate every field towards `other`.
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            world: self.world.lerp(other.world, t),
            translation: self.translation.lerp(other.translation, t),
            resolution: self.resolution + (other.resolution - self.resolution) * t,
        }
    }
}

/// Result of advancing the animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationStep {
    /// Nothing is animating.
    Idle,
    /// Intermediate state; another frame is needed.
    Running(ViewSnapshot),
    /// Final state. The animation is idle afterwards.
    Finished(ViewSnapshot),
}

/// Interpolates the viewport back to its home snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HomeAnimation {
    /// No animation in progress.
    #[default]
    Idle,
    /// Animating from `from` towards the home snapshot.
    Animating {
        /// When the animation began.
        start: Instant,
        /// Total length.
        duration: Duration,
        /// State captured at the start.
        from: ViewSnapshot,
    },
}

impl HomeAnimation {
    /// Begin animating from `from`, replacing any animation in flight.
    pub fn start(&mut self, from: ViewSnapshot, now: Instant, duration: Duration) {
        *self = Self::Animating {
            start: now,
            duration,
            from,
        };
    }

    /// Stop without applying further steps.
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    /// Check whether an animation is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Animating { .. })
    }

    /// Advance to `now`, interpolating towards `home`.
    pub fn step(&mut self, now: Instant, home: &ViewSnapshot) -> AnimationStep {
        let Self::Animating {
            start,
            duration,
            from,
        } = *self
        else {
            return AnimationStep::Idle;
        };
        let elapsed = now.saturating_duration_since(start);
        if duration.is_zero() || elapsed >= duration {
            *self = Self::Idle;
            return AnimationStep::Finished(*home);
        }
        let t = ease_in_out_cubic(elapsed.as_secs_f64() / duration.as_secs_f64());
        AnimationStep::Running(from.lerp(home, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Range;

    fn snapshot(half: f64, tx: f64, resolution: f64) -> ViewSnapshot {
        ViewSnapshot {
            world: Viewport::new(Range::new(-half, half), Range::new(-half, half)),
            translation: Point::new(tx, 0.0),
            resolution,
        }
    }

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.25) - 0.0625).abs() < 1e-12);
        assert!((ease_in_out_cubic(0.75) - 0.9375).abs() < 1e-12);
    }

    #[test]
    fn easing_is_monotonic() {
        let mut previous = 0.0;
        for i in 1..=100 {
            let value = ease_in_out_cubic(i as f64 / 100.0);
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn step_interpolates_then_finishes() {
        let home = snapshot(5.0, 0.0, 100.0);
        let from = snapshot(1.0, 4.0, 500.0);
        let start = Instant::now();
        let duration = Duration::from_millis(500);
        let mut animation = HomeAnimation::default();
        animation.start(from, start, duration);
        assert!(animation.is_active());

        let AnimationStep::Running(mid) = animation.step(start + duration / 2, &home) else {
            panic!("expected a running step");
        };
        assert!((mid.translation.x - 2.0).abs() < 1e-9);
        assert!((mid.resolution - 300.0).abs() < 1e-9);
        assert!((mid.world.x.max - 3.0).abs() < 1e-9);

        assert_eq!(
            animation.step(start + duration, &home),
            AnimationStep::Finished(home)
        );
        assert!(!animation.is_active());
        assert_eq!(animation.step(start + duration * 2, &home), AnimationStep::Idle);
    }

    #[test]
    fn cancel_stops_the_animation() {
        let home = snapshot(5.0, 0.0, 100.0);
        let now = Instant::now();
        let mut animation = HomeAnimation::default();
        animation.start(snapshot(1.0, 1.0, 10.0), now, Duration::from_secs(1));
        animation.cancel();
        assert_eq!(animation.step(now, &home), AnimationStep::Idle);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let home = snapshot(5.0, 0.0, 100.0);
        let now = Instant::now();
        let mut animation = HomeAnimation::default();
        animation.start(snapshot(1.0, 1.0, 10.0), now, Duration::ZERO);
        assert_eq!(animation.step(now, &home), AnimationStep::Finished(home));
    }
}
