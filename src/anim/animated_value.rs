//! Ease-out interpolation of a displayed number toward a target.

use super::scheduler::{FrameHandle, FrameScheduler};

/// Default transition length.
pub const DEFAULT_DURATION_MS: f64 = 1500.0;

/// Cubic ease-out: fast start, gentle landing. `t` is clamped to [0, 1].
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// In-flight transition. Holding the handle keeps the frame callback alive.
#[derive(Debug)]
struct Transition {
    from: f64,
    target: f64,
    start_ms: f64,
    _frame: FrameHandle,
}

/// A displayed value that moves smoothly toward its target.
///
/// Re-targeting mid-flight starts the new transition from the value currently
/// on screen.
#[derive(Debug)]
pub struct AnimatedValue {
    displayed: f64,
    duration_ms: f64,
    transition: Option<Transition>,
}

impl AnimatedValue {
    pub fn new(initial: f64, duration_ms: f64) -> Self {
        let duration_ms = if duration_ms.is_finite() && duration_ms >= 0.0 {
            duration_ms
        } else {
            log::warn!("Invalid animation duration {}, using default", duration_ms);
            DEFAULT_DURATION_MS
        };
        Self {
            displayed: if initial.is_finite() { initial } else { 0.0 },
            duration_ms,
            transition: None,
        }
    }

    /// Value shown as of the last tick.
    pub fn value(&self) -> f64 {
        self.displayed
    }

    /// Where the value is heading.
    pub fn target(&self) -> f64 {
        self.transition
            .as_ref()
            .map_or(self.displayed, |transition| transition.target)
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Interpolated value at `now_ms`, without advancing state.
    pub fn sample(&self, now_ms: f64) -> f64 {
        match &self.transition {
            None => self.displayed,
            Some(transition) => {
                let t = self.progress(transition, now_ms);
                if t >= 1.0 {
                    transition.target
                } else {
                    transition.from + (transition.target - transition.from) * ease_out_cubic(t)
                }
            }
        }
    }

    fn progress(&self, transition: &Transition, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - transition.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Starts a transition to `target` at `now_ms`, abandoning any in-flight
    /// one. Non-finite targets are ignored.
    pub fn set_target(&mut self, target: f64, now_ms: f64, scheduler: &FrameScheduler) {
        if !target.is_finite() {
            log::warn!("Ignoring non-finite animation target {}", target);
            return;
        }
        if target == self.target() {
            return;
        }

        self.displayed = self.sample(now_ms);
        // Dropping the old transition releases its frame callback
        self.transition = None;

        if self.duration_ms <= 0.0 || self.displayed == target {
            self.displayed = target;
            return;
        }

        self.transition = Some(Transition {
            from: self.displayed,
            target,
            start_ms: now_ms,
            _frame: scheduler.schedule(),
        });
    }

    /// Advances to `now_ms` and returns the displayed value. Lands exactly
    /// on the target when the transition completes.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        if let Some(transition) = &self.transition {
            if self.progress(transition, now_ms) >= 1.0 {
                self.displayed = transition.target;
                self.transition = None;
            } else {
                self.displayed = self.sample(now_ms);
            }
        }
        self.displayed
    }

    /// Stops at the current displayed value.
    pub fn cancel(&mut self) {
        self.transition = None;
    }

    /// Jumps to `value` without animating.
    pub fn snap_to(&mut self, value: f64) {
        if value.is_finite() {
            self.transition = None;
            self.displayed = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::{Clock, ManualClock};
    use float_cmp::approx_eq;

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(approx_eq!(f64, ease_out_cubic(0.5), 0.875, epsilon = 1e-12));
        assert_eq!(ease_out_cubic(-1.0), 0.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
    }

    #[test]
    fn test_animation_reaches_target_exactly() {
        let scheduler = FrameScheduler::new();
        let mut value = AnimatedValue::new(0.0, DEFAULT_DURATION_MS);
        value.set_target(100.0 / 3.0, 0.0, &scheduler);
        assert!(value.is_animating());
        assert_eq!(scheduler.pending(), 1);

        value.tick(1000.0);
        assert!(value.value() < 100.0 / 3.0);

        assert_eq!(value.tick(1500.0), 100.0 / 3.0);
        assert!(!value.is_animating());
        assert_eq!(scheduler.pending(), 0);

        // Later ticks keep the value put.
        assert_eq!(value.tick(5000.0), 100.0 / 3.0);
    }

    #[test]
    fn test_interrupted_animation_continues_from_current_value() {
        let clock = ManualClock::new(0.0);
        let scheduler = FrameScheduler::new();
        let mut value = AnimatedValue::new(0.0, DEFAULT_DURATION_MS);

        value.set_target(100.0, clock.now_ms(), &scheduler);
        clock.advance(750.0);
        let midway = value.tick(clock.now_ms());
        assert!(approx_eq!(f64, midway, 87.5, epsilon = 1e-9));

        value.set_target(50.0, clock.now_ms(), &scheduler);
        assert!(approx_eq!(f64, value.value(), 87.5, epsilon = 1e-9));
        assert_eq!(value.target(), 50.0);
        // Superseded callback is released; only the new one remains.
        assert_eq!(scheduler.pending(), 1);

        clock.advance(1.0);
        let next = value.tick(clock.now_ms());
        assert!(next < 87.5 && next > 80.0, "jumped to {}", next);

        clock.set(750.0 + 750.0);
        let later = value.tick(clock.now_ms());
        assert!(approx_eq!(f64, later, 87.5 + (50.0 - 87.5) * 0.875, epsilon = 1e-9));

        clock.set(750.0 + 1500.0);
        assert_eq!(value.tick(clock.now_ms()), 50.0);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_retarget_before_first_tick_uses_sampled_value() {
        let scheduler = FrameScheduler::new();
        let mut value = AnimatedValue::new(0.0, 1000.0);
        value.set_target(100.0, 0.0, &scheduler);
        // No tick in between: the new transition still starts from the
        // interpolated value at the time of the change.
        value.set_target(0.0, 500.0, &scheduler);
        assert!(approx_eq!(f64, value.value(), 87.5, epsilon = 1e-9));
    }

    #[test]
    fn test_same_target_does_not_restart() {
        let scheduler = FrameScheduler::new();
        let mut value = AnimatedValue::new(0.0, 1000.0);
        value.set_target(10.0, 0.0, &scheduler);
        value.set_target(10.0, 900.0, &scheduler);
        assert_eq!(value.tick(1000.0), 10.0);

        value.set_target(10.0, 2000.0, &scheduler);
        assert!(!value.is_animating());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_drop_releases_callback() {
        let scheduler = FrameScheduler::new();
        let mut value = AnimatedValue::new(0.0, 1000.0);
        value.set_target(10.0, 0.0, &scheduler);
        assert!(scheduler.has_pending());
        drop(value);
        assert!(!scheduler.has_pending());
    }

    #[test]
    fn test_cancel_and_snap() {
        let scheduler = FrameScheduler::new();
        let mut value = AnimatedValue::new(0.0, 1000.0);
        value.set_target(10.0, 0.0, &scheduler);
        value.tick(500.0);
        let frozen = value.value();
        value.cancel();
        assert_eq!(value.tick(2000.0), frozen);
        assert_eq!(scheduler.pending(), 0);

        value.snap_to(42.0);
        assert_eq!(value.value(), 42.0);
    }

    #[test]
    fn test_zero_duration_and_bad_input() {
        let scheduler = FrameScheduler::new();
        let mut value = AnimatedValue::new(0.0, 0.0);
        value.set_target(7.0, 0.0, &scheduler);
        assert_eq!(value.value(), 7.0);
        assert!(!scheduler.has_pending());

        value.set_target(f64::NAN, 0.0, &scheduler);
        assert_eq!(value.value(), 7.0);

        let value = AnimatedValue::new(f64::INFINITY, f64::NAN);
        assert_eq!(value.value(), 0.0);
    }
}
