//! Progress smoothing and easing shared by every particle group.

use std::f32::consts::PI;

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cubic ease-in-out: `4t^3` below the midpoint, mirrored above it.
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Transient scale bulge: zero at both ends of a transition, `TRANSITION_POP` at its midpoint.
#[inline]
pub fn transition_pop(eased: f32) -> f32 {
    (eased * PI).sin() * crate::constants::TRANSITION_POP
}

/// Scale envelope applied to a particle's rest scale during a transition.
#[inline]
pub fn transition_scale(eased: f32) -> f32 {
    use crate::constants::{TRANSITION_SCALE_FLOOR, TRANSITION_SCALE_SPAN};
    TRANSITION_SCALE_FLOOR + TRANSITION_SCALE_SPAN * eased + transition_pop(eased)
}

/// Exponentially smoothed progress toward a 0/1 target.
///
/// Each step moves a `delta * rate` fraction of the remaining distance, so the
/// value relaxes asymptotically and can reverse at any point. The fraction is
/// capped at 1 so a long frame lands on the target instead of overshooting.
#[derive(Clone, Copy, Debug)]
pub struct Transition {
    progress: f32,
    rate: f32,
}

impl Transition {
    pub fn new(rate: f32) -> Self {
        Self {
            progress: 0.0,
            rate,
        }
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn rate(&self) -> f32 {
        self.rate
    }

    #[inline]
    pub fn eased(&self) -> f32 {
        ease_in_out_cubic(self.progress)
    }

    /// Step toward `target` and return the eased progress.
    pub fn advance(&mut self, delta_sec: f32, target: f32) -> f32 {
        let k = (delta_sec * self.rate).clamp(0.0, 1.0);
        self.progress = lerp(self.progress, target, k);
        self.eased()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_hits_fixed_points() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
    }

    #[test]
    fn ease_is_symmetric_about_midpoint() {
        for i in 0..=100 {
            let x = i as f32 / 100.0;
            let sum = ease_in_out_cubic(x) + ease_in_out_cubic(1.0 - x);
            assert!((sum - 1.0).abs() < 1e-5, "x={x} sum={sum}");
        }
    }

    #[test]
    fn pop_vanishes_at_both_ends() {
        assert!(transition_pop(0.0).abs() < 1e-6);
        assert!(transition_pop(1.0).abs() < 1e-6);
        assert!((transition_pop(0.5) - 0.2).abs() < 1e-6);
        assert!((transition_scale(1.0) - 1.0).abs() < 1e-5);
        assert!((transition_scale(0.0) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn reverses_mid_transition() {
        let mut tr = Transition::new(1.2);
        for _ in 0..30 {
            tr.advance(1.0 / 60.0, 1.0);
        }
        let peak = tr.progress();
        assert!(peak > 0.0 && peak < 1.0);
        tr.advance(1.0 / 60.0, 0.0);
        assert!(tr.progress() < peak);
    }

    #[test]
    fn long_frame_lands_without_overshoot() {
        let mut tr = Transition::new(1.5);
        tr.advance(5.0, 1.0);
        assert_eq!(tr.progress(), 1.0);
    }
}
