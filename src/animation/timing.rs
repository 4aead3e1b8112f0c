use crate::animation::ease::{ease_in_out_cubic, ease_out_expo};
use crate::foundation::math::clamp01;

/// Local progress inside `[start, start + duration]`, clamped to `[0, 1]`.
pub fn window(progress: f64, start: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return if progress >= start { 1.0 } else { 0.0 };
    }
    clamp01((progress - start) / duration)
}

/// Caption-style sub-timeline: starts at `delay` and runs `speed` times faster than the layer.
pub fn delayed(progress: f64, delay: f64, speed: f64) -> f64 {
    clamp01((progress - delay) * speed)
}

/// Three-phase slide used by cards that enter from the right and leave to the left.
///
/// The returned value is `0` before the entrance, `0.5` while the card rests, and `1` once it has
/// left. Outside the two motion windows the value holds its nearest computed position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlideInOut {
    pub start_in: f64,
    pub duration: f64,
    pub start_out: f64,
}

impl SlideInOut {
    pub const REVIEW_CARD: Self = Self {
        start_in: 0.2,
        duration: 0.06,
        start_out: 0.8,
    };

    pub fn eased(self, progress: f64) -> f64 {
        if progress < self.start_out {
            ease_out_expo(window(progress, self.start_in, self.duration)) / 2.0
        } else {
            0.5 + ease_in_out_cubic(window(progress, self.start_out, self.duration)) / 2.0
        }
    }

    /// Horizontal offset for a card of `travel` width: `+travel` off-screen right, `0` centered,
    /// `-travel` off-screen left.
    pub fn offset(self, progress: f64, travel: f64) -> f64 {
        travel - (travel * 2.0) * self.eased(progress)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timing.rs"]
mod tests;
