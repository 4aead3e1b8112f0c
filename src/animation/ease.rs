/// Easing functions used to map normalized animation progress.
///
/// Every variant maps `[0, 1]` onto `[0, 1]`, is non-decreasing, and satisfies
/// `f(0) == 0` and `f(1) == 1`. Inputs outside the unit interval are clamped first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    /// Cubic ease-in/out.
    InOutCubic,
    /// Exponential ease-out (`1 - 2^(-10t)`, pinned to 1 at `t == 1`).
    OutExpo,
}

impl Ease {
    pub const ALL: [Self; 2] = [Self::InOutCubic, Self::OutExpo];

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = crate::foundation::math::clamp01(t);
        match self {
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::OutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    // 2^0 == 1 at t == 0, so the curve starts exactly at zero.
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
        }
    }
}

/// Exponential ease-out.
pub fn ease_out_expo(t: f64) -> f64 {
    Ease::OutExpo.apply(t)
}

/// Cubic ease-in/out.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    Ease::InOutCubic.apply(t)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
