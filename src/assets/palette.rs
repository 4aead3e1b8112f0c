use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{ReelError, ReelResult};

const COLORS: &[Rgba8] = &[
    Rgba8::rgb(0xef, 0xdf, 0xbb),
    Rgba8::rgb(0xe5, 0x3d, 0x5c),
    Rgba8::rgb(0x2e, 0x4a, 0x62),
    Rgba8::rgb(0x3c, 0xa5, 0x5c),
    Rgba8::rgb(0xf2, 0x99, 0x4a),
    Rgba8::rgb(0x6a, 0x3d, 0x9a),
    Rgba8::rgb(0x00, 0x8c, 0xba),
    Rgba8::rgb(0xff, 0xc1, 0x07),
    Rgba8::rgb(0x26, 0x32, 0x38),
    Rgba8::rgb(0xd0, 0x2a, 0x42),
];

const GRADIENTS: &[[Rgba8; 2]] = &[
    [Rgba8::rgb(0xff, 0x9a, 0xac), Rgba8::rgb(0xff, 0xa8, 0x75)],
    [Rgba8::rgb(0xcc, 0x2b, 0x5e), Rgba8::rgb(0x75, 0x3a, 0x88)],
    [Rgba8::rgb(0x42, 0x27, 0x5a), Rgba8::rgb(0x73, 0x4b, 0x6d)],
    [Rgba8::rgb(0xbd, 0xc3, 0xc7), Rgba8::rgb(0x2c, 0x3e, 0x50)],
    [Rgba8::rgb(0xde, 0x62, 0x62), Rgba8::rgb(0xff, 0xb8, 0x8c)],
    [Rgba8::rgb(0x11, 0x99, 0x8e), Rgba8::rgb(0x38, 0xef, 0x7d)],
    [Rgba8::rgb(0xf0, 0xc2, 0x7b), Rgba8::rgb(0x4b, 0x12, 0x48)],
    [Rgba8::rgb(0x06, 0xbe, 0xb6), Rgba8::rgb(0x48, 0xb1, 0xbf)],
];

/// Built-in flat color pool.
pub fn default_colors() -> Vec<Rgba8> {
    COLORS.to_vec()
}

/// Built-in two-stop gradient pool.
pub fn default_gradients() -> Vec<[Rgba8; 2]> {
    GRADIENTS.to_vec()
}

/// RNG for one frame source. A configured seed makes picks reproducible; `slot` keeps sibling
/// layers of one clip from all drawing the same value.
pub fn source_rng(seed: Option<u64>, slot: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed ^ slot.wrapping_mul(0x9e37_79b9_7f4a_7c15)),
        None => StdRng::from_entropy(),
    }
}

pub fn pick_color<R: Rng + ?Sized>(pool: &[Rgba8], rng: &mut R) -> ReelResult<Rgba8> {
    pool.choose(rng)
        .copied()
        .ok_or_else(|| ReelError::validation("palette.colors is empty"))
}

pub fn pick_gradient<R: Rng + ?Sized>(pool: &[[Rgba8; 2]], rng: &mut R) -> ReelResult<[Rgba8; 2]> {
    pool.choose(rng)
        .copied()
        .ok_or_else(|| ReelError::validation("palette.gradients is empty"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/palette.rs"]
mod tests;
