use crate::foundation::error::{ReelError, ReelResult};

/// Normalized 1-D gaussian weights in 16.16 fixed point; the taps always sum to exactly `1 << 16`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GaussianKernel {
    taps: Vec<u32>,
}

impl GaussianKernel {
    const ONE: i64 = 1 << 16;

    pub fn new(radius: u32, sigma: f32) -> ReelResult<Self> {
        if radius == 0 {
            return Ok(Self {
                taps: vec![Self::ONE as u32],
            });
        }
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(ReelError::validation("blur sigma must be finite and > 0"));
        }

        let r = radius as i32;
        let two_sigma_sq = 2.0 * f64::from(sigma).powi(2);
        let raw = (-r..=r)
            .map(|i| (-(f64::from(i).powi(2)) / two_sigma_sq).exp())
            .collect::<Vec<_>>();
        let total: f64 = raw.iter().sum();
        if total <= 0.0 {
            return Err(ReelError::render("gaussian kernel collapsed to zero"));
        }

        let one = Self::ONE as f64;
        let mut taps = raw
            .iter()
            .map(|w| (w / total * one).round().clamp(0.0, one) as u32)
            .collect::<Vec<_>>();
        // Rounding drift goes into the center tap.
        let drift = Self::ONE - taps.iter().map(|&t| i64::from(t)).sum::<i64>();
        let mid = taps.len() / 2;
        taps[mid] = (i64::from(taps[mid]) + drift).clamp(0, Self::ONE) as u32;

        Ok(Self { taps })
    }

    pub fn radius(&self) -> usize {
        self.taps.len() / 2
    }

    pub fn taps(&self) -> &[u32] {
        &self.taps
    }
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Separable gaussian blur over a premultiplied RGBA8 buffer with clamped edges.
pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> ReelResult<Vec<u8>> {
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| ReelError::render("blur buffer size overflow"))?;
    if src.len() != len {
        return Err(ReelError::render(format!(
            "blur source has {} bytes, expected {len}",
            src.len()
        )));
    }
    if radius == 0 || len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = GaussianKernel::new(radius, sigma)?;
    let mut tmp = vec![0u8; len];
    let mut out = vec![0u8; len];
    let (w, h) = (width as usize, height as usize);
    convolve(src, &mut tmp, w, h, &kernel, Axis::Horizontal);
    convolve(&tmp, &mut out, w, h, &kernel, Axis::Vertical);
    Ok(out)
}

fn convolve(src: &[u8], dst: &mut [u8], w: usize, h: usize, kernel: &GaussianKernel, axis: Axis) {
    let r = kernel.radius() as isize;
    let (limit, stride) = match axis {
        Axis::Horizontal => (w as isize, 1usize),
        Axis::Vertical => (h as isize, w),
    };

    for y in 0..h {
        for x in 0..w {
            let along = match axis {
                Axis::Horizontal => x as isize,
                Axis::Vertical => y as isize,
            };
            let base = y * w + x;
            let mut acc = [0u64; 4];
            for (k, &weight) in kernel.taps().iter().enumerate() {
                let s = (along + k as isize - r).clamp(0, limit - 1);
                // Rebase the sample onto the same row/column as `base`.
                let idx = (base as isize + (s - along) * stride as isize) as usize * 4;
                for c in 0..4 {
                    acc[c] += u64::from(weight) * u64::from(src[idx + c]);
                }
            }
            let o = base * 4;
            for c in 0..4 {
                dst[o + c] = ((acc[c] + (1 << 15)) >> 16).min(255) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/blur.rs"]
mod tests;
