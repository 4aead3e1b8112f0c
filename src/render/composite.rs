use crate::foundation::core::Rect;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Source-over of one premultiplied pixel, with `opacity` scaling the source first.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }
    let op = u16::from(unit_to_u8(opacity));
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }
    let inv = 255 - u16::from(sa);

    let mut out = [0u8; 4];
    for i in 0..3 {
        let s = mul_div255_u8(u16::from(src[i]), op);
        out[i] = s.saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> ReelResult<()> {
    check_same_len(dst.len(), src.len(), "over_in_place")?;
    if opacity <= 0.0 {
        return Ok(());
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Scale every pixel by how much of it lies inside `clip`, so fractional clip edges stay smooth.
pub fn clip_to_rect_in_place(
    data: &mut [u8],
    width: u32,
    height: u32,
    clip: Rect,
) -> ReelResult<()> {
    let expected = (width as usize) * (height as usize) * 4;
    check_same_len(data.len(), expected, "clip_to_rect_in_place")?;
    if width == 0 {
        return Ok(());
    }

    let column_cover: Vec<f64> = (0..width)
        .map(|x| span_cover(f64::from(x), clip.x0, clip.x1))
        .collect();
    for (y, row) in data.chunks_exact_mut(width as usize * 4).enumerate() {
        let row_cover = span_cover(y as f64, clip.y0, clip.y1);
        if row_cover >= 1.0 && column_cover.iter().all(|c| *c >= 1.0) {
            continue;
        }
        for (px, cx) in row.chunks_exact_mut(4).zip(&column_cover) {
            let cover = row_cover * cx;
            if cover >= 1.0 {
                continue;
            }
            let k = u16::from(unit_to_u8(cover as f32));
            for c in px.iter_mut() {
                *c = mul_div255_u8(u16::from(*c), k);
            }
        }
    }
    Ok(())
}

/// Convert premultiplied RGBA8 to straight alpha.
pub fn unpremultiply_in_place(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

/// Overlap of the unit pixel span `[p, p + 1)` with `[lo, hi)`.
fn span_cover(p: f64, lo: f64, hi: f64) -> f64 {
    ((p + 1.0).min(hi) - p.max(lo)).clamp(0.0, 1.0)
}

fn unit_to_u8(v: f32) -> u8 {
    ((v * 255.0).round() as i32).clamp(0, 255) as u8
}

fn check_same_len(a: usize, b: usize, what: &str) -> ReelResult<()> {
    if a != b || !a.is_multiple_of(4) {
        return Err(ReelError::render(format!(
            "{what} expects equal-length rgba8 buffers ({a} vs {b} bytes)"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
