use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::assets::blur::blur_rgba8_premul;
use crate::foundation::error::{ReelError, ReelResult};

/// Decoded raster image in premultiplied RGBA8, shared between the frames of one clip.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Build from premultiplied pixels, checking the buffer length against the dimensions.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> ReelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReelError::asset("image has zero width or height"));
        }
        let expected = (width as usize) * (height as usize) * 4;
        if rgba8_premul.len() != expected {
            return Err(ReelError::asset(format!(
                "image buffer has {} bytes, expected {expected}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    pub fn width_f64(&self) -> f64 {
        f64::from(self.width)
    }

    pub fn height_f64(&self) -> f64 {
        f64::from(self.height)
    }
}

/// Decode any format supported by `image` and premultiply alpha.
pub fn decode_image(bytes: &[u8]) -> ReelResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| ReelError::asset(format!("decode image: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    PreparedImage::from_premul(width, height, rgba8_premul)
}

/// Read and decode an image file. Missing and corrupt files are both asset errors.
#[tracing::instrument(level = "debug")]
pub fn load_image(path: &Path) -> ReelResult<PreparedImage> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read image \"{}\"", path.display()))
        .map_err(|e| ReelError::asset(format!("{e:#}")))?;
    let img = decode_image(&bytes)
        .map_err(|e| ReelError::asset(format!("\"{}\": {e}", path.display())))?;
    tracing::debug!(width = img.width, height = img.height, "decoded image");
    Ok(img)
}

/// Letterbox backdrop: the image shrunk to `scale` of its size (at least 1x1) and softened.
///
/// Stretching the tiny result back over the container is what produces the smeared look; the blur
/// only takes the edge off the upscaled texels.
pub fn backdrop_image(src: &PreparedImage, scale: f64) -> ReelResult<PreparedImage> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(ReelError::validation(
            "backdrop scale must be finite and > 0",
        ));
    }
    let w = ((src.width_f64() * scale).round() as u32).max(1);
    let h = ((src.height_f64() * scale).round() as u32).max(1);

    let full = image::RgbaImage::from_raw(src.width, src.height, src.rgba8_premul.to_vec())
        .ok_or_else(|| ReelError::asset("image buffer does not match its dimensions"))?;
    // Premultiplied samples resize correctly with a linear filter.
    let small = image::imageops::resize(&full, w, h, image::imageops::FilterType::Triangle);

    let radius = (w.min(h) / 4).clamp(1, 8);
    let blurred = blur_rgba8_premul(small.as_raw(), w, h, radius, radius as f32 / 2.0)?;
    PreparedImage::from_premul(w, h, blurred)
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((u16::from(px[0]) * a + 127) / 255) as u8;
        px[1] = ((u16::from(px[1]) * a + 127) / 255) as u8;
        px[2] = ((u16::from(px[2]) * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
