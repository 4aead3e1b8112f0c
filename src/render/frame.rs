use std::path::Path;

use anyhow::Context;

use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};

/// One rendered frame, row-major RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn transparent(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0; canvas.byte_len()],
            premultiplied: false,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data
            .get(i..i + 4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of this frame.
    pub fn to_straight(&self) -> Self {
        let mut out = self.clone();
        if out.premultiplied {
            super::composite::unpremultiply_in_place(&mut out.data);
            out.premultiplied = false;
        }
        out
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn save_png(&self, path: &Path) -> ReelResult<()> {
        let straight = self.to_straight();
        let img = image::RgbaImage::from_raw(straight.width, straight.height, straight.data)
            .ok_or_else(|| ReelError::render("frame buffer does not match its dimensions"))?;
        img.save(path)
            .with_context(|| format!("write frame \"{}\"", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
