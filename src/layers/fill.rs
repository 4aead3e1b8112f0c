use rand::Rng;

use crate::assets::palette::pick_color;
use crate::config::PaletteConfig;
use crate::draw::drawable::Drawable;
use crate::foundation::core::{Canvas, Rect, Rgba8};
use crate::foundation::error::ReelResult;
use crate::scene::model::FillColorParams;

/// Full-frame flat color.
#[derive(Clone, Debug, PartialEq)]
pub struct FillColor {
    canvas: Canvas,
    color: Rgba8,
}

impl FillColor {
    pub fn prepare<R: Rng + ?Sized>(
        canvas: Canvas,
        params: &FillColorParams,
        palette: &PaletteConfig,
        rng: &mut R,
    ) -> ReelResult<Self> {
        let color = match params.color {
            Some(c) => c,
            None => {
                let c = pick_color(&palette.colors, rng)?;
                tracing::debug!(?c, "fill color picked from palette");
                c
            }
        };
        Ok(Self { canvas, color })
    }

    pub fn color(&self) -> Rgba8 {
        self.color
    }

    pub fn render(&self) -> Vec<Drawable> {
        let frame = Rect::new(0.0, 0.0, self.canvas.width_f64(), self.canvas.height_f64());
        vec![Drawable::solid_rect(frame, self.color)]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/fill.rs"]
mod tests;
