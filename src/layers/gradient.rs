use rand::Rng;

use crate::assets::palette::pick_gradient;
use crate::config::PaletteConfig;
use crate::draw::drawable::{Drawable, Paint, RectShape};
use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgba8};
use crate::foundation::error::ReelResult;
use crate::scene::model::GradientParams;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradientKind {
    Radial,
    Linear,
}

/// Two-color gradient over an oversized rectangle that leaves room to rotate.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientLayer {
    canvas: Canvas,
    kind: GradientKind,
    colors: [Rgba8; 2],
}

impl GradientLayer {
    /// Max rotation of the linear variant at progress 1, in degrees.
    pub const MAX_ROTATION_DEG: f64 = 30.0;

    pub fn prepare<R: Rng + ?Sized>(
        canvas: Canvas,
        kind: GradientKind,
        params: &GradientParams,
        palette: &PaletteConfig,
        rng: &mut R,
    ) -> ReelResult<Self> {
        let colors = match params.explicit_pair() {
            Some(pair) => pair,
            None => {
                let pair = pick_gradient(&palette.gradients, rng)?;
                tracing::debug!(?kind, ?pair, "gradient colors picked from palette");
                pair
            }
        };
        Ok(Self {
            canvas,
            kind,
            colors,
        })
    }

    pub fn colors(&self) -> [Rgba8; 2] {
        self.colors
    }

    /// Twice the frame in each direction, centered on it.
    fn oversized_rect(&self) -> Rect {
        let (w, h) = (self.canvas.width_f64(), self.canvas.height_f64());
        Rect::new(-w / 2.0, -h / 2.0, w * 1.5, h * 1.5)
    }

    pub fn render(&self, progress: f64) -> Vec<Drawable> {
        let rect = self.oversized_rect();
        let (w, h) = (self.canvas.width_f64(), self.canvas.height_f64());
        let center = rect.center();

        let (paint, transform) = match self.kind {
            GradientKind::Radial => (
                Paint::RadialGradient {
                    center,
                    radius: w.max(h) * (1.0 + progress) * 0.6,
                    stops: self.colors,
                },
                Affine::IDENTITY,
            ),
            GradientKind::Linear => (
                Paint::LinearGradient {
                    start: rect.origin(),
                    end: Point::new(rect.x0 + w, rect.y0 + h),
                    stops: self.colors,
                },
                Affine::rotate_about(
                    (progress * Self::MAX_ROTATION_DEG).to_radians(),
                    center,
                ),
            ),
        };

        vec![Drawable::Rect(RectShape {
            rect,
            paint,
            corner_radius: 0.0,
            opacity: 1.0,
            shadow: None,
            transform,
        })]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/gradient.rs"]
mod tests;
