use crate::config::TitleBarConfig;
use crate::draw::drawable::Drawable;
use crate::foundation::core::{Canvas, Point, Rect};
use crate::foundation::error::ReelResult;
use crate::layers::TextCx;
use crate::layout::anchor::Anchor;
use crate::layout::text::{TextAlign, TextStyle, char_count, stepped_font_size};
use crate::scene::model::TitleBarParams;

/// Solid bar across the top of the frame with centered bold text.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleBar {
    canvas: Canvas,
    params: TitleBarParams,
    cfg: TitleBarConfig,
}

impl TitleBar {
    pub fn new(canvas: Canvas, params: &TitleBarParams, cfg: TitleBarConfig) -> Self {
        if params.text.is_empty() {
            tracing::warn!("title bar has no text; drawing the bar only");
        }
        Self {
            canvas,
            params: params.clone(),
            cfg,
        }
    }

    pub fn font_size(&self) -> f64 {
        stepped_font_size(
            self.canvas.width_f64() / 14.0,
            char_count(&self.params.text),
            self.cfg.shrink_after_chars,
            self.cfg.shrink_step_px,
        )
    }

    /// The bar overdraws the top-left edges by one pixel.
    pub fn bar_rect(&self) -> Rect {
        Rect::new(-1.0, -1.0, self.canvas.width_f64(), self.params.bar_height)
    }

    pub fn render(&self, tx: &mut TextCx<'_>) -> ReelResult<Vec<Drawable>> {
        let mut out = vec![Drawable::solid_rect(self.bar_rect(), self.params.bar_color)];
        if self.params.text.is_empty() {
            return Ok(out);
        }

        let w = self.canvas.width_f64();
        let padding = 0.04 * self.params.bar_height;
        let text = tx
            .text_box(
                &self.params.text,
                TextStyle::new(self.font_size())
                    .bold()
                    .align(TextAlign::Center),
                Some(w - padding * 2.0),
                self.params.text_color,
            )?
            .placed(
                Anchor::CENTER,
                Point::new(w / 2.0, self.params.bar_height / 2.0),
            );
        out.push(Drawable::Text(text));
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/title_bar.rs"]
mod tests;
