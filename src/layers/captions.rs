use crate::animation::ease::ease_out_expo;
use crate::animation::timing::delayed;
use crate::draw::drawable::{Drawable, Paint, RectShape};
use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgba8};
use crate::foundation::error::ReelResult;
use crate::layers::TextCx;
use crate::layout::anchor::{Anchor, place};
use crate::layout::text::{TextAlign, TextStyle};
use crate::scene::model::{
    CaptionParams, CaptionTiming, NewsTitleParams, TitleParams, TitlePosition,
};

fn eased(progress: f64, timing: CaptionTiming, delay: f64, speed: f64) -> f64 {
    let t = delayed(progress, timing.delay + delay, timing.speed * speed);
    ease_out_expo(t)
}

fn faded_rect(rect: Rect, color: Rgba8, opacity: f64) -> Drawable {
    Drawable::Rect(RectShape {
        rect,
        paint: Paint::Solid { color },
        corner_radius: 0.0,
        opacity,
        shadow: None,
        transform: Affine::IDENTITY,
    })
}

/// Bottom caption on a translucent band, fading in while drifting right by one padding.
#[derive(Clone, Debug, PartialEq)]
pub struct Subtitle {
    canvas: Canvas,
    params: CaptionParams,
}

impl Subtitle {
    pub fn new(canvas: Canvas, params: CaptionParams) -> Self {
        Self { canvas, params }
    }

    pub fn render(&self, progress: f64, tx: &mut TextCx<'_>) -> ReelResult<Vec<Drawable>> {
        let (w, h) = (self.canvas.width_f64(), self.canvas.height_f64());
        let e = eased(progress, self.params.timing, 0.0, 1.0);
        let min = self.canvas.min_side();
        let padding = 0.05 * min;

        let text = tx
            .text_box(
                &self.params.text,
                TextStyle::new(min / 20.0),
                Some(w - padding * 2.0),
                self.params.text_color,
            )?
            .with_opacity(e)
            .placed(
                Anchor::BOTTOM_CENTER,
                Point::new(w / 2.0 + (e - 1.0) * padding, h - padding),
            );

        let band_height = text.rect().height() + padding * 2.0;
        let band = place(Anchor::BOTTOM_LEFT, 0.0, h, w, band_height);

        Ok(vec![
            faded_rect(band, self.params.background_color, e),
            Drawable::Text(text),
        ])
    }
}

/// Large centered title that slowly grows and fades in.
#[derive(Clone, Debug, PartialEq)]
pub struct Title {
    canvas: Canvas,
    params: TitleParams,
}

impl Title {
    pub fn new(canvas: Canvas, params: TitleParams) -> Self {
        Self { canvas, params }
    }

    pub fn font_size(&self) -> f64 {
        (self.canvas.min_side() * 0.1).round()
    }

    /// `1 + 0.2·p`, kept to four decimals.
    pub fn scale(progress: f64) -> f64 {
        ((1.0 + progress * 0.2) * 10_000.0).round() / 10_000.0
    }

    pub fn render(&self, progress: f64, tx: &mut TextCx<'_>) -> ReelResult<Vec<Drawable>> {
        let (w, h) = (self.canvas.width_f64(), self.canvas.height_f64());
        let (anchor, top) = match self.params.position {
            TitlePosition::Top => (Anchor::TOP_CENTER, h * 0.05),
            TitlePosition::Center => (Anchor::CENTER, h / 2.0),
            TitlePosition::Bottom => (Anchor::BOTTOM_CENTER, h),
        };

        let text = tx
            .text_box(
                &self.params.text,
                TextStyle::new(self.font_size()).align(TextAlign::Center),
                Some(w * 0.8),
                self.params.text_color,
            )?
            .with_opacity(eased(progress, self.params.timing, 0.0, 1.0))
            .with_scale(Self::scale(progress))
            .placed(anchor, Point::new(w / 2.0, top));
        Ok(vec![Drawable::Text(text)])
    }
}

/// Breaking-news style title: a colored bar sweeps in, then the text, then the text fades up.
#[derive(Clone, Debug, PartialEq)]
pub struct NewsTitle {
    canvas: Canvas,
    params: NewsTitleParams,
}

/// Progress of the three staggered news-title timelines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NewsTimelines {
    pub background: f64,
    pub text: f64,
    pub text_opacity: f64,
}

impl NewsTitle {
    pub fn new(canvas: Canvas, params: NewsTitleParams) -> Self {
        Self { canvas, params }
    }

    pub fn timelines(&self, progress: f64) -> NewsTimelines {
        let t = self.params.timing;
        NewsTimelines {
            background: eased(progress, t, 0.0, 3.0),
            text: eased(progress, t, 0.02, 4.0),
            text_opacity: eased(progress, t, 0.07, 4.0),
        }
    }

    pub fn render(&self, progress: f64, tx: &mut TextCx<'_>) -> ReelResult<Vec<Drawable>> {
        let (w, h) = (self.canvas.width_f64(), self.canvas.height_f64());
        let min = self.canvas.min_side();
        let tl = self.timelines(progress);

        let top = h * 0.08;
        let pad_v = 0.07 * min;
        let pad_h = 0.03 * min;

        let text = tx
            .text_box(
                &self.params.text,
                TextStyle::new((min * 0.05).round()).letter_spacing(w * 0.1 / 1000.0),
                None,
                self.params.text_color,
            )?
            .with_opacity(tl.text_opacity)
            .placed(
                Anchor::TOP_LEFT,
                Point::new(pad_v + (tl.text - 1.0) * w, top),
            );

        let r = text.rect();
        let bg_width = r.width() + pad_v * 2.0;
        let bg = place(
            Anchor::TOP_LEFT,
            (tl.background - 1.0) * bg_width,
            top - pad_h,
            bg_width,
            r.height() + pad_h * 2.0,
        );

        Ok(vec![
            faded_rect(bg, self.params.background_color, 1.0),
            Drawable::Text(text),
        ])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/captions.rs"]
mod tests;
