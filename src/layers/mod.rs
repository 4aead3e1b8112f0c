//! Per-layer-type layout. Every renderer is prepared once per clip and then maps a progress value
//! to a fresh list of drawables.

pub mod captions;
pub mod fill;
pub mod gradient;
pub mod image;
pub mod review_card;
pub mod title_bar;

use crate::config::EngineContext;
use crate::draw::drawable::{Drawable, TextBox};
use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::ReelResult;
use crate::layout::text::{TextShaper, TextStyle};
use crate::scene::model::Layer;

/// Text measurement for one render call.
pub struct TextCx<'a> {
    pub shaper: &'a mut dyn TextShaper,
    pub engine: &'a EngineContext,
}

impl TextCx<'_> {
    /// Measure `text` into a box at the origin. The box is `wrap_width` wide when given,
    /// otherwise as wide as its longest line.
    pub fn text_box(
        &mut self,
        text: &str,
        style: TextStyle,
        wrap_width: Option<f64>,
        color: Rgba8,
    ) -> ReelResult<TextBox> {
        let text = self.engine.prepare_text(text).into_owned();
        let wrap_width = wrap_width.map(|w| w.max(1.0));
        let metrics = self.shaper.measure(&text, &style, wrap_width)?;
        Ok(TextBox {
            text,
            style,
            origin: Point::ORIGIN,
            box_width: wrap_width.unwrap_or(metrics.width),
            wrap: wrap_width.is_some(),
            metrics,
            color,
            opacity: 1.0,
            scale: 1.0,
        })
    }
}

/// One layer's renderer with its per-clip setup done.
#[derive(Debug)]
pub enum LayerRenderer {
    Image(image::ImageLayer),
    Review(review_card::ReviewCard),
    TitleBar(title_bar::TitleBar),
    Gradient(gradient::GradientLayer),
    Subtitle(captions::Subtitle),
    Title(captions::Title),
    NewsTitle(captions::NewsTitle),
    Fill(fill::FillColor),
}

impl LayerRenderer {
    /// Resolve defaults, decode assets and pick random colors. `slot` distinguishes sibling
    /// layers when the engine is seeded.
    pub fn prepare(
        canvas: Canvas,
        layer: &Layer,
        engine: &EngineContext,
        slot: u64,
    ) -> ReelResult<Self> {
        layer.validate()?;
        let mut rng = engine.source_rng(slot);
        let config = engine.config();
        let palette = &config.palette;
        Ok(match layer {
            Layer::Image(p) => Self::Image(image::ImageLayer::prepare(canvas, p)?),
            Layer::Review(p) => {
                Self::Review(review_card::ReviewCard::prepare(canvas, p, &config.review)?)
            }
            Layer::TitleBar(p) => {
                Self::TitleBar(title_bar::TitleBar::new(canvas, p, config.title_bar))
            }
            Layer::RadialGradient(p) => Self::Gradient(gradient::GradientLayer::prepare(
                canvas,
                gradient::GradientKind::Radial,
                p,
                palette,
                &mut rng,
            )?),
            Layer::LinearGradient(p) => Self::Gradient(gradient::GradientLayer::prepare(
                canvas,
                gradient::GradientKind::Linear,
                p,
                palette,
                &mut rng,
            )?),
            Layer::Subtitle(p) => Self::Subtitle(captions::Subtitle::new(canvas, p.clone())),
            Layer::Title(p) => Self::Title(captions::Title::new(canvas, p.clone())),
            Layer::NewsTitle(p) => Self::NewsTitle(captions::NewsTitle::new(canvas, p.clone())),
            Layer::FillColor(p) => {
                Self::Fill(fill::FillColor::prepare(canvas, p, palette, &mut rng)?)
            }
        })
    }

    pub fn render(&self, progress: f64, tx: &mut TextCx<'_>) -> ReelResult<Vec<Drawable>> {
        match self {
            Self::Image(l) => Ok(l.render(progress)),
            Self::Review(l) => Ok(l.layout(progress, tx)?.into_drawables()),
            Self::TitleBar(l) => l.render(tx),
            Self::Gradient(l) => Ok(l.render(progress)),
            Self::Subtitle(l) => l.render(progress, tx),
            Self::Title(l) => l.render(progress, tx),
            Self::NewsTitle(l) => l.render(progress, tx),
            Self::Fill(l) => Ok(l.render()),
        }
    }
}
