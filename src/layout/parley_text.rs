use std::borrow::Cow;

use crate::assets::fonts::FontBook;
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::text::{FontWeight, TextMetrics, TextShaper, TextStyle};

/// Parley contexts with the engine's fonts registered once.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    families: Vec<(FontWeight, String)>,
}

impl TextLayoutEngine {
    pub fn new(fonts: &FontBook) -> ReelResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let mut families = Vec::new();
        for (weight, face) in fonts.faces() {
            let registered = font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(face.bytes().to_vec()), None);
            let family_id = registered.first().map(|(id, _)| *id).ok_or_else(|| {
                ReelError::asset(format!("{weight:?} font contains no usable font family"))
            })?;
            let name = font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| ReelError::asset("registered font family has no name"))?
                .to_string();
            families.push((weight, name));
        }
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            families,
        })
    }

    pub fn has_fonts(&self) -> bool {
        !self.families.is_empty()
    }

    fn family(&self, weight: FontWeight) -> ReelResult<&str> {
        self.families
            .iter()
            .find(|(w, _)| *w == weight)
            .or_else(|| self.families.first())
            .map(|(_, name)| name.as_str())
            .ok_or_else(|| {
                ReelError::render("text needs a font; set fonts.regular or fonts.bold")
            })
    }

    /// Shape and break `text`. Lines are always start-aligned; centering is applied per line
    /// when drawing.
    pub fn layout(
        &mut self,
        text: &str,
        style: &TextStyle,
        max_width: Option<f64>,
    ) -> ReelResult<parley::Layout<()>> {
        style.validate()?;
        let family = self.family(style.weight)?.to_string();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(
            style.font_size as f32,
        ));
        if style.weight == FontWeight::Bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }
        if style.letter_spacing_em != 0.0 {
            builder.push_default(parley::style::StyleProperty::LetterSpacing(
                (style.letter_spacing_em * style.font_size) as f32,
            ));
        }

        let mut layout: parley::Layout<()> = builder.build(text);
        let width = max_width.map(|w| w as f32);
        layout.break_all_lines(width);
        layout.align(
            width,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }
}

pub fn layout_metrics(layout: &parley::Layout<()>) -> TextMetrics {
    let mut width = 0.0f64;
    let mut height = 0.0f64;
    let mut lines = 0usize;
    for line in layout.lines() {
        let m = line.metrics();
        width = width.max(f64::from(m.advance));
        height += f64::from(m.ascent + m.descent + m.leading);
        lines += 1;
    }
    TextMetrics {
        width,
        height,
        lines,
    }
}

/// [`TextShaper`] backed by real font shaping.
pub struct ParleyShaper {
    engine: TextLayoutEngine,
}

impl ParleyShaper {
    pub fn new(fonts: &FontBook) -> ReelResult<Self> {
        Ok(Self {
            engine: TextLayoutEngine::new(fonts)?,
        })
    }
}

impl TextShaper for ParleyShaper {
    fn measure(
        &mut self,
        text: &str,
        style: &TextStyle,
        max_width: Option<f64>,
    ) -> ReelResult<TextMetrics> {
        let layout = self.engine.layout(text, style, max_width)?;
        Ok(layout_metrics(&layout))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/parley_text.rs"]
mod tests;
