use crate::foundation::error::{ReelError, ReelResult};

/// fabric's default line height, which the layer layouts were tuned against.
pub const DEFAULT_LINE_HEIGHT: f64 = 1.16;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Horizontal alignment of lines inside a text box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TextStyle {
    pub font_size: f64,
    pub weight: FontWeight,
    pub align: TextAlign,
    /// Extra space after every character, in em.
    pub letter_spacing_em: f64,
}

impl TextStyle {
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            weight: FontWeight::Regular,
            align: TextAlign::Left,
            letter_spacing_em: 0.0,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn letter_spacing(mut self, em: f64) -> Self {
        self.letter_spacing_em = em;
        self
    }

    pub fn validate(&self) -> ReelResult<()> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(ReelError::validation(format!(
                "font size must be finite and > 0, got {}",
                self.font_size
            )));
        }
        if !self.letter_spacing_em.is_finite() {
            return Err(ReelError::validation("letter spacing must be finite"));
        }
        Ok(())
    }
}

/// Measured extent of a laid out text block.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TextMetrics {
    /// Widest line.
    pub width: f64,
    pub height: f64,
    pub lines: usize,
}

/// Text measurement capability used by the layer layouts.
pub trait TextShaper {
    /// Lay out `text` with `style`, wrapping at `max_width` when given.
    fn measure(
        &mut self,
        text: &str,
        style: &TextStyle,
        max_width: Option<f64>,
    ) -> ReelResult<TextMetrics>;
}

/// Optional text rewrite applied before shaping and drawing (e.g. emoji replacement).
pub trait GlyphSubstitution: Send + Sync {
    fn substitute(&self, text: &str) -> String;
}

/// Font-free shaper: every character advances by a fixed fraction of the font size and words
/// wrap greedily. Deterministic, so layouts can be checked without font files.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ApproxShaper {
    pub advance_em: f64,
    pub line_height: f64,
}

impl Default for ApproxShaper {
    fn default() -> Self {
        Self {
            advance_em: 0.5,
            line_height: DEFAULT_LINE_HEIGHT,
        }
    }
}

impl TextShaper for ApproxShaper {
    fn measure(
        &mut self,
        text: &str,
        style: &TextStyle,
        max_width: Option<f64>,
    ) -> ReelResult<TextMetrics> {
        style.validate()?;
        let advance = style.font_size * (self.advance_em + style.letter_spacing_em);
        let space = advance;

        let mut widths = Vec::<f64>::new();
        for paragraph in text.split('\n') {
            let mut line = 0.0f64;
            let mut has_word = false;
            for word in paragraph.split_whitespace() {
                let w = char_count(word) as f64 * advance;
                let with_word = if has_word { line + space + w } else { w };
                match max_width {
                    Some(max) if has_word && with_word > max => {
                        widths.push(line);
                        line = w;
                    }
                    _ => line = with_word,
                }
                has_word = true;
            }
            widths.push(line);
        }

        let lines = widths.len().max(1);
        Ok(TextMetrics {
            width: widths.iter().copied().fold(0.0, f64::max),
            height: lines as f64 * style.font_size * self.line_height,
            lines,
        })
    }
}

/// Characters as counted by the shrink policies: Unicode scalar values.
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Linear font shrink for long text: `scale = 1 - max(0, len - threshold) / rate`, floored at
/// `min_scale` so the size never reaches zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShrinkPolicy {
    pub threshold: usize,
    pub rate: f64,
    pub min_scale: f64,
}

impl ShrinkPolicy {
    pub fn scale(&self, len: usize) -> f64 {
        let over = len.saturating_sub(self.threshold) as f64;
        (1.0 - over / self.rate).max(self.min_scale)
    }

    pub fn font_size(&self, base: f64, text: &str) -> f64 {
        base * self.scale(char_count(text))
    }
}

/// Fixed-step shrink used by the title bar: `base - max(0, len - after) * step`.
///
/// The result is floored at a quarter of `base`.
pub fn stepped_font_size(base: f64, len: usize, after: usize, step: f64) -> f64 {
    let over = len.saturating_sub(after) as f64;
    (base - over * step).max(base * 0.25)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/text.rs"]
mod tests;
