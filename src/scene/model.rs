use std::path::PathBuf;

use crate::foundation::core::{Canvas, ContainerRect, Rgba8};
use crate::foundation::error::{ReelError, ReelResult};

/// A timed sequence of layers, drawn in list order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Clip {
    /// Seconds.
    pub duration: f64,
    pub layers: Vec<Layer>,
    /// Passed through untouched to whatever sequences clips.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<serde_json::Value>,
}

impl Clip {
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        let clip: Self = serde_json::from_str(s)?;
        clip.validate()?;
        Ok(clip)
    }

    pub fn validate(&self) -> ReelResult<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(ReelError::validation(
                "clip duration must be finite and > 0",
            ));
        }
        if self.layers.is_empty() {
            return Err(ReelError::validation("clip must have at least one layer"));
        }
        for (i, layer) in self.layers.iter().enumerate() {
            layer.validate().map_err(|e| {
                ReelError::validation(format!("layers[{i}] ({}): {e}", layer.kind()))
            })?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Layer {
    Image(ImageParams),
    #[serde(alias = "review-card")]
    Review(ReviewParams),
    TitleBar(TitleBarParams),
    RadialGradient(GradientParams),
    LinearGradient(GradientParams),
    Subtitle(CaptionParams),
    Title(TitleParams),
    NewsTitle(NewsTitleParams),
    FillColor(FillColorParams),
}

impl Layer {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Image(_) => "image",
            Self::Review(_) => "review",
            Self::TitleBar(_) => "title-bar",
            Self::RadialGradient(_) => "radial-gradient",
            Self::LinearGradient(_) => "linear-gradient",
            Self::Subtitle(_) => "subtitle",
            Self::Title(_) => "title",
            Self::NewsTitle(_) => "news-title",
            Self::FillColor(_) => "fill-color",
        }
    }

    /// Whether rendering this layer shapes text (and therefore needs a font).
    pub fn draws_text(&self) -> bool {
        match self {
            Self::Review(_) | Self::Subtitle(_) | Self::Title(_) | Self::NewsTitle(_) => true,
            Self::TitleBar(p) => !p.text.is_empty(),
            Self::Image(_)
            | Self::RadialGradient(_)
            | Self::LinearGradient(_)
            | Self::FillColor(_) => false,
        }
    }

    pub fn validate(&self) -> ReelResult<()> {
        match self {
            Self::Image(p) => p.validate(),
            Self::Review(p) => p.validate(),
            Self::TitleBar(p) => p.validate(),
            Self::RadialGradient(p) | Self::LinearGradient(p) => p.validate(),
            Self::Subtitle(p) => p.timing.validate(),
            Self::Title(p) => p.timing.validate(),
            Self::NewsTitle(p) => p.timing.validate(),
            Self::FillColor(_) => Ok(()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomDirection {
    #[default]
    In,
    Out,
    None,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    #[default]
    Contain,
    Cover,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageParams {
    pub path: PathBuf,
    #[serde(default)]
    pub zoom_direction: ZoomDirection,
    #[serde(default = "default_zoom_amount", deserialize_with = "number_or_string")]
    pub zoom_amount: f64,
    #[serde(default)]
    pub resize_mode: ResizeMode,
    #[serde(default)]
    pub container_rect: Option<ContainerRect>,
}

impl ImageParams {
    pub fn validate(&self) -> ReelResult<()> {
        if self.path.as_os_str().is_empty() {
            return Err(ReelError::validation("image path must not be empty"));
        }
        if !self.zoom_amount.is_finite() || self.zoom_amount < 0.0 {
            return Err(ReelError::validation("zoomAmount must be finite and >= 0"));
        }
        validate_container(self.container_rect)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewParams {
    #[serde(default)]
    pub text: String,
    pub rating: u8,
    /// Defaults to 7% of the container width.
    #[serde(default)]
    pub padding: Option<f64>,
    #[serde(default)]
    pub container_rect: Option<ContainerRect>,
    #[serde(default)]
    pub date_string: String,
}

impl ReviewParams {
    pub const MAX_RATING: u8 = 5;

    pub fn validate(&self) -> ReelResult<()> {
        if self.rating > Self::MAX_RATING {
            return Err(ReelError::validation(format!(
                "rating must be within 0..={}, got {}",
                Self::MAX_RATING,
                self.rating
            )));
        }
        if let Some(p) = self.padding {
            if !p.is_finite() || p < 0.0 {
                return Err(ReelError::validation("padding must be finite and >= 0"));
            }
        }
        validate_container(self.container_rect)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleBarParams {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_bar_height")]
    pub bar_height: f64,
    #[serde(default = "white")]
    pub text_color: Rgba8,
    #[serde(default = "black")]
    pub bar_color: Rgba8,
}

impl TitleBarParams {
    pub fn validate(&self) -> ReelResult<()> {
        if !self.bar_height.is_finite() || self.bar_height <= 0.0 {
            return Err(ReelError::validation("barHeight must be finite and > 0"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientParams {
    /// Used only when exactly two colors are given.
    #[serde(default)]
    pub colors: Option<Vec<Rgba8>>,
}

impl GradientParams {
    pub fn validate(&self) -> ReelResult<()> {
        Ok(())
    }

    pub fn explicit_pair(&self) -> Option<[Rgba8; 2]> {
        match self.colors.as_deref() {
            Some([a, b]) => Some([*a, *b]),
            _ => None,
        }
    }
}

/// Sub-timeline shared by caption layers: starts at `delay`, runs `speed` times faster.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTiming {
    #[serde(default)]
    pub delay: f64,
    #[serde(default = "one")]
    pub speed: f64,
}

impl Default for CaptionTiming {
    fn default() -> Self {
        Self {
            delay: 0.0,
            speed: 1.0,
        }
    }
}

impl CaptionTiming {
    pub fn validate(&self) -> ReelResult<()> {
        if !self.delay.is_finite() {
            return Err(ReelError::validation("delay must be finite"));
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(ReelError::validation("speed must be finite and > 0"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionParams {
    pub text: String,
    #[serde(default = "white")]
    pub text_color: Rgba8,
    #[serde(default = "subtitle_background")]
    pub background_color: Rgba8,
    #[serde(flatten)]
    pub timing: CaptionTiming,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitlePosition {
    Top,
    #[default]
    Center,
    Bottom,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleParams {
    pub text: String,
    #[serde(default = "white")]
    pub text_color: Rgba8,
    #[serde(default)]
    pub position: TitlePosition,
    #[serde(flatten)]
    pub timing: CaptionTiming,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsTitleParams {
    pub text: String,
    #[serde(default = "white")]
    pub text_color: Rgba8,
    #[serde(default = "news_background")]
    pub background_color: Rgba8,
    #[serde(flatten)]
    pub timing: CaptionTiming,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillColorParams {
    #[serde(default)]
    pub color: Option<Rgba8>,
}

/// Container of a layer, defaulting to the full frame.
pub fn resolve_container(rect: Option<ContainerRect>, canvas: Canvas) -> ContainerRect {
    rect.unwrap_or_else(|| ContainerRect::full(canvas))
}

fn validate_container(rect: Option<ContainerRect>) -> ReelResult<()> {
    rect.map_or(Ok(()), ContainerRect::validate)
}

fn default_zoom_amount() -> f64 {
    0.1
}

fn default_bar_height() -> f64 {
    100.0
}

fn one() -> f64 {
    1.0
}

fn white() -> Rgba8 {
    Rgba8::WHITE
}

fn black() -> Rgba8 {
    Rgba8::BLACK
}

fn subtitle_background() -> Rgba8 {
    Rgba8::rgba(0, 0, 0, 77)
}

fn news_background() -> Rgba8 {
    Rgba8::rgb(0xd0, 0x2a, 0x42)
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Num(f64),
        Str(String),
    }

    match <Repr as serde::Deserialize>::deserialize(deserializer)? {
        Repr::Num(v) => Ok(v),
        Repr::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got \"{s}\""))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
