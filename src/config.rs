use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;

use crate::assets::fonts::FontBook;
use crate::assets::palette;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::text::{GlyphSubstitution, ShrinkPolicy};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontsConfig {
    pub regular: Option<PathBuf>,
    pub bold: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteConfig {
    pub colors: Vec<Rgba8>,
    pub gradients: Vec<[Rgba8; 2]>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            colors: palette::default_colors(),
            gradients: palette::default_gradients(),
        }
    }
}

/// Review-card text fitting.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReviewConfig {
    pub shrink_threshold: usize,
    pub shrink_rate: f64,
    pub min_font_scale: f64,
    pub max_text_chars: usize,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            shrink_threshold: 70,
            shrink_rate: 450.0,
            min_font_scale: 0.2,
            max_text_chars: 1000,
        }
    }
}

impl ReviewConfig {
    pub fn shrink_policy(&self) -> ShrinkPolicy {
        ShrinkPolicy {
            threshold: self.shrink_threshold,
            rate: self.shrink_rate,
            min_scale: self.min_font_scale,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TitleBarConfig {
    pub shrink_after_chars: usize,
    pub shrink_step_px: f64,
}

impl Default for TitleBarConfig {
    fn default() -> Self {
        Self {
            shrink_after_chars: 15,
            shrink_step_px: 0.45,
        }
    }
}

/// Process-wide defaults. Every field is optional in JSON.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub fonts: FontsConfig,
    pub palette: PaletteConfig,
    pub seed: Option<u64>,
    pub review: ReviewConfig,
    pub title_bar: TitleBarConfig,
}

impl EngineConfig {
    pub const ENV_FONT_REGULAR: &'static str = "PROMOREEL_FONT_REGULAR";
    pub const ENV_FONT_BOLD: &'static str = "PROMOREEL_FONT_BOLD";
    pub const ENV_SEED: &'static str = "PROMOREEL_SEED";

    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> ReelResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config \"{}\"", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Environment variables win over file values.
    pub fn apply_env_overrides(&mut self) -> ReelResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) -> ReelResult<()> {
        if let Some(p) = get(Self::ENV_FONT_REGULAR) {
            self.fonts.regular = Some(PathBuf::from(p));
        }
        if let Some(p) = get(Self::ENV_FONT_BOLD) {
            self.fonts.bold = Some(PathBuf::from(p));
        }
        if let Some(s) = get(Self::ENV_SEED) {
            let seed = s.trim().parse::<u64>().map_err(|_| {
                ReelError::validation(format!(
                    "{} must be an integer, got \"{s}\"",
                    Self::ENV_SEED
                ))
            })?;
            self.seed = Some(seed);
        }
        Ok(())
    }

    pub fn validate(&self) -> ReelResult<()> {
        let r = &self.review;
        if !r.shrink_rate.is_finite() || r.shrink_rate <= 0.0 {
            return Err(ReelError::validation("review.shrink_rate must be > 0"));
        }
        if !(r.min_font_scale > 0.0 && r.min_font_scale <= 1.0) {
            return Err(ReelError::validation(
                "review.min_font_scale must be within (0, 1]",
            ));
        }
        if r.max_text_chars == 0 {
            return Err(ReelError::validation("review.max_text_chars must be > 0"));
        }
        let t = &self.title_bar;
        if !t.shrink_step_px.is_finite() || t.shrink_step_px < 0.0 {
            return Err(ReelError::validation(
                "title_bar.shrink_step_px must be >= 0",
            ));
        }
        Ok(())
    }
}

/// Read-only state shared by every frame source: frozen config, loaded fonts and the optional
/// glyph substitution hook.
#[derive(Clone)]
pub struct EngineContext {
    config: Arc<EngineConfig>,
    fonts: FontBook,
    glyph_hook: Option<Arc<dyn GlyphSubstitution>>,
}

impl std::fmt::Debug for EngineContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineContext")
            .field("config", &self.config)
            .field("fonts", &self.fonts)
            .field("glyph_hook", &self.glyph_hook.is_some())
            .finish()
    }
}

impl EngineContext {
    /// Validate `config` and load its fonts.
    pub fn new(config: EngineConfig) -> ReelResult<Self> {
        config.validate()?;
        let fonts = FontBook::load(&config.fonts)?;
        Ok(Self::with_fonts(config, fonts))
    }

    pub fn with_fonts(config: EngineConfig, fonts: FontBook) -> Self {
        Self {
            config: Arc::new(config),
            fonts,
            glyph_hook: None,
        }
    }

    pub fn with_glyph_hook(mut self, hook: Arc<dyn GlyphSubstitution>) -> Self {
        self.glyph_hook = Some(hook);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// Text as it will be shaped and drawn.
    pub fn prepare_text<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match &self.glyph_hook {
            Some(hook) => Cow::Owned(hook.substitute(text)),
            None => Cow::Borrowed(text),
        }
    }

    pub fn source_rng(&self, slot: u64) -> rand::rngs::StdRng {
        palette::source_rng(self.config.seed, slot)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
