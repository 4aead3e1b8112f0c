use std::fmt;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::config::FontsConfig;
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::text::FontWeight;

/// One font file held in memory, ready for both shaping and glyph drawing.
#[derive(Clone)]
pub struct FontFace {
    bytes: Arc<Vec<u8>>,
    data: vello_cpu::peniko::FontData,
}

impl FontFace {
    pub fn from_bytes(bytes: Vec<u8>) -> ReelResult<Self> {
        if bytes.is_empty() {
            return Err(ReelError::asset("font file is empty"));
        }
        let data =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.clone()), 0);
        Ok(Self {
            bytes: Arc::new(bytes),
            data,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn data(&self) -> &vello_cpu::peniko::FontData {
        &self.data
    }
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFace")
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Regular and bold faces loaded once at process start and shared read-only by every layer.
#[derive(Clone, Debug, Default)]
pub struct FontBook {
    regular: Option<FontFace>,
    bold: Option<FontFace>,
}

impl FontBook {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_faces(regular: Option<FontFace>, bold: Option<FontFace>) -> Self {
        Self { regular, bold }
    }

    /// Read the configured font files. A configured but unreadable file is fatal.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn load(cfg: &FontsConfig) -> ReelResult<Self> {
        let regular = cfg.regular.as_deref().map(read_face).transpose()?;
        let bold = cfg.bold.as_deref().map(read_face).transpose()?;
        let book = Self { regular, bold };
        if !book.is_empty() {
            // Shaping needs at least one family parley can parse; surface bad files now.
            crate::layout::parley_text::TextLayoutEngine::new(&book)?;
        }
        tracing::debug!(
            regular = book.regular.is_some(),
            bold = book.bold.is_some(),
            "font book loaded"
        );
        Ok(book)
    }

    pub fn is_empty(&self) -> bool {
        self.regular.is_none() && self.bold.is_none()
    }

    /// Face for `weight`; each weight falls back to the other when only one file is present.
    pub fn face(&self, weight: FontWeight) -> Option<&FontFace> {
        match weight {
            FontWeight::Regular => self.regular.as_ref().or(self.bold.as_ref()),
            FontWeight::Bold => self.bold.as_ref().or(self.regular.as_ref()),
        }
    }

    pub(crate) fn faces(&self) -> impl Iterator<Item = (FontWeight, &FontFace)> {
        self.regular
            .iter()
            .map(|f| (FontWeight::Regular, f))
            .chain(self.bold.iter().map(|f| (FontWeight::Bold, f)))
    }
}

fn read_face(path: &Path) -> ReelResult<FontFace> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read font \"{}\"", path.display()))
        .map_err(|e| ReelError::asset(format!("{e:#}")))?;
    FontFace::from_bytes(bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
