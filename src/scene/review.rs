use std::path::PathBuf;

use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::model::{Clip, ImageParams, Layer, ResizeMode, ReviewParams, ZoomDirection};

/// One customer review as delivered by the caller.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReviewRecord {
    pub rating: i64,
    #[serde(default)]
    pub text: String,
    /// Local path or `file://` URL.
    pub image: String,
    #[serde(default)]
    pub date: String,
}

impl ReviewRecord {
    pub fn validate(&self) -> ReelResult<()> {
        if !(0..=i64::from(ReviewParams::MAX_RATING)).contains(&self.rating) {
            return Err(ReelError::validation(format!(
                "rating must be within 0..={}, got {}",
                ReviewParams::MAX_RATING,
                self.rating
            )));
        }
        image_path(&self.image).map(|_| ())
    }
}

/// How review records are turned into clips.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewClipOptions {
    pub duration: f64,
    pub zoom_amount: f64,
    /// Card padding as a fraction of the frame width.
    pub padding_ratio: f64,
    pub transition: Option<serde_json::Value>,
}

impl Default for ReviewClipOptions {
    fn default() -> Self {
        Self {
            duration: 8.0,
            zoom_amount: 0.35,
            padding_ratio: 0.07,
            transition: Some(serde_json::json!({ "name": "crosszoom" })),
        }
    }
}

/// Product image slowly zooming in behind a review card.
pub fn review_clip(
    record: &ReviewRecord,
    canvas: Canvas,
    opts: &ReviewClipOptions,
) -> ReelResult<Clip> {
    record.validate()?;
    let path = image_path(&record.image)?;

    let text = if record.text.is_empty() {
        String::new()
    } else {
        format!("❝{}❞", record.text)
    };

    let clip = Clip {
        duration: opts.duration,
        layers: vec![
            Layer::Image(ImageParams {
                path,
                zoom_direction: ZoomDirection::In,
                zoom_amount: opts.zoom_amount,
                resize_mode: ResizeMode::Cover,
                container_rect: None,
            }),
            Layer::Review(ReviewParams {
                text,
                rating: record.rating as u8,
                padding: Some(opts.padding_ratio * canvas.width_f64()),
                container_rect: None,
                date_string: record.date.clone(),
            }),
        ],
        transition: opts.transition.clone(),
    };
    clip.validate()?;
    Ok(clip)
}

/// One clip per record, in order. An empty list is a validation error.
pub fn review_clips(
    records: &[ReviewRecord],
    canvas: Canvas,
    opts: &ReviewClipOptions,
) -> ReelResult<Vec<Clip>> {
    if records.is_empty() {
        return Err(ReelError::validation("at least one review is required"));
    }
    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            review_clip(r, canvas, opts)
                .map_err(|e| ReelError::validation(format!("reviews[{i}]: {e}")))
        })
        .collect()
}

fn image_path(image: &str) -> ReelResult<PathBuf> {
    let image = image.trim();
    if image.is_empty() {
        return Err(ReelError::validation("review image must not be empty"));
    }
    if let Some(local) = image.strip_prefix("file://") {
        return Ok(PathBuf::from(local));
    }
    if image.contains("://") {
        return Err(ReelError::validation(format!(
            "review image \"{image}\" must be a local path or file:// URL"
        )));
    }
    Ok(PathBuf::from(image))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/review.rs"]
mod tests;
