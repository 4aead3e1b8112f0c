use crate::animation::timing::SlideInOut;
use crate::config::ReviewConfig;
use crate::draw::drawable::{Drawable, Group, Paint, RectShape, Shadow, TextBox};
use crate::foundation::core::{Affine, Canvas, ContainerRect, Point, Rect, Rgba8, Vec2};
use crate::foundation::error::{ReelError, ReelResult};
use crate::layers::TextCx;
use crate::layout::anchor::{Anchor, anchor_point};
use crate::layout::bounds::{pad, union_bounds};
use crate::layout::text::{ShrinkPolicy, TextAlign, TextStyle, char_count};
use crate::scene::model::{ReviewParams, resolve_container};

pub const VERIFIED_LABEL: &str = "Verified Review";
pub const STAR: char = '★';

const PANEL_COLOR: Rgba8 = Rgba8::WHITE;
const TEXT_COLOR: Rgba8 = Rgba8::rgb(0x33, 0x33, 0x33);
const STAR_COLOR: Rgba8 = Rgba8::rgb(0xff, 0xc1, 0x07);
const DIMMED: f64 = 0.6;
const SHADOW: Shadow = Shadow {
    offset: Vec2::new(1.0, 1.0),
    blur: 4.0,
    color: Rgba8::rgba(0, 0, 0, 128),
};

/// Role of each text element on the card, top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CardText {
    Verified,
    Body,
    Stars,
    Date,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlacedText {
    pub role: CardText,
    /// Which point of the box was pinned when it was placed.
    pub anchor: Anchor,
    pub text: TextBox,
}

/// Card geometry for one frame, before the slide offset is applied.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ReviewCardLayout {
    pub panel: Rect,
    pub corner_radius: f64,
    pub elements: Vec<PlacedText>,
    /// Horizontal slide applied to the whole card.
    pub offset_x: f64,
}

impl ReviewCardLayout {
    pub fn element(&self, role: CardText) -> Option<&PlacedText> {
        self.elements.iter().find(|e| e.role == role)
    }

    /// Bounds of the text block (the panel encloses it with padding).
    pub fn text_bounds(&self) -> Option<Rect> {
        union_bounds(self.elements.iter().map(|e| e.text.rect()))
    }

    pub fn into_drawables(self) -> Vec<Drawable> {
        let mut children = Vec::with_capacity(self.elements.len() + 1);
        children.push(Drawable::Rect(RectShape {
            rect: self.panel,
            paint: Paint::Solid { color: PANEL_COLOR },
            corner_radius: self.corner_radius,
            opacity: 1.0,
            shadow: Some(SHADOW),
            transform: Affine::IDENTITY,
        }));
        children.extend(self.elements.into_iter().map(|e| Drawable::Text(e.text)));
        vec![Drawable::Group(Group {
            children,
            translate: Vec2::new(self.offset_x, 0.0),
            opacity: 1.0,
            clip: None,
        })]
    }
}

/// Review overlay: label, optional body text, star line and date on a rounded panel that slides
/// through the container.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewCard {
    params: ReviewParams,
    container: ContainerRect,
    padding: f64,
    policy: ShrinkPolicy,
}

impl ReviewCard {
    pub fn prepare(canvas: Canvas, params: &ReviewParams, cfg: &ReviewConfig) -> ReelResult<Self> {
        params.validate()?;
        let len = char_count(&params.text);
        if len > cfg.max_text_chars {
            return Err(ReelError::validation(format!(
                "review text has {len} characters, the limit is {}",
                cfg.max_text_chars
            )));
        }
        let container = resolve_container(params.container_rect, canvas);
        Ok(Self {
            params: params.clone(),
            container,
            padding: params.padding.unwrap_or(0.07 * container.width),
            policy: cfg.shrink_policy(),
        })
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Body font size after the length shrink, before the height fit.
    pub fn body_font_size(&self) -> f64 {
        self.policy
            .font_size(self.container.width / 13.0, &self.params.text)
    }

    pub fn layout(&self, progress: f64, tx: &mut TextCx<'_>) -> ReelResult<ReviewCardLayout> {
        let cw = self.container.width;
        let ch = self.container.height;
        let p = self.padding;
        let group_width = cw - p * 4.0;
        let has_text = !self.params.text.is_empty();
        let align = if has_text {
            TextAlign::Left
        } else {
            TextAlign::Center
        };

        let mut elements = Vec::with_capacity(4);

        let verified = tx
            .text_box(
                VERIFIED_LABEL,
                TextStyle::new(cw / 29.0).align(align),
                Some(group_width),
                TEXT_COLOR,
            )?
            .with_opacity(DIMMED);
        let mut next_top = verified.rect().y1;
        elements.push(PlacedText {
            role: CardText::Verified,
            anchor: Anchor::TOP_LEFT,
            text: verified,
        });

        if has_text {
            let body = self.fit_body(tx, group_width, ch)?;
            let body = body.placed(Anchor::TOP_LEFT, Point::new(0.0, next_top + p / 2.0));
            next_top = body.rect().y1;
            elements.push(PlacedText {
                role: CardText::Body,
                anchor: Anchor::TOP_LEFT,
                text: body,
            });
        }

        let star_line = STAR.to_string().repeat(usize::from(self.params.rating));
        let (star_size, star_wrap) = if has_text {
            (cw / 17.0, None)
        } else {
            (cw / 10.0, Some(group_width))
        };
        let stars = tx
            .text_box(
                &star_line,
                TextStyle::new(star_size).bold().align(align),
                star_wrap,
                STAR_COLOR,
            )?
            .placed(Anchor::TOP_LEFT, Point::new(0.0, next_top + p / 2.0));
        let stars_rect = stars.rect();

        // Inline after the stars when there is body text, else on its own centered line.
        let (date_text, date_anchor, date_at) = if has_text {
            (
                format!("- {}", self.params.date_string),
                Anchor::CENTER_LEFT,
                anchor_point(Anchor::CENTER_RIGHT, stars_rect) + Vec2::new(p / 3.0, 0.0),
            )
        } else {
            (
                self.params.date_string.clone(),
                Anchor::TOP_LEFT,
                anchor_point(Anchor::BOTTOM_LEFT, stars_rect) + Vec2::new(0.0, p / 2.0),
            )
        };
        let date = tx
            .text_box(
                &date_text,
                TextStyle::new(cw / 29.0).align(align),
                Some(group_width - date_at.x),
                TEXT_COLOR,
            )?
            .with_opacity(DIMMED)
            .placed(date_anchor, date_at);

        elements.push(PlacedText {
            role: CardText::Stars,
            anchor: Anchor::TOP_LEFT,
            text: stars,
        });
        elements.push(PlacedText {
            role: CardText::Date,
            anchor: date_anchor,
            text: date,
        });

        // Center the text block on the container.
        let block = union_bounds(elements.iter().map(|e| e.text.rect()))
            .ok_or_else(|| ReelError::render("review card has no elements"))?;
        let shift = self.container.center() - block.center();
        for e in &mut elements {
            e.text.origin += shift;
        }
        let block = block + shift;

        let padded = pad(block, p);
        let panel = Rect::from_center_size(
            padded.center(),
            (padded.width(), padded.height().max(ch * 0.3)),
        );

        Ok(ReviewCardLayout {
            panel,
            corner_radius: 0.01 * cw,
            elements,
            offset_x: SlideInOut::REVIEW_CARD.offset(progress, cw),
        })
    }

    /// Body text after the length shrink, shrunk further if it would overflow the card.
    fn fit_body(&self, tx: &mut TextCx<'_>, width: f64, ch: f64) -> ReelResult<TextBox> {
        let size = self.body_font_size();
        let body = tx.text_box(
            &self.params.text,
            TextStyle::new(size).bold(),
            Some(width),
            TEXT_COLOR,
        )?;
        let max_height = (ch - self.padding * 4.0) * 0.8;
        let ratio = max_height / body.metrics.height;
        if ratio >= 1.0 {
            return Ok(body);
        }
        let fitted = size * ratio.max(self.policy.min_scale);
        tracing::debug!(size, fitted, "review text shrunk to fit card height");
        tx.text_box(
            &self.params.text,
            TextStyle::new(fitted).bold(),
            Some(width),
            TEXT_COLOR,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/review_card.rs"]
mod tests;
