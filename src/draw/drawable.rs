use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Affine, Point, Rect, Rgba8, Vec2};
use crate::layout::anchor::{Anchor, place};
use crate::layout::text::{TextMetrics, TextStyle};

/// Fill of a rectangle.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Paint {
    Solid {
        color: Rgba8,
    },
    /// Two stops along `start → end`, in the rectangle's local space.
    LinearGradient {
        start: Point,
        end: Point,
        stops: [Rgba8; 2],
    },
    /// Two stops from `center` (t = 0) out to `radius` (t = 1), in the rectangle's local space.
    RadialGradient {
        center: Point,
        radius: f64,
        stops: [Rgba8; 2],
    },
}

/// Blurred, offset copy of a shape drawn beneath it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Shadow {
    pub offset: Vec2,
    pub blur: f64,
    pub color: Rgba8,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RectShape {
    pub rect: Rect,
    pub paint: Paint,
    pub corner_radius: f64,
    pub opacity: f64,
    pub shadow: Option<Shadow>,
    /// Applied to both the rectangle and its paint.
    pub transform: Affine,
}

/// A laid out text box. `origin` is the top-left of the box; lines wrap at `box_width` when
/// `wrap` is set and are aligned within it.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextBox {
    pub text: String,
    pub style: TextStyle,
    pub origin: Point,
    pub box_width: f64,
    pub wrap: bool,
    pub metrics: TextMetrics,
    pub color: Rgba8,
    pub opacity: f64,
    /// Uniform scale about `origin`; `box_width` and `metrics` are unscaled.
    pub scale: f64,
}

impl TextBox {
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(
            self.origin,
            (self.box_width * self.scale, self.metrics.height * self.scale),
        )
    }

    /// Move the box so its `anchor` point lands on `at`.
    pub fn placed(mut self, anchor: Anchor, at: Point) -> Self {
        let r = self.rect();
        self.origin = place(anchor, at.x, at.y, r.width(), r.height()).origin();
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Map from text layout space to parent space.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.origin.to_vec2()) * Affine::scale(self.scale)
    }
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct ImageDraw {
    #[serde(skip)]
    pub image: PreparedImage,
    pub dest: Rect,
    pub opacity: f64,
}

impl PartialEq for ImageDraw {
    fn eq(&self, other: &Self) -> bool {
        std::sync::Arc::ptr_eq(&self.image.rgba8_premul, &other.image.rgba8_premul)
            && self.dest == other.dest
            && self.opacity == other.opacity
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Group {
    pub children: Vec<Drawable>,
    pub translate: Vec2,
    pub opacity: f64,
    /// Clip in the group's parent space.
    pub clip: Option<Rect>,
}

/// Renderer-agnostic shape produced fresh for every frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Drawable {
    Rect(RectShape),
    Text(TextBox),
    Image(ImageDraw),
    Group(Group),
}

impl Drawable {
    pub fn solid_rect(rect: Rect, color: Rgba8) -> Self {
        Self::Rect(RectShape {
            rect,
            paint: Paint::Solid { color },
            corner_radius: 0.0,
            opacity: 1.0,
            shadow: None,
            transform: Affine::IDENTITY,
        })
    }

    pub fn group(children: Vec<Drawable>) -> Self {
        Self::Group(Group {
            children,
            translate: Vec2::ZERO,
            opacity: 1.0,
            clip: None,
        })
    }

    /// Depth-first visit of every leaf, with the accumulated group translation.
    pub fn for_each_leaf<F: FnMut(&Drawable, Vec2)>(&self, f: &mut F) {
        self.visit(Vec2::ZERO, f);
    }

    fn visit<F: FnMut(&Drawable, Vec2)>(&self, offset: Vec2, f: &mut F) {
        match self {
            Self::Group(g) => {
                for child in &g.children {
                    child.visit(offset + g.translate, f);
                }
            }
            leaf => f(leaf, offset),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/drawable.rs"]
mod tests;
