use crate::foundation::core::{Point, Rect};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginX {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginY {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Which point of a box its `(left, top)` coordinates refer to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    pub x: OriginX,
    pub y: OriginY,
}

impl Anchor {
    pub const TOP_LEFT: Self = Self::new(OriginX::Left, OriginY::Top);
    pub const CENTER_LEFT: Self = Self::new(OriginX::Left, OriginY::Center);
    pub const CENTER_RIGHT: Self = Self::new(OriginX::Right, OriginY::Center);
    pub const CENTER: Self = Self::new(OriginX::Center, OriginY::Center);
    pub const TOP_CENTER: Self = Self::new(OriginX::Center, OriginY::Top);
    pub const BOTTOM_CENTER: Self = Self::new(OriginX::Center, OriginY::Bottom);
    pub const BOTTOM_LEFT: Self = Self::new(OriginX::Left, OriginY::Bottom);

    pub const fn new(x: OriginX, y: OriginY) -> Self {
        Self { x, y }
    }

    /// Offset from the box's top-left corner to the anchor point.
    pub fn offset(self, width: f64, height: f64) -> (f64, f64) {
        let dx = match self.x {
            OriginX::Left => 0.0,
            OriginX::Center => width / 2.0,
            OriginX::Right => width,
        };
        let dy = match self.y {
            OriginY::Top => 0.0,
            OriginY::Center => height / 2.0,
            OriginY::Bottom => height,
        };
        (dx, dy)
    }
}

/// Resolve a `width × height` box whose `anchor` point sits at `(left, top)`.
pub fn place(anchor: Anchor, left: f64, top: f64, width: f64, height: f64) -> Rect {
    let (dx, dy) = anchor.offset(width, height);
    let x0 = left - dx;
    let y0 = top - dy;
    Rect::new(x0, y0, x0 + width, y0 + height)
}

/// Anchor point of an already placed box.
pub fn anchor_point(anchor: Anchor, rect: Rect) -> Point {
    let (dx, dy) = anchor.offset(rect.width(), rect.height());
    Point::new(rect.x0 + dx, rect.y0 + dy)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/anchor.rs"]
mod tests;
