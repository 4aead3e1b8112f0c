use crate::foundation::core::Rect;

/// Tight bounding rectangle of `rects`, or `None` when there are none.
pub fn union_bounds<I>(rects: I) -> Option<Rect>
where
    I: IntoIterator<Item = Rect>,
{
    rects.into_iter().reduce(|acc, r| acc.union(r))
}

/// Grow `rect` by `pad` on every side.
pub fn pad(rect: Rect, pad: f64) -> Rect {
    rect.inflate(pad, pad)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/bounds.rs"]
mod tests;
