//! Turning drawables into pixels.

pub mod composite;
pub mod cpu;
pub mod frame;

pub use cpu::CpuRasterizer;
pub use frame::FrameRGBA;

use crate::draw::drawable::Drawable;
use crate::foundation::core::Canvas;
use crate::foundation::error::ReelResult;

/// Rasterizes one frame's drawables in order, back to front, onto a transparent canvas.
pub trait Rasterizer {
    /// Output is straight-alpha RGBA8. Nothing from a previous call shows through.
    fn rasterize(&mut self, canvas: Canvas, drawables: &[Drawable]) -> ReelResult<FrameRGBA>;

    /// Drop cached decoded resources.
    fn release(&mut self);
}
