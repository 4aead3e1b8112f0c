use std::collections::HashMap;
use std::sync::Arc;

use kurbo::Shape;

use crate::assets::blur::blur_rgba8_premul;
use crate::assets::decode::PreparedImage;
use crate::assets::fonts::FontBook;
use crate::draw::drawable::{Drawable, Group, ImageDraw, Paint, RectShape, Shadow, TextBox};
use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgba8, Vec2};
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::parley_text::TextLayoutEngine;
use crate::layout::text::TextAlign;
use crate::render::composite::{clip_to_rect_in_place, over_in_place, unpremultiply_in_place};
use crate::render::{FrameRGBA, Rasterizer};

/// Gradients are smooth, so they are baked at a bounded resolution and stretched.
const GRADIENT_TEXELS: f64 = 256.0;
const PATH_TOLERANCE: f64 = 0.1;

/// Drawables to pixels on the CPU with vello_cpu.
///
/// Every leaf is drawn into its own surface and composited with premultiplied source-over;
/// groups get their own surface so their opacity and clip apply to the children as a whole.
pub struct CpuRasterizer {
    fonts: FontBook,
    text: Option<TextLayoutEngine>,
    image_cache: HashMap<usize, CachedImage>,
}

struct CachedImage {
    // Holding the source keeps its address from being reused while cached.
    _source: Arc<Vec<u8>>,
    paint: vello_cpu::Image,
}

struct Surface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl Surface {
    fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        }
    }

    fn bytes(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        self.pixmap.data_as_u8_slice_mut()
    }

    fn context(&self) -> vello_cpu::RenderContext {
        vello_cpu::RenderContext::new(self.width, self.height)
    }

    /// Flush `ctx` into a scratch pixmap and composite it over this surface.
    fn composite_context(&mut self, mut ctx: vello_cpu::RenderContext) -> ReelResult<()> {
        let mut layer = Self::new(self.width, self.height);
        ctx.flush();
        ctx.render_to_pixmap(&mut layer.pixmap);
        over_in_place(self.bytes_mut(), layer.bytes(), 1.0)
    }
}

impl std::fmt::Debug for CpuRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuRasterizer")
            .field("fonts", &self.fonts)
            .field("text", &self.text.is_some())
            .field("cached_images", &self.image_cache.len())
            .finish()
    }
}

impl CpuRasterizer {
    pub fn new(fonts: &FontBook) -> ReelResult<Self> {
        let text = if fonts.is_empty() {
            None
        } else {
            Some(TextLayoutEngine::new(fonts)?)
        };
        Ok(Self {
            fonts: fonts.clone(),
            text,
            image_cache: HashMap::new(),
        })
    }

    pub fn cached_images(&self) -> usize {
        self.image_cache.len()
    }

    fn draw_list(
        &mut self,
        target: &mut Surface,
        items: &[Drawable],
        offset: Vec2,
    ) -> ReelResult<()> {
        for item in items {
            match item {
                Drawable::Group(g) => self.draw_group(target, g, offset)?,
                Drawable::Rect(r) => self.draw_rect(target, r, offset)?,
                Drawable::Text(t) => self.draw_text(target, t, offset)?,
                Drawable::Image(i) => self.draw_image(target, i, offset)?,
            }
        }
        Ok(())
    }

    fn draw_group(&mut self, target: &mut Surface, g: &Group, offset: Vec2) -> ReelResult<()> {
        if g.opacity <= 0.0 || g.children.is_empty() {
            return Ok(());
        }
        let mut layer = Surface::new(target.width, target.height);
        self.draw_list(&mut layer, &g.children, offset + g.translate)?;
        if let Some(clip) = g.clip {
            let (w, h) = (u32::from(layer.width), u32::from(layer.height));
            clip_to_rect_in_place(layer.bytes_mut(), w, h, clip + offset)?;
        }
        over_in_place(target.bytes_mut(), layer.bytes(), g.opacity as f32)
    }

    fn draw_rect(&mut self, target: &mut Surface, r: &RectShape, offset: Vec2) -> ReelResult<()> {
        if r.opacity <= 0.0 || r.rect.width() <= 0.0 || r.rect.height() <= 0.0 {
            return Ok(());
        }
        if let Some(shadow) = r.shadow {
            draw_shadow(target, r, shadow, offset)?;
        }

        let mut ctx = target.context();
        let transform = Affine::translate(offset) * r.transform;
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match &r.paint {
            Paint::Solid { color } => ctx.set_paint(color_to_cpu(*color)),
            gradient => {
                let (paint, paint_transform) = bake_gradient(gradient, r.rect)?;
                ctx.set_paint(paint);
                ctx.set_paint_transform(affine_to_cpu(paint_transform));
            }
        }
        with_opacity(&mut ctx, r.opacity, |ctx| {
            ctx.fill_path(&rect_path(r.rect, r.corner_radius));
        });
        target.composite_context(ctx)
    }

    fn draw_image(&mut self, target: &mut Surface, i: &ImageDraw, offset: Vec2) -> ReelResult<()> {
        if i.opacity <= 0.0 || i.dest.width() <= 0.0 || i.dest.height() <= 0.0 {
            return Ok(());
        }
        let paint = self.image_paint_for(&i.image)?;
        let (w, h) = (i.image.width_f64(), i.image.height_f64());
        let transform = Affine::translate(offset + i.dest.origin().to_vec2())
            * Affine::scale_non_uniform(i.dest.width() / w, i.dest.height() / h);

        let mut ctx = target.context();
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(paint);
        with_opacity(&mut ctx, i.opacity, |ctx| {
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        });
        target.composite_context(ctx)
    }

    fn draw_text(&mut self, target: &mut Surface, t: &TextBox, offset: Vec2) -> ReelResult<()> {
        if t.opacity <= 0.0 || t.scale <= 0.0 || t.text.trim().is_empty() {
            return Ok(());
        }
        let no_font = || ReelError::render("text needs a font; set fonts.regular or fonts.bold");
        let engine = self.text.as_mut().ok_or_else(no_font)?;
        let face = self.fonts.face(t.style.weight).ok_or_else(no_font)?;
        let font = face.data().clone();
        let layout = engine.layout(&t.text, &t.style, t.wrap.then_some(t.box_width))?;

        let base = Affine::translate(offset) * t.transform();
        let mut ctx = target.context();
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color_to_cpu(t.color));
        with_opacity(&mut ctx, t.opacity, |ctx| {
            for line in layout.lines() {
                let dx = match t.style.align {
                    TextAlign::Left => 0.0,
                    TextAlign::Center => {
                        ((t.box_width - f64::from(line.metrics().advance)) / 2.0).max(0.0)
                    }
                };
                ctx.set_transform(affine_to_cpu(base * Affine::translate((dx, 0.0))));
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    // Positioned glyphs carry the pen position and baseline, not just offsets.
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        });
        target.composite_context(ctx)
    }

    fn image_paint_for(&mut self, image: &PreparedImage) -> ReelResult<vello_cpu::Image> {
        let key = Arc::as_ptr(&image.rgba8_premul) as usize;
        if let Some(cached) = self.image_cache.get(&key) {
            return Ok(cached.paint.clone());
        }
        let pixmap = image_premul_bytes_to_pixmap(&image.rgba8_premul, image.width, image.height)?;
        let paint = pixmap_paint(pixmap);
        self.image_cache.insert(
            key,
            CachedImage {
                _source: Arc::clone(&image.rgba8_premul),
                paint: paint.clone(),
            },
        );
        Ok(paint)
    }
}

impl Rasterizer for CpuRasterizer {
    #[tracing::instrument(level = "trace", skip_all, fields(drawables = drawables.len()))]
    fn rasterize(&mut self, canvas: Canvas, drawables: &[Drawable]) -> ReelResult<FrameRGBA> {
        canvas.validate()?;
        let (w, h) = surface_size(canvas)?;
        let mut frame = Surface::new(w, h);
        self.draw_list(&mut frame, drawables, Vec2::ZERO)?;

        let mut data = frame.bytes().to_vec();
        unpremultiply_in_place(&mut data);
        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data,
            premultiplied: false,
        })
    }

    fn release(&mut self) {
        if !self.image_cache.is_empty() {
            tracing::debug!(
                images = self.image_cache.len(),
                "releasing cached image paints"
            );
        }
        self.image_cache.clear();
    }
}

/// Shape in the shadow color, offset and blurred, composited beneath the shape itself.
fn draw_shadow(
    target: &mut Surface,
    r: &RectShape,
    shadow: Shadow,
    offset: Vec2,
) -> ReelResult<()> {
    if shadow.color.a == 0 {
        return Ok(());
    }
    let mut ctx = target.context();
    let transform = Affine::translate(offset + shadow.offset) * r.transform;
    ctx.set_transform(affine_to_cpu(transform));
    ctx.set_paint(color_to_cpu(shadow.color));
    with_opacity(&mut ctx, r.opacity, |ctx| {
        ctx.fill_path(&rect_path(r.rect, r.corner_radius));
    });

    let mut layer = Surface::new(target.width, target.height);
    ctx.flush();
    ctx.render_to_pixmap(&mut layer.pixmap);
    let radius = shadow.blur.max(0.0).ceil() as u32;
    if radius > 0 {
        let blurred = blur_rgba8_premul(
            layer.bytes(),
            u32::from(layer.width),
            u32::from(layer.height),
            radius,
            (shadow.blur / 2.0).max(0.5) as f32,
        )?;
        layer.bytes_mut().copy_from_slice(&blurred);
    }
    over_in_place(target.bytes_mut(), layer.bytes(), 1.0)
}

fn with_opacity(
    ctx: &mut vello_cpu::RenderContext,
    opacity: f64,
    draw: impl FnOnce(&mut vello_cpu::RenderContext),
) {
    let layered = opacity < 1.0;
    if layered {
        ctx.push_opacity_layer(opacity.clamp(0.0, 1.0) as f32);
    }
    draw(ctx);
    if layered {
        ctx.pop_layer();
    }
}

/// Bake a two-stop gradient over `rect` into a pixmap, with the paint transform that maps the
/// pixmap back onto `rect`.
fn bake_gradient(paint: &Paint, rect: Rect) -> ReelResult<(vello_cpu::Image, Affine)> {
    let gw = rect.width().ceil().clamp(1.0, GRADIENT_TEXELS) as u32;
    let gh = rect.height().ceil().clamp(1.0, GRADIENT_TEXELS) as u32;
    let sx = rect.width() / f64::from(gw);
    let sy = rect.height() / f64::from(gh);

    let sample: Box<dyn Fn(Point) -> (f64, [Rgba8; 2])> = match *paint {
        Paint::Solid { color } => Box::new(move |_| (0.0, [color, color])),
        Paint::LinearGradient { start, end, stops } => {
            let axis = end - start;
            let len2 = axis.hypot2();
            Box::new(move |p: Point| {
                let t = if len2 > 0.0 {
                    (p - start).dot(axis) / len2
                } else {
                    0.0
                };
                (t, stops)
            })
        }
        Paint::RadialGradient {
            center,
            radius,
            stops,
        } => Box::new(move |p: Point| {
            let t = if radius > 0.0 {
                (p - center).hypot() / radius
            } else {
                1.0
            };
            (t, stops)
        }),
    };

    let mut bytes = Vec::with_capacity((gw as usize) * (gh as usize) * 4);
    for j in 0..gh {
        for i in 0..gw {
            let p = Point::new(
                rect.x0 + (f64::from(i) + 0.5) * sx,
                rect.y0 + (f64::from(j) + 0.5) * sy,
            );
            let (t, [a, b]) = sample(p);
            bytes.extend_from_slice(&a.lerp(b, t).to_premul().to_array());
        }
    }

    let pixmap = image_premul_bytes_to_pixmap(&bytes, gw, gh)?;
    let transform = Affine::translate(rect.origin().to_vec2()) * Affine::scale_non_uniform(sx, sy);
    Ok((pixmap_paint(pixmap), transform))
}

fn rect_path(rect: Rect, corner_radius: f64) -> vello_cpu::kurbo::BezPath {
    let path = if corner_radius > 0.0 {
        kurbo::RoundedRect::from_rect(rect, corner_radius).to_path(PATH_TOLERANCE)
    } else {
        rect.to_path(PATH_TOLERANCE)
    };
    bezpath_to_cpu(&path)
}

fn surface_size(canvas: Canvas) -> ReelResult<(u16, u16)> {
    let w = u16::try_from(canvas.width)
        .map_err(|_| ReelError::render("frame width exceeds u16"))?;
    let h = u16::try_from(canvas.height)
        .map_err(|_| ReelError::render("frame height exceeds u16"))?;
    Ok((w, h))
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_paint(pixmap: vello_cpu::Pixmap) -> vello_cpu::Image {
    vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    }
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> ReelResult<vello_cpu::Pixmap> {
    let w = u16::try_from(width).map_err(|_| ReelError::render("image width exceeds u16"))?;
    let h = u16::try_from(height).map_err(|_| ReelError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != (width as usize) * (height as usize) * 4 {
        return Err(ReelError::render("prepared image byte length mismatch"));
    }

    let mut translucent = false;
    let pixels: Vec<_> = rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            translucent |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, translucent,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
