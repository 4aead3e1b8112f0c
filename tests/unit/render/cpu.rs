use super::*;

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(w, h).unwrap()
}

fn raster() -> CpuRasterizer {
    CpuRasterizer::new(&FontBook::empty()).unwrap()
}

fn close(a: u8, b: u8, tol: u8) -> bool {
    a.abs_diff(b) <= tol
}

#[test]
fn solid_rect_covers_only_its_pixels() {
    let red = Drawable::solid_rect(Rect::new(4.0, 4.0, 12.0, 12.0), Rgba8::rgb(255, 0, 0));
    let frame = raster().rasterize(canvas(16, 16), &[red]).unwrap();
    assert!(!frame.premultiplied);
    assert_eq!(frame.pixel(8, 8), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(1, 1), Some([0, 0, 0, 0]));
    assert_eq!(frame.pixel(14, 8), Some([0, 0, 0, 0]));
}

#[test]
fn later_drawables_paint_over_earlier_ones() {
    let frame = raster()
        .rasterize(
            canvas(8, 8),
            &[
                Drawable::solid_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Rgba8::rgb(255, 0, 0)),
                Drawable::solid_rect(Rect::new(0.0, 0.0, 4.0, 8.0), Rgba8::rgb(0, 0, 255)),
            ],
        )
        .unwrap();
    assert_eq!(frame.pixel(1, 1), Some([0, 0, 255, 255]));
    assert_eq!(frame.pixel(6, 1), Some([255, 0, 0, 255]));
}

#[test]
fn group_opacity_and_translate_apply_to_children() {
    let group = Drawable::Group(Group {
        children: vec![Drawable::solid_rect(
            Rect::new(0.0, 0.0, 4.0, 4.0),
            Rgba8::WHITE,
        )],
        translate: Vec2::new(4.0, 0.0),
        opacity: 0.5,
        clip: None,
    });
    let frame = raster().rasterize(canvas(8, 4), &[group]).unwrap();
    assert_eq!(frame.pixel(1, 1), Some([0, 0, 0, 0]));
    let px = frame.pixel(6, 1).unwrap();
    assert!(close(px[3], 128, 1), "{px:?}");
    assert!(close(px[0], 255, 2), "{px:?}");
}

#[test]
fn group_clip_masks_children() {
    let group = Drawable::Group(Group {
        children: vec![Drawable::solid_rect(
            Rect::new(0.0, 0.0, 8.0, 8.0),
            Rgba8::WHITE,
        )],
        translate: Vec2::ZERO,
        opacity: 1.0,
        clip: Some(Rect::new(2.0, 2.0, 6.0, 6.0)),
    });
    let frame = raster().rasterize(canvas(8, 8), &[group]).unwrap();
    assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(frame.pixel(7, 7), Some([0, 0, 0, 0]));
    assert_eq!(frame.pixel(3, 3), Some([255, 255, 255, 255]));
}

#[test]
fn image_is_stretched_into_its_destination() {
    let image = PreparedImage::from_premul(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
    let draw = Drawable::Image(ImageDraw {
        image,
        dest: Rect::new(0.0, 0.0, 8.0, 4.0),
        opacity: 1.0,
    });
    let mut raster = raster();
    let frame = raster.rasterize(canvas(8, 4), &[draw]).unwrap();
    let left = frame.pixel(0, 1).unwrap();
    let right = frame.pixel(7, 1).unwrap();
    assert!(left[0] > 200 && left[2] < 55, "{left:?}");
    assert!(right[2] > 200 && right[0] < 55, "{right:?}");
    assert_eq!(raster.cached_images(), 1);
    raster.release();
    assert_eq!(raster.cached_images(), 0);
}

#[test]
fn linear_gradient_runs_between_its_stops() {
    let rect = Drawable::Rect(RectShape {
        rect: Rect::new(0.0, 0.0, 64.0, 4.0),
        paint: Paint::LinearGradient {
            start: Point::new(0.0, 0.0),
            end: Point::new(64.0, 0.0),
            stops: [Rgba8::BLACK, Rgba8::WHITE],
        },
        corner_radius: 0.0,
        opacity: 1.0,
        shadow: None,
        transform: Affine::IDENTITY,
    });
    let frame = raster().rasterize(canvas(64, 4), &[rect]).unwrap();
    let first = frame.pixel(0, 2).unwrap();
    let mid = frame.pixel(32, 2).unwrap();
    let last = frame.pixel(63, 2).unwrap();
    assert!(first[0] < 20, "{first:?}");
    assert!(close(mid[0], 128, 12), "{mid:?}");
    assert!(last[0] > 235, "{last:?}");
    assert_eq!(mid[3], 255);
}

#[test]
fn radial_gradient_is_inner_stop_at_center() {
    let rect = Drawable::Rect(RectShape {
        rect: Rect::new(0.0, 0.0, 32.0, 32.0),
        paint: Paint::RadialGradient {
            center: Point::new(16.0, 16.0),
            radius: 16.0,
            stops: [Rgba8::WHITE, Rgba8::BLACK],
        },
        corner_radius: 0.0,
        opacity: 1.0,
        shadow: None,
        transform: Affine::IDENTITY,
    });
    let frame = raster().rasterize(canvas(32, 32), &[rect]).unwrap();
    assert!(frame.pixel(16, 16).unwrap()[0] > 230);
    assert!(frame.pixel(0, 0).unwrap()[0] < 10);
}

#[test]
fn shadow_darkens_beside_the_shape() {
    let rect = Drawable::Rect(RectShape {
        rect: Rect::new(8.0, 8.0, 20.0, 20.0),
        paint: Paint::Solid {
            color: Rgba8::WHITE,
        },
        corner_radius: 2.0,
        opacity: 1.0,
        shadow: Some(Shadow {
            offset: Vec2::new(4.0, 4.0),
            blur: 2.0,
            color: Rgba8::BLACK,
        }),
        transform: Affine::IDENTITY,
    });
    let frame = raster().rasterize(canvas(32, 32), &[rect]).unwrap();
    let beside = frame.pixel(22, 16).unwrap();
    assert!(beside[3] > 0, "{beside:?}");
    assert!(beside[0] < 20, "{beside:?}");
    assert_eq!(frame.pixel(14, 14), Some([255, 255, 255, 255]));
    assert_eq!(frame.pixel(2, 2), Some([0, 0, 0, 0]));
}

#[test]
fn text_without_fonts_is_a_render_error() {
    let text = Drawable::Text(TextBox {
        text: "hello".into(),
        style: crate::layout::text::TextStyle::new(12.0),
        origin: Point::ORIGIN,
        box_width: 40.0,
        wrap: false,
        metrics: crate::layout::text::TextMetrics {
            width: 30.0,
            height: 14.0,
            lines: 1,
        },
        color: Rgba8::WHITE,
        opacity: 1.0,
        scale: 1.0,
    });
    let err = raster().rasterize(canvas(8, 8), &[text]).unwrap_err();
    assert!(matches!(err, ReelError::Render(_)));
}

#[test]
fn frames_do_not_carry_over() {
    let mut raster = raster();
    let white = Drawable::solid_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Rgba8::WHITE);
    raster.rasterize(canvas(4, 4), &[white]).unwrap();
    let empty = raster.rasterize(canvas(4, 4), &[]).unwrap();
    assert!(empty.data.iter().all(|b| *b == 0));
}

fn dejavu() -> FontBook {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data/fonts/DejaVuSans.ttf");
    let face = crate::assets::fonts::FontFace::from_bytes(std::fs::read(path).unwrap()).unwrap();
    FontBook::from_faces(Some(face), None)
}

#[test]
fn glyphs_advance_along_the_line() {
    use crate::layout::parley_text::ParleyShaper;
    use crate::layout::text::{TextShaper, TextStyle};

    let fonts = dejavu();
    let style = TextStyle::new(20.0);
    let metrics = ParleyShaper::new(&fonts)
        .unwrap()
        .measure("HHHHHH", &style, None)
        .unwrap();
    let text = Drawable::Text(TextBox {
        text: "HHHHHH".into(),
        style,
        origin: Point::new(4.0, 4.0),
        box_width: metrics.width,
        wrap: false,
        metrics,
        color: Rgba8::WHITE,
        opacity: 1.0,
        scale: 1.0,
    });
    let frame = CpuRasterizer::new(&fonts)
        .unwrap()
        .rasterize(canvas(120, 40), &[text])
        .unwrap();

    let inked: Vec<(u32, u32)> = (0..40)
        .flat_map(|y| (0..120).map(move |x| (x, y)))
        .filter(|&(x, y)| frame.pixel(x, y).is_some_and(|px| px[3] > 128))
        .collect();
    let min_x = inked.iter().map(|p| p.0).min().unwrap();
    let max_x = inked.iter().map(|p| p.0).max().unwrap();
    let min_y = inked.iter().map(|p| p.1).min().unwrap();
    let max_y = inked.iter().map(|p| p.1).max().unwrap();

    let ink_width = f64::from(max_x - min_x + 1);
    let measured = metrics.width;
    assert!(ink_width > measured * 0.8, "{ink_width} vs {measured}");
    assert!(ink_width <= measured + 2.0, "{ink_width} vs {measured}");
    // Glyphs sit on the baseline inside the measured box, not above its top edge.
    assert!(min_y >= 4, "{min_y}");
    assert!(f64::from(max_y) <= 4.0 + metrics.height, "{max_y}");
}
