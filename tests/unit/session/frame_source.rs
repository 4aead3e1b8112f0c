use crate::assets::fonts::FontBook;
use crate::config::EngineConfig;
use crate::foundation::core::Rgba8;
use crate::scene::model::{FillColorParams, ReviewParams};

use super::*;

fn engine() -> EngineContext {
    EngineContext::with_fonts(EngineConfig::default(), FontBook::empty())
}

fn canvas() -> Canvas {
    Canvas::new(32, 24).unwrap()
}

fn fill(color: Rgba8) -> Layer {
    Layer::FillColor(FillColorParams { color: Some(color) })
}

fn review() -> Layer {
    Layer::Review(ReviewParams {
        text: "Great product, would buy again".into(),
        rating: 4,
        padding: None,
        container_rect: None,
        date_string: "Jan 27th 2020".into(),
    })
}

#[test]
fn fill_source_renders_pixels() {
    let layer = fill(Rgba8::rgb(0, 128, 255));
    let mut source = LayerSource::init(canvas(), &layer, &engine()).unwrap();
    assert_eq!(source.kind(), "fill-color");
    let frame = source.render_frame(0.5).unwrap();
    assert_eq!((frame.width, frame.height), (32, 24));
    assert_eq!(frame.pixel(10, 10), Some([0, 128, 255, 255]));
}

#[test]
fn text_layer_without_fonts_fails_at_init() {
    let err = LayerSource::init(canvas(), &review(), &engine()).unwrap_err();
    assert!(matches!(err, ReelError::Asset(_)), "{err}");
}

#[test]
fn injected_shaper_measures_text_layers() {
    let mut source = LayerSource::init_with_shaper(
        Canvas::new(320, 420).unwrap(),
        &review(),
        &engine(),
        0,
        Box::new(ApproxShaper::default()),
    )
    .unwrap();
    let drawables = source.render_drawables(0.5).unwrap();
    assert_eq!(drawables.len(), 1);
    assert!(matches!(drawables[0], Drawable::Group(_)));
    // Measuring works, drawing glyphs still needs a font.
    assert!(matches!(
        source.render_frame(0.5),
        Err(ReelError::Render(_))
    ));
}

#[test]
fn out_of_range_progress_is_rejected() {
    let mut source = LayerSource::init(canvas(), &fill(Rgba8::WHITE), &engine()).unwrap();
    for bad in [-0.01, 1.01, f64::NAN, f64::INFINITY] {
        let err = source.render_drawables(bad).unwrap_err();
        assert!(matches!(err, ReelError::Validation(_)), "{bad}: {err}");
    }
    assert!(source.render_drawables(0.0).is_ok());
    assert!(source.render_drawables(1.0).is_ok());
}

#[test]
fn progress_order_does_not_matter() {
    let mut source = LayerSource::init_with_shaper(
        Canvas::new(320, 420).unwrap(),
        &review(),
        &engine(),
        0,
        Box::new(ApproxShaper::default()),
    )
    .unwrap();
    let late = source.render_drawables(0.9).unwrap();
    let early = source.render_drawables(0.1).unwrap();
    assert_eq!(source.render_drawables(0.9).unwrap(), late);
    assert_eq!(source.render_drawables(0.1).unwrap(), early);
    assert_ne!(late, early);
}

#[test]
fn rendering_after_close_is_an_error() {
    let mut source = LayerSource::init(canvas(), &fill(Rgba8::WHITE), &engine()).unwrap();
    source.render_frame(0.2).unwrap();
    source.close();
    assert!(source.is_closed());
    assert!(matches!(
        source.render_drawables(0.2),
        Err(ReelError::Render(_))
    ));
    assert!(matches!(
        source.render_frame(0.2),
        Err(ReelError::Render(_))
    ));
    source.close();
    assert!(source.is_closed());
}

#[test]
fn missing_image_fails_at_init() {
    let layer: Layer = serde_json::from_str(
        r#"{"type": "image", "path": "/definitely/not/here/promoreel.png"}"#,
    )
    .unwrap();
    let err = LayerSource::init(canvas(), &layer, &engine()).unwrap_err();
    assert!(matches!(err, ReelError::Asset(_)), "{err}");
}
