use crate::layers::test_support::with_text;

use super::*;

fn canvas() -> Canvas {
    Canvas::new(400, 300).unwrap()
}

fn timing(delay: f64, speed: f64) -> CaptionTiming {
    CaptionTiming { delay, speed }
}

fn text_of(d: &Drawable) -> &crate::draw::drawable::TextBox {
    match d {
        Drawable::Text(t) => t,
        other => panic!("expected text, got {other:?}"),
    }
}

fn rect_of(d: &Drawable) -> &RectShape {
    match d {
        Drawable::Rect(r) => r,
        other => panic!("expected rect, got {other:?}"),
    }
}

fn subtitle(delay: f64) -> Subtitle {
    Subtitle::new(
        canvas(),
        CaptionParams {
            text: "hello there".to_string(),
            text_color: Rgba8::WHITE,
            background_color: Rgba8::rgba(0, 0, 0, 77),
            timing: timing(delay, 1.0),
        },
    )
}

#[test]
fn subtitle_is_invisible_before_delay_and_settles_after() {
    let s = subtitle(0.5);
    let before = with_text(|tx| s.render(0.25, tx)).unwrap();
    assert_eq!(rect_of(&before[0]).opacity, 0.0);
    assert_eq!(text_of(&before[1]).opacity, 0.0);

    let after = with_text(|tx| s.render(1.0, tx)).unwrap();
    let t = text_of(&after[1]);
    assert!(t.opacity > 0.96);
    // Fully eased text is centered with its bottom one padding above the frame edge.
    let padding = 0.05 * 300.0;
    assert!((t.rect().y1 - (300.0 - padding)).abs() < 1e-9);
}

#[test]
fn subtitle_band_hugs_the_bottom_edge() {
    let out = with_text(|tx| subtitle(0.0).render(0.5, tx)).unwrap();
    let band = rect_of(&out[0]).rect;
    let text = text_of(&out[1]).rect();
    assert!((band.y1 - 300.0).abs() < 1e-9);
    assert_eq!(band.x0, 0.0);
    assert_eq!(band.x1, 400.0);
    assert!((band.height() - (text.height() + 2.0 * 15.0)).abs() < 1e-9);
}

fn title(position: TitlePosition) -> Title {
    Title::new(
        canvas(),
        TitleParams {
            text: "Big News".to_string(),
            text_color: Rgba8::WHITE,
            position,
            timing: CaptionTiming::default(),
        },
    )
}

#[test]
fn title_font_and_zoom() {
    let t = title(TitlePosition::Center);
    assert_eq!(t.font_size(), 30.0);
    assert_eq!(Title::scale(0.0), 1.0);
    assert_eq!(Title::scale(1.0), 1.2);
    assert_eq!(Title::scale(0.123456), 1.0247);
}

#[test]
fn title_positions_pin_the_right_edge() {
    let top = with_text(|tx| title(TitlePosition::Top).render(0.5, tx)).unwrap();
    assert!((text_of(&top[0]).rect().y0 - 15.0).abs() < 1e-9);

    let bottom = with_text(|tx| title(TitlePosition::Bottom).render(0.5, tx)).unwrap();
    assert!((text_of(&bottom[0]).rect().y1 - 300.0).abs() < 1e-9);

    let center = with_text(|tx| title(TitlePosition::Center).render(0.5, tx)).unwrap();
    let r = text_of(&center[0]).rect();
    assert!((r.center() - Point::new(200.0, 150.0)).hypot() < 1e-9);
    assert!((r.width() - 320.0 * 1.1).abs() < 1e-9);
}

#[test]
fn title_fades_in() {
    let t = title(TitlePosition::Center);
    let at = |p: f64| text_of(&with_text(|tx| t.render(p, tx)).unwrap()[0]).opacity;
    assert_eq!(at(0.0), 0.0);
    assert!(at(0.1) < at(0.3));
    assert_eq!(at(1.0), 1.0);
}

fn news(delay: f64, speed: f64) -> NewsTitle {
    NewsTitle::new(
        canvas(),
        NewsTitleParams {
            text: "BREAKING".to_string(),
            text_color: Rgba8::WHITE,
            background_color: Rgba8::rgb(0xd0, 0x2a, 0x42),
            timing: timing(delay, speed),
        },
    )
}

#[test]
fn news_timelines_are_staggered() {
    let n = news(0.0, 1.0);
    let tl = n.timelines(0.05);
    assert!(tl.background > tl.text);
    assert!(tl.text > tl.text_opacity);
    assert_eq!(tl.text_opacity, 0.0);

    let done = n.timelines(1.0);
    assert_eq!(
        done,
        NewsTimelines {
            background: 1.0,
            text: 1.0,
            text_opacity: 1.0
        }
    );
}

#[test]
fn news_delay_and_speed_shift_every_timeline() {
    let n = news(0.2, 2.0);
    assert_eq!(n.timelines(0.2).background, 0.0);
    assert!(n.timelines(0.25).background > 0.0);
    assert_eq!(n.timelines(0.25).text_opacity, 0.0);
}

#[test]
fn news_bar_and_text_slide_in_from_the_left() {
    let n = news(0.0, 1.0);
    let start = with_text(|tx| n.render(0.0, tx)).unwrap();
    let bar = rect_of(&start[0]).rect;
    assert!(bar.x1 <= 0.0);
    assert!(text_of(&start[1]).rect().x1 <= 0.0);

    let end = with_text(|tx| n.render(1.0, tx)).unwrap();
    let bar = rect_of(&end[0]).rect;
    let text = text_of(&end[1]).rect();
    let (pad_v, pad_h) = (0.07 * 300.0, 0.03 * 300.0);
    assert_eq!(bar.x0, 0.0);
    assert!((text.x0 - pad_v).abs() < 1e-9);
    assert!((bar.width() - (text.width() + 2.0 * pad_v)).abs() < 1e-9);
    assert!((bar.y0 - (300.0 * 0.08 - pad_h)).abs() < 1e-9);
    assert!(text_of(&end[1]).style.letter_spacing_em > 0.0);
}
