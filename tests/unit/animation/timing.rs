use super::*;

#[test]
fn window_clamps_before_and_after() {
    assert_eq!(window(0.1, 0.2, 0.1), 0.0);
    assert!((window(0.25, 0.2, 0.1) - 0.5).abs() < 1e-12);
    assert_eq!(window(0.9, 0.2, 0.1), 1.0);
    assert_eq!(window(0.5, 0.5, 0.0), 1.0);
    assert_eq!(window(0.4, 0.5, 0.0), 0.0);
}

#[test]
fn delayed_applies_delay_then_speed() {
    assert_eq!(delayed(0.1, 0.2, 1.0), 0.0);
    assert!((delayed(0.3, 0.2, 2.0) - 0.2).abs() < 1e-12);
    assert_eq!(delayed(1.0, 0.0, 3.0), 1.0);
}

#[test]
fn slide_holds_off_screen_then_centers_then_exits() {
    let s = SlideInOut::REVIEW_CARD;
    let w = 320.0;
    assert_eq!(s.offset(0.0, w), w);
    assert_eq!(s.offset(0.19, w), w);
    assert!(s.offset(0.23, w).abs() < 0.05 * w);
    assert_eq!(s.offset(0.27, w), 0.0);
    assert_eq!(s.offset(0.5, w), 0.0);
    assert_eq!(s.offset(0.8, w), 0.0);
    assert!(s.offset(0.83, w) < 0.0);
    assert_eq!(s.offset(0.87, w), -w);
    assert_eq!(s.offset(1.0, w), -w);
}

#[test]
fn slide_is_monotonic_across_the_clip() {
    let s = SlideInOut::REVIEW_CARD;
    let mut prev = s.eased(0.0);
    for i in 1..=200 {
        let v = s.eased(f64::from(i) / 200.0);
        assert!(v >= prev);
        prev = v;
    }
}
