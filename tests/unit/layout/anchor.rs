use super::*;

#[test]
fn top_left_is_identity() {
    let r = place(Anchor::TOP_LEFT, 10.0, 20.0, 30.0, 40.0);
    assert_eq!(r, Rect::new(10.0, 20.0, 40.0, 60.0));
}

#[test]
fn center_anchor_centers_the_box() {
    let r = place(Anchor::CENTER, 50.0, 50.0, 20.0, 10.0);
    assert_eq!(r, Rect::new(40.0, 45.0, 60.0, 55.0));
    assert_eq!(r.center(), Point::new(50.0, 50.0));
}

#[test]
fn bottom_and_right_origins_hang_above_and_left() {
    let r = place(Anchor::BOTTOM_CENTER, 100.0, 200.0, 40.0, 10.0);
    assert_eq!(r, Rect::new(80.0, 190.0, 120.0, 200.0));
    let r = place(Anchor::CENTER_RIGHT, 0.0, 0.0, 4.0, 4.0);
    assert_eq!(r, Rect::new(-4.0, -2.0, 0.0, 2.0));
}

#[test]
fn anchor_point_inverts_place() {
    for anchor in [Anchor::TOP_LEFT, Anchor::CENTER_LEFT, Anchor::BOTTOM_CENTER] {
        let r = place(anchor, 7.0, 9.0, 12.0, 6.0);
        assert_eq!(anchor_point(anchor, r), Point::new(7.0, 9.0));
    }
}
