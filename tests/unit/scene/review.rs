use super::*;

fn record(rating: i64, text: &str) -> ReviewRecord {
    ReviewRecord {
        rating,
        text: text.to_string(),
        image: "/assets/img1.jpg".to_string(),
        date: "Jan 27th 2020".to_string(),
    }
}

fn canvas() -> Canvas {
    Canvas::new(320, 420).unwrap()
}

#[test]
fn builds_image_then_card() {
    let opts = ReviewClipOptions::default();
    let clip = review_clip(&record(5, "This is a test"), canvas(), &opts).unwrap();
    assert_eq!(clip.duration, 8.0);
    assert_eq!(
        clip.transition,
        Some(serde_json::json!({"name": "crosszoom"}))
    );

    let Layer::Image(img) = &clip.layers[0] else {
        panic!("expected image first");
    };
    assert_eq!(img.resize_mode, ResizeMode::Cover);
    assert_eq!(img.zoom_direction, ZoomDirection::In);
    assert_eq!(img.zoom_amount, 0.35);
    assert_eq!(img.path, PathBuf::from("/assets/img1.jpg"));

    let Layer::Review(card) = &clip.layers[1] else {
        panic!("expected review card second");
    };
    assert_eq!(card.text, "❝This is a test❞");
    assert_eq!(card.rating, 5);
    assert!((card.padding.unwrap() - 22.4).abs() < 1e-9);
    assert_eq!(card.date_string, "Jan 27th 2020");
}

#[test]
fn empty_text_stays_empty() {
    let clip = review_clip(&record(3, ""), canvas(), &ReviewClipOptions::default()).unwrap();
    let Layer::Review(card) = &clip.layers[1] else {
        panic!("expected review card");
    };
    assert!(card.text.is_empty());
}

#[test]
fn rating_out_of_range_is_rejected() {
    for r in [-1, 6] {
        let err = review_clip(&record(r, "x"), canvas(), &ReviewClipOptions::default())
            .unwrap_err();
        assert!(matches!(err, ReelError::Validation(_)));
    }
}

#[test]
fn file_urls_are_accepted_and_remote_urls_are_not() {
    let mut r = record(5, "x");
    r.image = "file:///tmp/a.png".to_string();
    let clip = review_clip(&r, canvas(), &ReviewClipOptions::default()).unwrap();
    let Layer::Image(img) = &clip.layers[0] else {
        panic!("expected image");
    };
    assert_eq!(img.path, PathBuf::from("/tmp/a.png"));

    r.image = "https://example.com/a.png".to_string();
    assert!(r.validate().is_err());
}

#[test]
fn review_clips_requires_records_and_reports_index() {
    let opts = ReviewClipOptions::default();
    assert!(review_clips(&[], canvas(), &opts).is_err());

    let err = review_clips(&[record(5, "a"), record(9, "b")], canvas(), &opts).unwrap_err();
    assert!(err.to_string().contains("reviews[1]"));

    let clips = review_clips(&[record(5, "a"), record(4, "")], canvas(), &opts).unwrap();
    assert_eq!(clips.len(), 2);
}

#[test]
fn records_parse_from_json() {
    let records: Vec<ReviewRecord> = serde_json::from_str(
        r#"[{"rating": 5, "text": "hi", "image": "a.jpg", "date": "Jan 27th 2020"},
            {"rating": 4, "image": "b.jpg"}]"#,
    )
    .unwrap();
    assert_eq!(records[1].text, "");
    assert_eq!(records[1].date, "");
}
