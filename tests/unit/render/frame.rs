use super::*;

#[test]
fn pixel_reads_row_major_and_rejects_out_of_range() {
    let mut frame = FrameRGBA::transparent(Canvas::new(3, 2).unwrap());
    let i = (3 + 2) * 4;
    frame.data[i..i + 4].copy_from_slice(&[1, 2, 3, 4]);
    assert_eq!(frame.pixel(2, 1), Some([1, 2, 3, 4]));
    assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(frame.pixel(3, 0), None);
    assert_eq!(frame.pixel(0, 2), None);
}

#[test]
fn to_straight_unpremultiplies_once() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 64, 64, 128],
        premultiplied: true,
    };
    let straight = frame.to_straight();
    assert!(!straight.premultiplied);
    assert_eq!(straight.data, vec![128, 128, 128, 128]);
    assert_eq!(straight.to_straight(), straight);
}

#[test]
fn save_png_writes_a_decodable_file() {
    let mut frame = FrameRGBA::transparent(Canvas::new(2, 2).unwrap());
    frame.data[..4].copy_from_slice(&[255, 0, 0, 255]);
    let path = std::env::temp_dir().join(format!("promoreel-frame-{}.png", std::process::id()));
    frame.save_png(&path).unwrap();
    let back = image::open(&path).unwrap().to_rgba8();
    let _ = std::fs::remove_file(&path);
    assert_eq!(back.dimensions(), (2, 2));
    assert_eq!(back.get_pixel(0, 0).0, [255, 0, 0, 255]);
}
