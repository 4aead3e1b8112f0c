use std::sync::Mutex;

use crate::assets::fonts::FontBook;
use crate::config::EngineConfig;

use super::*;

fn engine() -> EngineContext {
    EngineContext::with_fonts(EngineConfig::default(), FontBook::empty())
}

fn canvas() -> Canvas {
    Canvas::new(16, 16).unwrap()
}

fn clip(json: &str) -> Clip {
    Clip::from_json_str(json).unwrap()
}

fn two_fills() -> Clip {
    clip(
        r##"{"duration": 1, "layers": [
            {"type": "fill-color", "color": "#ff0000"},
            {"type": "fill-color", "color": "#0000ff80"}
        ]}"##,
    )
}

#[test]
fn later_layers_composite_on_top() {
    let mut session = ClipSession::new(canvas(), &two_fills(), &engine()).unwrap();
    assert_eq!(session.layer_count(), 2);
    let frame = session.render_frame(0.0).unwrap();
    let px = frame.pixel(3, 3).unwrap();
    assert_eq!(px[3], 255);
    assert!(px[0] > 100 && px[0] < 150, "{px:?}");
    assert!(px[2] > 100 && px[2] < 150, "{px:?}");
}

#[test]
fn frame_progress_spans_first_to_last_frame() {
    let session = ClipSession::new(canvas(), &two_fills(), &engine()).unwrap();
    assert_eq!(session.frame_count(10.0).unwrap(), 10);
    assert_eq!(session.frame_progress(0, 10.0).unwrap(), 0.0);
    assert_eq!(session.frame_progress(9, 10.0).unwrap(), 1.0);
    let third = session.frame_progress(3, 10.0).unwrap();
    assert!((third - 1.0 / 3.0).abs() < 1e-12);
    assert!(matches!(
        session.frame_progress(10, 10.0),
        Err(ReelError::Validation(_))
    ));
    assert!(session.frame_count(0.0).is_err());
    assert!(session.frame_count(f64::NAN).is_err());
}

#[test]
fn single_frame_clip_renders_at_zero() {
    let session = ClipSession::new(canvas(), &two_fills(), &engine()).unwrap();
    assert_eq!(session.frame_count(0.5).unwrap(), 1);
    assert_eq!(session.frame_progress(0, 0.5).unwrap(), 0.0);
}

#[test]
fn failing_layer_is_named_in_the_error() {
    let bad = clip(
        r##"{"duration": 1, "layers": [
            {"type": "fill-color"},
            {"type": "subtitle", "text": "hi"}
        ]}"##,
    );
    let err = ClipSession::new(canvas(), &bad, &engine()).unwrap_err();
    match err {
        ReelError::Asset(msg) => assert!(msg.starts_with("layers[1] (subtitle)"), "{msg}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn closed_session_refuses_frames() {
    let mut session = ClipSession::new(canvas(), &two_fills(), &engine()).unwrap();
    session.render_frame(0.5).unwrap();
    session.close();
    session.close();
    assert!(session.is_closed());
    assert!(matches!(
        session.render_frame(0.5),
        Err(ReelError::Render(_))
    ));
}

#[test]
fn progress_is_validated_before_any_layer_runs() {
    let mut session = ClipSession::new(canvas(), &two_fills(), &engine()).unwrap();
    assert!(matches!(
        session.render_drawables(2.0),
        Err(ReelError::Validation(_))
    ));
    assert_eq!(session.render_drawables(1.0).unwrap().len(), 2);
}

#[test]
fn parallel_clips_render_every_frame() {
    let gradient = r#"{"duration": 2, "layers": [{"type": "linear-gradient"}]}"#;
    let clips = vec![two_fills(), clip(gradient)];
    let seen = Mutex::new(Vec::new());
    let counts = render_clips_parallel(
        canvas(),
        &clips,
        &engine(),
        ParallelOpts {
            fps: 4.0,
            threads: Some(2),
        },
        |ci, fi, frame| {
            assert_eq!(frame.width, 16);
            seen.lock().unwrap().push((ci, fi));
            Ok(())
        },
    )
    .unwrap();
    assert_eq!(counts, vec![4, 8]);
    let mut seen = seen.into_inner().unwrap();
    seen.sort_unstable();
    assert_eq!(seen.len(), 12);
    assert_eq!(seen[0], (0, 0));
    assert_eq!(seen[11], (1, 7));
}

#[test]
fn sink_errors_stop_the_clip() {
    let err = render_clips_parallel(
        canvas(),
        &[two_fills()],
        &engine(),
        ParallelOpts {
            fps: 4.0,
            threads: Some(1),
        },
        |_, fi, _| {
            if fi == 1 {
                Err(ReelError::render("encoder went away"))
            } else {
                Ok(())
            }
        },
    )
    .unwrap_err();
    match err {
        ReelError::Render(msg) => assert_eq!(msg, "clips[0]: encoder went away"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn zero_threads_is_rejected() {
    let err = render_clips_parallel(
        canvas(),
        &[two_fills()],
        &engine(),
        ParallelOpts {
            fps: 1.0,
            threads: Some(0),
        },
        |_, _, _| Ok(()),
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}
