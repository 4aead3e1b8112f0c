//! Frame-source lifecycle for single layers and whole clips.

pub mod clip;
pub mod frame_source;

pub use clip::{ClipSession, ParallelOpts, render_clips_parallel};
pub use frame_source::LayerSource;
