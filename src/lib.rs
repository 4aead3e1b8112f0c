#![forbid(unsafe_code)]

//! Frame composition engine for short promotional clips.
//!
//! A [`Clip`] is an ordered list of [`Layer`]s. Each layer is prepared once per clip, then maps a
//! progress value in `[0, 1]` to renderer-agnostic [`Drawable`]s; [`ClipSession`] composites
//! every layer's drawables into one straight-alpha [`FrameRGBA`] per request.

pub mod animation;
pub mod assets;
pub mod config;
pub mod draw;
pub mod foundation;
pub mod layers;
pub mod layout;
pub mod render;
pub mod scene;
pub mod session;

pub use animation::ease::Ease;
pub use assets::fonts::{FontBook, FontFace};
pub use config::{EngineConfig, EngineContext};
pub use draw::drawable::{Drawable, Paint};
pub use foundation::core::{Canvas, ContainerRect, Progress, Rgba8};
pub use foundation::error::{ReelError, ReelResult};
pub use layout::text::{ApproxShaper, GlyphSubstitution, TextShaper};
pub use render::{CpuRasterizer, FrameRGBA, Rasterizer};
pub use scene::model::{Clip, Layer};
pub use scene::review::{ReviewClipOptions, ReviewRecord, review_clip, review_clips};
pub use session::{ClipSession, LayerSource, ParallelOpts, render_clips_parallel};
