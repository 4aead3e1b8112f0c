use rayon::prelude::*;

use crate::config::EngineContext;
use crate::draw::drawable::Drawable;
use crate::foundation::core::{Canvas, Progress};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::{CpuRasterizer, FrameRGBA, Rasterizer};
use crate::scene::model::Clip;
use crate::session::frame_source::LayerSource;

/// All layers of one clip composited into a single frame per progress value.
///
/// Every layer is set up in [`ClipSession::new`], so a bad asset or a missing font fails the
/// whole clip before the first frame.
#[derive(Debug)]
pub struct ClipSession {
    canvas: Canvas,
    duration: f64,
    sources: Vec<LayerSource>,
    raster: CpuRasterizer,
    closed: bool,
}

impl ClipSession {
    #[tracing::instrument(level = "debug", skip(clip, engine), fields(layers = clip.layers.len()))]
    pub fn new(canvas: Canvas, clip: &Clip, engine: &EngineContext) -> ReelResult<Self> {
        canvas.validate()?;
        clip.validate()?;
        let sources = clip
            .layers
            .iter()
            .enumerate()
            .map(|(i, layer)| {
                LayerSource::init_in_slot(canvas, layer, engine, i as u64)
                    .map_err(|e| prefix_error(e, &format!("layers[{i}] ({})", layer.kind())))
            })
            .collect::<ReelResult<Vec<_>>>()?;
        let raster = CpuRasterizer::new(engine.fonts())?;
        Ok(Self {
            canvas,
            duration: clip.duration,
            sources,
            raster,
            closed: false,
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn layer_count(&self) -> usize {
        self.sources.len()
    }

    /// Number of frames at `fps`, at least one.
    pub fn frame_count(&self, fps: f64) -> ReelResult<usize> {
        validate_fps(fps)?;
        Ok(((self.duration * fps).round() as usize).max(1))
    }

    /// Progress of frame `index` at `fps`: the first frame is 0 and the last is 1.
    pub fn frame_progress(&self, index: usize, fps: f64) -> ReelResult<f64> {
        let frames = self.frame_count(fps)?;
        if index >= frames {
            return Err(ReelError::validation(format!(
                "frame index {index} is outside the clip's {frames} frames"
            )));
        }
        if frames == 1 {
            return Ok(0.0);
        }
        Ok(index as f64 / (frames - 1) as f64)
    }

    /// Every layer's drawables for `progress`, bottom layer first.
    pub fn render_drawables(&mut self, progress: f64) -> ReelResult<Vec<Drawable>> {
        self.ensure_open()?;
        let progress = Progress::new(progress)?;
        let mut out = Vec::new();
        for source in &mut self.sources {
            out.extend(source.render_drawables(progress.get())?);
        }
        Ok(out)
    }

    pub fn render_frame(&mut self, progress: f64) -> ReelResult<FrameRGBA> {
        let drawables = self.render_drawables(progress)?;
        let frame = self.raster.rasterize(self.canvas, &drawables)?;
        tracing::trace!(progress, drawables = drawables.len(), "frame rendered");
        Ok(frame)
    }

    /// Close every layer and drop cached images. Closing twice does nothing.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        for source in &mut self.sources {
            source.close();
        }
        self.raster.release();
        self.closed = true;
        tracing::debug!(layers = self.sources.len(), "clip session closed");
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> ReelResult<()> {
        if self.closed {
            return Err(ReelError::render("clip session is closed"));
        }
        Ok(())
    }
}

/// Options for [`render_clips_parallel`].
#[derive(Clone, Copy, Debug)]
pub struct ParallelOpts {
    pub fps: f64,
    /// Worker threads; `None` uses rayon's default.
    pub threads: Option<usize>,
}

impl Default for ParallelOpts {
    fn default() -> Self {
        Self {
            fps: 30.0,
            threads: None,
        }
    }
}

/// Render every frame of every clip, one session per clip on a dedicated rayon pool.
///
/// `sink` receives `(clip index, frame index, frame)`; frames of one clip arrive in order, clips
/// interleave. A failing frame or sink call stops that clip after the current frame and the first
/// error is returned. Returns the number of frames rendered per clip.
pub fn render_clips_parallel<F>(
    canvas: Canvas,
    clips: &[Clip],
    engine: &EngineContext,
    opts: ParallelOpts,
    sink: F,
) -> ReelResult<Vec<usize>>
where
    F: Fn(usize, usize, FrameRGBA) -> ReelResult<()> + Sync,
{
    validate_fps(opts.fps)?;
    let pool = build_thread_pool(opts.threads)?;
    let results: Vec<ReelResult<usize>> = pool.install(|| {
        clips
            .par_iter()
            .enumerate()
            .map(|(ci, clip)| {
                render_whole_clip(canvas, clip, engine, opts.fps, |fi, frame| {
                    sink(ci, fi, frame)
                })
                .map_err(|e| prefix_error(e, &format!("clips[{ci}]")))
            })
            .collect()
    });
    results.into_iter().collect()
}

fn render_whole_clip(
    canvas: Canvas,
    clip: &Clip,
    engine: &EngineContext,
    fps: f64,
    mut sink: impl FnMut(usize, FrameRGBA) -> ReelResult<()>,
) -> ReelResult<usize> {
    let mut session = ClipSession::new(canvas, clip, engine)?;
    let frames = session.frame_count(fps)?;
    let result = (0..frames).try_for_each(|i| {
        let progress = session.frame_progress(i, fps)?;
        let frame = session.render_frame(progress)?;
        sink(i, frame)
    });
    session.close();
    result.map(|()| frames)
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(ReelError::validation("threads must be >= 1 when set"));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::render(format!("failed to build rayon thread pool: {e}")))
}

fn validate_fps(fps: f64) -> ReelResult<()> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(ReelError::validation(format!(
            "fps must be finite and > 0, got {fps}"
        )));
    }
    Ok(())
}

/// Keep the error class while naming where it happened.
fn prefix_error(err: ReelError, at: &str) -> ReelError {
    match err {
        ReelError::Validation(m) => ReelError::Validation(format!("{at}: {m}")),
        ReelError::Asset(m) => ReelError::Asset(format!("{at}: {m}")),
        ReelError::Render(m) => ReelError::Render(format!("{at}: {m}")),
        ReelError::Serde(m) => ReelError::Serde(format!("{at}: {m}")),
        ReelError::Other(e) => ReelError::Other(e.context(at.to_string())),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/clip.rs"]
mod tests;
