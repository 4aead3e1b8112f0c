use crate::config::EngineContext;
use crate::draw::drawable::Drawable;
use crate::foundation::core::{Canvas, Progress};
use crate::foundation::error::{ReelError, ReelResult};
use crate::layers::{LayerRenderer, TextCx};
use crate::layout::parley_text::ParleyShaper;
use crate::layout::text::{ApproxShaper, TextShaper};
use crate::render::{CpuRasterizer, FrameRGBA, Rasterizer};
use crate::scene::model::Layer;

/// One layer's frame source: set up once, queried for any number of progress values, closed.
pub struct LayerSource {
    canvas: Canvas,
    kind: &'static str,
    state: SourceState,
}

enum SourceState {
    Ready(Box<ReadySource>),
    Closed,
}

struct ReadySource {
    renderer: LayerRenderer,
    engine: EngineContext,
    shaper: Box<dyn TextShaper>,
    // Built on first `render_frame`; sessions rasterize all layers together instead.
    raster: Option<CpuRasterizer>,
}

impl std::fmt::Debug for LayerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerSource")
            .field("canvas", &self.canvas)
            .field("kind", &self.kind)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl LayerSource {
    /// Decode assets and resolve defaults. Fails before any frame is requested when the layer
    /// cannot be drawn, including text layers with no font configured.
    pub fn init(canvas: Canvas, layer: &Layer, engine: &EngineContext) -> ReelResult<Self> {
        Self::init_in_slot(canvas, layer, engine, 0)
    }

    /// Like [`LayerSource::init`]; `slot` keeps random picks of sibling layers apart when the
    /// engine is seeded.
    #[tracing::instrument(level = "debug", skip(layer, engine), fields(kind = layer.kind()))]
    pub fn init_in_slot(
        canvas: Canvas,
        layer: &Layer,
        engine: &EngineContext,
        slot: u64,
    ) -> ReelResult<Self> {
        let shaper: Box<dyn TextShaper> = if engine.fonts().is_empty() {
            if layer.draws_text() {
                return Err(ReelError::asset(format!(
                    "{} layer draws text but no font is configured (fonts.regular / fonts.bold)",
                    layer.kind()
                )));
            }
            Box::new(ApproxShaper::default())
        } else {
            Box::new(ParleyShaper::new(engine.fonts())?)
        };
        Self::init_with_shaper(canvas, layer, engine, slot, shaper)
    }

    /// Set up with a caller-supplied text shaper. Drawables are measured with it; rasterizing
    /// text still needs real fonts.
    pub fn init_with_shaper(
        canvas: Canvas,
        layer: &Layer,
        engine: &EngineContext,
        slot: u64,
        shaper: Box<dyn TextShaper>,
    ) -> ReelResult<Self> {
        canvas.validate()?;
        let renderer = LayerRenderer::prepare(canvas, layer, engine, slot)?;
        tracing::debug!(kind = layer.kind(), slot, "frame source ready");
        Ok(Self {
            canvas,
            kind: layer.kind(),
            state: SourceState::Ready(Box::new(ReadySource {
                renderer,
                engine: engine.clone(),
                shaper,
                raster: None,
            })),
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, SourceState::Closed)
    }

    /// Drawables for `progress`, which must lie in `[0, 1]`.
    pub fn render_drawables(&mut self, progress: f64) -> ReelResult<Vec<Drawable>> {
        let progress = Progress::new(progress)?;
        let kind = self.kind;
        let ready = self.ready_mut()?;
        let mut tx = TextCx {
            shaper: ready.shaper.as_mut(),
            engine: &ready.engine,
        };
        let drawables = ready.renderer.render(progress.get(), &mut tx)?;
        tracing::trace!(
            kind,
            progress = progress.get(),
            n = drawables.len(),
            "layer rendered"
        );
        Ok(drawables)
    }

    /// This layer alone, rasterized onto a transparent frame.
    pub fn render_frame(&mut self, progress: f64) -> ReelResult<FrameRGBA> {
        let drawables = self.render_drawables(progress)?;
        let canvas = self.canvas;
        let ready = self.ready_mut()?;
        if ready.raster.is_none() {
            ready.raster = Some(CpuRasterizer::new(ready.engine.fonts())?);
        }
        let raster = ready
            .raster
            .as_mut()
            .ok_or_else(|| ReelError::render("rasterizer was not initialized"))?;
        raster.rasterize(canvas, &drawables)
    }

    /// Release decoded assets and caches. Later renders fail; closing again does nothing.
    pub fn close(&mut self) {
        let state = std::mem::replace(&mut self.state, SourceState::Closed);
        if let SourceState::Ready(mut ready) = state {
            if let Some(raster) = ready.raster.as_mut() {
                raster.release();
            }
            tracing::debug!(kind = self.kind, "frame source closed");
        }
    }

    fn ready_mut(&mut self) -> ReelResult<&mut ReadySource> {
        match &mut self.state {
            SourceState::Ready(ready) => Ok(ready.as_mut()),
            SourceState::Closed => Err(ReelError::render(format!(
                "{} frame source is closed",
                self.kind
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/frame_source.rs"]
mod tests;
