use crate::assets::decode::{PreparedImage, backdrop_image, load_image};
use crate::draw::drawable::{Drawable, Group, ImageDraw};
use crate::foundation::core::{Canvas, ContainerRect, Rect, Vec2};
use crate::foundation::error::ReelResult;
use crate::scene::model::{ImageParams, ResizeMode, ZoomDirection, resolve_container};

/// Backdrop size relative to the source image before it is stretched over the container.
const BACKDROP_SCALE: f64 = 0.01;

/// Zoom multiplier at `progress`: `1 + p·amount` zooming in, `1 + amount·(1 - p)` zooming out.
pub fn zoom_factor(direction: ZoomDirection, amount: f64, progress: f64) -> f64 {
    match direction {
        ZoomDirection::In => 1.0 + progress * amount,
        ZoomDirection::Out => 1.0 + amount * (1.0 - progress),
        ZoomDirection::None => 1.0,
    }
}

/// Base scale fitting an `iw × ih` image into `container`.
pub fn fit_scale(mode: ResizeMode, container: ContainerRect, iw: f64, ih: f64) -> f64 {
    let sx = container.width / iw;
    let sy = container.height / ih;
    match mode {
        ResizeMode::Contain => sx.min(sy),
        ResizeMode::Cover => sx.max(sy),
    }
}

fn centered(container: ContainerRect, w: f64, h: f64) -> Rect {
    Rect::from_center_size(container.center(), (w, h))
}

/// Decoded image zooming inside its container, over a blurred backdrop when letterboxed.
#[derive(Debug)]
pub struct ImageLayer {
    params: ImageParams,
    container: ContainerRect,
    image: PreparedImage,
    backdrop: Option<PreparedImage>,
}

impl ImageLayer {
    /// Decode the image file. Missing or corrupt files fail here, never during a frame.
    pub fn prepare(canvas: Canvas, params: &ImageParams) -> ReelResult<Self> {
        let image = load_image(&params.path)?;
        Self::from_image(canvas, params, image)
    }

    pub fn from_image(
        canvas: Canvas,
        params: &ImageParams,
        image: PreparedImage,
    ) -> ReelResult<Self> {
        let backdrop = match params.resize_mode {
            ResizeMode::Contain => Some(backdrop_image(&image, BACKDROP_SCALE)?),
            ResizeMode::Cover => None,
        };
        Ok(Self {
            params: params.clone(),
            container: resolve_container(params.container_rect, canvas),
            image,
            backdrop,
        })
    }

    pub fn container(&self) -> ContainerRect {
        self.container
    }

    /// Destination of the sharp image at `progress`.
    pub fn image_rect(&self, progress: f64) -> Rect {
        let (iw, ih) = (self.image.width_f64(), self.image.height_f64());
        let p = &self.params;
        let scale = fit_scale(p.resize_mode, self.container, iw, ih)
            * zoom_factor(p.zoom_direction, p.zoom_amount, progress);
        centered(self.container, iw * scale, ih * scale)
    }

    pub fn render(&self, progress: f64) -> Vec<Drawable> {
        let mut children = Vec::with_capacity(2);
        if let Some(bd) = &self.backdrop {
            let (bw, bh) = (bd.width_f64(), bd.height_f64());
            let s = fit_scale(ResizeMode::Cover, self.container, bw, bh);
            children.push(Drawable::Image(ImageDraw {
                image: bd.clone(),
                dest: centered(self.container, bw * s, bh * s),
                opacity: 1.0,
            }));
        }
        children.push(Drawable::Image(ImageDraw {
            image: self.image.clone(),
            dest: self.image_rect(progress),
            opacity: 1.0,
        }));

        vec![Drawable::Group(Group {
            children,
            translate: Vec2::ZERO,
            opacity: 1.0,
            clip: Some(self.container.to_rect()),
        })]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/image.rs"]
mod tests;
