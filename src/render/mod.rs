mod frame;
mod framebuffer;
mod null_renderer;
mod primitives;
mod raster_backend;
mod stroke_font;

pub use frame::RenderFrame;
pub use framebuffer::Framebuffer;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, DepthLine, ScreenText, ShadedTriangle, TextHAlign};
pub use raster_backend::RasterRenderer;

use crate::error::SceneResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from scene assembly and projection logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> SceneResult<()>;
}
