use crate::error::SceneResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry
/// without rasterizing anything.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_triangle_count: usize,
    pub last_line_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> SceneResult<()> {
        frame.validate()?;
        self.last_triangle_count = frame.triangles.len();
        self.last_line_count = frame.lines.len();
        self.last_text_count = frame.texts.len();
        Ok(())
    }
}
