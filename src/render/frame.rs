use crate::core::Viewport;
use crate::error::{SceneError, SceneResult};
use crate::render::{Color, DepthLine, ScreenText, ShadedTriangle};

/// Backend-agnostic scene for one draw pass.
///
/// Primitives carry normalized device depth so backends can resolve
/// visibility without knowing anything about the 3D scene that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub background: Color,
    pub triangles: Vec<ShadedTriangle>,
    pub lines: Vec<DepthLine>,
    pub texts: Vec<ScreenText>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport, background: Color) -> Self {
        Self {
            viewport,
            background,
            triangles: Vec::new(),
            lines: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_triangle(mut self, triangle: ShadedTriangle) -> Self {
        self.triangles.push(triangle);
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: DepthLine) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: ScreenText) -> Self {
        self.texts.push(text);
        self
    }

    pub fn validate(&self) -> SceneResult<()> {
        if !self.viewport.is_valid() {
            return Err(SceneError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.background.validate()?;

        for triangle in &self.triangles {
            triangle.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty() && self.lines.is_empty() && self.texts.is_empty()
    }
}
