use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{SceneError, SceneResult};
use crate::render::Color;

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load scene
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneEngineConfig {
    pub viewport: Viewport,
    #[serde(default = "default_background")]
    pub background: Color,
    /// Overlay labels can be disabled for snapshots that must stay immune
    /// to glyph layout changes.
    #[serde(default = "default_draw_overlay_labels")]
    pub draw_overlay_labels: bool,
}

impl SceneEngineConfig {
    /// Creates a config with the default light gray background.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            background: default_background(),
            draw_overlay_labels: default_draw_overlay_labels(),
        }
    }

    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn with_overlay_labels(mut self, draw_overlay_labels: bool) -> Self {
        self.draw_overlay_labels = draw_overlay_labels;
        self
    }

    pub fn validate(&self) -> SceneResult<()> {
        if !self.viewport.is_valid() {
            return Err(SceneError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.background.validate()
    }
}

fn default_background() -> Color {
    Color::rgb(0.8, 0.8, 0.8)
}

fn default_draw_overlay_labels() -> bool {
    true
}
