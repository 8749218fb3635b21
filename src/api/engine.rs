use crate::error::SceneResult;
use crate::render::{RenderFrame, Renderer};
use crate::scene::Scene;

use super::SceneEngineConfig;

/// Main orchestration facade consumed by host applications.
///
/// `SceneEngine` owns the scene, the bootstrap config, and a renderer
/// backend; `render` projects the scene into a frame and hands it over.
pub struct SceneEngine<R: Renderer> {
    renderer: R,
    scene: Scene,
    config: SceneEngineConfig,
}

impl<R: Renderer> SceneEngine<R> {
    pub fn new(renderer: R, config: SceneEngineConfig) -> SceneResult<Self> {
        config.validate()?;
        Ok(Self {
            renderer,
            scene: Scene::new(config.background),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SceneEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Builds the current frame without rendering it, for headless
    /// inspection of the projected primitives.
    pub fn build_frame(&self) -> SceneResult<RenderFrame> {
        self.scene
            .build_frame(self.config.viewport, self.config.draw_overlay_labels)
    }

    pub fn render(&mut self) -> SceneResult<()> {
        let frame = self.build_frame()?;
        tracing::debug!(
            width = self.config.viewport.width,
            height = self.config.viewport.height,
            "rendering frame"
        );
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Viewport;
    use crate::render::NullRenderer;

    #[test]
    fn engine_rejects_invalid_config() {
        let config = SceneEngineConfig::new(Viewport::new(0, 0));
        assert!(SceneEngine::new(NullRenderer::default(), config).is_err());
    }

    #[test]
    fn empty_scene_renders_cleanly() {
        let config = SceneEngineConfig::new(Viewport::new(64, 64));
        let mut engine = SceneEngine::new(NullRenderer::default(), config).expect("engine init");
        engine.render().expect("render");
        let renderer = engine.into_renderer();
        assert_eq!(renderer.last_triangle_count, 0);
        assert_eq!(renderer.last_line_count, 0);
    }
}
