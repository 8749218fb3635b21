use glam::DVec3;

use crate::core::TriangleMesh;
use crate::error::{SceneError, SceneResult};
use crate::render::Color;

/// How a mesh actor is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    Surface,
    Wireframe,
}

/// Visual style of a mesh actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceProperty {
    pub diffuse_color: Color,
    /// Light-independent floor added to the diffuse term.
    pub ambient: f64,
    pub representation: Representation,
    pub line_width: f64,
}

impl Default for SurfaceProperty {
    fn default() -> Self {
        Self {
            diffuse_color: Color::WHITE,
            ambient: 0.1,
            representation: Representation::Surface,
            line_width: 1.0,
        }
    }
}

impl SurfaceProperty {
    pub fn validate(&self) -> SceneResult<()> {
        self.diffuse_color.validate()?;
        if !self.ambient.is_finite() || !(0.0..=1.0).contains(&self.ambient) {
            return Err(SceneError::InvalidData(format!(
                "ambient must be in [0, 1], got {}",
                self.ambient
            )));
        }
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(SceneError::InvalidData(format!(
                "line width must be finite and > 0, got {}",
                self.line_width
            )));
        }
        Ok(())
    }
}

/// Renderable triangle mesh with a style.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub mesh: TriangleMesh,
    pub property: SurfaceProperty,
    pub visible: bool,
}

impl Actor {
    #[must_use]
    pub fn new(mesh: TriangleMesh) -> Self {
        Self {
            mesh,
            property: SurfaceProperty::default(),
            visible: true,
        }
    }

    #[must_use]
    pub fn with_property(mut self, property: SurfaceProperty) -> Self {
        self.property = property;
        self
    }
}

/// Stroke style for line work (outlines, axes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineProperty {
    pub color: Color,
    pub width: f64,
}

impl Default for LineProperty {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            width: 1.0,
        }
    }
}

impl LineProperty {
    #[must_use]
    pub const fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }

    pub fn validate(&self) -> SceneResult<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(SceneError::InvalidData(format!(
                "line width must be finite and > 0, got {}",
                self.width
            )));
        }
        self.color.validate()
    }
}

/// Renderable set of world-space line segments.
#[derive(Debug, Clone, PartialEq)]
pub struct LineActor {
    pub segments: Vec<[DVec3; 2]>,
    pub property: LineProperty,
    pub visible: bool,
}

impl LineActor {
    #[must_use]
    pub fn new(segments: Vec<[DVec3; 2]>) -> Self {
        Self {
            segments,
            property: LineProperty::default(),
            visible: true,
        }
    }

    #[must_use]
    pub fn with_property(mut self, property: LineProperty) -> Self {
        self.property = property;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::octahedron_mesh;

    #[test]
    fn default_property_validates() {
        SurfaceProperty::default().validate().expect("valid");
        LineProperty::default().validate().expect("valid");
    }

    #[test]
    fn out_of_range_ambient_is_rejected() {
        let property = SurfaceProperty {
            ambient: 1.5,
            ..SurfaceProperty::default()
        };
        assert!(property.validate().is_err());
    }

    #[test]
    fn actor_starts_visible_with_defaults() {
        let actor = Actor::new(octahedron_mesh(1.0));
        assert!(actor.visible);
        assert_eq!(actor.property.diffuse_color, Color::WHITE);
    }
}
