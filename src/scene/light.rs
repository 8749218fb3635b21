use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};
use crate::render::Color;
use crate::scene::Camera;

/// Directional light aimed from `position` toward `focal_point`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: DVec3,
    pub focal_point: DVec3,
    pub color: Color,
    pub intensity: f64,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: DVec3::Z,
            focal_point: DVec3::ZERO,
            color: Color::WHITE,
            intensity: 1.0,
        }
    }
}

impl Light {
    /// Headlight co-located with the camera, used when a scene has no lights.
    #[must_use]
    pub fn headlight(camera: &Camera) -> Self {
        Self {
            position: camera.position,
            focal_point: camera.focal_point,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> SceneResult<()> {
        if !self.position.is_finite() || !self.focal_point.is_finite() {
            return Err(SceneError::InvalidData(
                "light coordinates must be finite".to_owned(),
            ));
        }
        if (self.focal_point - self.position).length_squared() <= f64::EPSILON {
            return Err(SceneError::InvalidData(
                "light position and focal point must differ".to_owned(),
            ));
        }
        if !self.intensity.is_finite() || self.intensity < 0.0 {
            return Err(SceneError::InvalidData(format!(
                "light intensity must be finite and >= 0, got {}",
                self.intensity
            )));
        }
        self.color.validate()
    }

    /// Unit vector from the lit surface toward the light source.
    #[must_use]
    pub fn direction_to_source(&self) -> DVec3 {
        (self.position - self.focal_point).normalize()
    }

    /// Lambertian diffuse factor for a unit surface normal.
    #[must_use]
    pub fn lambert(&self, normal: DVec3) -> f64 {
        normal.dot(self.direction_to_source()).max(0.0) * self.intensity
    }
}
