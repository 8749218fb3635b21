use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{SceneError, SceneResult};

/// A world-space point projected into a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    /// Normalized device depth: 0 at the near plane, 1 at the far plane.
    pub depth: f64,
}

/// Perspective camera.
///
/// Projection follows the 0..1 depth convention; screen space puts pixel
/// (0, 0) at the top-left corner with y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: DVec3,
    pub focal_point: DVec3,
    pub view_up: DVec3,
    /// Vertical field of view in degrees.
    pub view_angle: f64,
    /// Near and far clipping distances.
    pub clipping_range: (f64, f64),
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: DVec3::Z,
            focal_point: DVec3::ZERO,
            view_up: DVec3::Y,
            view_angle: 30.0,
            clipping_range: (0.01, 1000.0),
        }
    }
}

impl Camera {
    pub fn validate(&self) -> SceneResult<()> {
        if !self.position.is_finite() || !self.focal_point.is_finite() || !self.view_up.is_finite()
        {
            return Err(SceneError::InvalidData(
                "camera coordinates must be finite".to_owned(),
            ));
        }
        let view = self.focal_point - self.position;
        if view.length_squared() <= f64::EPSILON {
            return Err(SceneError::InvalidData(
                "camera position and focal point must differ".to_owned(),
            ));
        }
        if self.view_up.length_squared() <= f64::EPSILON
            || view.cross(self.view_up).length_squared() <= f64::EPSILON
        {
            return Err(SceneError::InvalidData(
                "camera view-up must not be parallel to the view direction".to_owned(),
            ));
        }
        let (near, far) = self.clipping_range;
        if !near.is_finite() || !far.is_finite() || near <= 0.0 || far <= near {
            return Err(SceneError::InvalidData(format!(
                "clipping range must satisfy 0 < near < far, got ({near}, {far})"
            )));
        }
        if !self.view_angle.is_finite() || self.view_angle <= 0.0 || self.view_angle >= 180.0 {
            return Err(SceneError::InvalidData(format!(
                "view angle must be in (0, 180), got {}",
                self.view_angle
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn view_direction(&self) -> DVec3 {
        (self.focal_point - self.position).normalize()
    }

    #[must_use]
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, self.focal_point, self.view_up)
    }

    #[must_use]
    pub fn projection_matrix(&self, aspect_ratio: f64) -> DMat4 {
        let (near, far) = self.clipping_range;
        DMat4::perspective_rh(self.view_angle.to_radians(), aspect_ratio, near, far)
    }

    /// Projects `point` into pixel coordinates.
    ///
    /// `None` when the point is at or behind the eye plane; callers filter
    /// depth and viewport containment themselves.
    #[must_use]
    pub fn project(&self, point: DVec3, viewport: Viewport) -> Option<ProjectedPoint> {
        let clip = self.projection_matrix(viewport.aspect_ratio()) * self.view_matrix();
        project_through(clip, point, viewport)
    }
}

/// Shared projection math for callers that precompute the clip matrix.
#[must_use]
pub(crate) fn project_through(
    clip_from_world: DMat4,
    point: DVec3,
    viewport: Viewport,
) -> Option<ProjectedPoint> {
    let clip = clip_from_world * point.extend(1.0);
    if clip.w <= f64::EPSILON {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(ProjectedPoint {
        x: (ndc.x + 1.0) * 0.5 * f64::from(viewport.width),
        y: (1.0 - ndc.y) * 0.5 * f64::from(viewport.height),
        depth: ndc.z,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_camera() -> Camera {
        Camera {
            position: DVec3::new(0.0, 0.0, 10.0),
            focal_point: DVec3::ZERO,
            clipping_range: (1.0, 100.0),
            ..Camera::default()
        }
    }

    #[test]
    fn focal_point_projects_to_viewport_center() {
        let viewport = Viewport::new(600, 600);
        let projected = test_camera()
            .project(DVec3::ZERO, viewport)
            .expect("in front of camera");
        assert_relative_eq!(projected.x, 300.0, epsilon = 1e-9);
        assert_relative_eq!(projected.y, 300.0, epsilon = 1e-9);
        assert!((0.0..=1.0).contains(&projected.depth));
    }

    #[test]
    fn nearer_points_have_smaller_depth() {
        let camera = test_camera();
        let viewport = Viewport::new(600, 600);
        let near = camera
            .project(DVec3::new(0.0, 0.0, 5.0), viewport)
            .expect("visible");
        let far = camera
            .project(DVec3::new(0.0, 0.0, -5.0), viewport)
            .expect("visible");
        assert!(near.depth < far.depth);
    }

    #[test]
    fn up_in_world_is_up_on_screen() {
        let camera = test_camera();
        let viewport = Viewport::new(600, 600);
        let above = camera
            .project(DVec3::new(0.0, 1.0, 0.0), viewport)
            .expect("visible");
        assert!(above.y < 300.0);
    }

    #[test]
    fn points_behind_the_eye_do_not_project() {
        let camera = test_camera();
        assert!(camera
            .project(DVec3::new(0.0, 0.0, 20.0), Viewport::new(600, 600))
            .is_none());
    }

    #[test]
    fn degenerate_configurations_are_rejected() {
        let mut camera = test_camera();
        camera.focal_point = camera.position;
        assert!(camera.validate().is_err());

        let mut camera = test_camera();
        camera.view_up = DVec3::Z;
        assert!(camera.validate().is_err());

        let mut camera = test_camera();
        camera.clipping_range = (5.0, 2.0);
        assert!(camera.validate().is_err());
    }
}
