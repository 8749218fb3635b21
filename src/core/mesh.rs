use glam::DVec3;

use crate::core::Bounds;
use crate::error::{SceneError, SceneResult};

/// Indexed triangle mesh.
///
/// Normals are optional; `compute_point_normals` fills them in after load.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh {
    pub points: Vec<DVec3>,
    pub triangles: Vec<[u32; 3]>,
    pub normals: Option<Vec<DVec3>>,
}

impl TriangleMesh {
    pub fn new(points: Vec<DVec3>, triangles: Vec<[u32; 3]>) -> SceneResult<Self> {
        let mesh = Self {
            points,
            triangles,
            normals: None,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    pub fn validate(&self) -> SceneResult<()> {
        for (index, point) in self.points.iter().enumerate() {
            if !point.is_finite() {
                return Err(SceneError::InvalidData(format!(
                    "mesh point {index} has non-finite coordinates"
                )));
            }
        }

        let point_count = self.points.len() as u32;
        for (index, triangle) in self.triangles.iter().enumerate() {
            for vertex in triangle {
                if *vertex >= point_count {
                    return Err(SceneError::InvalidData(format!(
                        "triangle {index} references point {vertex} of {point_count}"
                    )));
                }
            }
        }

        if let Some(normals) = &self.normals {
            if normals.len() != self.points.len() {
                return Err(SceneError::InvalidData(format!(
                    "normal count {} does not match point count {}",
                    normals.len(),
                    self.points.len()
                )));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Corner points of triangle `index`.
    #[must_use]
    pub fn triangle_points(&self, index: usize) -> [DVec3; 3] {
        let [a, b, c] = self.triangles[index];
        [
            self.points[a as usize],
            self.points[b as usize],
            self.points[c as usize],
        ]
    }

    /// `None` for a mesh with no points.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.points.iter().copied())
    }
}
