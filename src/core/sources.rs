//! Procedural mesh sources used by tests, benches, and the regression
//! harness fallback when no geometry file is supplied.

use glam::DVec3;

use crate::core::TriangleMesh;
use crate::error::{SceneError, SceneResult};

/// UV torus around the +Z axis, centered at the origin.
pub fn torus_mesh(
    major_radius: f64,
    minor_radius: f64,
    major_segments: usize,
    minor_segments: usize,
) -> SceneResult<TriangleMesh> {
    if !(major_radius.is_finite() && minor_radius.is_finite())
        || major_radius <= 0.0
        || minor_radius <= 0.0
        || minor_radius >= major_radius
    {
        return Err(SceneError::InvalidData(format!(
            "torus radii must satisfy 0 < minor < major, got major={major_radius}, minor={minor_radius}"
        )));
    }
    if major_segments < 3 || minor_segments < 3 {
        return Err(SceneError::InvalidData(format!(
            "torus needs at least 3 segments per ring, got {major_segments}x{minor_segments}"
        )));
    }

    let tau = std::f64::consts::TAU;
    let mut points = Vec::with_capacity(major_segments * minor_segments);
    for i in 0..major_segments {
        let u = tau * i as f64 / major_segments as f64;
        for j in 0..minor_segments {
            let v = tau * j as f64 / minor_segments as f64;
            let ring = major_radius + minor_radius * v.cos();
            points.push(DVec3::new(
                ring * u.cos(),
                ring * u.sin(),
                minor_radius * v.sin(),
            ));
        }
    }

    let index = |i: usize, j: usize| ((i % major_segments) * minor_segments + j % minor_segments) as u32;
    let mut triangles = Vec::with_capacity(major_segments * minor_segments * 2);
    for i in 0..major_segments {
        for j in 0..minor_segments {
            let a = index(i, j);
            let b = index(i + 1, j);
            let c = index(i + 1, j + 1);
            let d = index(i, j + 1);
            triangles.push([a, b, c]);
            triangles.push([a, c, d]);
        }
    }

    TriangleMesh::new(points, triangles)
}

/// Regular octahedron with vertices at distance `radius` along each axis.
#[must_use]
pub fn octahedron_mesh(radius: f64) -> TriangleMesh {
    let points = vec![
        DVec3::X * radius,
        DVec3::NEG_X * radius,
        DVec3::Y * radius,
        DVec3::NEG_Y * radius,
        DVec3::Z * radius,
        DVec3::NEG_Z * radius,
    ];
    let triangles = vec![
        [0, 2, 4],
        [2, 1, 4],
        [1, 3, 4],
        [3, 0, 4],
        [2, 0, 5],
        [1, 2, 5],
        [3, 1, 5],
        [0, 3, 5],
    ];

    TriangleMesh {
        points,
        triangles,
        normals: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn torus_counts_match_grid() {
        let mesh = torus_mesh(2.0, 0.5, 24, 12).expect("valid torus");
        assert_eq!(mesh.point_count(), 24 * 12);
        assert_eq!(mesh.triangle_count(), 24 * 12 * 2);
        mesh.validate().expect("indices in range");
    }

    #[test]
    fn torus_bounds_match_radii() {
        let mesh = torus_mesh(2.0, 0.5, 64, 32).expect("valid torus");
        let bounds = mesh.bounds().expect("non-empty");
        assert_relative_eq!(bounds.max.x, 2.5, epsilon = 1e-9);
        assert_relative_eq!(bounds.min.x, -2.5, epsilon = 1e-9);
        assert_relative_eq!(bounds.max.z, 0.5, epsilon = 1e-9);
        assert_relative_eq!(bounds.min.z, -0.5, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_torus_is_rejected() {
        assert!(torus_mesh(1.0, 1.0, 16, 8).is_err());
        assert!(torus_mesh(2.0, 0.5, 2, 8).is_err());
    }

    #[test]
    fn octahedron_has_eight_faces() {
        let mesh = octahedron_mesh(1.0);
        assert_eq!(mesh.point_count(), 6);
        assert_eq!(mesh.triangle_count(), 8);
        mesh.validate().expect("valid");
    }
}
