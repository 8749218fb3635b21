use glam::DVec3;

use crate::core::TriangleMesh;

/// Unit normal of the triangle `a b c`, `None` when degenerate.
#[must_use]
pub fn face_normal(a: DVec3, b: DVec3, c: DVec3) -> Option<DVec3> {
    let cross = (b - a).cross(c - a);
    let length = cross.length();
    if length <= f64::EPSILON {
        return None;
    }
    Some(cross / length)
}

/// Computes area-weighted per-point normals and stores them on the mesh.
///
/// The unnormalized cross product of each triangle is accumulated on its
/// three corners, so larger faces dominate shared vertices. Vertices touched
/// by no non-degenerate face fall back to +Z.
pub fn compute_point_normals(mesh: &mut TriangleMesh) {
    let mut accumulated = vec![DVec3::ZERO; mesh.point_count()];

    for triangle in &mesh.triangles {
        let [a, b, c] = *triangle;
        let pa = mesh.points[a as usize];
        let pb = mesh.points[b as usize];
        let pc = mesh.points[c as usize];
        let weighted = (pb - pa).cross(pc - pa);
        if !weighted.is_finite() {
            continue;
        }
        accumulated[a as usize] += weighted;
        accumulated[b as usize] += weighted;
        accumulated[c as usize] += weighted;
    }

    let normals = accumulated
        .into_iter()
        .map(|sum| {
            let length = sum.length();
            if length <= f64::EPSILON {
                DVec3::Z
            } else {
                sum / length
            }
        })
        .collect();

    mesh.normals = Some(normals);
}
