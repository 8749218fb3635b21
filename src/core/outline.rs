use glam::DVec3;

use crate::core::Bounds;

/// The 12 edges of `bounds` as world-space segments, for outline actors.
#[must_use]
pub fn outline_edges(bounds: Bounds) -> [[DVec3; 2]; 12] {
    let c = bounds.corners();
    [
        // bottom rectangle (z = min)
        [c[0], c[1]],
        [c[1], c[3]],
        [c[3], c[2]],
        [c[2], c[0]],
        // top rectangle (z = max)
        [c[4], c[5]],
        [c[5], c[7]],
        [c[7], c[6]],
        [c[6], c[4]],
        // verticals
        [c[0], c[4]],
        [c[1], c[5]],
        [c[2], c[6]],
        [c[3], c[7]],
    ]
}
