mod byu;
mod mesh;
mod normals;
mod outline;
mod sources;
mod types;

pub use byu::{parse_byu_geometry, read_byu_geometry};
pub use mesh::TriangleMesh;
pub use normals::{compute_point_normals, face_normal};
pub use outline::outline_edges;
pub use sources::{octahedron_mesh, torus_mesh};
pub use types::{Bounds, Viewport};
