mod actor;
mod camera;
mod light;
mod scene;

pub use actor::{Actor, LineActor, LineProperty, Representation, SurfaceProperty};
pub use camera::{Camera, ProjectedPoint};
pub use light::Light;
pub use scene::Scene;
