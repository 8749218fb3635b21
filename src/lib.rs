//! polar-axes-rs: 3D polar-axes scene rendering and golden-image regression.
//!
//! This crate provides a Rust-idiomatic API and a strict architectural split:
//! `core` holds mesh and geometry math, `scene` assembles cameras, lights and
//! actors, `axes` lays out the polar overlay, `render` turns frames into
//! pixels, and `regress` diffs rendered output against blessed baselines.

pub mod api;
pub mod axes;
pub mod core;
pub mod error;
pub mod regress;
pub mod render;
pub mod scene;
pub mod telemetry;

pub use api::{SceneEngine, SceneEngineConfig};
pub use error::{SceneError, SceneResult};
