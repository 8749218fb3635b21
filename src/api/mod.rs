mod engine;
mod engine_config;

pub use engine::SceneEngine;
pub use engine_config::SceneEngineConfig;
