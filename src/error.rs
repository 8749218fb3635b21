use std::path::PathBuf;

use thiserror::Error;

pub type SceneResult<T> = Result<T, SceneError>;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("malformed geometry file `{path}` (line {line}): {message}")]
    MeshFormat {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("io error on `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image error")]
    Image(#[from] image::ImageError),
}
