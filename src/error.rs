// error.rs - Crate error type

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("unknown parameter `{0}`")]
    UnknownParam(String),

    #[error("invalid value {value} for `{key}`")]
    InvalidValue { key: String, value: f64 },

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
