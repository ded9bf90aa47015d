use std::io;

use thiserror::Error;

/// Problems loading or validating a `TaskConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid range for {name}: min {min} is greater than max {max}")]
    InvalidRange { name: &'static str, min: f64, max: f64 },

    #[error("incident angles must lie in [0, 90) degrees, got [{min}, {max}]")]
    InvalidAngle { min: f64, max: f64 },

    #[error("refractive indices must be positive: {name} = {value}")]
    InvalidIndex { name: &'static str, value: f64 },

    #[error("image size must be non-zero, got {width}x{height}")]
    InvalidImageSize { width: usize, height: usize },

    #[error("at least one transition frame is required")]
    InvalidFrameCounts,

    #[error("video frame rate must be non-zero")]
    InvalidFps,
}

/// Failures while generating or saving task pairs.
///
/// Missing fonts and video encoders are not errors; those outputs degrade or
/// are skipped instead.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to write metadata: {0}")]
    Json(#[from] serde_json::Error),
}
