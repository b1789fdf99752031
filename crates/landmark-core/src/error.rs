use thiserror::Error;

#[derive(Error, Debug)]
pub enum LandmarkError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Could not decode image: {0}")]
    DecodeFailed(String),

    #[error("Point count mismatch: {left} left vs {right} right")]
    PointCountMismatch { left: usize, right: usize },

    #[error("At least {required} corresponding points are required (got {count})")]
    InsufficientPoints { count: usize, required: usize },

    #[error("Registration failed: {0}")]
    RegistrationFailed(String),

    #[error("Invalid blended preview: {0}")]
    InvalidPreview(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LandmarkError>;
