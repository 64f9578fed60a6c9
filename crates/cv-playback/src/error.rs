use cv_core::CvError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("malformed message: {0}")]
    MalformedMessage(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CvError),
}

pub type PlaybackResult<T> = Result<T, PlaybackError>;
