use cloudinary_client::ObjectStoreError;
use storage::StorageError;
use tbot_core::TbotError;
use thiserror::Error;

/// Why an upload run failed. Logged with the run; users only ever see the generic reply.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("message has no photo variants")]
    NoPhoto,

    #[error("download failed: {0}")]
    Download(#[source] TbotError),

    #[error("staging failed: {0}")]
    Stage(#[from] std::io::Error),

    #[error("upload failed: {0}")]
    Upload(#[source] ObjectStoreError),

    #[error("upload of {0} returned no secure URL")]
    MissingUrl(String),

    #[error("persisting ticket failed: {0}")]
    Persist(#[source] StorageError),

    #[error("{0} step timed out")]
    Timeout(&'static str),
}

impl PipelineError {
    /// Stage label for structured logs.
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::NoPhoto => "validate",
            PipelineError::Download(_) => "download",
            PipelineError::Stage(_) => "stage",
            PipelineError::Upload(_) | PipelineError::MissingUrl(_) => "upload",
            PipelineError::Persist(_) => "persist",
            PipelineError::Timeout(step) => *step,
        }
    }
}
