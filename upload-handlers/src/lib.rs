//! # upload-handlers
//!
//! Validation and upload pipeline for image tickets, plus the two chain handlers that expose it:
//! [`TicketUploadHandler`] for photo messages and [`TextGuidanceHandler`] for text-only messages.

mod error;
mod handlers;
mod pipeline;
mod staging;

pub use error::PipelineError;
pub use handlers::{TextGuidanceHandler, TicketUploadHandler};
pub use pipeline::{
    derive_filename, select_largest, PipelineOutcome, PipelineSettings, UploadPipeline,
    DEFAULT_FOLDER, MSG_GUIDANCE, MSG_UPLOAD_FAILED,
};
pub use staging::StagedImage;
