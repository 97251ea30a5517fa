use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObjectStoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cloudinary API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Destroy rejected: {0}")]
    DestroyRejected(String),

    #[error("Config error: {0}")]
    Config(String),
}
