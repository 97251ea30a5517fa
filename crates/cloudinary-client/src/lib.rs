//! Cloudinary client
//!
//! Signed image upload and destroy against the Cloudinary REST API, exposed through the
//! [`ObjectStore`] trait so callers can swap in test doubles.

mod client;
mod config;
mod error;
mod signature;
mod store;

pub use client::CloudinaryClient;
pub use config::{CloudinaryConfig, DEFAULT_API_URL};
pub use error::ObjectStoreError;
pub use signature::api_sign_request;
pub use store::{ObjectStore, UploadResult};
