use crate::error::ObjectStoreError;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

/// Fields of an upload response the relay cares about. Cloudinary sends many more.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UploadResult {
    /// HTTPS URL of the stored asset. Absent means the upload cannot be referenced.
    #[serde(default)]
    pub secure_url: Option<String>,
    /// Full public id including the folder, e.g. `telegram_uploads/555_AQAD_20240301093000`.
    #[serde(default)]
    pub public_id: Option<String>,
}

/// Remote binary store returning a public URL per upload.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Uploads the file at `local_path` into `folder` under `public_id`.
    async fn upload(
        &self,
        local_path: &Path,
        folder: &str,
        public_id: &str,
    ) -> Result<UploadResult, ObjectStoreError>;

    /// Deletes a stored asset by its full public id.
    async fn destroy(&self, public_id: &str) -> Result<(), ObjectStoreError>;
}
