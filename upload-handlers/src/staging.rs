//! Scoped staging of downloaded bytes on local disk.

use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A downloaded image written to a uniquely named temporary file.
///
/// The file is removed when this value is dropped, whichever way the run ends.
#[derive(Debug)]
pub struct StagedImage {
    file: NamedTempFile,
}

impl StagedImage {
    /// Writes `bytes` into a fresh `tbot-*.jpg` file under `dir` (system temp dir when `None`).
    pub async fn write(bytes: &[u8], dir: Option<&Path>) -> std::io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("tbot-").suffix(".jpg");
        let file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        tokio::fs::write(file.path(), bytes).await?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn to_path_buf(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }
}
