//! Test doubles for the three pipeline collaborators, plus message builders.
//!
//! [`MockBot`] records replies and serves canned file bytes, [`RecordingObjectStore`] reads the
//! staged file at upload time (so tests can check what was staged) and keeps assets keyed by
//! public id, [`MemoryTicketStore`] keeps inserted records in a vector.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use cloudinary_client::{ObjectStore, ObjectStoreError, UploadResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storage::{StorageError, TicketRecord, TicketStore};
use tbot_core::{Bot, Chat, ChatKind, Message, MessageContent, PhotoVariant, Result, TbotError};

pub const PHOTO_BYTES: &[u8] = b"jpeg-bytes-of-the-largest-variant";

// --- Bot ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRecord {
    pub chat_id: i64,
    pub message_id: String,
    pub text: String,
}

pub struct MockBot {
    pub replies: Mutex<Vec<ReplyRecord>>,
    pub downloads: Mutex<Vec<String>>,
    fail_download: bool,
    download_delay: Option<Duration>,
}

impl MockBot {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(Vec::new()),
            downloads: Mutex::new(Vec::new()),
            fail_download: false,
            download_delay: None,
        }
    }

    pub fn failing_download() -> Self {
        Self {
            fail_download: true,
            ..Self::new()
        }
    }

    pub fn slow_download(delay: Duration) -> Self {
        Self {
            download_delay: Some(delay),
            ..Self::new()
        }
    }

    pub fn reply_texts(&self) -> Vec<String> {
        self.replies
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.text.clone())
            .collect()
    }

    pub fn download_ids(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.replies.lock().unwrap().push(ReplyRecord {
            chat_id: message.chat.id,
            message_id: message.id.clone(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>> {
        self.downloads.lock().unwrap().push(file_id.to_string());
        if let Some(delay) = self.download_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_download {
            return Err(TbotError::Download(format!("file {} is gone", file_id)));
        }
        Ok(PHOTO_BYTES.to_vec())
    }
}

// --- Object store ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadMode {
    Ok,
    MissingUrl,
    Fail,
    /// Never answers; only a step timeout ends the call.
    Hang,
}

#[derive(Debug, Clone)]
pub struct UploadCall {
    pub local_path: PathBuf,
    pub folder: String,
    pub public_id: String,
    pub bytes: Vec<u8>,
}

pub struct RecordingObjectStore {
    mode: UploadMode,
    pub uploads: Mutex<Vec<UploadCall>>,
    /// Stored assets keyed by full public id; a repeated id overwrites.
    pub assets: Mutex<HashMap<String, Vec<u8>>>,
    pub destroyed: Mutex<Vec<String>>,
    fail_destroy: bool,
}

impl RecordingObjectStore {
    pub fn new(mode: UploadMode) -> Self {
        Self {
            mode,
            uploads: Mutex::new(Vec::new()),
            assets: Mutex::new(HashMap::new()),
            destroyed: Mutex::new(Vec::new()),
            fail_destroy: false,
        }
    }

    /// Uploads succeed, deletes are refused.
    pub fn refusing_destroy() -> Self {
        Self {
            fail_destroy: true,
            ..Self::new(UploadMode::Ok)
        }
    }

    pub fn upload_calls(&self) -> Vec<UploadCall> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn destroyed_ids(&self) -> Vec<String> {
        self.destroyed.lock().unwrap().clone()
    }

    pub fn asset_count(&self) -> usize {
        self.assets.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStore for RecordingObjectStore {
    async fn upload(
        &self,
        local_path: &Path,
        folder: &str,
        public_id: &str,
    ) -> std::result::Result<UploadResult, ObjectStoreError> {
        let bytes = std::fs::read(local_path)?;
        self.uploads.lock().unwrap().push(UploadCall {
            local_path: local_path.to_path_buf(),
            folder: folder.to_string(),
            public_id: public_id.to_string(),
            bytes: bytes.clone(),
        });

        let full_id = format!("{}/{}", folder, public_id);
        match self.mode {
            UploadMode::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            UploadMode::Fail => Err(ObjectStoreError::Api {
                status: 500,
                message: "storage unavailable".to_string(),
            }),
            UploadMode::MissingUrl => Ok(UploadResult {
                secure_url: None,
                public_id: Some(full_id),
            }),
            UploadMode::Ok => {
                self.assets.lock().unwrap().insert(full_id.clone(), bytes);
                Ok(UploadResult {
                    secure_url: Some(format!(
                        "https://res.cloudinary.com/demo/image/upload/{}.jpg",
                        full_id
                    )),
                    public_id: Some(full_id),
                })
            }
        }
    }

    async fn destroy(&self, public_id: &str) -> std::result::Result<(), ObjectStoreError> {
        self.destroyed.lock().unwrap().push(public_id.to_string());
        if self.fail_destroy {
            return Err(ObjectStoreError::DestroyRejected("not found".to_string()));
        }
        self.assets.lock().unwrap().remove(public_id);
        Ok(())
    }
}

// --- Ticket store ---

pub struct MemoryTicketStore {
    pub records: Mutex<Vec<TicketRecord>>,
    fail: bool,
    hang: bool,
}

impl MemoryTicketStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail: false,
            hang: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Inserts never complete.
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::new()
        }
    }

    pub fn all(&self) -> Vec<TicketRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl TicketStore for MemoryTicketStore {
    async fn insert(&self, record: &TicketRecord) -> std::result::Result<(), StorageError> {
        if self.hang {
            std::future::pending::<()>().await;
        }
        if self.fail {
            return Err(StorageError::Database("connection reset".to_string()));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

// --- Messages ---

pub fn photo_variants() -> Vec<PhotoVariant> {
    vec![
        PhotoVariant {
            file_id: "small".to_string(),
            file_unique_id: "AQADsmall".to_string(),
            width: 90,
            height: 67,
            file_size: 1_200,
        },
        PhotoVariant {
            file_id: "medium".to_string(),
            file_unique_id: "AQADmedium".to_string(),
            width: 320,
            height: 240,
            file_size: 14_000,
        },
        PhotoVariant {
            file_id: "large".to_string(),
            file_unique_id: "AQADlarge".to_string(),
            width: 1280,
            height: 960,
            file_size: 120_000,
        },
    ]
}

pub fn message(chat_id: i64, kind: ChatKind, content: MessageContent) -> Message {
    Message {
        id: "77".to_string(),
        chat: Chat { id: chat_id, kind },
        content,
        date: Utc.with_ymd_and_hms(2024, 3, 1, 9, 29, 58).unwrap(),
    }
}

pub fn photo_message(chat_id: i64, caption: Option<&str>) -> Message {
    message(
        chat_id,
        ChatKind::Private,
        MessageContent::classify(photo_variants(), caption, None),
    )
}

pub fn text_message(chat_id: i64, text: &str) -> Message {
    message(
        chat_id,
        ChatKind::Private,
        MessageContent::classify(Vec::new(), None, Some(text)),
    )
}

/// Collaborators shared between a pipeline and the test that inspects them.
pub struct Fixture {
    pub bot: Arc<MockBot>,
    pub object_store: Arc<RecordingObjectStore>,
    pub tickets: Arc<MemoryTicketStore>,
    pub staging_dir: tempfile::TempDir,
}

impl Fixture {
    pub fn new(bot: MockBot, object_store: RecordingObjectStore, tickets: MemoryTicketStore) -> Self {
        Self {
            bot: Arc::new(bot),
            object_store: Arc::new(object_store),
            tickets: Arc::new(tickets),
            staging_dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn healthy() -> Self {
        Self::new(
            MockBot::new(),
            RecordingObjectStore::new(UploadMode::Ok),
            MemoryTicketStore::new(),
        )
    }

    /// Pipeline whose network steps give up after `timeout`.
    pub fn pipeline_with_timeout(&self, timeout: Duration) -> upload_handlers::UploadPipeline {
        self.pipeline().with_settings(upload_handlers::PipelineSettings {
            step_timeout: timeout,
            staging_dir: Some(self.staging_dir.path().to_path_buf()),
            ..upload_handlers::PipelineSettings::default()
        })
    }

    pub fn pipeline(&self) -> upload_handlers::UploadPipeline {
        upload_handlers::UploadPipeline::new(
            self.bot.clone(),
            self.object_store.clone(),
            self.tickets.clone(),
        )
        .with_settings(upload_handlers::PipelineSettings {
            staging_dir: Some(self.staging_dir.path().to_path_buf()),
            ..upload_handlers::PipelineSettings::default()
        })
    }

    /// Number of files left in the staging directory.
    pub fn staged_files(&self) -> usize {
        std::fs::read_dir(self.staging_dir.path()).unwrap().count()
    }
}
