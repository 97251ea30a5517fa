//! Ticket pipeline: validate → download → stage → upload → persist → reply text.
//!
//! Every run is independent. The three network calls run one after another, each bounded by
//! [`PipelineSettings::step_timeout`]; any failure collapses into [`MSG_UPLOAD_FAILED`].

use crate::error::PipelineError;
use crate::staging::StagedImage;
use chrono::{DateTime, Local};
use cloudinary_client::{ObjectStore, UploadResult};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use storage::{TicketRecord, TicketStore};
use tbot_core::{Bot, Message, MessageContent, PhotoVariant};
use tracing::{debug, error, info, instrument, warn};

// --- User-facing replies ---
pub const MSG_GUIDANCE: &str = "⚠️ Please send an image *with* a caption.";
pub const MSG_UPLOAD_FAILED: &str = "❌ Failed to upload image or save data.";

/// Object store folder tickets are uploaded into.
pub const DEFAULT_FOLDER: &str = "telegram_uploads";

/// Confirmation sent after a ticket is stored. The ticket id is the chat id.
pub fn success_reply(chat_id: i64, caption: &str) -> String {
    format!(
        "✅ Ticket created!\n🧾 ticket_id: {}\n📝 Caption: {}",
        chat_id, caption
    )
}

/// `{chat_id}_{file_unique_id}_{YYYYMMDDHHMMSS}`.
///
/// Two sends of the same photo in the same chat within one second produce the same name.
pub fn derive_filename(chat_id: i64, file_unique_id: &str, at: &DateTime<Local>) -> String {
    format!(
        "{}_{}_{}",
        chat_id,
        file_unique_id,
        at.format("%Y%m%d%H%M%S")
    )
}

/// Highest-resolution variant by pixel area; on ties the later entry wins.
pub fn select_largest(variants: &[PhotoVariant]) -> Option<&PhotoVariant> {
    variants.iter().max_by_key(|v| v.area())
}

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub folder: String,
    pub step_timeout: Duration,
    /// Where staged files are created; system temp dir when `None`.
    pub staging_dir: Option<PathBuf>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            folder: DEFAULT_FOLDER.to_string(),
            step_timeout: Duration::from_secs(30),
            staging_dir: None,
        }
    }
}

/// Result of one run. Terminal: nothing is retried.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// Not something this pipeline answers (commands, stickers, ...).
    Ignored,
    /// Missing photo or caption; the sender gets guidance.
    Rejected { reply: String },
    /// Uploaded and persisted.
    Created { reply: String, record: TicketRecord },
    /// Some step failed; nothing was persisted.
    Failed { reply: String, error: PipelineError },
}

impl PipelineOutcome {
    pub fn reply(&self) -> Option<&str> {
        match self {
            PipelineOutcome::Ignored => None,
            PipelineOutcome::Rejected { reply }
            | PipelineOutcome::Created { reply, .. }
            | PipelineOutcome::Failed { reply, .. } => Some(reply.as_str()),
        }
    }

    pub fn record(&self) -> Option<&TicketRecord> {
        match self {
            PipelineOutcome::Created { record, .. } => Some(record),
            _ => None,
        }
    }
}

/// The three collaborators plus settings, built once at startup and shared by every run.
pub struct UploadPipeline {
    bot: Arc<dyn Bot>,
    object_store: Arc<dyn ObjectStore>,
    tickets: Arc<dyn TicketStore>,
    settings: PipelineSettings,
    clock: fn() -> DateTime<Local>,
}

impl UploadPipeline {
    pub fn new(
        bot: Arc<dyn Bot>,
        object_store: Arc<dyn ObjectStore>,
        tickets: Arc<dyn TicketStore>,
    ) -> Self {
        Self {
            bot,
            object_store,
            tickets,
            settings: PipelineSettings::default(),
            clock: Local::now,
        }
    }

    pub fn with_settings(mut self, settings: PipelineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replaces the clock used for the filename timestamp.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Local>) -> Self {
        self.clock = clock;
        self
    }

    pub fn bot(&self) -> &Arc<dyn Bot> {
        &self.bot
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Runs the pipeline for one message and returns the reply to send (if any).
    #[instrument(skip(self, message), fields(chat_id = message.chat.id, message_id = %message.id))]
    pub async fn process(&self, message: &Message) -> PipelineOutcome {
        match &message.content {
            MessageContent::PhotoWithCaption { variants, caption } => {
                match self.create_ticket(message, variants, caption).await {
                    Ok(record) => {
                        info!(image_url = %record.image_url, "Ticket created");
                        PipelineOutcome::Created {
                            reply: success_reply(message.chat.id, caption),
                            record,
                        }
                    }
                    Err(error) => {
                        error!(stage = error.stage(), error = %error, "Ticket upload failed");
                        PipelineOutcome::Failed {
                            reply: MSG_UPLOAD_FAILED.to_string(),
                            error,
                        }
                    }
                }
            }
            MessageContent::PhotoOnly { .. } => {
                info!("Image without caption, rejecting");
                PipelineOutcome::Rejected {
                    reply: MSG_GUIDANCE.to_string(),
                }
            }
            MessageContent::TextOnly { .. } => {
                info!("Only text received, rejecting");
                PipelineOutcome::Rejected {
                    reply: MSG_GUIDANCE.to_string(),
                }
            }
            MessageContent::Other => PipelineOutcome::Ignored,
        }
    }

    async fn create_ticket(
        &self,
        message: &Message,
        variants: &[PhotoVariant],
        caption: &str,
    ) -> Result<TicketRecord, PipelineError> {
        let photo = select_largest(variants).ok_or(PipelineError::NoPhoto)?;
        debug!(
            file_id = %photo.file_id,
            width = photo.width,
            height = photo.height,
            "Selected photo variant"
        );

        let bytes = self
            .with_timeout("download", async {
                self.bot
                    .download_file(&photo.file_id)
                    .await
                    .map_err(PipelineError::Download)
            })
            .await?;

        let public_id = derive_filename(message.chat.id, &photo.file_unique_id, &(self.clock)());

        let UploadResult {
            secure_url,
            public_id: stored_id,
        } = {
            let staged = StagedImage::write(&bytes, self.settings.staging_dir.as_deref()).await?;
            info!(public_id = %public_id, size = bytes.len(), "Uploading staged image");
            self.with_timeout("upload", async {
                self.object_store
                    .upload(staged.path(), &self.settings.folder, &public_id)
                    .await
                    .map_err(PipelineError::Upload)
            })
            .await?
        };

        let image_url = secure_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| PipelineError::MissingUrl(public_id.clone()))?;

        let record = TicketRecord::new(
            message.chat.id,
            message.chat.kind.record_name(),
            caption,
            image_url,
            message.date,
        );

        let persisted = self
            .with_timeout("persist", async {
                self.tickets
                    .insert(&record)
                    .await
                    .map_err(PipelineError::Persist)
            })
            .await;

        if let Err(error) = persisted {
            let stored_id =
                stored_id.unwrap_or_else(|| format!("{}/{}", self.settings.folder, public_id));
            match &error {
                PipelineError::Persist(_) => self.remove_orphan(&stored_id).await,
                _ => warn!(
                    public_id = %stored_id,
                    "Persist outcome unknown, keeping uploaded asset"
                ),
            }
            return Err(error);
        }

        Ok(record)
    }

    /// Best-effort delete of an asset whose record could not be written.
    async fn remove_orphan(&self, stored_id: &str) {
        let destroyed = self
            .with_timeout("destroy", async {
                self.object_store
                    .destroy(stored_id)
                    .await
                    .map_err(PipelineError::Upload)
            })
            .await;
        match destroyed {
            Ok(()) => info!(public_id = %stored_id, "Removed orphaned upload"),
            Err(e) => warn!(public_id = %stored_id, error = %e, "Orphaned upload left in object store"),
        }
    }

    async fn with_timeout<T, F>(&self, step: &'static str, fut: F) -> Result<T, PipelineError>
    where
        F: Future<Output = Result<T, PipelineError>>,
    {
        tokio::time::timeout(self.settings.step_timeout, fut)
            .await
            .map_err(|_| PipelineError::Timeout(step))?
    }
}
