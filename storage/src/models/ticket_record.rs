//! Ticket record model for persistence.
//!
//! Maps to the `tickets` table (SQLite) and to one document in the tickets collection (MongoDB).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted ticket: the caption and uploaded image of a single message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TicketRecord {
    pub chat_id: i64,
    /// Uppercase chat kind (`PRIVATE`, `GROUP`, `SUPERGROUP`, `CHANNEL`).
    pub chat_type: String,
    pub caption: String,
    pub image_url: String,
    /// Send time of the originating message.
    pub timestamp: DateTime<Utc>,
}

impl TicketRecord {
    pub fn new(
        chat_id: i64,
        chat_type: impl Into<String>,
        caption: impl Into<String>,
        image_url: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            chat_id,
            chat_type: chat_type.into(),
            caption: caption.into(),
            image_url: image_url.into(),
            timestamp,
        }
    }
}
