//! Core types: chat, message, the tagged message content, handler response, and Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of conversation a message arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
}

impl ChatKind {
    /// Lowercase Bot API name (`private`, `group`, `supergroup`, `channel`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatKind::Private => "private",
            ChatKind::Group => "group",
            ChatKind::Supergroup => "supergroup",
            ChatKind::Channel => "channel",
        }
    }
}

impl ChatKind {
    /// Name written into ticket records: `PRIVATE`, `GROUP`, `SUPERGROUP`, `CHANNEL`.
    /// Existing documents in the tickets collection use this form.
    pub fn record_name(&self) -> &'static str {
        match self {
            ChatKind::Private => "PRIVATE",
            ChatKind::Group => "GROUP",
            ChatKind::Supergroup => "SUPERGROUP",
            ChatKind::Channel => "CHANNEL",
        }
    }
}

impl fmt::Display for ChatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chat identity (id is stable per conversation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub kind: ChatKind,
}

/// One resolution of an attached photo. The gateway offers several, ascending by size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoVariant {
    /// Transport id used to download the file.
    pub file_id: String,
    /// Id that is stable for the same physical file across bots and time.
    pub file_unique_id: String,
    pub width: u32,
    pub height: u32,
    pub file_size: u32,
}

impl PhotoVariant {
    /// Pixel area, used to pick the highest-resolution variant.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// What a message carries, decided once at the gateway boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageContent {
    /// A photo with a non-empty caption; the only shape that becomes a ticket.
    PhotoWithCaption {
        variants: Vec<PhotoVariant>,
        caption: String,
    },
    /// A photo without caption (or with an empty one).
    PhotoOnly { variants: Vec<PhotoVariant> },
    /// Plain text that is not a bot command.
    TextOnly { text: String },
    /// Anything else: commands, stickers, documents, service messages.
    Other,
}

impl MessageContent {
    /// Classifies the optional parts of an inbound message.
    ///
    /// Photos win over text; an empty caption counts as missing; text starting with `/` is a
    /// command and maps to [`MessageContent::Other`].
    pub fn classify(
        variants: Vec<PhotoVariant>,
        caption: Option<&str>,
        text: Option<&str>,
    ) -> Self {
        if !variants.is_empty() {
            return match caption {
                Some(caption) if !caption.is_empty() => MessageContent::PhotoWithCaption {
                    variants,
                    caption: caption.to_string(),
                },
                _ => MessageContent::PhotoOnly { variants },
            };
        }
        match text {
            Some(text) if !text.is_empty() && !text.starts_with('/') => MessageContent::TextOnly {
                text: text.to_string(),
            },
            _ => MessageContent::Other,
        }
    }

    /// Short label for logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            MessageContent::PhotoWithCaption { .. } => "photo_with_caption",
            MessageContent::PhotoOnly { .. } => "photo_only",
            MessageContent::TextOnly { .. } => "text_only",
            MessageContent::Other => "other",
        }
    }
}

/// A single inbound message: chat, content, and send time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub chat: Chat,
    pub content: MessageContent,
    /// When the sender sent the message.
    pub date: DateTime<Utc>,
}

/// Handler result for the chain. `Reply(text)` carries the text that was sent back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Not for this handler; pass to the next one.
    Continue,
    /// Handled without a reply; stop the chain.
    Stop,
    /// Handled and answered; stop the chain.
    Reply(String),
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// One step of the handler chain. Returning Stop or Reply ends the chain.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, message: &Message) -> crate::error::Result<HandlerResponse>;
}
