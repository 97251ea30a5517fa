//! Bot abstraction for replying to messages and fetching attached files.
//!
//! [`Bot`] trait is transport-agnostic; tbot-telegram implements it via teloxide, tests substitute
//! recording doubles.

use crate::error::{Result, TbotError};
use crate::types::Message;
use async_trait::async_trait;

/// Abstraction over the messaging gateway. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a reply attributed to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Downloads the file behind a transport file id and returns its bytes.
    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>>;
}

/// Parses a message id string into an i32. Used when replying to a specific message.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| TbotError::Bot(format!("Invalid message_id for reply: {}", s)))
}
