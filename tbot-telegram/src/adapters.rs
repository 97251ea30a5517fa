//! Adapters from Telegram (teloxide) types to tbot_core types.
//! The message shape is decided here, once, via [`MessageContent::classify`].

use tbot_core::{Chat, ChatKind, Message, MessageContent, PhotoVariant, ToCoreMessage};
use teloxide::types::PhotoSize;

/// Maps one teloxide photo size to a core [`PhotoVariant`].
pub fn photo_variant(size: &PhotoSize) -> PhotoVariant {
    PhotoVariant {
        file_id: size.file.id.0.clone(),
        file_unique_id: size.file.unique_id.0.clone(),
        width: size.width,
        height: size.height,
        file_size: size.file.size,
    }
}

pub fn chat_kind(chat: &teloxide::types::Chat) -> ChatKind {
    if chat.is_private() {
        ChatKind::Private
    } else if chat.is_channel() {
        ChatKind::Channel
    } else if chat.is_supergroup() {
        ChatKind::Supergroup
    } else {
        ChatKind::Group
    }
}

/// Wraps a teloxide Message (regular message or channel post) for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let variants = self
            .0
            .photo()
            .map(|sizes| sizes.iter().map(photo_variant).collect())
            .unwrap_or_default();

        Message {
            id: self.0.id.0.to_string(),
            chat: Chat {
                id: self.0.chat.id.0,
                kind: chat_kind(&self.0.chat),
            },
            content: MessageContent::classify(variants, self.0.caption(), self.0.text()),
            date: self.0.date,
        }
    }
}
