//! # tbot-core
//!
//! Core types and traits for the ticket bot: [`Bot`], [`Handler`], the tagged [`MessageContent`]
//! event shape, and tracing initialization. Transport-agnostic; used by tbot-telegram,
//! handler-chain and upload-handlers.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{Result, TbotError};
pub use logger::{init_tracing, mask_secret};
pub use types::{
    Chat, ChatKind, Handler, HandlerResponse, Message, MessageContent, PhotoVariant, ToCoreMessage,
};
