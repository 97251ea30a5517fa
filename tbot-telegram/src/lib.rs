//! # tbot-telegram
//!
//! Telegram gateway layer: adapters, [`tbot_core::Bot`] implementation, minimal config, dispatcher
//! runner. Handles only Telegram connectivity and handler-chain execution; no upload or storage
//! logic.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{chat_kind, photo_variant, TelegramMessageWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::TelegramConfig;
pub use runner::run_dispatcher;
