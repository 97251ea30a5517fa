//! Dispatcher runner: converts teloxide messages and channel posts to core::Message and hands them
//! to the HandlerChain.

use anyhow::Result;
use handler_chain::HandlerChain;
use tbot_core::ToCoreMessage;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use super::adapters::TelegramMessageWrapper;

/// Runs the dispatcher until Ctrl-C. Messages and channel posts both go through `handler_chain`,
/// each on its own task so a slow upload never holds up other updates.
#[instrument(skip(bot, handler_chain))]
pub async fn run_dispatcher(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => info!(username = ?me.user.username, "Bot is running"),
        Err(e) => error!(error = %e, "get_me failed; continuing to poll"),
    }

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(dispatch_message))
        .branch(Update::filter_channel_post().endpoint(dispatch_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![handler_chain])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Dispatcher stopped");
    Ok(())
}

async fn dispatch_message(msg: Message, chain: HandlerChain) -> ResponseResult<()> {
    let core_msg = TelegramMessageWrapper(&msg).to_core();
    info!(
        chat_id = core_msg.chat.id,
        message_id = %core_msg.id,
        content = core_msg.content.kind_name(),
        "Received message"
    );

    tokio::spawn(async move {
        if let Err(e) = chain.handle(&core_msg).await {
            error!(error = %e, chat_id = core_msg.chat.id, "Handler chain failed");
        }
    });
    Ok(())
}
