//! Startup wiring: logging, ticket store, object store, gateway, handler chain, dispatcher.

use anyhow::{Context, Result};
use cloudinary_client::{CloudinaryClient, ObjectStore};
use handler_chain::HandlerChain;
use std::sync::Arc;
use storage::connect_ticket_store;
use tbot_core::{init_tracing, Bot};
use tbot_telegram::{run_dispatcher, TelegramBotAdapter};
use tracing::info;
use upload_handlers::{TextGuidanceHandler, TicketUploadHandler, UploadPipeline};

use crate::config::AppConfig;

/// Upload handler first (photos), then guidance for text-only messages.
pub fn build_handler_chain(pipeline: Arc<UploadPipeline>, bot: Arc<dyn Bot>) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(TicketUploadHandler::new(pipeline)))
        .add_handler(Arc::new(TextGuidanceHandler::new(bot)))
}

/// Connects every collaborator, then polls Telegram until Ctrl-C.
/// Any connection failure aborts before the bot starts listening.
pub async fn run(config: AppConfig) -> Result<()> {
    init_tracing(&config.telegram.log_file)?;
    info!(
        cloud_name = %config.cloudinary_cloud_name,
        folder = %config.cloudinary_folder,
        collection = %config.mongo_collection,
        timeout_secs = config.request_timeout.as_secs(),
        "Starting tbot"
    );

    let tickets = connect_ticket_store(
        &config.mongo_url,
        &config.mongo_database,
        &config.mongo_collection,
    )
    .await
    .context("Failed to connect ticket store")?;

    let object_store: Arc<dyn ObjectStore> = Arc::new(
        CloudinaryClient::new(config.cloudinary_config())
            .context("Failed to create Cloudinary client")?,
    );

    let teloxide_bot = config.telegram.build_bot()?;
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));

    let pipeline = Arc::new(
        UploadPipeline::new(bot.clone(), object_store, tickets)
            .with_settings(config.pipeline_settings()),
    );
    let chain = build_handler_chain(pipeline, bot);
    info!(handlers = chain.len(), "Handler chain ready");

    run_dispatcher(teloxide_bot, chain).await
}
