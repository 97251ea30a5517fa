//! Chain handlers: photo messages go through the upload pipeline, text-only messages get guidance.

use crate::pipeline::{UploadPipeline, MSG_GUIDANCE};
use async_trait::async_trait;
use std::sync::Arc;
use tbot_core::{Bot, Handler, HandlerResponse, Message, MessageContent, Result};
use tracing::{error, info, instrument};

/// Sends `text` as a reply; a failed send is logged and swallowed.
async fn send_reply(bot: &dyn Bot, message: &Message, text: &str) {
    if let Err(e) = bot.reply_to(message, text).await {
        error!(error = %e, chat_id = message.chat.id, "Failed to send reply");
    }
}

/// Runs the upload pipeline for photo messages (with or without caption).
#[derive(Clone)]
pub struct TicketUploadHandler {
    pipeline: Arc<UploadPipeline>,
}

impl TicketUploadHandler {
    pub fn new(pipeline: Arc<UploadPipeline>) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl Handler for TicketUploadHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        match &message.content {
            MessageContent::PhotoWithCaption { .. } | MessageContent::PhotoOnly { .. } => {}
            MessageContent::TextOnly { .. } | MessageContent::Other => {
                return Ok(HandlerResponse::Continue)
            }
        }

        info!(chat_id = message.chat.id, "Photo handler triggered");
        let outcome = self.pipeline.process(message).await;
        match outcome.reply() {
            Some(reply) => {
                send_reply(self.pipeline.bot().as_ref(), message, reply).await;
                Ok(HandlerResponse::Reply(reply.to_string()))
            }
            None => Ok(HandlerResponse::Stop),
        }
    }
}

/// Answers plain text with the guidance reply. Never uploads anything.
#[derive(Clone)]
pub struct TextGuidanceHandler {
    bot: Arc<dyn Bot>,
}

impl TextGuidanceHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for TextGuidanceHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let MessageContent::TextOnly { .. } = &message.content else {
            return Ok(HandlerResponse::Continue);
        };

        info!(chat_id = message.chat.id, "Only text received, rejecting");
        send_reply(self.bot.as_ref(), message, MSG_GUIDANCE).await;
        Ok(HandlerResponse::Reply(MSG_GUIDANCE.to_string()))
    }
}
