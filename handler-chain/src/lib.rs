//! # Handler chain
//!
//! Runs a sequence of handlers for each message: each handler's `handle` in order until one
//! returns Stop or Reply. A handler error ends the chain and is returned to the caller.

use std::sync::Arc;
use tbot_core::{Handler, HandlerResponse, Message, Result};
use tracing::{debug, info, instrument};

/// Ordered list of handlers sharing one message.
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler (runs in order; first Stop/Reply ends the chain).
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Returns the first Stop or Reply, or Continue when no handler took the message.
    #[instrument(skip(self, message), fields(chat_id = message.chat.id, message_id = %message.id))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        info!(
            content = message.content.kind_name(),
            "step: handler_chain started"
        );

        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            let response = handler.handle(message).await?;
            debug!(handler = %handler_name, response = ?response, "Handler processed");

            if response != HandlerResponse::Continue {
                info!(handler = %handler_name, "step: handler chain stopped by handler");
                return Ok(response);
            }
        }

        info!("step: handler_chain finished without a taker");
        Ok(HandlerResponse::Continue)
    }
}
