//! MongoDB ticket store: one document per ticket in a fixed collection.

use crate::error::StorageError;
use crate::models::TicketRecord;
use crate::repository::TicketStore;
use async_trait::async_trait;
use mongodb::bson::{doc, DateTime as BsonDateTime, Document};
use mongodb::{Client, Collection};
use tracing::info;

#[derive(Clone)]
pub struct MongoTicketStore {
    collection: Collection<Document>,
}

impl MongoTicketStore {
    /// Builds a client for `uri` and binds `database.collection`. The driver connects lazily.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, StorageError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        info!(database = %database, collection = %collection, "MongoDB ticket store ready");
        Ok(Self::from_collection(
            client.database(database).collection(collection),
        ))
    }

    pub fn from_collection(collection: Collection<Document>) -> Self {
        Self { collection }
    }
}

/// Document shape written for a ticket; `timestamp` is a BSON date.
pub fn ticket_document(record: &TicketRecord) -> Document {
    doc! {
        "chat_id": record.chat_id,
        "chat_type": record.chat_type.as_str(),
        "caption": record.caption.as_str(),
        "image_url": record.image_url.as_str(),
        "timestamp": BsonDateTime::from_millis(record.timestamp.timestamp_millis()),
    }
}

#[async_trait]
impl TicketStore for MongoTicketStore {
    async fn insert(&self, record: &TicketRecord) -> Result<(), StorageError> {
        let result = self.collection.insert_one(ticket_document(record)).await?;
        info!(
            inserted_id = %result.inserted_id,
            chat_id = record.chat_id,
            "Saved ticket to MongoDB"
        );
        Ok(())
    }
}
