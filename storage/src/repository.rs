//! Ticket store abstraction and backend selection by connection string.

use crate::error::StorageError;
use crate::models::TicketRecord;
use crate::mongo_store::MongoTicketStore;
use crate::sqlite_store::SqliteTicketStore;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Append-only sink for ticket records. The pipeline never reads records back.
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Persists one record. Returns once the backend acknowledged the write.
    async fn insert(&self, record: &TicketRecord) -> Result<(), StorageError>;
}

/// Which backend a connection string points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Sqlite,
}

impl StoreBackend {
    /// `mongodb://` and `mongodb+srv://` select MongoDB, `sqlite:` and `file:` select SQLite.
    /// Any other scheme (or none) is rejected.
    pub fn from_url(url: &str) -> Result<Self, StorageError> {
        let url = url.trim();
        if url.starts_with("mongodb://") || url.starts_with("mongodb+srv://") {
            Ok(StoreBackend::Mongo)
        } else if url.starts_with("sqlite:") || url.starts_with("file:") {
            Ok(StoreBackend::Sqlite)
        } else {
            Err(StorageError::InvalidUrl(format!(
                "unsupported scheme (expected mongodb://, mongodb+srv://, sqlite: or file:): {}",
                url.split('@').last().unwrap_or(url)
            )))
        }
    }
}

/// Connects the backend named by `url`. `database` and `collection` only apply to MongoDB.
pub async fn connect_ticket_store(
    url: &str,
    database: &str,
    collection: &str,
) -> Result<Arc<dyn TicketStore>, StorageError> {
    if url.trim().is_empty() {
        return Err(StorageError::InvalidUrl("empty connection string".to_string()));
    }
    let backend = StoreBackend::from_url(url)?;
    info!(backend = ?backend, "Connecting ticket store");
    match backend {
        StoreBackend::Mongo => Ok(Arc::new(
            MongoTicketStore::connect(url, database, collection).await?,
        )),
        StoreBackend::Sqlite => Ok(Arc::new(SqliteTicketStore::new(url).await?)),
    }
}
