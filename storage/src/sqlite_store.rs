//! SQLite ticket store for local development and tests.
//!
//! Uses SqlitePoolManager; the `tickets` table is created on startup if missing.

use crate::error::StorageError;
use crate::models::TicketRecord;
use crate::repository::TicketStore;
use crate::sqlite_pool::SqlitePoolManager;
use async_trait::async_trait;
use tracing::info;

#[derive(Clone)]
pub struct SqliteTicketStore {
    pool_manager: SqlitePoolManager,
}

impl SqliteTicketStore {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let store = Self { pool_manager };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tickets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                chat_id INTEGER NOT NULL,
                chat_type TEXT NOT NULL,
                caption TEXT NOT NULL,
                image_url TEXT NOT NULL,
                timestamp TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_tickets_chat_id ON tickets(chat_id)")
            .execute(pool)
            .await?;

        info!("Tickets table ready");
        Ok(())
    }

    /// Records of one chat in insertion order.
    pub async fn find_by_chat(&self, chat_id: i64) -> Result<Vec<TicketRecord>, StorageError> {
        let records = sqlx::query_as::<_, TicketRecord>(
            "SELECT chat_id, chat_type, caption, image_url, timestamp FROM tickets WHERE chat_id = ? ORDER BY id",
        )
        .bind(chat_id)
        .fetch_all(self.pool_manager.pool())
        .await?;
        Ok(records)
    }

    pub async fn count(&self) -> Result<i64, StorageError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tickets")
            .fetch_one(self.pool_manager.pool())
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl TicketStore for SqliteTicketStore {
    async fn insert(&self, record: &TicketRecord) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO tickets (chat_id, chat_type, caption, image_url, timestamp)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.chat_id)
        .bind(&record.chat_type)
        .bind(&record.caption)
        .bind(&record.image_url)
        .bind(record.timestamp)
        .execute(self.pool_manager.pool())
        .await?;

        info!(chat_id = record.chat_id, "Saved ticket to SQLite");
        Ok(())
    }
}
