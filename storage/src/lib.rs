//! Storage crate: ticket persistence behind the [`TicketStore`] trait.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – TicketRecord
//! - [`repository`] – TicketStore trait and backend selection
//! - [`mongo_store`] – MongoTicketStore (MongoDB collection)
//! - [`sqlite_store`] – SqliteTicketStore (SQLite table, local development)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod models;
mod mongo_store;
mod repository;
mod sqlite_pool;
mod sqlite_store;

pub use error::StorageError;
pub use models::TicketRecord;
pub use mongo_store::{ticket_document, MongoTicketStore};
pub use repository::{connect_ticket_store, StoreBackend, TicketStore};
pub use sqlite_pool::SqlitePoolManager;
pub use sqlite_store::SqliteTicketStore;
