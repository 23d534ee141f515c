//! # Document Store
//!
//! The store abstraction the REST layer talks to: find, sort, insert,
//! update and delete against named collections of JSON documents. The
//! in-memory implementation lives in [`memory`]; a remote document
//! database would slot in behind the same trait.

pub mod filter;
pub mod memory;

pub use filter::{compare_values, Condition, Filter, Sort, SortDirection};
pub use memory::MemoryStore;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Collection names used by the backend.
pub mod collections {
    pub const LOCATIONS: &str = "locations";
    pub const RESTAURANTS: &str = "restaurantdata";
    pub const MEAL_TYPES: &str = "mealtype";
    pub const MENUS: &str = "restaurantmenu";
    pub const ORDERS: &str = "orders";
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Only JSON objects can be stored as documents
    #[error("document is not a JSON object")]
    NotAnObject,

    /// A reader or writer panicked while holding the lock
    #[error("store lock poisoned")]
    LockPoisoned,

    /// Seed file could not be read
    #[error("failed to read seed file: {0}")]
    SeedIo(#[from] std::io::Error),

    /// Seed file had the wrong shape
    #[error("invalid seed data: {0}")]
    InvalidSeed(String),
}

/// Acknowledgement returned by [`DocumentStore::insert`].
#[derive(Debug, Clone, Serialize)]
pub struct InsertAck {
    /// Store-generated identifier of the inserted document
    pub inserted_id: String,
}

/// Operations the REST layer needs from a document database.
///
/// Reads never mutate; `orders` is the only collection the handlers
/// write to.
pub trait DocumentStore: Send + Sync {
    /// Return every document in `collection` matching `filter`.
    fn find(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<Value>>;

    /// Like [`find`](Self::find), sorted by the given clause.
    fn find_sorted(&self, collection: &str, filter: &Filter, sort: &Sort)
        -> StoreResult<Vec<Value>>;

    /// Insert a document, assigning a store-generated `_id` when absent.
    fn insert(&self, collection: &str, document: Value) -> StoreResult<InsertAck>;

    /// Set the given fields on the first document matching `filter`.
    /// Returns the number of documents matched (0 or 1).
    fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        changes: &serde_json::Map<String, Value>,
    ) -> StoreResult<u64>;

    /// Remove the first document matching `filter`. Returns the number
    /// of documents deleted (0 or 1).
    fn delete_one(&self, collection: &str, filter: &Filter) -> StoreResult<u64>;
}
