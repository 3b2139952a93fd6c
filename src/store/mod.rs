//! Document persistence: the store capability set shared by every resource, plus the
//! PostgreSQL and in-memory implementations.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgDocumentStore};

use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Exact-match conditions on top-level payload fields; all must hold.
pub type Filter = [(String, Value)];

/// One persisted document. `payload` holds the resource fields only; identifier and
/// timestamps are owned by the store.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub payload: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredDocument {
    pub fn matches(&self, filter: &Filter) -> bool {
        filter.iter().all(|(k, v)| self.payload.get(k) == Some(v))
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct StoreStatus {
    pub store: &'static str,
    pub state: &'static str,
}

/// Collection-scoped document operations. Every lookup returns `None` rather than an error
/// when nothing matches.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name for status reporting.
    fn name(&self) -> &'static str;

    /// Whether `id` is a well-formed identifier for this store.
    fn is_valid_id(&self, id: &str) -> bool;

    async fn find_all(&self, collection: &str) -> Result<Vec<StoredDocument>, AppError>;

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, AppError>;

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<StoredDocument>, AppError>;

    async fn find_many(&self, collection: &str, filter: &Filter) -> Result<Vec<StoredDocument>, AppError>;

    /// Insert with a fresh identifier; both timestamps are set to now.
    async fn insert(&self, collection: &str, payload: Map<String, Value>) -> Result<StoredDocument, AppError>;

    /// Overwrite the given top-level fields (null values are stored as null) and refresh
    /// `updated_at`. Returns the updated document, or `None` if the id is unknown.
    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<Option<StoredDocument>, AppError>;

    /// Remove by id. Returns the removed document, if any.
    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, AppError>;

    /// Probe connectivity.
    async fn status(&self) -> Result<StoreStatus, AppError>;
}

/// Identifier format shared by both backends.
pub fn is_uuid(id: &str) -> bool {
    uuid::Uuid::parse_str(id).is_ok()
}

/// Build a JSON object from a filter; used for containment queries.
pub fn filter_object(filter: &Filter) -> Value {
    Value::Object(filter.iter().cloned().collect())
}
