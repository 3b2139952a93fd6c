//! In-process document store. Collections keep insertion order.

use super::{is_uuid, DocumentStore, Filter, StoreStatus, StoredDocument};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<StoredDocument>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn is_valid_id(&self, id: &str) -> bool {
        is_uuid(id)
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<StoredDocument>, AppError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, AppError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<StoredDocument>, AppError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.matches(filter)))
            .cloned())
    }

    async fn find_many(&self, collection: &str, filter: &Filter) -> Result<Vec<StoredDocument>, AppError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| d.matches(filter)).cloned().collect())
            .unwrap_or_default())
    }

    async fn insert(&self, collection: &str, payload: Map<String, Value>) -> Result<StoredDocument, AppError> {
        let now = Utc::now();
        let doc = StoredDocument {
            id: uuid::Uuid::new_v4().to_string(),
            payload,
            created_at: now,
            updated_at: now,
        };
        let mut collections = self.collections.write().await;
        collections.entry(collection.to_string()).or_default().push(doc.clone());
        Ok(doc)
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<Option<StoredDocument>, AppError> {
        let mut collections = self.collections.write().await;
        let Some(doc) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
        else {
            return Ok(None);
        };
        doc.payload.extend(fields);
        doc.updated_at = Utc::now();
        Ok(Some(doc.clone()))
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, AppError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(None);
        };
        Ok(docs.iter().position(|d| d.id == id).map(|i| docs.remove(i)))
    }

    async fn status(&self) -> Result<StoreStatus, AppError> {
        Ok(StoreStatus {
            store: self.name(),
            state: "connected",
        })
    }
}
