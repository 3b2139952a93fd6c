//! Generic resource contract: lookup, validate, mutate. One implementation serves every
//! `Resource`; handlers only choose the operation and wrap the result.
//!
//! Existence and uniqueness checks are separate store round-trips from the mutation that
//! follows them; a concurrent request may slip in between.

use crate::config::UpdateMode;
use crate::error::AppError;
use crate::model::{to_object, Record, Resource};
use crate::service::RequestValidator;
use crate::store::DocumentStore;
use serde_json::{Map, Value};
use std::collections::HashMap;

pub struct ResourceService;

impl ResourceService {
    /// Every document in the collection, unfiltered and unpaginated.
    pub async fn list<R: Resource>(store: &dyn DocumentStore) -> Result<Vec<Record<R>>, AppError> {
        let docs = store.find_all(R::COLLECTION).await?;
        docs.into_iter().map(Record::try_from).collect()
    }

    /// Documents whose `field` equals `value` exactly.
    pub async fn list_where<R: Resource>(
        store: &dyn DocumentStore,
        field: &str,
        value: Value,
    ) -> Result<Vec<Record<R>>, AppError> {
        let filter = [(field.to_string(), value)];
        let docs = store.find_many(R::COLLECTION, &filter).await?;
        docs.into_iter().map(Record::try_from).collect()
    }

    /// Resolve one document from a path id, or else from the natural key in `params`.
    ///
    /// A malformed id yields `None` unless the resource declares `INVALID_ID_MESSAGE`.
    pub async fn lookup<R: Resource>(
        store: &dyn DocumentStore,
        id: Option<&str>,
        params: &HashMap<String, String>,
    ) -> Result<Option<Record<R>>, AppError> {
        let doc = match id {
            Some(id) => {
                if !store.is_valid_id(id) {
                    if let Some(message) = R::INVALID_ID_MESSAGE {
                        return Err(AppError::Validation(message.into()));
                    }
                    tracing::debug!(collection = R::COLLECTION, id, "malformed id, treating as not found");
                    return Ok(None);
                }
                store.find_by_id(R::COLLECTION, id).await?
            }
            None => match RequestValidator::natural_key_filter(params, R::NATURAL_KEY)? {
                Some(filter) => store.find_one(R::COLLECTION, &filter).await?,
                None => None,
            },
        };
        doc.map(Record::try_from).transpose()
    }

    /// Like `lookup`, but absence is `NotFound`.
    pub async fn find<R: Resource>(
        store: &dyn DocumentStore,
        id: Option<&str>,
        params: &HashMap<String, String>,
    ) -> Result<Record<R>, AppError> {
        Self::lookup(store, id, params).await?.ok_or(AppError::NotFound)
    }

    pub async fn create<R: Resource>(
        store: &dyn DocumentStore,
        body: Map<String, Value>,
    ) -> Result<Record<R>, AppError> {
        RequestValidator::require(&body, R::REQUIRED)?;
        let new: R::New = serde_json::from_value(Value::Object(body)).map_err(|e| AppError::BadRequest(e.to_string()))?;
        let resource: R = new.into();
        resource.check_references(store)?;

        if let Some(unique) = resource.unique_key() {
            if store.find_one(R::COLLECTION, &unique).await?.is_some() {
                return Err(AppError::Duplicate(R::DUPLICATE_MESSAGE.into()));
            }
        }

        let doc = store.insert(R::COLLECTION, to_object(&resource)?).await?;
        tracing::info!(collection = R::COLLECTION, id = %doc.id, "created");
        Record::try_from(doc)
    }

    pub async fn update<R: Resource>(
        store: &dyn DocumentStore,
        id: Option<&str>,
        params: &HashMap<String, String>,
        body: Map<String, Value>,
        mode: UpdateMode,
    ) -> Result<Record<R>, AppError> {
        let changes: R::Changes =
            serde_json::from_value(Value::Object(body)).map_err(|e| AppError::BadRequest(e.to_string()))?;
        R::check_changes(&changes)?;
        let target = Self::find::<R>(store, id, params).await?;

        let mut fields = to_object(&changes)?;
        if mode == UpdateMode::Merge {
            fields.retain(|_, v| !v.is_null());
        }
        let doc = store
            .update_by_id(R::COLLECTION, &target.id, fields)
            .await?
            .ok_or(AppError::NotFound)?;
        tracing::info!(collection = R::COLLECTION, id = %doc.id, ?mode, "updated");
        Record::try_from(doc)
    }

    /// Remove the resolved document. The store's removal outcome is not reported.
    pub async fn delete<R: Resource>(
        store: &dyn DocumentStore,
        id: Option<&str>,
        params: &HashMap<String, String>,
    ) -> Result<(), AppError> {
        let target = Self::find::<R>(store, id, params).await?;
        let removed = store.delete_by_id(R::COLLECTION, &target.id).await?;
        tracing::info!(collection = R::COLLECTION, id = %target.id, removed = removed.is_some(), "deleted");
        Ok(())
    }
}
