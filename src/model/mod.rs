//! Resource types and the contract that lets one generic controller serve all of them.

pub mod dates;
mod department;
mod employee;
pub mod lenient;
mod project;
mod review;
mod role;

pub use department::{Department, DepartmentChanges, NewDepartment};
pub use employee::{Employee, EmployeeChanges, NewEmployee};
pub use project::{NewProject, Project, ProjectChanges};
pub use review::{EmployeeReview, NewEmployeeReview, ReviewChanges, INVALID_EMPLOYEE_ID};
pub use role::{NewRole, Role, RoleChanges};

use crate::error::AppError;
use crate::store::{DocumentStore, StoredDocument};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// A document-backed resource served by the generic controller.
///
/// `Self` is the stored shape, `New` the create body and `Changes` the update body.
/// `Changes` serializes to the stored field names of every field an update overwrites.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    type New: DeserializeOwned + Into<Self> + Send;
    type Changes: Serialize + DeserializeOwned + Send;

    /// Collection name in the store.
    const COLLECTION: &'static str;
    /// Body fields that must be present and truthy on create.
    const REQUIRED: &'static [&'static str];
    /// Query-string fields that identify one document when no id is given.
    const NATURAL_KEY: &'static [&'static str];
    const DUPLICATE_MESSAGE: &'static str = "resource already exists";
    /// When set, a malformed path id is rejected with this message instead of yielding
    /// "not found".
    const INVALID_ID_MESSAGE: Option<&'static str> = None;

    /// Fields that must not already exist in the collection on create.
    fn unique_key(&self) -> Option<Vec<(String, Value)>> {
        None
    }

    /// Validate identifiers this resource holds to other documents.
    fn check_references(&self, _store: &dyn DocumentStore) -> Result<(), AppError> {
        Ok(())
    }

    /// Validate an update body before the target is looked up.
    fn check_changes(_changes: &Self::Changes) -> Result<(), AppError> {
        Ok(())
    }
}

/// A resource as returned to clients: its fields plus store-owned id and timestamps.
#[derive(Clone, Debug, Serialize)]
pub struct Record<R> {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub body: R,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl<R: Resource> TryFrom<StoredDocument> for Record<R> {
    type Error = AppError;

    fn try_from(doc: StoredDocument) -> Result<Self, Self::Error> {
        let body = serde_json::from_value(Value::Object(doc.payload)).map_err(|e| {
            AppError::Store(format!("{} document {} is malformed: {}", R::COLLECTION, doc.id, e))
        })?;
        Ok(Record {
            id: doc.id,
            body,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        })
    }
}

/// Serialize a value that must be a JSON object (resources, change sets).
pub fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>, AppError> {
    match serde_json::to_value(value).map_err(|e| AppError::Store(e.to_string()))? {
        Value::Object(m) => Ok(m),
        other => Err(AppError::Store(format!("expected an object, got {}", other))),
    }
}

/// A value counts as present when it is not null, false, zero or an empty string.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub(crate) fn is_blank(v: &Option<String>) -> bool {
    v.as_deref().map_or(true, str::is_empty)
}

pub(crate) fn key(field: &str, value: &Option<String>) -> Option<Vec<(String, Value)>> {
    value.as_ref().map(|v| vec![(field.to_string(), Value::String(v.clone()))])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness() {
        for v in [json!(null), json!(false), json!(0), json!(""), json!(0.0)] {
            assert!(!is_truthy(&v), "{v} should be falsy");
        }
        for v in [json!(true), json!(1), json!("x"), json!([]), json!({})] {
            assert!(is_truthy(&v), "{v} should be truthy");
        }
    }

    #[test]
    fn record_flattens_fields_between_id_and_timestamps() {
        let doc = StoredDocument {
            id: "6f1c8a0e-54a4-4b0c-9a6d-6f0b7b0f9d11".into(),
            payload: to_object(&json!({ "departmentName": "Finance" })).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let record: Record<Department> = doc.try_into().unwrap();
        let v = serde_json::to_value(&record).unwrap();
        assert_eq!(v["_id"], "6f1c8a0e-54a4-4b0c-9a6d-6f0b7b0f9d11");
        assert_eq!(v["departmentName"], "Finance");
        assert!(v["createdAt"].is_string());
        assert!(v["updatedAt"].is_string());
    }

    #[test]
    fn malformed_payload_is_a_store_error() {
        let doc = StoredDocument {
            id: "x".into(),
            payload: to_object(&json!({ "departmentName": 12 })).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let err = Record::<Department>::try_from(doc).unwrap_err();
        assert!(matches!(err, AppError::Store(_)));
    }
}
