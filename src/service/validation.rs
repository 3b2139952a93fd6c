//! Request validation shared by every resource: required body fields and natural-key lookups.

use crate::error::AppError;
use crate::model::is_truthy;
use serde_json::{Map, Value};
use std::collections::HashMap;

pub struct RequestValidator;

impl RequestValidator {
    /// All `required` fields must be present and truthy.
    pub fn require(body: &Map<String, Value>, required: &[&str]) -> Result<(), AppError> {
        for field in required {
            if !body.get(*field).is_some_and(is_truthy) {
                tracing::debug!(field, "required field missing");
                return Err(AppError::data_missing());
            }
        }
        Ok(())
    }

    /// Whether the query supplies any natural-key field (empty values do not count).
    pub fn has_natural_key(params: &HashMap<String, String>, natural_key: &[&str]) -> bool {
        natural_key.iter().any(|k| supplied(params, k).is_some())
    }

    /// Exact-match filter for a natural-key lookup. `None` when no key field is supplied;
    /// a validation error when a multi-field key is only partly supplied.
    pub fn natural_key_filter(
        params: &HashMap<String, String>,
        natural_key: &[&str],
    ) -> Result<Option<Vec<(String, Value)>>, AppError> {
        let supplied: Vec<(String, Value)> = natural_key
            .iter()
            .filter_map(|k| supplied(params, k).map(|v| (k.to_string(), Value::String(v.to_string()))))
            .collect();
        if supplied.is_empty() {
            return Ok(None);
        }
        if supplied.len() < natural_key.len() {
            return Err(AppError::data_missing());
        }
        Ok(Some(supplied))
    }
}

fn supplied<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params.get(key).map(String::as_str).filter(|v| !v.is_empty())
}
