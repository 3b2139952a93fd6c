use super::{is_blank, lenient, Resource};
use crate::error::AppError;
use crate::store::DocumentStore;
use serde::{Deserialize, Serialize};

pub const INVALID_EMPLOYEE_ID: &str = "employee id is not valid";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeReview {
    pub employee_id: Option<String>,
    pub review: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployeeReview {
    #[serde(deserialize_with = "lenient::string")]
    pub employee_id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub review: String,
}

/// Only the review text is editable; the owning employee is fixed at creation.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewChanges {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub review: Option<String>,
}

impl From<NewEmployeeReview> for EmployeeReview {
    fn from(new: NewEmployeeReview) -> Self {
        EmployeeReview {
            employee_id: Some(new.employee_id),
            review: Some(new.review),
        }
    }
}

impl Resource for EmployeeReview {
    type New = NewEmployeeReview;
    type Changes = ReviewChanges;

    const COLLECTION: &'static str = "employees-reviews";
    const REQUIRED: &'static [&'static str] = &["employeeId", "review"];
    const NATURAL_KEY: &'static [&'static str] = &[];
    const INVALID_ID_MESSAGE: Option<&'static str> = Some("review id is not valid");

    // The referenced employee is not required to exist, only to be a well-formed id.
    fn check_references(&self, store: &dyn DocumentStore) -> Result<(), AppError> {
        match self.employee_id.as_deref() {
            Some(id) if store.is_valid_id(id) => Ok(()),
            _ => Err(AppError::Validation(INVALID_EMPLOYEE_ID.into())),
        }
    }

    fn check_changes(changes: &ReviewChanges) -> Result<(), AppError> {
        if is_blank(&changes.review) {
            return Err(AppError::data_missing());
        }
        Ok(())
    }
}
