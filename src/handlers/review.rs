//! Reviews owned by one employee.

use crate::error::AppError;
use crate::model::{EmployeeReview, INVALID_EMPLOYEE_ID};
use crate::response::success_ok;
use crate::service::ResourceService;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use serde_json::Value;

/// GET /employees/:id/reviews. An employee without reviews gets an empty list, not 404.
pub async fn employee_reviews(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !state.store.is_valid_id(&employee_id) {
        return Err(AppError::Validation(INVALID_EMPLOYEE_ID.into()));
    }
    let reviews =
        ResourceService::list_where::<EmployeeReview>(state.store.as_ref(), "employeeId", Value::String(employee_id))
            .await?;
    Ok(success_ok(reviews))
}
