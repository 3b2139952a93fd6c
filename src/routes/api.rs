//! `/api/v1` routes. Pure dispatch: every resource gets the same collection and item
//! routes, bound to the generic handlers for its type.

use crate::handlers::resource::{create, delete, delete_by_key, list, read, update, update_by_key};
use crate::handlers::review::employee_reviews;
use crate::handlers::status::{method_not_allowed, store_status};
use crate::model::{Department, Employee, EmployeeReview, Project, Resource, Role};
use crate::state::AppState;
use axum::{
    routing::{get, MethodRouter},
    Router,
};

/// GET (list or natural-key lookup), POST, and PUT/DELETE by natural key.
fn collection<R: Resource>() -> MethodRouter<AppState> {
    get(list::<R>)
        .post(create::<R>)
        .put(update_by_key::<R>)
        .delete(delete_by_key::<R>)
}

fn item<R: Resource>() -> MethodRouter<AppState> {
    get(read::<R>).put(update::<R>).delete(delete::<R>)
}

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/status", get(store_status))
        .route("/departments", collection::<Department>())
        .route("/departments/:id", item::<Department>())
        .route("/employees", collection::<Employee>())
        .route("/employees/:id", item::<Employee>())
        .route("/employees/:id/reviews", get(employee_reviews))
        .route("/roles", collection::<Role>())
        .route("/roles/:id", item::<Role>())
        .route("/projects", collection::<Project>())
        .route("/projects/:id", item::<Project>())
        // Reviews have no natural key, so the collection only lists and creates.
        .route("/employees-reviews", get(list::<EmployeeReview>).post(create::<EmployeeReview>))
        .route("/employees-reviews/:id", item::<EmployeeReview>())
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}
