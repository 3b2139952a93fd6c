//! Employee management REST backend: departments, employees, roles, projects and employee
//! reviews served by one generic resource controller over a document store.

pub mod config;
pub mod docs;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod telemetry;

pub use config::{AppConfig, StoreBackend, UpdateMode};
pub use error::{AppError, ConfigError};
pub use model::{Department, Employee, EmployeeReview, Project, Record, Resource, Role};
pub use response::{failure, success, success_created, success_ok};
pub use routes::{api_routes, app, common_routes};
pub use service::ResourceService;
pub use state::AppState;
pub use store::{ensure_database_exists, DocumentStore, MemoryStore, PgDocumentStore};
