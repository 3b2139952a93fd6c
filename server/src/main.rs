//! Employee management API server.
//!
//! Run from repo root: `cargo run -p employee-server`
//! Configuration comes from the environment or a `.env` file (see `AppConfig`).

use employee_api::{
    app, ensure_database_exists, AppConfig, AppState, DocumentStore, MemoryStore, PgDocumentStore, StoreBackend,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    employee_api::telemetry::init_tracing("employee_api=info,employee_server=info,tower_http=info");

    let store: Arc<dyn DocumentStore> = match config.store {
        StoreBackend::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            let store = PgDocumentStore::new(pool, &config.document_schema);
            store.ensure_tables().await?;
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::new(store, config.update_mode);
    let router = app(state, config.body_limit);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(
        store = ?config.store,
        update_mode = ?config.update_mode,
        "listening on http://{}",
        listener.local_addr()?
    );
    axum::serve(listener, router).await?;
    Ok(())
}
