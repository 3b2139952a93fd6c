//! PostgreSQL document store. Every collection lives in one `documents` table inside the
//! schema named by `DOCUMENT_SCHEMA`, one JSONB payload per row.

use super::{filter_object, is_uuid, DocumentStore, Filter, StoreStatus, StoredDocument};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

type DocumentRow = (Uuid, Value, DateTime<Utc>, DateTime<Utc>);

const COLUMNS: &str = "id, payload, created_at, updated_at";

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
    schema: String,
    table: String,
}

impl PgDocumentStore {
    /// `schema` must be a valid PostgreSQL identifier (checked by config).
    pub fn new(pool: PgPool, schema: &str) -> Self {
        let schema = quote_ident(schema);
        PgDocumentStore {
            pool,
            table: format!("{}.documents", schema),
            schema,
        }
    }

    /// Create the schema and documents table if missing.
    pub async fn ensure_tables(&self) -> Result<(), AppError> {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", self.schema))
            .execute(&self.pool)
            .await?;
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                collection TEXT NOT NULL,
                id UUID NOT NULL,
                payload JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                PRIMARY KEY (collection, id)
            )
            "#,
            self.table
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        let index = format!(
            "CREATE INDEX IF NOT EXISTS documents_payload_idx ON {} USING GIN (payload jsonb_path_ops)",
            self.table
        );
        sqlx::query(&index).execute(&self.pool).await?;
        Ok(())
    }

    fn parse_id(id: &str) -> Option<Uuid> {
        Uuid::parse_str(id).ok()
    }
}

fn row_to_document(row: DocumentRow) -> Result<StoredDocument, AppError> {
    let (id, payload, created_at, updated_at) = row;
    let payload = match payload {
        Value::Object(m) => m,
        other => return Err(AppError::Store(format!("document {} payload is not an object: {}", id, other))),
    };
    Ok(StoredDocument {
        id: id.to_string(),
        payload,
        created_at,
        updated_at,
    })
}

fn rows_to_documents(rows: Vec<DocumentRow>) -> Result<Vec<StoredDocument>, AppError> {
    rows.into_iter().map(row_to_document).collect()
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn is_valid_id(&self, id: &str) -> bool {
        is_uuid(id)
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<StoredDocument>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE collection = $1 ORDER BY created_at, id",
            COLUMNS, self.table
        );
        tracing::debug!(sql = %sql, collection, "query");
        let rows: Vec<DocumentRow> = sqlx::query_as(&sql).bind(collection).fetch_all(&self.pool).await?;
        rows_to_documents(rows)
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, AppError> {
        let Some(id) = Self::parse_id(id) else {
            return Ok(None);
        };
        let sql = format!("SELECT {} FROM {} WHERE collection = $1 AND id = $2", COLUMNS, self.table);
        tracing::debug!(sql = %sql, collection, %id, "query");
        let row: Option<DocumentRow> = sqlx::query_as(&sql)
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(row_to_document).transpose()
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<StoredDocument>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE collection = $1 AND payload @> $2 ORDER BY created_at, id LIMIT 1",
            COLUMNS, self.table
        );
        let filter = filter_object(filter);
        tracing::debug!(sql = %sql, collection, filter = %filter, "query");
        let row: Option<DocumentRow> = sqlx::query_as(&sql)
            .bind(collection)
            .bind(&filter)
            .fetch_optional(&self.pool)
            .await?;
        row.map(row_to_document).transpose()
    }

    async fn find_many(&self, collection: &str, filter: &Filter) -> Result<Vec<StoredDocument>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE collection = $1 AND payload @> $2 ORDER BY created_at, id",
            COLUMNS, self.table
        );
        let filter = filter_object(filter);
        tracing::debug!(sql = %sql, collection, filter = %filter, "query");
        let rows: Vec<DocumentRow> = sqlx::query_as(&sql)
            .bind(collection)
            .bind(&filter)
            .fetch_all(&self.pool)
            .await?;
        rows_to_documents(rows)
    }

    async fn insert(&self, collection: &str, payload: Map<String, Value>) -> Result<StoredDocument, AppError> {
        let sql = format!(
            "INSERT INTO {} (collection, id, payload, created_at, updated_at) VALUES ($1, $2, $3, NOW(), NOW()) RETURNING {}",
            self.table, COLUMNS
        );
        let id = Uuid::new_v4();
        tracing::debug!(sql = %sql, collection, %id, "query");
        let row: DocumentRow = sqlx::query_as(&sql)
            .bind(collection)
            .bind(id)
            .bind(Value::Object(payload))
            .fetch_one(&self.pool)
            .await?;
        row_to_document(row)
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<Option<StoredDocument>, AppError> {
        let Some(id) = Self::parse_id(id) else {
            return Ok(None);
        };
        let sql = format!(
            "UPDATE {} SET payload = payload || $3, updated_at = NOW() WHERE collection = $1 AND id = $2 RETURNING {}",
            self.table, COLUMNS
        );
        tracing::debug!(sql = %sql, collection, %id, "query");
        let row: Option<DocumentRow> = sqlx::query_as(&sql)
            .bind(collection)
            .bind(id)
            .bind(Value::Object(fields))
            .fetch_optional(&self.pool)
            .await?;
        row.map(row_to_document).transpose()
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, AppError> {
        let Some(id) = Self::parse_id(id) else {
            return Ok(None);
        };
        let sql = format!(
            "DELETE FROM {} WHERE collection = $1 AND id = $2 RETURNING {}",
            self.table, COLUMNS
        );
        tracing::debug!(sql = %sql, collection, %id, "query");
        let row: Option<DocumentRow> = sqlx::query_as(&sql)
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(row_to_document).transpose()
    }

    async fn status(&self) -> Result<StoreStatus, AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(StoreStatus {
            store: self.name(),
            state: "connected",
        })
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::Store(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::Store("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
