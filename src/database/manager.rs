use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};
use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow};
use sqlx::{Column, PgPool, Postgres, Row as SqlxRow, TypeInfo};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use super::executor::{ExecutorError, ProcedureExecutor};
use super::procedure::{is_valid_schema_name, ProcedureCall, SqlValue};
use super::row::Row;
use crate::config::DatabaseConfig;

type PgQuery<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;

/// Errors opening the database handle
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Invalid procedure schema name: {0}")]
    InvalidSchemaName(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Handle to the bounded Postgres pool.
///
/// Opened once at process start and passed to whatever needs it; cloning is
/// cheap and shares the same pool.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
    schema: String,
    command_timeout: Duration,
}

impl Database {
    /// Connect the pool. Fails if the URL is malformed, the schema name is
    /// not a plain identifier, or the first connection cannot be made.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if !is_valid_schema_name(&config.schema) {
            return Err(DatabaseError::InvalidSchemaName(config.schema.clone()));
        }

        info!(url = %redact_url(&config.url)?, "connecting to database");

        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await?;

        info!(
            max_connections = config.max_connections,
            schema = %config.schema,
            "database connected"
        );

        Ok(Self {
            pool,
            schema: config.schema.clone(),
            command_timeout: Duration::from_secs(config.command_timeout_secs),
        })
    }

    /// Close every pooled connection. Waits for checked-out connections.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("database disconnected");
    }
}

#[async_trait]
impl ProcedureExecutor for Database {
    async fn execute(&self, call: &ProcedureCall) -> Result<Vec<Row>, ExecutorError> {
        let sql = call.to_sql(&self.schema);

        // Dropping the connection hands it back to the pool, so an aborted
        // request cannot leak it.
        let mut conn = self.pool.acquire().await?;

        let query = call.values().fold(sqlx::query(&sql), bind_value);
        let fetched = tokio::time::timeout(self.command_timeout, query.fetch_all(&mut *conn)).await;

        let rows = match fetched {
            Ok(rows) => rows?,
            Err(_) => {
                // The connection is mid-query; do not return it to the pool.
                if let Err(e) = conn.close().await {
                    warn!("failed to close timed-out connection: {}", e);
                }
                return Err(ExecutorError::Timeout(self.command_timeout));
            }
        };

        rows.iter().map(read_row).collect()
    }

    async fn ping(&self) -> Result<(), ExecutorError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn bind_value<'q>(query: PgQuery<'q>, value: &SqlValue) -> PgQuery<'q> {
    match value {
        SqlValue::Text(v) => query.bind(v.clone()),
        SqlValue::Bool(v) => query.bind(*v),
        SqlValue::Int(v) => query.bind(*v),
        SqlValue::BigInt(v) => query.bind(*v),
        SqlValue::Uuid(v) => query.bind(*v),
        SqlValue::Timestamp(v) => query.bind(*v),
        SqlValue::TextArray(v) => query.bind(v.clone()),
    }
}

/// Convert a Postgres row into a dynamic [`Row`], dispatching on the
/// column's declared type.
fn read_row(row: &PgRow) -> Result<Row, ExecutorError> {
    let mut columns = Map::new();

    for column in row.columns() {
        let i = column.ordinal();
        let value = match column.type_info().name() {
            "UUID" => row
                .try_get::<Option<Uuid>, _>(i)?
                .map(|u| Value::String(u.to_string())),
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" | "CITEXT" => {
                row.try_get::<Option<String>, _>(i)?.map(Value::String)
            }
            "BOOL" => row.try_get::<Option<bool>, _>(i)?.map(Value::Bool),
            "INT2" => row.try_get::<Option<i16>, _>(i)?.map(Value::from),
            "INT4" => row.try_get::<Option<i32>, _>(i)?.map(Value::from),
            "INT8" => row.try_get::<Option<i64>, _>(i)?.map(Value::from),
            "FLOAT4" => row.try_get::<Option<f32>, _>(i)?.map(|f| Value::from(f64::from(f))),
            "FLOAT8" => row.try_get::<Option<f64>, _>(i)?.map(Value::from),
            "TIMESTAMPTZ" => row
                .try_get::<Option<DateTime<Utc>>, _>(i)?
                .map(|t| Value::String(t.to_rfc3339())),
            "TIMESTAMP" => row
                .try_get::<Option<NaiveDateTime>, _>(i)?
                .map(|t| Value::String(Utc.from_utc_datetime(&t).to_rfc3339())),
            "DATE" => row
                .try_get::<Option<NaiveDate>, _>(i)?
                .map(|d| Value::String(d.to_string())),
            "TEXT[]" | "VARCHAR[]" => row.try_get::<Option<Vec<String>>, _>(i)?.map(Value::from),
            "UUID[]" => row.try_get::<Option<Vec<Uuid>>, _>(i)?.map(|ids| {
                Value::Array(ids.into_iter().map(|u| Value::String(u.to_string())).collect())
            }),
            "JSON" | "JSONB" => row.try_get::<Option<Value>, _>(i)?,
            other => match row.try_get::<Option<String>, _>(i) {
                Ok(v) => v.map(Value::String),
                Err(_) => {
                    warn!(column = column.name(), pg_type = other, "unsupported column type, returning null");
                    None
                }
            },
        };

        columns.insert(column.name().to_string(), value.unwrap_or(Value::Null));
    }

    Ok(Row::new(columns))
}

/// Database URL with the password removed, for logs.
fn redact_url(raw: &str) -> Result<String, DatabaseError> {
    let mut url = url::Url::parse(raw).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
    if url.password().is_some() {
        url.set_password(Some("***"))
            .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
    }
    Ok(url.to_string())
}
