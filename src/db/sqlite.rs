use crate::db::schema::SQLITE_INIT;
use crate::error::VaultError;
use serde::{Serialize, de::DeserializeOwned};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;
use tracing::warn;

pub type SqlitePool = Pool<Sqlite>;

/// Key-value storage over SQLite. Values are JSON-serialized records;
/// writes are last-write-wins upserts on the key.
#[derive(Clone)]
pub struct KvStorage {
    pool: SqlitePool,
}

impl KvStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `database_url` and
    /// initialize the schema.
    pub async fn connect(database_url: &str) -> Result<Self, VaultError> {
        let connect_opts =
            SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), VaultError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Fetch the raw JSON text stored under `key`, if any.
    pub async fn get_raw(&self, key: &str) -> Result<Option<String>, VaultError> {
        let row = sqlx::query("SELECT value FROM kv_records WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(Some(row.try_get("value")?)),
            None => Ok(None),
        }
    }

    /// Upsert by key. Uses SQLite `INSERT ... ON CONFLICT(key) DO UPDATE`.
    pub async fn put_raw(&self, key: &str, value: &str) -> Result<(), VaultError> {
        sqlx::query(
            r#"
            INSERT INTO kv_records (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn delete(&self, key: &str) -> Result<(), VaultError> {
        sqlx::query("DELETE FROM kv_records WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Read and deserialize the record stored under `key`.
    ///
    /// A record that fails to deserialize is reported as absent rather than
    /// as an error; the occurrence is logged for diagnosis.
    pub async fn get_record<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, VaultError> {
        let Some(raw) = self.get_raw(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key = %key, error = %e, "malformed stored record; treating as absent");
                Ok(None)
            }
        }
    }

    /// Serialize and upsert a record under `key`.
    pub async fn put_record<T: Serialize>(&self, key: &str, value: &T) -> Result<(), VaultError> {
        let raw = serde_json::to_string(value)?;
        self.put_raw(key, &raw).await
    }
}
