use async_trait::async_trait;
use shortit_core::error::StorageError;
use shortit_core::repository::{InsertOutcome, ReadRepository, Repository, Result, UrlMapping};
use shortit_core::shortcode::ShortCode;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

const SCHEMA: &str = include_str!("../ddl/sqlite/url_mappings.sql");

/// Connection settings for [`SqliteRepository`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct SqliteSettings {
    /// Path of the database file.
    #[builder(setter(into))]
    pub path: PathBuf,
    #[builder(default = 5)]
    pub max_connections: u32,
    /// How long a connection waits on a locked database before failing.
    #[builder(default = Duration::from_secs(5))]
    pub busy_timeout: Duration,
    /// How long a caller waits for a free pooled connection.
    #[builder(default = Duration::from_secs(5))]
    pub acquire_timeout: Duration,
    #[builder(default = true)]
    pub create_if_missing: bool,
}

/// SQLite implementation of the repository contract.
///
/// All mappings live in a single `url_mappings` table. Both `short_code`
/// and `original_url` carry a unique constraint, so a conditional insert
/// is a single `INSERT .. ON CONFLICT DO NOTHING` statement and cannot
/// race with another writer.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Creates a repository from an existing pool.
    ///
    /// The schema is not applied; call [`SqliteRepository::migrate`] first
    /// if the database may be empty.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool for `settings.path` and applies the schema.
    pub async fn connect(settings: &SqliteSettings) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(&settings.path)
            .create_if_missing(settings.create_if_missing)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(settings.busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        let repository = Self::new(pool);
        repository.migrate().await?;

        debug!(path = %settings.path.display(), "opened sqlite repository");
        Ok(repository)
    }

    /// Creates the `url_mappings` table if it does not exist yet.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Closes every pooled connection, waiting for in-flight queries.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Configuration(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadRepository for SqliteRepository {
    async fn find_by_original(&self, url: &str) -> Result<Option<ShortCode>> {
        trace!(url, "looking up short code by original url");

        let row = sqlx::query(
            r#"
            SELECT short_code
            FROM url_mappings
            WHERE original_url = ?
            LIMIT 1
            "#,
        )
        .bind(url)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(|row| row.try_get::<String, _>("short_code").map(ShortCode::from))
            .transpose()
            .map_err(map_sqlx_error)
    }

    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<String>> {
        trace!(code = %code, "looking up original url by short code");

        let row = sqlx::query(
            r#"
            SELECT original_url
            FROM url_mappings
            WHERE short_code = ?
            LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(|row| row.try_get::<String, _>("original_url"))
            .transpose()
            .map_err(map_sqlx_error)
    }

    async fn list_all(&self) -> Result<Vec<UrlMapping>> {
        let rows = sqlx::query(
            r#"
            SELECT id, original_url, short_code
            FROM url_mappings
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter()
            .map(|row| {
                Ok(UrlMapping {
                    id: row.try_get("id")?,
                    original_url: row.try_get("original_url")?,
                    short_code: ShortCode::new(row.try_get::<String, _>("short_code")?),
                })
            })
            .collect::<std::result::Result<Vec<_>, sqlx::Error>>()
            .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn try_insert(&self, url: &str, code: &ShortCode) -> Result<InsertOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO url_mappings (original_url, short_code)
            VALUES (?, ?)
            ON CONFLICT DO NOTHING
            RETURNING id
            "#,
        )
        .bind(url)
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(Some(row)) => {
                let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
                Ok(InsertOutcome::Inserted(UrlMapping {
                    id,
                    original_url: url.to_owned(),
                    short_code: code.clone(),
                }))
            }
            Ok(None) => {
                trace!(code = %code, "insert skipped on unique constraint");
                Ok(InsertOutcome::Conflict)
            }
            Err(err) if is_unique_violation(&err) => Ok(InsertOutcome::Conflict),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }
}
