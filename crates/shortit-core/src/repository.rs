use crate::error::StorageError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Type alias for repository results.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A persisted mapping between an original URL and its short code.
///
/// Mappings are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlMapping {
    /// Surrogate key assigned by the store. Monotonically increasing, never reused.
    pub id: i64,
    /// The URL exactly as the caller supplied it.
    pub original_url: String,
    /// The short code reserved for `original_url`.
    pub short_code: ShortCode,
}

/// Result of a conditional insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The row was created.
    Inserted(UrlMapping),
    /// A row already holds the code or the URL. Nothing was written.
    Conflict,
}

/// A read-only view of a repository.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Returns the short code already reserved for `url`, if any.
    async fn find_by_original(&self, url: &str) -> Result<Option<ShortCode>>;

    /// Returns the original URL behind `code`, if any.
    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<String>>;

    /// Returns every mapping in creation order.
    ///
    /// Each call re-reads the current state of the store.
    async fn list_all(&self) -> Result<Vec<UrlMapping>>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Atomically inserts a new mapping unless `code` or `url` is already taken.
    ///
    /// Never overwrites an existing row. A taken code or URL is reported as
    /// [`InsertOutcome::Conflict`], not as an error.
    async fn try_insert(&self, url: &str, code: &ShortCode) -> Result<InsertOutcome>;
}

#[async_trait]
impl<T: ReadRepository + ?Sized> ReadRepository for Arc<T> {
    async fn find_by_original(&self, url: &str) -> Result<Option<ShortCode>> {
        (**self).find_by_original(url).await
    }

    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<String>> {
        (**self).find_by_code(code).await
    }

    async fn list_all(&self) -> Result<Vec<UrlMapping>> {
        (**self).list_all().await
    }
}

#[async_trait]
impl<T: Repository + ?Sized> Repository for Arc<T> {
    async fn try_insert(&self, url: &str, code: &ShortCode) -> Result<InsertOutcome> {
        (**self).try_insert(url, code).await
    }
}
