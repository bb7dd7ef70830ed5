use async_trait::async_trait;
use moka::future::Cache;
use shortit_core::repository::{InsertOutcome, ReadRepository, Repository, Result, UrlMapping};
use shortit_core::shortcode::ShortCode;
use tracing::{debug, trace};

const DEFAULT_CAPACITY: u64 = 10_000;

/// A repository decorator that adds a read-through in-memory cache.
///
/// Mappings never change once written, so cached entries never go stale
/// and carry no TTL. Misses are not cached: a code that is unknown now may
/// be issued a moment later. Enumeration and inserts always reach the inner
/// repository.
#[derive(Debug, Clone)]
pub struct CachedRepository<R> {
    inner: R,
    by_code: Cache<ShortCode, String>,
    by_url: Cache<String, ShortCode>,
}

impl<R: ReadRepository> CachedRepository<R> {
    /// Creates a cached repository holding up to 10,000 entries per direction.
    pub fn new(inner: R) -> Self {
        Self::with_capacity(inner, DEFAULT_CAPACITY)
    }

    /// Creates a cached repository with a custom capacity per direction.
    pub fn with_capacity(inner: R, max_capacity: u64) -> Self {
        Self {
            inner,
            by_code: Cache::builder().max_capacity(max_capacity).build(),
            by_url: Cache::builder().max_capacity(max_capacity).build(),
        }
    }

    /// Returns a reference to the inner repository.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    async fn remember(&self, url: &str, code: &ShortCode) {
        self.by_code.insert(code.clone(), url.to_owned()).await;
        self.by_url.insert(url.to_owned(), code.clone()).await;
    }
}

#[async_trait]
impl<R: ReadRepository> ReadRepository for CachedRepository<R> {
    async fn find_by_original(&self, url: &str) -> Result<Option<ShortCode>> {
        if let Some(code) = self.by_url.get(url).await {
            debug!(url, "cache hit by original url");
            return Ok(Some(code));
        }

        trace!(url, "cache miss by original url");
        let found = self.inner.find_by_original(url).await?;
        if let Some(code) = &found {
            self.remember(url, code).await;
        }
        Ok(found)
    }

    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<String>> {
        if let Some(url) = self.by_code.get(code).await {
            debug!(code = %code, "cache hit by short code");
            return Ok(Some(url));
        }

        trace!(code = %code, "cache miss by short code");
        let found = self.inner.find_by_code(code).await?;
        if let Some(url) = &found {
            self.remember(url, code).await;
        }
        Ok(found)
    }

    async fn list_all(&self) -> Result<Vec<UrlMapping>> {
        self.inner.list_all().await
    }
}

#[async_trait]
impl<R: Repository> Repository for CachedRepository<R> {
    async fn try_insert(&self, url: &str, code: &ShortCode) -> Result<InsertOutcome> {
        let outcome = self.inner.try_insert(url, code).await?;
        if let InsertOutcome::Inserted(mapping) = &outcome {
            self.remember(&mapping.original_url, &mapping.short_code)
                .await;
        }
        Ok(outcome)
    }
}
