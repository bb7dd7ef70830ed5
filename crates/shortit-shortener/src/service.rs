use async_trait::async_trait;
use shortit_core::repository::{InsertOutcome, Repository, UrlMapping};
use shortit_core::{ShortCode, Shortener, ShortenerError, StorageError};
use shortit_generator::Encoder;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, trace, warn};
use typed_builder::TypedBuilder;

/// Tunables for [`ShortenerService`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct ShortenerSettings {
    /// How many candidates to try before giving up on a URL.
    #[builder(default = 10)]
    pub max_attempts: u32,
    /// Upper bound for every individual storage call.
    #[builder(default = Duration::from_secs(5))]
    pub storage_timeout: Duration,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A concrete implementation of the [`Shortener`] trait.
///
/// Generation is idempotent: a URL that already has a code gets that code
/// back. Otherwise the encoder proposes candidates, attempt `0` first,
/// and the repository reserves the first one that is free.
///
/// When a reservation conflicts, the URL is looked up again before
/// counting the attempt as a collision. That re-read catches a concurrent
/// call for the same URL that committed first.
#[derive(Debug, Clone)]
pub struct ShortenerService<R, E> {
    repository: Arc<R>,
    encoder: Arc<E>,
    settings: ShortenerSettings,
}

impl<R: Repository, E: Encoder> ShortenerService<R, E> {
    /// Creates a service with default settings.
    pub fn new(repository: R, encoder: E) -> Self {
        Self::with_settings(repository, encoder, ShortenerSettings::default())
    }

    pub fn with_settings(repository: R, encoder: E, settings: ShortenerSettings) -> Self {
        Self {
            repository: Arc::new(repository),
            encoder: Arc::new(encoder),
            settings,
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Runs one storage call under the configured timeout.
    async fn storage<T, F>(&self, operation: &'static str, call: F) -> Result<T, ShortenerError>
    where
        F: Future<Output = Result<T, StorageError>>,
    {
        let timeout = self.settings.storage_timeout;
        match tokio::time::timeout(timeout, call).await {
            Ok(result) => Ok(result?),
            Err(_) => {
                warn!(operation, ?timeout, "storage call timed out");
                Err(StorageError::Timeout(format!("{operation} exceeded {timeout:?}")).into())
            }
        }
    }
}

#[async_trait]
impl<R: Repository, E: Encoder> Shortener for ShortenerService<R, E> {
    async fn shorten(&self, url: &str) -> Result<ShortCode, ShortenerError> {
        if let Some(code) = self
            .storage("find_by_original", self.repository.find_by_original(url))
            .await?
        {
            debug!(code = %code, "url already shortened");
            return Ok(code);
        }

        for attempt in 0..self.settings.max_attempts {
            let candidate = self.encoder.encode(url, attempt);
            trace!(attempt, candidate = %candidate, "trying candidate");

            let outcome = self
                .storage("try_insert", self.repository.try_insert(url, &candidate))
                .await?;

            match outcome {
                InsertOutcome::Inserted(mapping) => {
                    info!(id = mapping.id, code = %mapping.short_code, attempt, "created mapping");
                    return Ok(mapping.short_code);
                }
                InsertOutcome::Conflict => {
                    if let Some(code) = self
                        .storage("find_by_original", self.repository.find_by_original(url))
                        .await?
                    {
                        debug!(code = %code, "concurrent request mapped the url first");
                        return Ok(code);
                    }
                    warn!(attempt, candidate = %candidate, "short code collision");
                }
            }
        }

        warn!(
            attempts = self.settings.max_attempts,
            "gave up reserving a short code"
        );
        Err(ShortenerError::GenerationExhausted {
            attempts: self.settings.max_attempts,
        })
    }

    async fn resolve(&self, code: &ShortCode) -> Result<Option<String>, ShortenerError> {
        self.storage("find_by_code", self.repository.find_by_code(code))
            .await
    }

    async fn list(&self) -> Result<Vec<UrlMapping>, ShortenerError> {
        self.storage("list_all", self.repository.list_all()).await
    }
}
