use thiserror::Error;

/// Errors raised while validating core configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),
    #[error("invalid code length: {0}")]
    InvalidLength(String),
}

/// Errors surfaced by a storage backend.
///
/// A unique-constraint hit is not an error; backends report it as
/// [`InsertOutcome::Conflict`](crate::repository::InsertOutcome::Conflict).
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

/// Errors returned by a [`Shortener`](crate::shortener::Shortener).
///
/// A missing short code is not an error: lookups return `Ok(None)`.
#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("could not reserve a unique short code after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] StorageError),
}
