//! Storage backends for the shortit URL shortener.
//!
//! [`SqliteRepository`] is the durable backend. [`InMemoryRepository`] keeps
//! everything in process memory and is meant for tests and throwaway
//! deployments. [`CachedRepository`] decorates either with a read-through
//! cache.

pub mod cached;
pub mod memory;
pub mod sqlite;

pub use cached::CachedRepository;
pub use memory::InMemoryRepository;
pub use shortit_core::repository::{InsertOutcome, ReadRepository, Repository, UrlMapping};
pub use shortit_core::StorageError;
pub use sqlite::{SqliteRepository, SqliteSettings};
