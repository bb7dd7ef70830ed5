//! Core types and traits for the shortit URL shortener.
//!
//! This crate provides the shared vocabulary used by the generator, the
//! storage backends, the shortener service and the HTTP gateway.

pub mod alphabet;
pub mod error;
pub mod repository;
pub mod shortcode;
pub mod shortener;

pub use alphabet::Alphabet;
pub use error::{CoreError, ShortenerError, StorageError};
pub use repository::{InsertOutcome, ReadRepository, Repository, UrlMapping};
pub use shortcode::ShortCode;
pub use shortener::Shortener;
