//! URL shortener service implementation.
//!
//! [`ShortenerService`] combines an [`Encoder`](shortit_generator::Encoder)
//! with a [`Repository`](shortit_core::Repository) to hand out idempotent,
//! collision-resilient short codes. Core types are re-exported from
//! `shortit_core`.

pub mod service;

pub use service::{ShortenerService, ShortenerSettings};
pub use shortit_core::{Shortener, ShortenerError};
