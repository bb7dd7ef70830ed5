//! HTTP gateway for the shortit URL shortener.
//!
//! Exposes `POST /short_it`, `GET /recover_it`, `GET /records` and
//! `GET /health` on top of any [`Shortener`](shortit_core::Shortener).

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
