mod health;
mod url;

pub use health::HealthResponse;
pub use url::{ErrorResponse, RecordEntry, RecoverQuery, RecoverResponse, ShortenRequest, ShortenResponse};
