mod health;
mod url;

pub use health::health_handler;
pub use url::{records_handler, recover_handler, shorten_handler};
