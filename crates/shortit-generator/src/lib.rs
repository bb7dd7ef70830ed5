pub mod hashed;
pub mod murmur;
pub mod random;

pub use hashed::{EncoderSettings, HashEncoder};

use shortit_core::ShortCode;

/// Trait for producing candidate short codes.
///
/// Implementations are pure: they never touch storage and never decide
/// whether a candidate is actually free. That is the job of the caller,
/// which retries with a higher `attempt` when a candidate is taken.
pub trait Encoder: Send + Sync + 'static {
    /// Produces the candidate for `url` on the given attempt.
    ///
    /// Attempt `0` must be a deterministic function of `url`. Later
    /// attempts may be arbitrary.
    fn encode(&self, url: &str, attempt: u32) -> ShortCode;
}

impl<E: Encoder + ?Sized> Encoder for std::sync::Arc<E> {
    fn encode(&self, url: &str, attempt: u32) -> ShortCode {
        (**self).encode(url, attempt)
    }
}
