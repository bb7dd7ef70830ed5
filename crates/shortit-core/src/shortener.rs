use crate::repository::UrlMapping;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Returns the short code for `url`, reserving a new one if the URL has
    /// never been shortened. Repeated calls with the same URL return the
    /// same code.
    async fn shorten(&self, url: &str) -> Result<ShortCode>;

    /// Resolves a short code to the original URL.
    /// Returns `None` if the code was never issued.
    async fn resolve(&self, code: &ShortCode) -> Result<Option<String>>;

    /// Lists every mapping in creation order.
    async fn list(&self) -> Result<Vec<UrlMapping>>;
}
