use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use shortit_core::UrlMapping;

#[derive(Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}

#[derive(Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
}

#[derive(Deserialize)]
pub struct RecoverQuery {
    pub short_url: String,
}

#[derive(Serialize)]
pub struct RecoverResponse {
    pub original_url: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// One row of `GET /records`, serialized as `{short_code: original_url}`.
pub struct RecordEntry {
    pub short_code: String,
    pub original_url: String,
}

impl From<UrlMapping> for RecordEntry {
    fn from(mapping: UrlMapping) -> Self {
        Self {
            short_code: mapping.short_code.into_string(),
            original_url: mapping.original_url,
        }
    }
}

impl Serialize for RecordEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.short_code, &self.original_url)?;
        map.end()
    }
}
