use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A short code identifying one stored URL mapping.
///
/// Codes produced by the encoder are drawn from the configured
/// [`Alphabet`](crate::alphabet::Alphabet) and are at most the configured
/// length. Codes arriving from callers are not validated: a code that was
/// never issued simply resolves to nothing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortCode(String);

impl ShortCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters in the code.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for ShortCode {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ShortCode {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_inner() {
        let code = ShortCode::new("abc123");
        assert_eq!(code.to_string(), "abc123");
        assert_eq!(code.as_str(), "abc123");
    }

    #[test]
    fn len_counts_characters() {
        assert_eq!(ShortCode::new("ab").len(), 2);
        assert!(ShortCode::new("").is_empty());
    }

    #[test]
    fn serializes_as_plain_string() {
        let code = ShortCode::new("Tggm7r");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"Tggm7r\"");

        let back: ShortCode = serde_json::from_str("\"Tggm7r\"").unwrap();
        assert_eq!(back, code);
    }
}
