use crate::error::CoreError;
use std::fmt::Display;
use std::str::FromStr;

/// ASCII letters followed by digits.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// The character set short codes are drawn from.
///
/// An alphabet is a non-empty sequence of distinct, printable ASCII
/// characters. Order matters: the encoder indexes into it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Alphabet(Box<[u8]>);

impl Alphabet {
    /// Creates an alphabet after validating `chars`.
    pub fn new(chars: &str) -> Result<Self, CoreError> {
        if chars.is_empty() {
            return Err(CoreError::InvalidAlphabet(
                "alphabet cannot be empty".to_string(),
            ));
        }

        if let Some(c) = chars.chars().find(|c| !c.is_ascii_graphic()) {
            return Err(CoreError::InvalidAlphabet(format!(
                "must contain only printable ASCII characters, got {c:?}"
            )));
        }

        let bytes = chars.as_bytes();
        for (i, b) in bytes.iter().enumerate() {
            if bytes[..i].contains(b) {
                return Err(CoreError::InvalidAlphabet(format!(
                    "duplicate character {:?}",
                    *b as char
                )));
            }
        }

        Ok(Self(bytes.into()))
    }

    /// Number of characters in the alphabet.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; kept for parity with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the character at `index`, wrapping around the alphabet length.
    pub fn char_at(&self, index: usize) -> char {
        self.0[index % self.0.len()] as char
    }

    /// Returns `true` if `c` belongs to the alphabet.
    pub fn contains(&self, c: char) -> bool {
        c.is_ascii() && self.0.contains(&(c as u8))
    }

    pub fn as_str(&self) -> &str {
        // Validated as ASCII on construction.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self(DEFAULT_ALPHABET.as_bytes().into())
    }
}

impl FromStr for Alphabet {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Alphabet").field(&self.as_str()).finish()
    }
}
