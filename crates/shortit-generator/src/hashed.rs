use crate::murmur::murmur3_32_signed;
use crate::random::random_code;
use crate::Encoder;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use shortit_core::{Alphabet, CoreError, ShortCode};
use typed_builder::TypedBuilder;

/// Tunables for [`HashEncoder`].
///
/// `seed` and `multiplier` are frozen algorithm parameters: changing either
/// changes every code a deployment would produce for the same URL.
#[derive(Debug, Clone, TypedBuilder)]
pub struct EncoderSettings {
    /// Maximum length of a generated code.
    #[builder(default = 6)]
    pub length: usize,
    /// Characters codes are drawn from.
    #[builder(default)]
    pub alphabet: Alphabet,
    /// MurmurHash3 seed.
    #[builder(default = 0)]
    pub seed: u32,
    /// Multiplier applied to each base64 code point before reducing it
    /// into the alphabet.
    #[builder(default = 47)]
    pub multiplier: u32,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Hash-based encoder.
///
/// Attempt `0` hashes the URL with MurmurHash3, takes the minimal signed
/// big-endian bytes of the hash, base64-encodes them without padding and
/// remaps every base64 character into the alphabet. The result is
/// truncated, never padded, to the configured length, so short hashes
/// produce short codes.
///
/// Any later attempt draws a uniformly random code of the full length.
#[derive(Debug, Clone)]
pub struct HashEncoder {
    settings: EncoderSettings,
}

impl HashEncoder {
    pub fn new(settings: EncoderSettings) -> Result<Self, CoreError> {
        if settings.length == 0 {
            return Err(CoreError::InvalidLength(
                "code length must be at least 1".to_string(),
            ));
        }
        Ok(Self { settings })
    }

    #[cfg(test)]
    fn alphabet(&self) -> &Alphabet {
        &self.settings.alphabet
    }

    /// Deterministic candidate for `url`.
    pub fn hashed(&self, url: &str) -> ShortCode {
        self.encode_hash(murmur3_32_signed(url.as_bytes(), self.settings.seed))
    }

    /// Encodes an already computed hash value.
    pub fn encode_hash(&self, hash: i32) -> ShortCode {
        let encoded = STANDARD_NO_PAD.encode(minimal_signed_be_bytes(hash));
        let alphabet = &self.settings.alphabet;
        let multiplier = self.settings.multiplier as usize;

        let code: String = encoded
            .bytes()
            .map(|b| alphabet.char_at(b as usize * multiplier))
            .take(self.settings.length)
            .collect();

        ShortCode::new(code)
    }
}

impl Default for HashEncoder {
    fn default() -> Self {
        Self {
            settings: EncoderSettings::default(),
        }
    }
}

impl Encoder for HashEncoder {
    fn encode(&self, url: &str, attempt: u32) -> ShortCode {
        if attempt == 0 {
            self.hashed(url)
        } else {
            random_code(&self.settings.alphabet, self.settings.length)
        }
    }
}

/// Two's-complement big-endian bytes of `value` with redundant sign
/// extension bytes stripped. Zero encodes as a single `0x00`.
fn minimal_signed_be_bytes(value: i32) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let mut start = 0;

    while start < bytes.len() - 1 {
        let next_negative = bytes[start + 1] & 0x80 != 0;
        let redundant = match bytes[start] {
            0x00 => !next_negative,
            0xFF => next_negative,
            _ => false,
        };
        if !redundant {
            break;
        }
        start += 1;
    }

    bytes[start..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn encoder() -> HashEncoder {
        HashEncoder::default()
    }

    #[test]
    fn minimal_bytes_strip_sign_extension() {
        assert_eq!(minimal_signed_be_bytes(0), vec![0x00]);
        assert_eq!(minimal_signed_be_bytes(1), vec![0x01]);
        assert_eq!(minimal_signed_be_bytes(-1), vec![0xFF]);
        assert_eq!(minimal_signed_be_bytes(127), vec![0x7F]);
        assert_eq!(minimal_signed_be_bytes(128), vec![0x00, 0x80]);
        assert_eq!(minimal_signed_be_bytes(-128), vec![0x80]);
        assert_eq!(minimal_signed_be_bytes(-129), vec![0xFF, 0x7F]);
        assert_eq!(minimal_signed_be_bytes(8_388_608), vec![0x00, 0x80, 0x00, 0x00]);
        assert_eq!(
            minimal_signed_be_bytes(i32::MIN),
            vec![0x80, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn hashed_codes_are_stable() {
        let encoder = encoder();
        assert_eq!(encoder.hashed("https://example.com").as_str(), "Tggm7r");
        assert_eq!(encoder.hashed("foo").as_str(), "nPStvr");
        assert_eq!(encoder.hashed("hello").as_str(), "gvC6kn");
        assert_eq!(
            encoder
                .hashed("https://www.example.com/very/long/url/that/needs/to/be/shortened")
                .as_str(),
            "ZBRzsr"
        );
    }

    #[test]
    fn small_hashes_yield_codes_shorter_than_length() {
        let encoder = encoder();
        assert_eq!(encoder.encode_hash(0).as_str(), "rr");
        assert_eq!(encoder.encode_hash(1).as_str(), "rz");
        assert_eq!(encoder.encode_hash(-1).as_str(), "Nn");
        assert_eq!(encoder.encode_hash(128).as_str(), "rvr");
        assert_eq!(encoder.encode_hash(-129).as_str(), "NPC");
        assert_eq!(encoder.encode_hash(0x1234).as_str(), "twz");
        assert_eq!(encoder.encode_hash(0x12_3456).as_str(), "twk7");
        assert_eq!(encoder.encode_hash(8_388_608).as_str(), "rvrrrr");
    }

    #[test]
    fn output_is_truncated_to_length() {
        let settings = EncoderSettings::builder()
            .length(4)
            .alphabet(Alphabet::new("ab").unwrap())
            .build();
        let encoder = HashEncoder::new(settings).unwrap();

        assert_eq!(encoder.hashed("https://example.com").as_str(), "baaa");
    }

    #[test]
    fn zero_length_is_rejected() {
        let settings = EncoderSettings::builder().length(0).build();
        assert!(matches!(
            HashEncoder::new(settings),
            Err(CoreError::InvalidLength(_))
        ));
    }

    #[test]
    fn attempt_zero_uses_hash() {
        let encoder = encoder();
        assert_eq!(
            encoder.encode("https://example.com", 0),
            encoder.hashed("https://example.com")
        );
    }

    #[test]
    fn fallback_attempts_use_full_length() {
        let encoder = encoder();
        for attempt in 1..20 {
            let code = encoder.encode("https://example.com", attempt);
            assert_eq!(code.len(), 6);
        }
    }

    #[test]
    fn changing_multiplier_changes_codes() {
        let other = HashEncoder::new(EncoderSettings::builder().multiplier(31).build()).unwrap();
        assert_ne!(
            other.hashed("https://example.com"),
            encoder().hashed("https://example.com")
        );
    }

    proptest! {
        #[test]
        fn attempt_zero_is_deterministic(url in ".*") {
            let encoder = encoder();
            prop_assert_eq!(encoder.encode(&url, 0), encoder.encode(&url, 0));
        }

        #[test]
        fn codes_stay_within_alphabet_and_length(url in ".*", attempt in 0u32..4, length in 1usize..12) {
            let encoder = HashEncoder::new(EncoderSettings::builder().length(length).build()).unwrap();
            let code = encoder.encode(&url, attempt);

            prop_assert!(!code.is_empty());
            prop_assert!(code.len() <= length);
            prop_assert!(code.as_str().chars().all(|c| encoder.alphabet().contains(c)));
        }
    }
}
