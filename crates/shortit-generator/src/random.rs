use shortit_core::{Alphabet, ShortCode};
use std::iter;

/// Draws `length` characters uniformly from `alphabet`.
pub fn random_code(alphabet: &Alphabet, length: usize) -> ShortCode {
    let code: String = iter::repeat_with(|| alphabet.char_at(rand::random_range(0..alphabet.len())))
        .take(length)
        .collect();
    ShortCode::new(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respects_length_and_alphabet() {
        let alphabet = Alphabet::new("ab").unwrap();
        for _ in 0..100 {
            let code = random_code(&alphabet, 8);
            assert_eq!(code.len(), 8);
            assert!(code.as_str().chars().all(|c| alphabet.contains(c)));
        }
    }

    #[test]
    fn single_character_alphabet_is_constant() {
        let alphabet = Alphabet::new("z").unwrap();
        assert_eq!(random_code(&alphabet, 3).as_str(), "zzz");
    }

    #[test]
    fn zero_length_is_empty() {
        assert!(random_code(&Alphabet::default(), 0).is_empty());
    }
}
