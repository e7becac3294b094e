//! Short code generation and validation utilities.
//!
//! Codes are public handles, not secrets; the thread RNG is enough.

use rand::{Rng, distr::Alphanumeric};

/// Number of characters in every short code.
pub const CODE_LENGTH: usize = 6;

/// Generates a random short code.
///
/// Each of the [`CODE_LENGTH`] characters is drawn uniformly from the 62
/// character alphabet `[A-Za-z0-9]`.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_LENGTH)
        .map(char::from)
        .collect()
}

/// Returns true if `code` has the shape of a short code.
///
/// Lookups use this to reject malformed codes without touching the store.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = generate_code();
        assert_eq!(code.len(), CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_alphanumeric_only() {
        for _ in 0..200 {
            let code = generate_code();
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()), "{code}");
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code()).collect();

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generate_code_uses_full_alphabet() {
        let seen: HashSet<char> = (0..2000).flat_map(|_| generate_code().chars().collect::<Vec<_>>()).collect();

        assert!(seen.iter().any(|c| c.is_ascii_uppercase()));
        assert!(seen.iter().any(|c| c.is_ascii_lowercase()));
        assert!(seen.iter().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_is_valid_code() {
        assert!(is_valid_code("aB3xY9"));
        assert!(is_valid_code("000000"));
    }

    #[test]
    fn test_is_valid_code_wrong_length() {
        assert!(!is_valid_code(""));
        assert!(!is_valid_code("abc12"));
        assert!(!is_valid_code("abc1234"));
    }

    #[test]
    fn test_is_valid_code_rejects_symbols() {
        assert!(!is_valid_code("abc-12"));
        assert!(!is_valid_code("abc_12"));
        assert!(!is_valid_code("ab c12"));
        assert!(!is_valid_code("abcé1"));
    }
}
