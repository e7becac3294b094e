//! Authenticated encryption of snippet content under a caller-supplied secret.
//!
//! The secret is stretched into a 256-bit key with Argon2id over a random
//! salt, then used with AES-256-GCM. The stored form is standard base64 of
//! `salt || nonce || ciphertext+tag`. The secret itself is never stored;
//! a wrong secret is detected by the GCM tag check.

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};
use argon2::Argon2;
use base64::Engine as _;
use serde_json::json;

use crate::error::AppError;

const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;
const TAG_LEN: usize = 16;

/// Encrypts `plaintext` under `secret`.
///
/// Every call draws a fresh salt and nonce, so encrypting the same text twice
/// yields different ciphertexts.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system RNG or key derivation fails.
pub fn encrypt(plaintext: &str, secret: &str) -> Result<String, AppError> {
    let mut salt = [0u8; SALT_LEN];
    let mut nonce = [0u8; NONCE_LEN];
    getrandom::fill(&mut salt).map_err(rng_error)?;
    getrandom::fill(&mut nonce).map_err(rng_error)?;

    let cipher = cipher_for(secret, &salt)?;
    let sealed = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
        .map_err(|e| AppError::internal("Encryption failed", json!({ "reason": e.to_string() })))?;

    let mut out = Vec::with_capacity(SALT_LEN + NONCE_LEN + sealed.len());
    out.extend_from_slice(&salt);
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&sealed);

    Ok(base64::engine::general_purpose::STANDARD.encode(out))
}

/// Decrypts a value produced by [`encrypt`].
///
/// # Errors
///
/// Returns [`AppError::InvalidKey`] when the secret is wrong or the stored
/// value is malformed, truncated or tampered with.
pub fn decrypt(ciphertext: &str, secret: &str) -> Result<String, AppError> {
    let raw = base64::engine::general_purpose::STANDARD
        .decode(ciphertext)
        .map_err(|_| invalid_key("malformed"))?;

    if raw.len() < SALT_LEN + NONCE_LEN + TAG_LEN {
        return Err(invalid_key("truncated"));
    }

    let (salt, rest) = raw.split_at(SALT_LEN);
    let (nonce, sealed) = rest.split_at(NONCE_LEN);

    let cipher = cipher_for(secret, salt)?;
    let plain = cipher
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| invalid_key("authentication failed"))?;

    String::from_utf8(plain).map_err(|_| invalid_key("not utf-8"))
}

fn cipher_for(secret: &str, salt: &[u8]) -> Result<Aes256Gcm, AppError> {
    let mut key = [0u8; KEY_LEN];
    Argon2::default()
        .hash_password_into(secret.as_bytes(), salt, &mut key)
        .map_err(|e| {
            AppError::internal("Key derivation failed", json!({ "reason": e.to_string() }))
        })?;

    Aes256Gcm::new_from_slice(&key)
        .map_err(|e| AppError::internal("Failed to create cipher", json!({ "reason": e.to_string() })))
}

fn invalid_key(reason: &str) -> AppError {
    AppError::invalid_key("Invalid secret key", json!({ "reason": reason }))
}

fn rng_error(e: getrandom::Error) -> AppError {
    AppError::internal("System RNG failure", json!({ "reason": e.to_string() }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let sealed = encrypt("secret plan", "k1").unwrap();
        assert_eq!(decrypt(&sealed, "k1").unwrap(), "secret plan");
    }

    #[test]
    fn test_roundtrip_unicode_and_multiline() {
        let text = "line one\nстрока два\n🦀";
        let sealed = encrypt(text, "pässwörd").unwrap();
        assert_eq!(decrypt(&sealed, "pässwörd").unwrap(), text);
    }

    #[test]
    fn test_ciphertext_hides_plaintext() {
        let sealed = encrypt("secret plan", "k1").unwrap();
        assert!(!sealed.contains("secret plan"));
    }

    #[test]
    fn test_nonce_varies_between_calls() {
        let a = encrypt("same text", "k1").unwrap();
        let b = encrypt("same text", "k1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_key_is_invalid_key() {
        let sealed = encrypt("secret plan", "k1").unwrap();
        let err = decrypt(&sealed, "wrong").unwrap_err();
        assert!(matches!(err, AppError::InvalidKey { .. }));
    }

    #[test]
    fn test_similar_keys_do_not_decrypt() {
        let sealed = encrypt("secret plan", "k1").unwrap();
        assert!(decrypt(&sealed, "k1 ").is_err());
        assert!(decrypt(&sealed, "K1").is_err());
        assert!(decrypt(&sealed, "").is_err());
    }

    #[test]
    fn test_malformed_base64_is_invalid_key() {
        let err = decrypt("not base64 at all!", "k1").unwrap_err();
        assert!(matches!(err, AppError::InvalidKey { .. }));
    }

    #[test]
    fn test_truncated_payload_is_invalid_key() {
        let short = base64::engine::general_purpose::STANDARD.encode([0u8; 20]);
        let err = decrypt(&short, "k1").unwrap_err();
        assert!(matches!(err, AppError::InvalidKey { .. }));
    }

    #[test]
    fn test_tampered_payload_is_invalid_key() {
        let sealed = encrypt("secret plan", "k1").unwrap();
        let mut raw = base64::engine::general_purpose::STANDARD
            .decode(&sealed)
            .unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        let tampered = base64::engine::general_purpose::STANDARD.encode(raw);

        let err = decrypt(&tampered, "k1").unwrap_err();
        assert!(matches!(err, AppError::InvalidKey { .. }));
    }
}
