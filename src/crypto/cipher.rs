//! AES-256-GCM record sealing and password hashing
//!
//! Provides authenticated encryption for gift payloads. Each encryption
//! operation generates a fresh salt and nonce, so sealing the same payload
//! twice with the same password yields different blobs. Decryption converts
//! every failure mode into `None`; callers treat `None` as "inaccessible",
//! not as empty data.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{GiftbookError, GiftbookResult};

use super::key::{derive_key, SALT_SIZE};

/// Size of the AES-GCM nonce in bytes (96 bits)
const NONCE_SIZE: usize = 12;

/// Sealed record envelope, serialized to JSON as the storage blob
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedData {
    /// The key-derivation salt (base64 encoded)
    pub salt: String,
    /// The nonce used for this encryption (base64 encoded)
    pub nonce: String,
    /// The encrypted ciphertext with authentication tag (base64 encoded)
    pub ciphertext: String,
    /// Version for future algorithm upgrades
    #[serde(default = "default_version")]
    pub version: u8,
}

fn default_version() -> u8 {
    1
}

impl EncryptedData {
    fn new(salt: &[u8], nonce: &[u8], ciphertext: &[u8]) -> Self {
        Self {
            salt: STANDARD.encode(salt),
            nonce: STANDARD.encode(nonce),
            ciphertext: STANDARD.encode(ciphertext),
            version: 1,
        }
    }
}

/// One-way password digest: SHA-256, lowercase hex.
///
/// Deterministic, used only to verify an event password. Encryption keys are
/// derived separately with a per-record salt.
pub fn hash(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Seal a serializable value under a password.
///
/// Returns the JSON-serialized envelope string stored in
/// `GiftRecord::encrypted_data`.
pub fn encrypt<T: Serialize>(value: &T, password: &str) -> GiftbookResult<String> {
    let plaintext = serde_json::to_vec(value)?;

    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);
    let key = derive_key(password, &salt);

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| GiftbookError::Encryption(format!("Failed to create cipher: {}", e)))?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_ref())
        .map_err(|e| GiftbookError::Encryption(format!("Encryption failed: {}", e)))?;

    let envelope = EncryptedData::new(&salt, &nonce_bytes, &ciphertext);
    Ok(serde_json::to_string(&envelope)?)
}

/// Unseal a blob produced by [`encrypt`].
///
/// Returns `None` for a wrong password, a tampered or truncated blob, or a
/// blob that is not an envelope at all.
pub fn decrypt<T: DeserializeOwned>(blob: &str, password: &str) -> Option<T> {
    let envelope: EncryptedData = serde_json::from_str(blob).ok()?;
    open(&envelope, password)
}

/// Unseal an already-parsed envelope
pub fn open<T: DeserializeOwned>(envelope: &EncryptedData, password: &str) -> Option<T> {
    if envelope.version != 1 {
        return None;
    }

    let salt = STANDARD.decode(&envelope.salt).ok()?;
    let nonce_bytes = STANDARD.decode(&envelope.nonce).ok()?;
    if nonce_bytes.len() != NONCE_SIZE {
        return None;
    }
    let ciphertext = STANDARD.decode(&envelope.ciphertext).ok()?;

    let key = derive_key(password, &salt);
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes()).ok()?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(&nonce_bytes), ciphertext.as_ref())
        .ok()?;

    serde_json::from_slice(&plaintext).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let value = serde_json::json!({"name": "张三", "amount": 888.0});
        let blob = encrypt(&value, "passphrase").unwrap();
        let decrypted: serde_json::Value = decrypt(&blob, "passphrase").unwrap();
        assert_eq!(value, decrypted);
    }

    #[test]
    fn test_wrong_password_returns_none() {
        let blob = encrypt(&"hello", "right").unwrap();
        let result: Option<String> = decrypt(&blob, "wrong");
        assert!(result.is_none());
    }

    #[test]
    fn test_nondeterministic_blobs() {
        let blob1 = encrypt(&"hello", "pw").unwrap();
        let blob2 = encrypt(&"hello", "pw").unwrap();
        // Fresh salt and nonce per call: identical input, different output.
        assert_ne!(blob1, blob2);
    }

    #[test]
    fn test_tampered_ciphertext_returns_none() {
        let blob = encrypt(&"hello", "pw").unwrap();
        let mut envelope: EncryptedData = serde_json::from_str(&blob).unwrap();

        let mut ciphertext = STANDARD.decode(&envelope.ciphertext).unwrap();
        ciphertext[0] ^= 0xFF;
        envelope.ciphertext = STANDARD.encode(&ciphertext);

        let tampered = serde_json::to_string(&envelope).unwrap();
        let result: Option<String> = decrypt(&tampered, "pw");
        assert!(result.is_none());
    }

    #[test]
    fn test_malformed_blob_returns_none() {
        assert!(decrypt::<String>("not an envelope", "pw").is_none());
        assert!(decrypt::<String>("{\"salt\":\"??\"}", "pw").is_none());
        assert!(decrypt::<String>("", "pw").is_none());
    }

    #[test]
    fn test_hash_is_deterministic_hex() {
        let h1 = hash("123456");
        let h2 = hash("123456");
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
        assert!(h1.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(hash("123456"), hash("654321"));
    }
}
