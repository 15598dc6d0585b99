//! Per-record key derivation
//!
//! Every sealed record carries its own random salt; the AES-256 key is the
//! SHA-256 digest of salt followed by password. Re-derivation happens on each
//! decrypt, so the function must stay cheap enough to run once per record
//! when a full gift list is opened.

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of the derived AES-256 key in bytes
pub const KEY_SIZE: usize = 32;

/// Size of the per-record salt in bytes
pub const SALT_SIZE: usize = 16;

/// A derived encryption key, zeroized when dropped
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

/// Derive an encryption key from a password and a record salt
pub fn derive_key(password: &str, salt: &[u8]) -> DerivedKey {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    let digest = hasher.finalize();

    let mut key = [0u8; KEY_SIZE];
    key.copy_from_slice(&digest);
    DerivedKey { key }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_inputs_same_key() {
        let key1 = derive_key("secret", b"0123456789abcdef");
        let key2 = derive_key("secret", b"0123456789abcdef");
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_password_different_key() {
        let key1 = derive_key("secret", b"0123456789abcdef");
        let key2 = derive_key("other", b"0123456789abcdef");
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let key1 = derive_key("secret", b"0123456789abcdef");
        let key2 = derive_key("secret", b"fedcba9876543210");
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }
}
