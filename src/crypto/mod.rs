//! Record encryption for giftbook
//!
//! Gift payloads are sealed per record with AES-256-GCM under a key derived
//! from the event password. Event passwords themselves are stored only as a
//! one-way SHA-256 digest.

pub mod cipher;
pub mod key;

pub use cipher::{decrypt, encrypt, hash, open, EncryptedData};
pub use key::{derive_key, DerivedKey};
