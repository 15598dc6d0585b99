//! Storage layer for giftbook
//!
//! A string-keyed blob store holds the whole ledger:
//!
//! - `events` → JSON array of [`Event`]
//! - `gifts:<eventId>` → JSON array of [`GiftRecord`]
//! - `guest_screen_snapshot` → the mirror-display [`GuestSnapshot`]
//!
//! All operations are whole-list read-modify-write at list granularity;
//! there is no row-level update and no locking. A single active writer is
//! assumed, and two logically concurrent writers to the same list are a
//! last-writer-wins race.

pub mod file_store;
pub mod memory;

pub use file_store::FileStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::GiftbookPaths;
use crate::error::{GiftbookError, GiftbookResult};
use crate::models::{Event, GiftData, GiftRecord, GuestSnapshot};

/// Key holding the event list
pub const EVENTS_KEY: &str = "events";

/// Key holding the guest-screen snapshot
pub const GUEST_SNAPSHOT_KEY: &str = "guest_screen_snapshot";

/// Key holding one event's gift record list
pub fn gifts_key(event_id: &str) -> String {
    format!("gifts:{}", event_id)
}

/// Pluggable persistence backend: string keys to JSON blob strings
pub trait BlobStore: Send + Sync {
    /// Read the blob stored under a key, if any
    fn get(&self, key: &str) -> GiftbookResult<Option<String>>;
    /// Replace the blob stored under a key
    fn put(&self, key: &str, value: &str) -> GiftbookResult<()>;
    /// Drop a key entirely
    fn remove(&self, key: &str) -> GiftbookResult<()>;
}

/// The ledger: events and per-event gift lists over an injected backend
pub struct LedgerStore {
    store: Box<dyn BlobStore>,
}

impl LedgerStore {
    /// Create a ledger over an arbitrary backend
    pub fn new(store: Box<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Open the file-backed ledger under the configured data directory
    pub fn open(paths: &GiftbookPaths) -> GiftbookResult<Self> {
        paths.ensure_directories()?;
        Ok(Self::new(Box::new(FileStore::new(paths.data_dir()))))
    }

    /// Create a ledger over an in-memory backend (tests, dry runs)
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    fn read_list<T: DeserializeOwned>(&self, key: &str) -> GiftbookResult<Vec<T>> {
        match self.store.get(key)? {
            Some(blob) => Ok(serde_json::from_str(&blob)?),
            None => Ok(Vec::new()),
        }
    }

    fn write_list<T: Serialize>(&self, key: &str, list: &[T]) -> GiftbookResult<()> {
        let blob = serde_json::to_string(list)?;
        self.store.put(key, &blob)
    }

    // ---- events ----

    /// All events, in stored order
    pub fn list_events(&self) -> GiftbookResult<Vec<Event>> {
        self.read_list(EVENTS_KEY)
    }

    /// Replace the whole event list (last-writer-wins)
    pub fn save_events(&self, events: &[Event]) -> GiftbookResult<()> {
        self.write_list(EVENTS_KEY, events)
    }

    /// Look up one event by id
    pub fn find_event(&self, id: &str) -> GiftbookResult<Option<Event>> {
        Ok(self.list_events()?.into_iter().find(|e| e.id == id))
    }

    /// Append a new event
    pub fn add_event(&self, event: Event) -> GiftbookResult<()> {
        event
            .validate()
            .map_err(|e| GiftbookError::Validation(e.to_string()))?;

        let mut events = self.list_events()?;
        if events.iter().any(|e| e.id == event.id) {
            return Err(GiftbookError::Validation(format!(
                "Event id already exists: {}",
                event.id
            )));
        }
        events.push(event);
        self.save_events(&events)
    }

    /// Replace an existing event in place (explicit edit)
    pub fn update_event(&self, event: Event) -> GiftbookResult<()> {
        event
            .validate()
            .map_err(|e| GiftbookError::Validation(e.to_string()))?;

        let mut events = self.list_events()?;
        match events.iter_mut().find(|e| e.id == event.id) {
            Some(slot) => {
                *slot = event;
                self.save_events(&events)
            }
            None => Err(GiftbookError::event_not_found(event.id)),
        }
    }

    // ---- gifts ----

    /// All gift records of one event, in stored order
    pub fn list_gifts(&self, event_id: &str) -> GiftbookResult<Vec<GiftRecord>> {
        self.read_list(&gifts_key(event_id))
    }

    /// Replace one event's whole gift list (last-writer-wins)
    pub fn save_gifts(&self, event_id: &str, records: &[GiftRecord]) -> GiftbookResult<()> {
        self.write_list(&gifts_key(event_id), records)
    }

    /// Decode a record's payload with the event password.
    ///
    /// Plain-JSON payloads (import path) decode without the password; sealed
    /// payloads fall back to decryption. `None` means inaccessible, not
    /// empty.
    pub fn decrypt_gift(&self, record: &GiftRecord, password: &str) -> Option<GiftData> {
        record.decode(Some(password))
    }

    /// Append one record to its event's list.
    ///
    /// The owning event must exist; a dangling `event_id` is rejected.
    pub fn append_gift(&self, record: GiftRecord) -> GiftbookResult<()> {
        if self.find_event(&record.event_id)?.is_none() {
            return Err(GiftbookError::event_not_found(record.event_id.clone()));
        }

        let event_id = record.event_id.clone();
        let mut records = self.list_gifts(&event_id)?;
        records.push(record);
        self.save_gifts(&event_id, &records)
    }

    /// Re-encode one record's payload in place (edit).
    ///
    /// The record keeps its id and encoding: sealed payloads need the
    /// password and are re-sealed, plain payloads stay plain.
    pub fn update_gift(
        &self,
        event_id: &str,
        gift_id: &str,
        data: &GiftData,
        password: Option<&str>,
    ) -> GiftbookResult<()> {
        self.mutate_gift(event_id, gift_id, password, |_| data.clone())
    }

    /// Mark one record abolished (logical delete).
    ///
    /// The record is retained for audit; only the flag changes.
    pub fn abolish_gift(
        &self,
        event_id: &str,
        gift_id: &str,
        password: Option<&str>,
    ) -> GiftbookResult<()> {
        self.mutate_gift(event_id, gift_id, password, |mut data| {
            data.abolished = true;
            data
        })
    }

    fn mutate_gift(
        &self,
        event_id: &str,
        gift_id: &str,
        password: Option<&str>,
        mutate: impl FnOnce(GiftData) -> GiftData,
    ) -> GiftbookResult<()> {
        let mut records = self.list_gifts(event_id)?;
        let record = records
            .iter_mut()
            .find(|r| r.id == gift_id)
            .ok_or_else(|| GiftbookError::gift_not_found(gift_id))?;

        // A payload that decodes without a password is plain and stays plain;
        // anything else is sealed and must be re-sealed.
        let was_plain = record.decode(None).is_some();
        let data = record.decode(password).ok_or_else(|| {
            GiftbookError::Encryption("Cannot decode record: wrong or missing password".into())
        })?;

        let updated = mutate(data);
        record.encrypted_data = if was_plain {
            serde_json::to_string(&updated)?
        } else {
            let password = password.ok_or_else(|| {
                GiftbookError::Encryption("Password required to re-seal record".into())
            })?;
            crate::crypto::encrypt(&updated, password)?
        };

        self.save_gifts(event_id, &records)
    }

    /// Physically remove one record (administrative purge)
    pub fn purge_gift(&self, event_id: &str, gift_id: &str) -> GiftbookResult<()> {
        let mut records = self.list_gifts(event_id)?;
        let before = records.len();
        records.retain(|r| r.id != gift_id);
        if records.len() == before {
            return Err(GiftbookError::gift_not_found(gift_id));
        }
        self.save_gifts(event_id, &records)
    }

    // ---- guest screen ----

    /// Publish the guest-screen snapshot
    pub fn write_guest_snapshot(&self, snapshot: &GuestSnapshot) -> GiftbookResult<()> {
        let blob = serde_json::to_string(snapshot)?;
        self.store.put(GUEST_SNAPSHOT_KEY, &blob)
    }

    /// Read the guest-screen snapshot, if one has been published
    pub fn read_guest_snapshot(&self) -> GiftbookResult<Option<GuestSnapshot>> {
        match self.store.get(GUEST_SNAPSHOT_KEY)? {
            Some(blob) => Ok(Some(serde_json::from_str(&blob)?)),
            None => Ok(None),
        }
    }
}
