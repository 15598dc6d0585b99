//! Core data models for giftbook

pub mod event;
pub mod gift;
pub mod snapshot;

pub use event::{Event, EventTheme, EventValidationError};
pub use gift::{GiftData, GiftRecord, GiftType};
pub use snapshot::GuestSnapshot;

use uuid::Uuid;

/// Generate a fresh opaque entity id
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}
