//! Guest-screen snapshot
//!
//! A denormalized view of one event's live gift list, written after every
//! mutation and polled by the guest-facing mirror display. The mirror itself
//! is an external collaborator; this crate only maintains the data.

use serde::{Deserialize, Serialize};

use super::{EventTheme, GiftData};

/// Snapshot payload stored under the `guest_screen_snapshot` key
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestSnapshot {
    /// Display name of the active event
    pub event_name: String,
    /// Theme driving the mirror's styling
    pub theme: EventTheme,
    /// Decrypted, non-abolished gifts in display order
    pub gifts: Vec<GiftData>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GiftType;

    #[test]
    fn test_wire_format() {
        let snapshot = GuestSnapshot {
            event_name: "张家婚宴".into(),
            theme: EventTheme::Festive,
            gifts: vec![GiftData::new("张三", 888.0, GiftType::Cash)],
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"eventName\""));
        assert!(json.contains("\"theme\":\"festive\""));
    }
}
