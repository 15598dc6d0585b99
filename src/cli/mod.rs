//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the library.

pub mod event;
pub mod export;
pub mod gift;
pub mod import;

pub use event::{handle_event_command, EventCommands};
pub use export::{handle_export_command, ExportCommands};
pub use gift::{handle_gift_command, GiftCommands};
pub use import::{handle_import_command, ImportCommands};

use crate::error::{GiftbookError, GiftbookResult};
use crate::models::{Event, GuestSnapshot};
use crate::storage::LedgerStore;

/// Resolve an event by id or exact name
pub fn resolve_event(store: &LedgerStore, ident: &str) -> GiftbookResult<Event> {
    let events = store.list_events()?;
    events
        .iter()
        .find(|e| e.id == ident)
        .or_else(|| events.iter().find(|e| e.name == ident))
        .cloned()
        .ok_or_else(|| GiftbookError::event_not_found(ident))
}

/// Prompt for a protected event's password and verify it.
///
/// Returns `None` for passwordless events without prompting.
pub fn prompt_event_password(event: &Event) -> GiftbookResult<Option<String>> {
    if !event.is_protected() {
        return Ok(None);
    }

    let password = rpassword::prompt_password("Event password: ")
        .map_err(|e| GiftbookError::Io(format!("Failed to read password: {}", e)))?;
    if !event.verify_password(&password) {
        return Err(GiftbookError::Validation("Wrong event password".into()));
    }
    Ok(Some(password))
}

/// Rebuild and publish the guest-screen snapshot after a mutation
pub fn publish_guest_snapshot(
    store: &LedgerStore,
    event: &Event,
    password: Option<&str>,
) -> GiftbookResult<()> {
    let gifts = store
        .list_gifts(&event.id)?
        .iter()
        .filter_map(|record| record.decode(password))
        .filter(|data| !data.abolished)
        .collect();

    store.write_guest_snapshot(&GuestSnapshot {
        event_name: event.name.clone(),
        theme: event.theme,
        gifts,
    })
}
