//! Event CLI commands

use clap::Subcommand;

use crate::audit::{AuditEntry, AuditLogger, EntityType, Operation};
use crate::display::format_event_list;
use crate::error::{GiftbookError, GiftbookResult};
use crate::models::{Event, EventTheme};
use crate::services::import::parse_datetime;
use crate::storage::LedgerStore;

use super::resolve_event;

/// Event subcommands
#[derive(Subcommand)]
pub enum EventCommands {
    /// Create a new event
    Create {
        /// Event name
        name: String,
        /// Start of gift collection (e.g. "2025-03-08 10:00:00")
        #[arg(long)]
        start: Option<String>,
        /// End of gift collection
        #[arg(long)]
        end: Option<String>,
        /// Theme (festive, solemn)
        #[arg(short = 't', long, default_value = "festive")]
        theme: String,
        /// Name of the person keeping the books
        #[arg(long)]
        recorder: Option<String>,
        /// Protect the event with a password (prompted, never echoed)
        #[arg(long)]
        password: bool,
    },
    /// List all events
    List,
    /// Show one event
    Show {
        /// Event id or name
        event: String,
    },
}

/// Handle an event command
pub fn handle_event_command(
    store: &LedgerStore,
    audit: &AuditLogger,
    cmd: EventCommands,
) -> GiftbookResult<()> {
    match cmd {
        EventCommands::Create {
            name,
            start,
            end,
            theme,
            recorder,
            password,
        } => {
            let theme = EventTheme::parse(&theme).ok_or_else(|| {
                GiftbookError::Validation(format!(
                    "Invalid theme: '{}'. Valid themes: festive, solemn",
                    theme
                ))
            })?;

            let now = chrono::Utc::now();
            let start = start.as_deref().and_then(parse_datetime).unwrap_or(now);
            let end = end.as_deref().and_then(parse_datetime).unwrap_or(start);

            let mut event = Event::new(name, start, end).with_theme(theme);
            event.recorder = recorder;

            if password {
                let entered = rpassword::prompt_password("Event password: ")
                    .map_err(|e| GiftbookError::Io(format!("Failed to read password: {}", e)))?;
                let confirmed = rpassword::prompt_password("Confirm password: ")
                    .map_err(|e| GiftbookError::Io(format!("Failed to read password: {}", e)))?;
                if entered != confirmed {
                    return Err(GiftbookError::Validation("Passwords do not match".into()));
                }
                event = event.with_password(&entered);
            }

            let id = event.id.clone();
            let name = event.name.clone();
            store.add_event(event)?;
            audit.log(&AuditEntry::new(Operation::Create, EntityType::Event, &id))?;

            println!("Created event '{}' ({})", name, id);
        }

        EventCommands::List => {
            let events = store.list_events()?;
            print!("{}", format_event_list(&events));
        }

        EventCommands::Show { event } => {
            let event = resolve_event(store, &event)?;
            let gift_count = store.list_gifts(&event.id)?.len();

            println!("Event:    {}", event.name);
            println!("Id:       {}", event.id);
            println!("Theme:    {}", event.theme);
            println!("Start:    {}", event.start_date_time.format("%Y-%m-%d %H:%M"));
            println!("End:      {}", event.end_date_time.format("%Y-%m-%d %H:%M"));
            if let Some(recorder) = &event.recorder {
                println!("Recorder: {}", recorder);
            }
            println!("Locked:   {}", if event.is_protected() { "yes" } else { "no" });
            println!("Records:  {}", gift_count);
        }
    }

    Ok(())
}
