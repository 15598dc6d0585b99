//! Gift CLI commands

use clap::Subcommand;

use crate::audit::{AuditEntry, AuditLogger, EntityType, Operation};
use crate::display::format_gift_register;
use crate::error::{GiftbookError, GiftbookResult};
use crate::models::{GiftData, GiftRecord, GiftType};
use crate::numeral::amount_to_chinese;
use crate::storage::LedgerStore;

use super::{prompt_event_password, publish_guest_snapshot, resolve_event};

/// Gift subcommands
#[derive(Subcommand)]
pub enum GiftCommands {
    /// Record a new gift
    Add {
        /// Event id or name
        event: String,
        /// Giver's name
        name: String,
        /// Amount in yuan
        amount: f64,
        /// Payment type (现金, 微信, 支付宝, 其他)
        #[arg(short = 't', long, default_value = "现金")]
        gift_type: String,
        /// Free-form note
        #[arg(short, long)]
        remark: Option<String>,
    },
    /// List an event's gifts
    List {
        /// Event id or name
        event: String,
        /// Include abolished records
        #[arg(short, long)]
        all: bool,
    },
    /// Mark a gift abolished (kept for audit, excluded from totals)
    Abolish {
        /// Event id or name
        event: String,
        /// Gift record id
        gift_id: String,
    },
    /// Physically remove a gift record
    Purge {
        /// Event id or name
        event: String,
        /// Gift record id
        gift_id: String,
    },
}

/// Handle a gift command
pub fn handle_gift_command(
    store: &LedgerStore,
    audit: &AuditLogger,
    cmd: GiftCommands,
) -> GiftbookResult<()> {
    match cmd {
        GiftCommands::Add {
            event,
            name,
            amount,
            gift_type,
            remark,
        } => {
            if !amount.is_finite() || amount <= 0.0 {
                return Err(GiftbookError::Validation(format!(
                    "Amount must be positive, got {}",
                    amount
                )));
            }
            let gift_type = GiftType::parse(&gift_type).ok_or_else(|| {
                GiftbookError::Validation(format!(
                    "Invalid payment type: '{}'. Valid types: 现金, 微信, 支付宝, 其他",
                    gift_type
                ))
            })?;

            let event = resolve_event(store, &event)?;
            let password = prompt_event_password(&event)?;

            let mut data = GiftData::new(name, amount, gift_type);
            if let Some(remark) = remark {
                data = data.with_remark(remark);
            }

            let record = match password.as_deref() {
                Some(password) => GiftRecord::seal(&event.id, &data, password)?,
                None => GiftRecord::plain(&event.id, &data)?,
            };
            let gift_id = record.id.clone();
            store.append_gift(record)?;
            audit.log(&AuditEntry::new(Operation::Create, EntityType::Gift, &gift_id))?;
            publish_guest_snapshot(store, &event, password.as_deref())?;

            println!(
                "Recorded {} from {} ({})",
                data.amount,
                data.name,
                amount_to_chinese(data.amount)
            );
        }

        GiftCommands::List { event, all } => {
            let event = resolve_event(store, &event)?;
            let password = prompt_event_password(&event)?;

            let records = store.list_gifts(&event.id)?;
            let decoded: Vec<Option<GiftData>> = records
                .iter()
                .map(|r| r.decode(password.as_deref()))
                .filter(|d| all || !d.as_ref().is_some_and(|d| d.abolished))
                .collect();

            print!("{}", format_gift_register(&decoded));
        }

        GiftCommands::Abolish { event, gift_id } => {
            let event = resolve_event(store, &event)?;
            let password = prompt_event_password(&event)?;

            store.abolish_gift(&event.id, &gift_id, password.as_deref())?;
            audit.log(&AuditEntry::new(Operation::Abolish, EntityType::Gift, &gift_id))?;
            publish_guest_snapshot(store, &event, password.as_deref())?;

            println!("Abolished gift record {}", gift_id);
        }

        GiftCommands::Purge { event, gift_id } => {
            let event = resolve_event(store, &event)?;

            store.purge_gift(&event.id, &gift_id)?;
            audit.log(&AuditEntry::new(Operation::Purge, EntityType::Gift, &gift_id))?;

            println!("Purged gift record {}", gift_id);
        }
    }

    Ok(())
}
