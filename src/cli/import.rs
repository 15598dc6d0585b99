//! Import CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::audit::{AuditEntry, AuditLogger, EntityType, Operation};
use crate::error::{GiftbookError, GiftbookResult};
use crate::services::{ConflictStrategy, ImportOptions, ImportService};
use crate::storage::LedgerStore;
use crate::workbook::Workbook;

use super::resolve_event;

/// Import subcommands
#[derive(Subcommand)]
pub enum ImportCommands {
    /// Import a workbook directory of CSV sheets
    Workbook {
        /// Workbook directory
        dir: PathBuf,
        /// Existing event (id or name) to merge into
        #[arg(long)]
        event: Option<String>,
        /// Create a new event from the workbook's event-info sheet
        #[arg(long)]
        new_event: bool,
        /// Duplicate handling: skip, overwrite, both
        #[arg(short, long, default_value = "skip")]
        strategy: String,
    },
    /// Import a JSON backup bundle
    Backup {
        /// Backup file
        file: PathBuf,
    },
}

/// Handle an import command
pub fn handle_import_command(
    store: &LedgerStore,
    audit: &AuditLogger,
    cmd: ImportCommands,
) -> GiftbookResult<()> {
    let service = ImportService::new(store);

    match cmd {
        ImportCommands::Workbook {
            dir,
            event,
            new_event,
            strategy,
        } => {
            let conflict_strategy: ConflictStrategy =
                strategy.parse().map_err(GiftbookError::Validation)?;

            let target_event_id = match event {
                Some(ident) => Some(resolve_event(store, &ident)?.id),
                None => None,
            };

            let workbook = Workbook::load_dir(&dir)?;
            let options = ImportOptions {
                conflict_strategy,
                target_event_id,
                create_new_event: new_event,
            };
            let result = service.import_workbook(&workbook, &options)?;

            for warning in &result.warnings {
                eprintln!("warning: {}", warning);
            }
            if !result.success {
                return Err(GiftbookError::Import(result.message));
            }

            audit.log(
                &AuditEntry::new(Operation::Import, EntityType::Gift, dir.display().to_string())
                    .with_detail(result.message.clone()),
            )?;

            println!("{}", result.message);
            if result.events > 0 {
                println!("Created {} event(s)", result.events);
            }
        }

        ImportCommands::Backup { file } => {
            let json = std::fs::read_to_string(&file).map_err(|e| {
                GiftbookError::Import(format!("Failed to read {}: {}", file.display(), e))
            })?;

            let result = service.import_backup(&json)?;
            audit.log(
                &AuditEntry::new(
                    Operation::Import,
                    EntityType::Event,
                    file.display().to_string(),
                )
                .with_detail(format!(
                    "{} event(s), {} gift(s), {} conflict(s)",
                    result.events, result.gifts, result.conflicts
                )),
            )?;

            println!(
                "Merged {} event(s) and {} gift record(s); {} conflict(s) kept local",
                result.events, result.gifts, result.conflicts
            );
        }
    }

    Ok(())
}
