//! Export CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::GiftbookPaths;
use crate::error::{GiftbookError, GiftbookResult};
use crate::services::export::{
    build_backup, export_backup_file, export_event_workbook, safe_file_stem, write_backup_yaml,
};
use crate::storage::LedgerStore;

use super::{prompt_event_password, resolve_event};

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export one event as a workbook directory of CSV sheets
    Workbook {
        /// Event id or name
        event: String,
        /// Output directory (defaults to the backups directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Export a backup bundle for one event or the whole ledger
    Backup {
        /// Event id or name (omit to back up everything)
        #[arg(long)]
        event: Option<String>,
        /// Output directory (defaults to the backups directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Output format: json, yaml
        #[arg(short, long, default_value = "json")]
        format: String,
    },
}

/// Handle an export command
pub fn handle_export_command(
    store: &LedgerStore,
    paths: &GiftbookPaths,
    cmd: ExportCommands,
) -> GiftbookResult<()> {
    match cmd {
        ExportCommands::Workbook { event, out } => {
            let event = resolve_event(store, &event)?;
            let password = prompt_event_password(&event)?;
            let out_dir = out.unwrap_or_else(|| paths.backup_dir());

            let dir = export_event_workbook(store, &event.id, password.as_deref(), &out_dir)?;
            println!("Exported workbook to {}", dir.display());
        }

        ExportCommands::Backup { event, out, format } => {
            let event_id = match event {
                Some(ident) => Some(resolve_event(store, &ident)?.id),
                None => None,
            };
            let out_dir = out.unwrap_or_else(|| paths.backup_dir());

            let path = match format.as_str() {
                "json" => export_backup_file(store, event_id.as_deref(), &out_dir)?,
                "yaml" => {
                    let bundle = build_backup(store, event_id.as_deref())?;
                    let stem = match &event_id {
                        Some(_) => format!("礼簿_{}", safe_file_stem(&bundle.events[0].name)),
                        None => "礼簿备份".to_string(),
                    };
                    let name = format!("{}_{}.yaml", stem, chrono::Utc::now().format("%Y%m%d"));

                    std::fs::create_dir_all(&out_dir).map_err(|e| {
                        GiftbookError::Export(format!(
                            "Failed to create {}: {}",
                            out_dir.display(),
                            e
                        ))
                    })?;
                    let path = out_dir.join(name);
                    let mut file = std::fs::File::create(&path).map_err(|e| {
                        GiftbookError::Export(format!("Failed to create {}: {}", path.display(), e))
                    })?;
                    write_backup_yaml(&bundle, &mut file)?;
                    path
                }
                other => {
                    return Err(GiftbookError::Validation(format!(
                        "Invalid format: '{}'. Valid formats: json, yaml",
                        other
                    )))
                }
            };

            println!("Exported backup to {}", path.display());
        }
    }

    Ok(())
}
