use anyhow::Result;
use clap::{Parser, Subcommand};

use giftbook::audit::AuditLogger;
use giftbook::cli::{
    handle_event_command, handle_export_command, handle_gift_command, handle_import_command,
    EventCommands, ExportCommands, GiftCommands, ImportCommands,
};
use giftbook::config::GiftbookPaths;
use giftbook::storage::LedgerStore;

#[derive(Parser)]
#[command(
    name = "giftbook",
    version,
    about = "Local-only cash gift ledger for weddings and funerals",
    long_about = "giftbook keeps a traditional cash-gift ledger on your own machine: \
                  events, encrypted gift records, capitalized-numeral amounts, and \
                  workbook/backup import and export. No data ever leaves the device."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Event management commands
    #[command(subcommand)]
    Event(EventCommands),

    /// Gift record commands
    #[command(subcommand)]
    Gift(GiftCommands),

    /// Import a workbook or backup bundle
    #[command(subcommand)]
    Import(ImportCommands),

    /// Export a workbook or backup bundle
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show the audit trail
    Audit,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = GiftbookPaths::new()?;
    let store = LedgerStore::open(&paths)?;
    let audit = AuditLogger::new(paths.audit_log());

    match cli.command {
        Commands::Event(cmd) => handle_event_command(&store, &audit, cmd)?,
        Commands::Gift(cmd) => handle_gift_command(&store, &audit, cmd)?,
        Commands::Import(cmd) => handle_import_command(&store, &audit, cmd)?,
        Commands::Export(cmd) => handle_export_command(&store, &paths, cmd)?,
        Commands::Audit => {
            for entry in audit.read_all()? {
                println!(
                    "{} {:?} {:?} {}{}",
                    entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    entry.operation,
                    entry.entity_type,
                    entry.entity_id,
                    entry
                        .detail
                        .map(|d| format!(" ({})", d))
                        .unwrap_or_default()
                );
            }
        }
        Commands::Config => {
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
        }
    }

    Ok(())
}
