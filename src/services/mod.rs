//! Business logic layer: the import/export engine

pub mod export;
pub mod import;

pub use export::{
    build_backup, build_event_workbook, export_backup_file, export_event_workbook,
    write_backup_json, write_backup_yaml, BackupBundle, BACKUP_VERSION,
};
pub use import::{
    BackupImportResult, ConflictStrategy, ImportOptions, ImportResult, ImportService,
    WorkbookPreview,
};
