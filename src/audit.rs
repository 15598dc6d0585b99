//! Append-only audit log
//!
//! Every ledger mutation leaves one line-delimited JSON entry. Abolished
//! gift records stay in storage precisely so this trail stays complete; the
//! log records who-did-what at the operation level.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GiftbookError, GiftbookResult};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Entity was created
    Create,
    /// Entity was updated
    Update,
    /// Gift record was logically deleted
    Abolish,
    /// Gift record was physically removed
    Purge,
    /// Entities were merged in from an external source
    Import,
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Event,
    Gift,
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation happened
    pub timestamp: DateTime<Utc>,
    /// What happened
    pub operation: Operation,
    /// What kind of entity it happened to
    pub entity_type: EntityType,
    /// Which entity it happened to
    pub entity_id: String,
    /// Free-form context (e.g. an import summary)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AuditEntry {
    /// Create an entry timestamped now
    pub fn new(operation: Operation, entity_type: EntityType, entity_id: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id: entity_id.into(),
            detail: None,
        }
    }

    /// Attach free-form context
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Handles writing audit entries to the audit log file
///
/// The log file uses a line-delimited JSON format (JSONL) where each line
/// is a complete JSON object representing one audit entry.
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a new AuditLogger that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry, flushed immediately for durability
    pub fn log(&self, entry: &AuditEntry) -> GiftbookResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| GiftbookError::Io(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| GiftbookError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| GiftbookError::Io(format!("Failed to write audit entry: {}", e)))?;

        file.flush()
            .map_err(|e| GiftbookError::Io(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Read all entries in chronological order (oldest first)
    pub fn read_all(&self) -> GiftbookResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| GiftbookError::Io(format!("Failed to open audit log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                GiftbookError::Io(format!(
                    "Failed to read audit log line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry = serde_json::from_str(&line).map_err(|e| {
                GiftbookError::Json(format!("Bad audit log line {}: {}", line_num + 1, e))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    #[test]
    fn test_log_and_read_back() {
        let (logger, _temp) = test_logger();

        logger
            .log(&AuditEntry::new(Operation::Create, EntityType::Event, "ev1"))
            .unwrap();
        logger
            .log(
                &AuditEntry::new(Operation::Abolish, EntityType::Gift, "g1")
                    .with_detail("entered by mistake"),
            )
            .unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[1].entity_id, "g1");
        assert_eq!(entries[1].detail.as_deref(), Some("entered by mistake"));
    }

    #[test]
    fn test_read_missing_log() {
        let (logger, _temp) = test_logger();
        assert!(logger.read_all().unwrap().is_empty());
    }
}
