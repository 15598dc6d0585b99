//! Workbook model for tabular import/export
//!
//! A workbook is an ordered set of named sheets of string cells. On disk it
//! is a directory of `<sheet>.csv` files, read and written with the csv
//! crate. Sheets are ordered by file name on load; lookups by exact or
//! partial sheet name take precedence over positional access, so order only
//! matters for positional fallbacks.

use std::fs;
use std::path::Path;

use crate::error::{GiftbookError, GiftbookResult};

/// One named sheet of rows
#[derive(Debug, Clone)]
pub struct Sheet {
    /// Sheet name (the file stem on disk)
    pub name: String,
    /// Rows of cells; rows may have differing lengths
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Create an empty sheet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Append a row
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Get one cell, if present
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// The header row, if the sheet has any rows
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }
}

/// An ordered collection of sheets
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create an empty workbook
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet
    pub fn add_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    /// All sheets in order
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Find a sheet by exact name
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Find the first sheet whose name contains a fragment
    pub fn sheet_with_name_containing(&self, fragment: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name.contains(fragment))
    }

    /// Load a workbook from a directory of CSV files
    pub fn load_dir(dir: impl AsRef<Path>) -> GiftbookResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(GiftbookError::Import(format!(
                "Not a workbook directory: {}",
                dir.display()
            )));
        }

        let mut paths: Vec<_> = fs::read_dir(dir)
            .map_err(|e| GiftbookError::Import(format!("Failed to read {}: {}", dir.display(), e)))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "csv"))
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(GiftbookError::Import(format!(
                "No sheets found in {}",
                dir.display()
            )));
        }

        let mut workbook = Self::new();
        for path in paths {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();

            let mut reader = csv::ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_path(&path)
                .map_err(|e| {
                    GiftbookError::Import(format!("Failed to open {}: {}", path.display(), e))
                })?;

            let mut sheet = Sheet::new(name);
            for record in reader.records() {
                let record = record.map_err(|e| {
                    GiftbookError::Import(format!("Bad row in {}: {}", path.display(), e))
                })?;
                sheet
                    .rows
                    .push(record.iter().map(|c| c.to_string()).collect());
            }
            workbook.add_sheet(sheet);
        }

        Ok(workbook)
    }

    /// Write the workbook as a directory of CSV files
    pub fn save_dir(&self, dir: impl AsRef<Path>) -> GiftbookResult<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .map_err(|e| GiftbookError::Export(format!("Failed to create {}: {}", dir.display(), e)))?;

        for sheet in &self.sheets {
            let path = dir.join(format!("{}.csv", sheet.name));
            let mut writer = csv::WriterBuilder::new()
                .flexible(true)
                .from_path(&path)
                .map_err(|e| {
                    GiftbookError::Export(format!("Failed to create {}: {}", path.display(), e))
                })?;

            for row in &sheet.rows {
                writer.write_record(row).map_err(|e| {
                    GiftbookError::Export(format!("Failed to write {}: {}", path.display(), e))
                })?;
            }
            writer.flush().map_err(|e| {
                GiftbookError::Export(format!("Failed to flush {}: {}", path.display(), e))
            })?;
        }

        Ok(())
    }
}
