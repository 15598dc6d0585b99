//! Workbook and backup import
//!
//! Parses an external workbook (or a JSON backup bundle) into candidate
//! events and gifts, detects duplicates against the target event by natural
//! key, and merges under a chosen conflict strategy. The merge is computed
//! entirely in memory and persisted in a single gift-list write; a failure
//! before that point leaves the store untouched.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::{GiftbookError, GiftbookResult};
use crate::models::{Event, GiftData, GiftRecord, GiftType};
use crate::storage::LedgerStore;
use crate::workbook::{Sheet, Workbook};

use super::export::BackupBundle;

/// What to do with an incoming gift whose natural key already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictStrategy {
    /// Count the conflict and drop the incoming record
    #[default]
    Skip,
    /// Count the conflict, remove the existing record, append the incoming one
    Overwrite,
    /// Count the conflict and append anyway; both records coexist
    Both,
}

impl FromStr for ConflictStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "overwrite" => Ok(Self::Overwrite),
            "both" => Ok(Self::Both),
            other => Err(format!("Unknown conflict strategy: {}", other)),
        }
    }
}

/// Options controlling a workbook import
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Duplicate handling policy
    pub conflict_strategy: ConflictStrategy,
    /// Existing event to merge into
    pub target_event_id: Option<String>,
    /// Create a fresh event from the workbook's event-info sheet
    pub create_new_event: bool,
}

/// Outcome of a workbook import
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Whether anything was merged
    pub success: bool,
    /// Human-readable outcome description
    pub message: String,
    /// Events created
    pub events: usize,
    /// Gift records actually written
    pub gifts: usize,
    /// Duplicate detections, regardless of strategy
    pub conflicts: usize,
    /// Records dropped under the skip strategy
    pub skipped: usize,
    /// Non-fatal observations
    pub warnings: Vec<String>,
}

/// Parsed view of a workbook before any merge
#[derive(Debug, Clone, Default)]
pub struct WorkbookPreview {
    /// Event synthesized from the event-info sheet, if one was found
    pub events: Vec<Event>,
    /// Valid gift rows from the detail sheet
    pub gifts: Vec<GiftData>,
    /// Whether an event-info sheet was located at all
    pub has_event_info: bool,
}

/// Outcome of a backup-bundle import
#[derive(Debug, Clone, Default)]
pub struct BackupImportResult {
    /// Events added
    pub events: usize,
    /// Gift records added
    pub gifts: usize,
    /// Id collisions left untouched
    pub conflicts: usize,
}

/// Import engine borrowing the ledger it merges into
pub struct ImportService<'a> {
    store: &'a LedgerStore,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(store: &'a LedgerStore) -> Self {
        Self { store }
    }

    /// Parse a workbook without touching the store
    pub fn preview_workbook(&self, workbook: &Workbook) -> WorkbookPreview {
        let mut preview = WorkbookPreview::default();

        if let Some(sheet) = find_event_sheet(workbook) {
            preview.has_event_info = true;
            if let Some(event) = parse_event_sheet(sheet) {
                preview.events.push(event);
            }
        }

        if let Some(sheet) = find_detail_sheet(workbook) {
            preview.gifts = parse_detail_sheet(sheet);
        }

        preview
    }

    /// Merge a workbook into the ledger under the given options
    pub fn import_workbook(
        &self,
        workbook: &Workbook,
        options: &ImportOptions,
    ) -> GiftbookResult<ImportResult> {
        let mut result = ImportResult::default();
        let preview = self.preview_workbook(workbook);

        if preview.gifts.is_empty() {
            result.message = "No valid gift rows found in the workbook".into();
            return Ok(result);
        }

        // Resolve the merge target, synthesizing a fresh passwordless event
        // from the workbook's event info when asked to (or when no target
        // was supplied).
        let mut target_event_id = options.target_event_id.clone();
        if !preview.events.is_empty() && (options.create_new_event || target_event_id.is_none()) {
            let event = preview.events[0].clone();
            let id = event.id.clone();
            self.store.add_event(event)?;
            target_event_id = Some(id);
            result.events = 1;
        }

        let Some(target_event_id) = target_event_id else {
            result.message =
                "No target event: select an existing event or create a new one".into();
            return Ok(result);
        };

        if result.events == 0 && self.store.find_event(&target_event_id)?.is_none() {
            result.message = format!("Target event does not exist: {}", target_event_id);
            return Ok(result);
        }

        // Natural keys of existing live records. Sealed payloads cannot be
        // keyed without a password; their count is surfaced as a warning so
        // the caller knows detection was partial.
        let existing = self.store.list_gifts(&target_event_id)?;
        let mut unreadable = 0usize;
        let mut existing_keys: HashSet<String> = HashSet::new();
        for record in &existing {
            match record.decode(None) {
                Some(data) if !data.abolished => {
                    existing_keys.insert(data.natural_key());
                }
                Some(_) => {}
                None => unreadable += 1,
            }
        }
        if unreadable > 0 {
            result.warnings.push(format!(
                "{} existing record(s) could not be read for duplicate detection",
                unreadable
            ));
        }

        let mut working: Vec<GiftRecord> = existing;
        let mut incoming: Vec<GiftRecord> = Vec::new();

        for gift in &preview.gifts {
            let key = gift.natural_key();
            if existing_keys.contains(&key) {
                result.conflicts += 1;
                match options.conflict_strategy {
                    ConflictStrategy::Skip => {
                        result.skipped += 1;
                        continue;
                    }
                    ConflictStrategy::Overwrite => {
                        // Replace-by-natural-key assumes no two distinct live
                        // records share one key; only the first match is
                        // removed, so a second would survive.
                        if let Some(pos) = working.iter().position(|r| {
                            r.decode(None).is_some_and(|d| d.natural_key() == key)
                        }) {
                            working.remove(pos);
                        }
                    }
                    ConflictStrategy::Both => {}
                }
            }

            incoming.push(GiftRecord::plain(&target_event_id, gift)?);
            result.gifts += 1;
        }

        working.extend(incoming);
        self.store.save_gifts(&target_event_id, &working)?;

        result.success = true;
        result.message = if result.conflicts > 0 {
            format!(
                "Imported {} gift record(s), {} duplicate(s) detected, {} skipped",
                result.gifts, result.conflicts, result.skipped
            )
        } else {
            format!("Imported {} gift record(s)", result.gifts)
        };
        Ok(result)
    }

    /// Merge a JSON backup bundle into the ledger.
    ///
    /// Events merge by event id, gift records by record id; collisions keep
    /// the local copy and count as conflicts. A malformed bundle aborts with
    /// an error before anything is written.
    pub fn import_backup(&self, json: &str) -> GiftbookResult<BackupImportResult> {
        let bundle: BackupBundle = serde_json::from_str(json)
            .map_err(|e| GiftbookError::Import(format!("Invalid backup file: {}", e)))?;

        if bundle.version.is_empty() {
            return Err(GiftbookError::Import(
                "Invalid backup file: missing version".into(),
            ));
        }

        let mut result = BackupImportResult::default();

        let mut events = self.store.list_events()?;
        let existing_ids: HashSet<String> = events.iter().map(|e| e.id.clone()).collect();
        for event in bundle.events {
            if existing_ids.contains(&event.id) {
                result.conflicts += 1;
            } else {
                events.push(event);
                result.events += 1;
            }
        }
        self.store.save_events(&events)?;

        for (event_id, incoming) in bundle.gifts {
            let mut records = self.store.list_gifts(&event_id)?;
            let existing_ids: HashSet<String> = records.iter().map(|r| r.id.clone()).collect();
            let mut changed = false;
            for record in incoming {
                if existing_ids.contains(&record.id) {
                    result.conflicts += 1;
                } else {
                    records.push(record);
                    result.gifts += 1;
                    changed = true;
                }
            }
            if changed {
                self.store.save_gifts(&event_id, &records)?;
            }
        }

        Ok(result)
    }
}

/// Locate the event-info sheet: the literal name, then any sheet whose name
/// contains `信息`, then a second sheet that looks like key/value pairs.
fn find_event_sheet(workbook: &Workbook) -> Option<&Sheet> {
    workbook
        .sheet("事件信息")
        .or_else(|| workbook.sheet_with_name_containing("信息"))
        .or_else(|| {
            let sheets = workbook.sheets();
            sheets
                .get(1)
                .filter(|s| s.rows.first().is_some_and(|row| row.len() == 2))
        })
}

/// Locate the detail sheet: the literal name, else the first sheet
fn find_detail_sheet(workbook: &Workbook) -> Option<&Sheet> {
    workbook.sheet("礼金明细").or_else(|| workbook.sheets().first())
}

/// Parse key/value event-info rows into a fresh passwordless event
fn parse_event_sheet(sheet: &Sheet) -> Option<Event> {
    let mut name = None;
    let mut start = None;
    let mut end = None;
    let mut recorder = None;

    for row in &sheet.rows {
        let (Some(key), Some(value)) = (row.first(), row.get(1)) else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }

        let key_lower = key.to_lowercase();
        if key.contains("事件名称") || key_lower == "name" || key_lower == "event name" {
            name = Some(value.to_string());
        }
        if key.contains("开始时间") || key_lower == "start time" || key_lower == "start" {
            start = parse_datetime(value);
        }
        if key.contains("结束时间") || key_lower == "end time" || key_lower == "end" {
            end = parse_datetime(value);
        }
        if key.contains("记账人") || key_lower == "recorder" {
            recorder = Some(value.to_string());
        }
    }

    let name = name?;
    let now = Utc::now();
    let mut event = Event::new(name, start.unwrap_or(now), end.unwrap_or(now));
    event.recorder = recorder;
    Some(event)
}

/// Parse detail rows by fuzzy header match.
///
/// Rows with an empty name or a non-positive amount are silently skipped.
fn parse_detail_sheet(sheet: &Sheet) -> Vec<GiftData> {
    let Some(headers) = sheet.header() else {
        return Vec::new();
    };

    let find_col = |pred: &dyn Fn(&str, &str) -> bool| {
        headers
            .iter()
            .position(|h| pred(h.trim(), &h.trim().to_lowercase()))
    };

    let name_col = find_col(&|h, l| h.contains("姓名") || l.contains("name"));
    let amount_col = find_col(&|h, l| {
        (h.contains("金额") || l.contains("amount"))
            && !h.contains("大写")
            && !l.contains("words")
    });
    let type_col = find_col(&|h, l| {
        h.contains("支付") || h.contains("方式") || l.contains("payment") || l.contains("method")
    });
    let remark_col = find_col(&|h, l| h.contains("备注") || l.contains("remark") || l.contains("note"));
    let time_col = find_col(&|h, l| h.contains("时间") || l.contains("time"));

    let mut gifts = Vec::new();
    for row in sheet.rows.iter().skip(1) {
        let cell = |col: Option<usize>| {
            col.and_then(|c| row.get(c)).map(|s| s.trim()).unwrap_or("")
        };

        let name = cell(name_col);
        if name.is_empty() {
            continue;
        }

        let amount: f64 = cell(amount_col).parse().unwrap_or(0.0);
        if amount <= 0.0 {
            continue;
        }

        let type_cell = cell(type_col);
        let gift_type = if type_cell.is_empty() {
            GiftType::Cash
        } else {
            GiftType::parse(type_cell).unwrap_or(GiftType::Other)
        };

        let remark = cell(remark_col);
        let timestamp = parse_datetime(cell(time_col)).unwrap_or_else(Utc::now);

        let mut gift = GiftData::new(name, amount, gift_type);
        gift.timestamp = timestamp;
        if !remark.is_empty() {
            gift.remark = Some(remark.to_string());
        }
        gifts.push(gift);
    }

    gifts
}

/// Parse a datetime cell across the formats seen in the wild
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y/%m/%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::export::build_backup;
    use crate::workbook::Sheet;
    use chrono::Utc;

    fn detail_workbook(rows: &[(&str, &str, &str, &str, &str)]) -> Workbook {
        let mut sheet = Sheet::new("礼金明细");
        sheet.push_row(["姓名", "金额", "支付方式", "备注", "时间"]);
        for (name, amount, gift_type, remark, time) in rows {
            sheet.push_row([*name, *amount, *gift_type, *remark, *time]);
        }
        let mut workbook = Workbook::new();
        workbook.add_sheet(sheet);
        workbook
    }

    fn store_with_event(name: &str) -> (LedgerStore, String) {
        let store = LedgerStore::in_memory();
        let event = Event::new(name, Utc::now(), Utc::now());
        let id = event.id.clone();
        store.add_event(event).unwrap();
        (store, id)
    }

    #[test]
    fn test_end_to_end_import_into_empty_event() {
        let (store, event_id) = store_with_event("张家婚宴");
        let service = ImportService::new(&store);

        let workbook = detail_workbook(&[
            ("张三", "888", "现金", "", "2025-01-15 10:00:00"),
            ("李四", "1688", "微信", "congrats", "2025-01-15 10:05:00"),
        ]);

        let options = ImportOptions {
            conflict_strategy: ConflictStrategy::Skip,
            target_event_id: Some(event_id.clone()),
            create_new_event: false,
        };
        let result = service.import_workbook(&workbook, &options).unwrap();

        assert!(result.success);
        assert_eq!(result.gifts, 2);
        assert_eq!(result.conflicts, 0);
        assert_eq!(result.skipped, 0);

        let records = store.list_gifts(&event_id).unwrap();
        assert_eq!(records.len(), 2);
        let data = records[1].decode(None).unwrap();
        assert_eq!(data.name, "李四");
        assert_eq!(data.amount, 1688.0);
        assert_eq!(data.gift_type, GiftType::Wechat);
        assert_eq!(data.remark.as_deref(), Some("congrats"));
    }

    #[test]
    fn test_skip_is_idempotent() {
        let (store, event_id) = store_with_event("张家婚宴");
        let service = ImportService::new(&store);

        let workbook = detail_workbook(&[
            ("张三", "888", "现金", "", "2025-01-15 10:00:00"),
            ("李四", "1688", "微信", "", "2025-01-15 10:05:00"),
        ]);
        let options = ImportOptions {
            conflict_strategy: ConflictStrategy::Skip,
            target_event_id: Some(event_id.clone()),
            create_new_event: false,
        };

        let first = service.import_workbook(&workbook, &options).unwrap();
        assert_eq!((first.gifts, first.conflicts), (2, 0));

        let second = service.import_workbook(&workbook, &options).unwrap();
        assert!(second.success);
        assert_eq!(second.gifts, 0);
        assert_eq!(second.conflicts, 2);
        assert_eq!(second.skipped, 2);
        assert_eq!(store.list_gifts(&event_id).unwrap().len(), 2);
    }

    #[test]
    fn test_overwrite_replaces_matching_record() {
        let (store, event_id) = store_with_event("张家婚宴");
        let service = ImportService::new(&store);

        let workbook = detail_workbook(&[
            ("张三", "888", "现金", "", "2025-01-15 10:00:00"),
            ("李四", "1688", "微信", "", "2025-01-15 10:05:00"),
        ]);
        let options = ImportOptions {
            conflict_strategy: ConflictStrategy::Overwrite,
            target_event_id: Some(event_id.clone()),
            create_new_event: false,
        };
        service.import_workbook(&workbook, &options).unwrap();

        // Same keys, but 李四's remark changed: the colliding records are
        // replaced, the total count stays constant.
        let changed = detail_workbook(&[
            ("张三", "888", "现金", "", "2025-01-15 10:00:00"),
            ("李四", "1688", "微信", "改口费", "2025-01-15 10:05:00"),
        ]);
        let result = service.import_workbook(&changed, &options).unwrap();

        assert_eq!(result.conflicts, 2);
        assert_eq!(result.gifts, 2);
        let records = store.list_gifts(&event_id).unwrap();
        assert_eq!(records.len(), 2);
        let remarks: Vec<_> = records
            .iter()
            .map(|r| r.decode(None).unwrap().remark)
            .collect();
        assert!(remarks.contains(&Some("改口费".to_string())));
    }

    #[test]
    fn test_both_keeps_duplicates() {
        let (store, event_id) = store_with_event("张家婚宴");
        let service = ImportService::new(&store);

        let workbook = detail_workbook(&[("张三", "888", "现金", "", "2025-01-15 10:00:00")]);
        let options = ImportOptions {
            conflict_strategy: ConflictStrategy::Both,
            target_event_id: Some(event_id.clone()),
            create_new_event: false,
        };

        service.import_workbook(&workbook, &options).unwrap();
        let result = service.import_workbook(&workbook, &options).unwrap();

        assert_eq!(result.conflicts, 1);
        assert_eq!(result.gifts, 1);
        assert_eq!(store.list_gifts(&event_id).unwrap().len(), 2);
    }

    #[test]
    fn test_no_target_event_fails_without_side_effects() {
        let store = LedgerStore::in_memory();
        let service = ImportService::new(&store);

        let workbook = detail_workbook(&[("张三", "888", "现金", "", "")]);
        let result = service
            .import_workbook(&workbook, &ImportOptions::default())
            .unwrap();

        assert!(!result.success);
        assert!(result.message.contains("target event"));
        assert!(store.list_events().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_target_event_fails() {
        let store = LedgerStore::in_memory();
        let service = ImportService::new(&store);

        let workbook = detail_workbook(&[("张三", "888", "现金", "", "")]);
        let options = ImportOptions {
            target_event_id: Some("ghost".into()),
            ..Default::default()
        };
        let result = service.import_workbook(&workbook, &options).unwrap();

        assert!(!result.success);
        assert!(result.message.contains("ghost"));
    }

    #[test]
    fn test_event_info_sheet_creates_event() {
        let store = LedgerStore::in_memory();
        let service = ImportService::new(&store);

        let mut workbook = detail_workbook(&[("张三", "888", "现金", "", "")]);
        let mut info = Sheet::new("事件信息");
        info.push_row(["事件名称", "王家寿宴"]);
        info.push_row(["开始时间", "2025-02-01 11:00:00"]);
        info.push_row(["记账人", "王小明"]);
        workbook.add_sheet(info);

        let options = ImportOptions {
            create_new_event: true,
            ..Default::default()
        };
        let result = service.import_workbook(&workbook, &options).unwrap();

        assert!(result.success);
        assert_eq!(result.events, 1);
        assert_eq!(result.gifts, 1);

        let events = store.list_events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "王家寿宴");
        assert_eq!(events[0].recorder.as_deref(), Some("王小明"));
        // Import-sourced events start passwordless.
        assert!(!events[0].is_protected());
        assert_eq!(store.list_gifts(&events[0].id).unwrap().len(), 1);
    }

    #[test]
    fn test_preview_sheet_heuristics() {
        let store = LedgerStore::in_memory();
        let service = ImportService::new(&store);

        // A sheet whose name merely contains 信息 is accepted.
        let mut workbook = detail_workbook(&[("张三", "888", "", "", "")]);
        let mut info = Sheet::new("导出信息");
        info.push_row(["事件名称", "张家婚宴"]);
        workbook.add_sheet(info);
        let preview = service.preview_workbook(&workbook);
        assert!(preview.has_event_info);
        assert_eq!(preview.events[0].name, "张家婚宴");

        // Failing that, a second sheet of two-column key/value rows is used.
        let mut workbook = detail_workbook(&[("张三", "888", "", "", "")]);
        let mut second = Sheet::new("meta");
        second.push_row(["事件名称", "李家丧仪"]);
        workbook.add_sheet(second);
        let preview = service.preview_workbook(&workbook);
        assert!(preview.has_event_info);
        assert_eq!(preview.events[0].name, "李家丧仪");

        // A lone detail sheet carries no event info.
        let workbook = detail_workbook(&[("张三", "888", "", "", "")]);
        let preview = service.preview_workbook(&workbook);
        assert!(!preview.has_event_info);
        assert!(preview.events.is_empty());
    }

    #[test]
    fn test_preview_skips_invalid_rows() {
        let store = LedgerStore::in_memory();
        let service = ImportService::new(&store);

        let workbook = detail_workbook(&[
            ("张三", "888", "现金", "", ""),
            ("", "100", "现金", "", ""),       // no name
            ("李四", "0", "现金", "", ""),     // non-positive amount
            ("王五", "-5", "现金", "", ""),    // non-positive amount
            ("赵六", "abc", "现金", "", ""),   // unparseable amount
            ("钱七", "66", "刷卡", "", ""),    // unknown type becomes 其他
        ]);
        let preview = service.preview_workbook(&workbook);

        assert_eq!(preview.gifts.len(), 2);
        assert_eq!(preview.gifts[0].name, "张三");
        assert_eq!(preview.gifts[1].name, "钱七");
        assert_eq!(preview.gifts[1].gift_type, GiftType::Other);
    }

    #[test]
    fn test_amount_in_words_column_is_not_the_amount() {
        let store = LedgerStore::in_memory();
        let service = ImportService::new(&store);

        let mut sheet = Sheet::new("礼金明细");
        sheet.push_row(["序号", "姓名", "金额大写", "金额（元）"]);
        sheet.push_row(["1", "张三", "捌佰捌拾捌元整", "888"]);
        let mut workbook = Workbook::new();
        workbook.add_sheet(sheet);

        let preview = service.preview_workbook(&workbook);
        assert_eq!(preview.gifts.len(), 1);
        assert_eq!(preview.gifts[0].amount, 888.0);
    }

    #[test]
    fn test_sealed_existing_records_warn_during_detection() {
        let (store, event_id) = store_with_event("张家婚宴");
        let sealed =
            GiftRecord::seal(&event_id, &GiftData::new("张三", 888.0, GiftType::Cash), "pw")
                .unwrap();
        store.append_gift(sealed).unwrap();

        let service = ImportService::new(&store);
        let workbook = detail_workbook(&[("李四", "100", "现金", "", "")]);
        let options = ImportOptions {
            target_event_id: Some(event_id),
            ..Default::default()
        };
        let result = service.import_workbook(&workbook, &options).unwrap();

        assert!(result.success);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_backup_roundtrip_and_conflicts() {
        let (store, event_id) = store_with_event("张家婚宴");
        store
            .append_gift(
                GiftRecord::plain(&event_id, &GiftData::new("张三", 888.0, GiftType::Cash))
                    .unwrap(),
            )
            .unwrap();

        let bundle = build_backup(&store, None).unwrap();
        let json = serde_json::to_string(&bundle).unwrap();

        // Importing a ledger's own backup changes nothing.
        let service = ImportService::new(&store);
        let result = service.import_backup(&json).unwrap();
        assert_eq!(result.events, 0);
        assert_eq!(result.gifts, 0);
        assert_eq!(result.conflicts, 2);

        // A fresh ledger absorbs everything.
        let fresh = LedgerStore::in_memory();
        let result = ImportService::new(&fresh).import_backup(&json).unwrap();
        assert_eq!(result.events, 1);
        assert_eq!(result.gifts, 1);
        assert_eq!(result.conflicts, 0);
        assert_eq!(fresh.list_gifts(&event_id).unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_backup_aborts_without_side_effects() {
        let store = LedgerStore::in_memory();
        let service = ImportService::new(&store);

        assert!(service.import_backup("not json").is_err());
        assert!(service.import_backup("{\"version\":\"1.0.0\"}").is_err());
        assert!(store.list_events().unwrap().is_empty());
    }

    #[test]
    fn test_conflict_strategy_parsing() {
        assert_eq!(
            "overwrite".parse::<ConflictStrategy>().unwrap(),
            ConflictStrategy::Overwrite
        );
        assert_eq!(
            "Both".parse::<ConflictStrategy>().unwrap(),
            ConflictStrategy::Both
        );
        assert!("merge".parse::<ConflictStrategy>().is_err());
    }
}
