//! Workbook and backup export
//!
//! The outbound direction of the import engine: one event's live gifts
//! rendered as a re-importable workbook (detail, summary, and event-info
//! sheets, including the capitalized-numeral column), and the raw backup
//! bundle covering one event or the whole ledger.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GiftbookError, GiftbookResult};
use crate::models::{Event, EventTheme, GiftData, GiftRecord, GiftType};
use crate::numeral::amount_to_chinese;
use crate::storage::LedgerStore;
use crate::workbook::{Sheet, Workbook};

/// Backup bundle schema version
pub const BACKUP_VERSION: &str = "1.0.0";

/// Raw backup of events and their stored (still-enveloped) gift records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupBundle {
    /// Schema version for compatibility checking
    pub version: String,
    /// When the bundle was created
    pub timestamp: DateTime<Utc>,
    /// Events covered by the bundle
    pub events: Vec<Event>,
    /// Gift records grouped by owning event id
    pub gifts: BTreeMap<String, Vec<GiftRecord>>,
}

/// Build the backup bundle for one event or the whole ledger
pub fn build_backup(store: &LedgerStore, event_id: Option<&str>) -> GiftbookResult<BackupBundle> {
    let events = match event_id {
        Some(id) => vec![store
            .find_event(id)?
            .ok_or_else(|| GiftbookError::event_not_found(id))?],
        None => store.list_events()?,
    };

    let mut gifts = BTreeMap::new();
    for event in &events {
        let records = store.list_gifts(&event.id)?;
        if !records.is_empty() {
            gifts.insert(event.id.clone(), records);
        }
    }

    Ok(BackupBundle {
        version: BACKUP_VERSION.into(),
        timestamp: Utc::now(),
        events,
        gifts,
    })
}

/// Write a bundle as pretty-printed JSON
pub fn write_backup_json<W: Write>(bundle: &BackupBundle, writer: &mut W) -> GiftbookResult<()> {
    serde_json::to_writer_pretty(writer, bundle)
        .map_err(|e| GiftbookError::Export(format!("Failed to serialize backup: {}", e)))
}

/// Write a bundle as YAML for human reading
pub fn write_backup_yaml<W: Write>(bundle: &BackupBundle, writer: &mut W) -> GiftbookResult<()> {
    serde_yaml::to_writer(writer, bundle)
        .map_err(|e| GiftbookError::Export(format!("Failed to serialize backup: {}", e)))
}

/// Build the export workbook for one event.
///
/// Abolished records are excluded everywhere; exporting an event with no
/// live records is an error.
pub fn build_event_workbook(event: &Event, gifts: &[GiftData]) -> GiftbookResult<Workbook> {
    let valid: Vec<&GiftData> = gifts.iter().filter(|g| !g.abolished).collect();
    if valid.is_empty() {
        return Err(GiftbookError::Export(
            "No valid gift records to export".into(),
        ));
    }

    let mut workbook = Workbook::new();

    // Detail sheet, one row per gift with the capitalized-numeral column.
    let mut detail = Sheet::new("礼金明细");
    detail.push_row(["序号", "姓名", "金额（元）", "金额大写", "支付方式", "备注", "录入时间"]);
    for (index, gift) in valid.iter().enumerate() {
        detail.push_row([
            (index + 1).to_string(),
            gift.name.clone(),
            format_amount(gift.amount),
            amount_to_chinese(gift.amount),
            gift.gift_type.label().to_string(),
            gift.remark.clone().unwrap_or_default(),
            format_datetime(gift.timestamp),
        ]);
    }
    workbook.add_sheet(detail);

    // Summary sheet: totals, then per-payment-type subtotals.
    let total: f64 = valid.iter().map(|g| g.amount).sum();
    let mut summary = Sheet::new("统计汇总");
    summary.push_row(["统计项目", "数值", "说明", "金额大写"]);
    summary.push_row(["总人数", valid.len().to_string().as_str(), "人", ""]);
    summary.push_row([
        "总金额".to_string(),
        format_amount(total),
        "元".to_string(),
        amount_to_chinese(total),
    ]);
    summary.push_row(["支付方式统计", "", "", ""]);
    for gift_type in [
        GiftType::Cash,
        GiftType::Wechat,
        GiftType::Alipay,
        GiftType::Other,
    ] {
        let matching: Vec<&&GiftData> =
            valid.iter().filter(|g| g.gift_type == gift_type).collect();
        if matching.is_empty() {
            continue;
        }
        let subtotal: f64 = matching.iter().map(|g| g.amount).sum();
        summary.push_row([
            gift_type.label().to_string(),
            format_amount(subtotal),
            format!("{}笔", matching.len()),
            amount_to_chinese(subtotal),
        ]);
    }
    workbook.add_sheet(summary);

    // Event-info sheet, re-importable by the preview heuristics.
    let mut info = Sheet::new("事件信息");
    info.push_row(["事件名称", event.name.as_str()]);
    info.push_row(["开始时间".to_string(), format_datetime(event.start_date_time)]);
    info.push_row(["结束时间".to_string(), format_datetime(event.end_date_time)]);
    if let Some(recorder) = &event.recorder {
        info.push_row(["记账人", recorder.as_str()]);
    }
    let theme = match event.theme {
        EventTheme::Festive => "喜事",
        EventTheme::Solemn => "丧事",
    };
    info.push_row(["主题", theme]);
    info.push_row(["创建时间".to_string(), format_datetime(event.created_at)]);
    info.push_row(["导出时间".to_string(), format_datetime(Utc::now())]);
    workbook.add_sheet(info);

    Ok(workbook)
}

/// Export one event's workbook into a dated directory under `out_dir`.
///
/// Sealed records are decoded with the given password; records that cannot
/// be decoded are treated as inaccessible and left out.
pub fn export_event_workbook(
    store: &LedgerStore,
    event_id: &str,
    password: Option<&str>,
    out_dir: &Path,
) -> GiftbookResult<PathBuf> {
    let event = store
        .find_event(event_id)?
        .ok_or_else(|| GiftbookError::event_not_found(event_id))?;

    let gifts: Vec<GiftData> = store
        .list_gifts(event_id)?
        .iter()
        .filter_map(|record| record.decode(password))
        .collect();

    let workbook = build_event_workbook(&event, &gifts)?;
    let dir = out_dir.join(workbook_dir_name(&event.name, Utc::now()));
    workbook.save_dir(&dir)?;
    Ok(dir)
}

/// Export a backup bundle to a dated file under `out_dir`
pub fn export_backup_file(
    store: &LedgerStore,
    event_id: Option<&str>,
    out_dir: &Path,
) -> GiftbookResult<PathBuf> {
    let bundle = build_backup(store, event_id)?;
    let name = match event_id {
        Some(_) => format!(
            "礼簿_{}_{}.json",
            safe_file_stem(&bundle.events[0].name),
            Utc::now().format("%Y%m%d")
        ),
        None => format!("礼簿备份_{}.json", Utc::now().format("%Y%m%d")),
    };

    std::fs::create_dir_all(out_dir)
        .map_err(|e| GiftbookError::Export(format!("Failed to create {}: {}", out_dir.display(), e)))?;
    let path = out_dir.join(name);
    let mut file = std::fs::File::create(&path)
        .map_err(|e| GiftbookError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
    write_backup_json(&bundle, &mut file)?;
    Ok(path)
}

/// Keep only CJK and ASCII-alphanumeric characters of an event name
pub fn safe_file_stem(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || ('\u{4e00}'..='\u{9fa5}').contains(c))
        .collect()
}

/// Dated workbook directory name for an event
pub fn workbook_dir_name(event_name: &str, now: DateTime<Utc>) -> String {
    format!("礼簿_{}_{}", safe_file_stem(event_name), now.format("%Y%m%d"))
}

/// Render an amount the way it appears on the wire (no trailing zeros)
fn format_amount(amount: f64) -> String {
    format!("{}", amount)
}

/// Sheet-cell datetime format, parseable by the import side
fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}
