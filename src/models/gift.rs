//! Gift record models
//!
//! `GiftData` is the decrypted payload; `GiftRecord` is the stored envelope
//! whose `encrypted_data` field holds either a sealed cipher blob (normal
//! entry path) or plain JSON (import path, where no password exists). The
//! two encodings coexist in persisted gift lists, so decoding always tries
//! the plain form first and falls back to the cipher.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::{self, EncryptedData};
use crate::error::GiftbookResult;

use super::new_id;

/// How a gift was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GiftType {
    /// Cash in hand
    #[default]
    #[serde(rename = "现金")]
    Cash,
    /// WeChat transfer
    #[serde(rename = "微信")]
    Wechat,
    /// Alipay transfer
    #[serde(rename = "支付宝")]
    Alipay,
    /// Anything else
    #[serde(rename = "其他")]
    Other,
}

impl GiftType {
    /// Parse a payment type from user or spreadsheet input
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "现金" | "cash" => Some(Self::Cash),
            "微信" | "wechat" => Some(Self::Wechat),
            "支付宝" | "alipay" => Some(Self::Alipay),
            "其他" | "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// The label used on the wire and in exported sheets
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cash => "现金",
            Self::Wechat => "微信",
            Self::Alipay => "支付宝",
            Self::Other => "其他",
        }
    }
}

impl fmt::Display for GiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// The decrypted gift payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftData {
    /// Giver's name
    pub name: String,

    /// Amount in yuan
    pub amount: f64,

    /// Payment type
    #[serde(rename = "type")]
    pub gift_type: GiftType,

    /// Free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,

    /// When the gift was recorded
    pub timestamp: DateTime<Utc>,

    /// Logical delete flag: the record stays on disk for audit but is
    /// excluded from totals, displays, exports, and duplicate keys
    #[serde(default, skip_serializing_if = "is_false")]
    pub abolished: bool,
}

impl GiftData {
    /// Create a new gift payload timestamped now
    pub fn new(name: impl Into<String>, amount: f64, gift_type: GiftType) -> Self {
        Self {
            name: name.into(),
            amount,
            gift_type,
            remark: None,
            timestamp: Utc::now(),
            abolished: false,
        }
    }

    /// Attach a remark
    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }

    /// Natural key used for duplicate detection during import:
    /// giver name, amount, and recording timestamp.
    pub fn natural_key(&self) -> String {
        format!(
            "{}_{}_{}",
            self.name,
            self.amount,
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
        )
    }
}

/// The stored gift envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftRecord {
    /// Unique identifier (opaque string)
    pub id: String,

    /// Owning event; must reference an existing Event
    pub event_id: String,

    /// Either a sealed cipher envelope or plain JSON of `GiftData`
    pub encrypted_data: String,
}

/// The two encodings a stored payload can take
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope {
    Plain(GiftData),
    Sealed(EncryptedData),
}

impl GiftRecord {
    /// Create a record with the payload sealed under a password
    pub fn seal(event_id: &str, data: &GiftData, password: &str) -> GiftbookResult<Self> {
        Ok(Self {
            id: new_id(),
            event_id: event_id.to_string(),
            encrypted_data: crypto::encrypt(data, password)?,
        })
    }

    /// Create a record with the payload stored as plain JSON (import path)
    pub fn plain(event_id: &str, data: &GiftData) -> GiftbookResult<Self> {
        Ok(Self {
            id: new_id(),
            event_id: event_id.to_string(),
            encrypted_data: serde_json::to_string(data)?,
        })
    }

    /// Decode the payload.
    ///
    /// Plain JSON is tried first; a sealed envelope then needs the password.
    /// Returns `None` when the payload is sealed and no (or the wrong)
    /// password is supplied, or when the blob is unreadable.
    pub fn decode(&self, password: Option<&str>) -> Option<GiftData> {
        match serde_json::from_str::<Envelope>(&self.encrypted_data).ok()? {
            Envelope::Plain(data) => Some(data),
            Envelope::Sealed(envelope) => crypto::open(&envelope, password?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gift(name: &str, amount: f64) -> GiftData {
        GiftData::new(name, amount, GiftType::Cash)
    }

    #[test]
    fn test_gift_type_wire_labels() {
        let json = serde_json::to_string(&GiftType::Wechat).unwrap();
        assert_eq!(json, "\"微信\"");
        let parsed: GiftType = serde_json::from_str("\"支付宝\"").unwrap();
        assert_eq!(parsed, GiftType::Alipay);
    }

    #[test]
    fn test_gift_type_parse() {
        assert_eq!(GiftType::parse("现金"), Some(GiftType::Cash));
        assert_eq!(GiftType::parse("wechat"), Some(GiftType::Wechat));
        assert_eq!(GiftType::parse("刷卡"), None);
    }

    #[test]
    fn test_natural_key_formats_amount_plainly() {
        let mut data = gift("张三", 888.0);
        data.timestamp = "2025-01-15T10:30:00Z".parse().unwrap();
        assert_eq!(data.natural_key(), "张三_888_2025-01-15T10:30:00.000Z");

        data.amount = 100.5;
        assert_eq!(data.natural_key(), "张三_100.5_2025-01-15T10:30:00.000Z");
    }

    #[test]
    fn test_sealed_record_roundtrip() {
        let data = gift("李四", 1688.0).with_remark("新婚快乐");
        let record = GiftRecord::seal("event-1", &data, "123456").unwrap();

        assert_eq!(record.decode(Some("123456")), Some(data));
        assert_eq!(record.decode(Some("wrong")), None);
        assert_eq!(record.decode(None), None);
    }

    #[test]
    fn test_plain_record_needs_no_password() {
        let data = gift("王五", 200.0);
        let record = GiftRecord::plain("event-1", &data).unwrap();

        assert_eq!(record.decode(None), Some(data.clone()));
        // A password on a plain record is simply ignored.
        assert_eq!(record.decode(Some("any")), Some(data));
    }

    #[test]
    fn test_garbage_payload_decodes_to_none() {
        let record = GiftRecord {
            id: new_id(),
            event_id: "event-1".into(),
            encrypted_data: "corrupted {{{".into(),
        };
        assert_eq!(record.decode(Some("pw")), None);
    }

    #[test]
    fn test_abolished_omitted_from_wire_when_false() {
        let data = gift("张三", 888.0);
        let json = serde_json::to_string(&data).unwrap();
        assert!(!json.contains("abolished"));

        let mut abolished = data;
        abolished.abolished = true;
        let json = serde_json::to_string(&abolished).unwrap();
        assert!(json.contains("\"abolished\":true"));
    }
}
