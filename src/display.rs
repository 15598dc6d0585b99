//! Terminal display formatting
//!
//! Register-style views for events and gift lists. Inaccessible records
//! (sealed payloads the current password cannot open) are shown as such
//! rather than hidden.

use crate::models::{Event, GiftData};
use crate::numeral::amount_to_chinese;

/// Format a single gift for display (register row)
pub fn format_gift_row(gift: &GiftData) -> String {
    let flag = if gift.abolished { "✗" } else { " " };
    format!(
        "{} {} {:10} {:>10.2} {:6} {}",
        flag,
        gift.timestamp.format("%Y-%m-%d %H:%M"),
        truncate(&gift.name, 10),
        gift.amount,
        gift.gift_type,
        gift.remark.as_deref().unwrap_or("")
    )
}

/// Format a decoded gift list as a register.
///
/// `None` entries stand for records that could not be decoded.
pub fn format_gift_register(gifts: &[Option<GiftData>]) -> String {
    if gifts.is_empty() {
        return "No gift records found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "  {:16} {:10} {:>10} {:6} {}\n",
        "Time", "Name", "Amount", "Type", "Remark"
    ));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    let mut total = 0.0;
    let mut count = 0usize;
    for gift in gifts {
        match gift {
            Some(gift) => {
                output.push_str(&format_gift_row(gift));
                output.push('\n');
                if !gift.abolished {
                    total += gift.amount;
                    count += 1;
                }
            }
            None => output.push_str("? (inaccessible record)\n"),
        }
    }

    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "{} gift(s), total {:.2} ({})\n",
        count,
        total,
        amount_to_chinese(total)
    ));

    output
}

/// Format a single event for display
pub fn format_event_row(event: &Event) -> String {
    let lock = if event.is_protected() { "🔒" } else { "  " };
    format!(
        "{} {} {:16} {} ~ {}",
        lock,
        event.id,
        truncate(&event.name, 16),
        event.start_date_time.format("%Y-%m-%d"),
        event.end_date_time.format("%Y-%m-%d")
    )
}

/// Format an event list
pub fn format_event_list(events: &[Event]) -> String {
    if events.is_empty() {
        return "No events yet. Create one with `giftbook event create`.\n".to_string();
    }

    let mut output = String::new();
    for event in events {
        output.push_str(&format_event_row(event));
        output.push('\n');
    }
    output
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GiftType;
    use chrono::Utc;

    #[test]
    fn test_register_totals_skip_abolished() {
        let mut abolished = GiftData::new("张三", 888.0, GiftType::Cash);
        abolished.abolished = true;
        let gifts = vec![
            Some(GiftData::new("李四", 100.0, GiftType::Wechat)),
            Some(abolished),
            None,
        ];

        let register = format_gift_register(&gifts);
        assert!(register.contains("1 gift(s), total 100.00"));
        assert!(register.contains("壹佰元整"));
        assert!(register.contains("inaccessible"));
    }

    #[test]
    fn test_empty_register() {
        assert!(format_gift_register(&[]).contains("No gift records"));
    }

    #[test]
    fn test_event_row_shows_lock() {
        let open = Event::new("张家婚宴", Utc::now(), Utc::now());
        assert!(!format_event_row(&open).contains("🔒"));

        let locked = Event::new("李家婚宴", Utc::now(), Utc::now()).with_password("pw");
        assert!(format_event_row(&locked).contains("🔒"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("很长很长很长的名字啊", 6), "很长很长很…");
    }
}
