//! Chinese capitalized-numeral rendering for currency amounts
//!
//! Converts a decimal yuan amount into the traditional capitalized form used
//! on paper ledgers and receipts (e.g. `1234.56` → `壹仟贰佰叁拾肆元伍角陆分`).

/// Capitalized digit characters, indexed 0-9.
const DIGITS: [char; 10] = ['零', '壹', '贰', '叁', '肆', '伍', '陆', '柒', '捌', '玖'];

/// Place-value ladder, highest place first, ending in yuan/jiao/fen.
/// Consumed from the right to match the length of the digit string.
const UNITS: [char; 22] = [
    '京', '亿', '万', '仟', '佰', '拾', '兆', '万', '仟', '佰', '拾', '亿', '仟', '佰', '拾', '万',
    '仟', '佰', '拾', '元', '角', '分',
];

/// Render an amount in yuan as capitalized Chinese numerals.
///
/// Returns the empty string for non-finite or negative input, `零元整` for
/// zero, and the sentinel `金额过大` when the amount has more places than the
/// unit ladder covers. Never panics; the function is used inline in
/// display contexts.
pub fn amount_to_chinese(amount: f64) -> String {
    if !amount.is_finite() || amount < 0.0 {
        return String::new();
    }
    if amount == 0.0 {
        return "零元整".to_string();
    }

    // Scale to whole fen. Integral amounts just gain the two fractional
    // places; fractional ones are rounded half away from zero.
    let digits = if amount.fract() == 0.0 {
        format!("{}00", amount as u128)
    } else {
        ((amount * 100.0).round() as u128).to_string()
    };

    if digits.len() > UNITS.len() {
        return "金额过大".to_string();
    }

    let units = &UNITS[UNITS.len() - digits.len()..];
    let mut raw = String::with_capacity(digits.len() * 6);
    for (digit, unit) in digits.bytes().zip(units) {
        raw.push(DIGITS[(digit - b'0') as usize]);
        raw.push(*unit);
    }

    cleanup(raw)
}

/// Collapse placeholder zeros and attach the `整` suffix.
///
/// The passes are order-sensitive; reordering them changes the output for
/// amounts with interior zero runs.
fn cleanup(raw: String) -> String {
    let mut s = raw;

    // A zero before a minor unit keeps only the zero placeholder.
    for unit in ["仟", "佰", "拾", "角"] {
        s = s.replace(&format!("零{unit}"), "零");
    }

    // Runs of zeros collapse to a single placeholder.
    while s.contains("零零") {
        s = s.replace("零零", "零");
    }

    // A zero before a major group boundary keeps only the unit.
    for unit in ["兆", "万", "亿", "元"] {
        s = s.replace(&format!("零{unit}"), unit);
    }

    // Adjacent major units collapse into the larger one.
    s = s
        .replace("兆万", "兆")
        .replace("亿万", "亿")
        .replace("京亿", "京")
        .replace("兆亿", "兆")
        .replace("京兆", "京")
        .replace("零元", "元")
        .replace("零分", "")
        .replace("零角", "零");

    if s.ends_with('元') || s.ends_with('角') {
        s.push('整');
    }

    s
}
