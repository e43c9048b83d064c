// NYHousing - ui/format.rs
//
// Number and text formatting for the terminal dashboard.

use crate::core::model::RoomCount;

/// Insert `,` every three digits of an unsigned digit string.
fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole dollars with thousands separators: `1234567.4` -> `$1,234,567`.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_digits(&format!("{:.0}", rounded.abs())))
}

/// Integer count with thousands separators.
pub fn format_count(value: usize) -> String {
    group_digits(&value.to_string())
}

/// Short currency for narrow cells: `$950K`, `$1.2M`, `$3.4B`.
pub fn format_compact_currency(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    if abs >= 1e9 {
        format!("{sign}${:.1}B", abs / 1e9)
    } else if abs >= 1e6 {
        format!("{sign}${:.1}M", abs / 1e6)
    } else if abs >= 1e3 {
        format!("{sign}${:.0}K", abs / 1e3)
    } else {
        format!("{sign}${abs:.0}")
    }
}

/// Cut `text` to at most `max` characters, marking the cut with `…`.
/// Room count for a table cell: whole numbers bare, fractions to at most
/// two places. Imputed counts in the source carry long fractions.
pub fn format_rooms(rooms: RoomCount) -> String {
    let value = rooms.value();
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let rounded = format!("{value:.2}");
        rounded.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(1);
    let mut out: String = text.chars().take(keep).collect();
    out.push('…');
    out
}
