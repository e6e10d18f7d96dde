//! Long-form Thai date rendering.
//!
//! Documents are dated in the Buddhist Era, which runs 543 years ahead of
//! the Gregorian calendar: 16 December 2025 is written
//! `16 ธันวาคม พ.ศ.2568`.

use chrono::{Datelike, NaiveDate};

/// Years added to a Gregorian year to get the Buddhist Era year.
pub const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Thai month names indexed by 1-based month number. Index 0 is unused.
pub const THAI_MONTHS: [&str; 13] = [
    "",
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

/// Formats `date` as `<day> <month> พ.ศ.<year + 543>` without zero
/// padding.
#[must_use]
pub fn format_thai_date(date: NaiveDate) -> String {
    // `NaiveDate::month()` is always 1..=12.
    let month = THAI_MONTHS[date.month() as usize];
    format!(
        "{} {month} พ.ศ.{}",
        date.day(),
        date.year() + BUDDHIST_ERA_OFFSET
    )
}
