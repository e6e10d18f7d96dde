//! Field labels printed on household registration documents.
//!
//! Labels are matched by substring containment, never anchored. A label
//! that happens to appear inside another word is a false positive the
//! extractor accepts.

/// Precedes the 13-digit national ID.
pub const NATIONAL_ID: &str = "เลขประจำตัวประชาชน";

/// Precedes the honorific and full name.
pub const FULL_NAME: &str = "ชื่อ-ชื่อสกุล";

/// Gender label, printed on the name line after the name.
pub const GENDER: &str = "เพศ";

/// Precedes the date of birth.
pub const DATE_OF_BIRTH: &str = "วันเดือนปีเกิด";

/// Precedes the age in years.
pub const AGE: &str = "อายุ";

/// Precedes the house number.
pub const HOUSE_NO: &str = "บ้านเลขที่";

/// Precedes the village group number.
pub const MOO: &str = "หมู่";

/// Precedes the sub-district name.
pub const TAMBON: &str = "ตำบล";

/// Precedes the district name.
pub const AMPHUR: &str = "อำเภอ";

/// Precedes the province name.
pub const PROVINCE: &str = "จังหวัด";

/// Precedes the move-in date.
pub const MOVE_IN_DATE: &str = "วันที่ย้ายเข้า";

/// Labels that end the full-name segment when they follow it on the same
/// line.
pub const NAME_STOP_WORDS: &[&str] = &[GENDER, DATE_OF_BIRTH, AGE];
