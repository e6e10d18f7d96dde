#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Field extraction for household registration printouts.
//!
//! Registration PDFs carry a text layer of label-prefixed Thai fields
//! with inconsistent spacing and line breaks. This crate turns that text
//! into a [`PersonRecord`]:
//!
//! 1. [`normalize_lines`] trims lines and drops blank ones.
//! 2. [`fields::extract_fields`] pulls out the ten base fields.
//! 3. [`gender::infer_gender`] derives a gender from the honorific.
//! 4. [`address::compose_address`] joins the address parts.
//!
//! [`parse_person`] runs the whole pipeline. Nothing here fails: fields
//! that cannot be found are left empty.

pub mod address;
pub mod date;
pub mod fields;
pub mod gender;
pub mod labels;

use house_reg_person_models::{PersonField, PersonRecord};

pub use address::compose_address;
pub use date::format_thai_date;
pub use fields::extract_fields;
pub use gender::infer_gender;

/// Splits raw extracted text into trimmed, non-blank lines.
#[must_use]
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Parses one document's lines into a complete [`PersonRecord`],
/// including the composed address and inferred gender.
#[must_use]
pub fn parse_person<S: AsRef<str>>(lines: &[S]) -> PersonRecord {
    let mut record = extract_fields(lines);
    record.gender = infer_gender(&record.fullname).label().to_owned();
    record.address_full = compose_address(&record);

    let missing: Vec<&str> = PersonField::ALL
        .iter()
        .filter(|f| record.get(**f).is_empty())
        .map(AsRef::as_ref)
        .collect();
    if missing.is_empty() {
        log::debug!("Parsed all fields from {} lines", lines.len());
    } else {
        log::debug!(
            "Parsed {} lines, missing: {}",
            lines.len(),
            missing.join(", ")
        );
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_blank_lines_and_trims() {
        let text = "  เลขประจำตัวประชาชน 1  \n\n   \n\tชื่อ-ชื่อสกุล นาย ก ข\r\n";
        assert_eq!(
            normalize_lines(text),
            vec![
                "เลขประจำตัวประชาชน 1".to_owned(),
                "ชื่อ-ชื่อสกุล นาย ก ข".to_owned()
            ]
        );
    }

    #[test]
    fn parse_person_fills_derived_fields() {
        let lines = normalize_lines(
            "ชื่อ-ชื่อสกุล นางสาว มะลิ หอมดี เพศ หญิง\n\
             บ้านเลขที่ 5 หมู่ 2\n\
             จังหวัด ขอนแก่น\n",
        );
        let record = parse_person(&lines);
        assert_eq!(record.fullname, "นางสาว มะลิ หอมดี");
        assert_eq!(record.gender, "หญิง");
        assert_eq!(record.address_full, "5 หมู่ 2 จังหวัด ขอนแก่น");
    }

    #[test]
    fn parse_person_on_empty_text() {
        let lines = normalize_lines("");
        assert_eq!(parse_person(&lines), PersonRecord::default());
    }
}
