//! Composes the single-line address from its extracted parts.

use house_reg_person_models::{PersonField, PersonRecord};

use crate::labels;

/// Address parts in output order, with the label each is written behind.
/// The house number is written bare.
const ADDRESS_PARTS: &[(PersonField, Option<&str>)] = &[
    (PersonField::HouseNo, None),
    (PersonField::Moo, Some(labels::MOO)),
    (PersonField::Tambon, Some(labels::TAMBON)),
    (PersonField::Amphur, Some(labels::AMPHUR)),
    (PersonField::Province, Some(labels::PROVINCE)),
];

/// Joins the non-empty address parts of `record` with single spaces,
/// e.g. `99/1 หมู่ 4 ตำบล ในเมือง อำเภอ เมืองขอนแก่น จังหวัด ขอนแก่น`.
///
/// Empty parts contribute nothing, label included.
#[must_use]
pub fn compose_address(record: &PersonRecord) -> String {
    ADDRESS_PARTS
        .iter()
        .filter_map(|(field, label)| {
            let value = record.get(*field);
            if value.is_empty() {
                return None;
            }
            Some(label.map_or_else(|| value.to_owned(), |label| format!("{label} {value}")))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(house_no: &str, moo: &str, tambon: &str, amphur: &str, province: &str) -> PersonRecord {
        PersonRecord {
            house_no: house_no.to_owned(),
            moo: moo.to_owned(),
            tambon: tambon.to_owned(),
            amphur: amphur.to_owned(),
            province: province.to_owned(),
            ..PersonRecord::default()
        }
    }

    #[test]
    fn joins_all_parts() {
        let r = record("99/1", "4", "ในเมือง", "เมืองขอนแก่น", "ขอนแก่น");
        assert_eq!(
            compose_address(&r),
            "99/1 หมู่ 4 ตำบล ในเมือง อำเภอ เมืองขอนแก่น จังหวัด ขอนแก่น"
        );
    }

    #[test]
    fn all_empty_is_empty() {
        assert_eq!(compose_address(&PersonRecord::default()), "");
    }

    #[test]
    fn province_only() {
        let r = record("", "", "", "", "ขอนแก่น");
        assert_eq!(compose_address(&r), "จังหวัด ขอนแก่น");
    }

    #[test]
    fn skips_gaps_without_extra_spaces() {
        let r = record("12", "", "บ้านเป็ด", "", "ขอนแก่น");
        assert_eq!(compose_address(&r), "12 ตำบล บ้านเป็ด จังหวัด ขอนแก่น");
    }

    #[test]
    fn house_number_is_unlabelled() {
        let r = record("7", "", "", "", "");
        assert_eq!(compose_address(&r), "7");
    }
}
