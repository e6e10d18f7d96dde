//! Gender inference from the honorific that opens a full name.

use house_reg_person_models::Gender;

/// Civilian honorifics for men and boys.
const MALE_HONORIFICS: &[&str] = &["นาย", "ด.ช.", "เด็กชาย"];

/// Civilian honorifics for women and girls.
const FEMALE_HONORIFICS: &[&str] = &["นาง", "นางสาว", "ด.ญ.", "เด็กหญิง", "น.ส."];

/// Police and military rank abbreviations. These are often printed glued
/// to the given name (`ร.ต.อ.พิชิต`), so they are matched as prefixes.
/// Every listed rank is treated as male.
const RANK_PREFIXES: &[&str] = &[
    "ร.ต.อ.",
    "ร.ต.ท.",
    "ร.ต.ต.",
    "ด.ต.",
    "ส.ต.อ.",
    "ส.ต.ท.",
    "ส.ต.ต.",
    "พ.ต.อ.",
    "พ.ต.ท.",
    "พ.ต.ต.",
    "พ.ต.",
    "พล.ต.ต.",
    "พล.ต.อ.",
    "จ.ส.ต.",
];

/// Infers a gender from the first whitespace-delimited token of
/// `fullname`.
///
/// Civilian honorifics must match exactly; ranks match by prefix.
/// Anything else, including an empty name, is [`Gender::Unknown`].
#[must_use]
pub fn infer_gender(fullname: &str) -> Gender {
    let Some(honorific) = fullname.split_whitespace().next() else {
        return Gender::Unknown;
    };

    if MALE_HONORIFICS.contains(&honorific) {
        return Gender::Male;
    }
    if FEMALE_HONORIFICS.contains(&honorific) {
        return Gender::Female;
    }
    if RANK_PREFIXES.iter().any(|rank| honorific.starts_with(rank)) {
        return Gender::Male;
    }

    Gender::Unknown
}
