#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Person record and positional suffix types shared across the house-reg
//! workspace.
//!
//! A [`PersonRecord`] is the normalized result of parsing one household
//! registration document. When several people are merged into a single
//! template, each person's fields are namespaced by a [`SuffixLetter`]
//! (`FULLNAME_A`, `FULLNAME_B`, ...).

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Maximum number of people a single filled document can hold.
pub const MAX_PEOPLE: usize = 6;

/// A named field of a [`PersonRecord`].
///
/// The string form (`SCREAMING_SNAKE_CASE`) is the key used in template
/// contexts, e.g. [`PersonField::HouseNo`] renders as `HOUSE_NO`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PersonField {
    /// Honorific plus given name and surname
    Fullname,
    /// 13-digit national identification number
    Cid,
    /// Date of birth as printed in the source document
    Dob,
    /// Age in years (digits only)
    Age,
    /// House number
    HouseNo,
    /// Village group number
    Moo,
    /// Sub-district
    Tambon,
    /// District
    Amphur,
    /// Province
    Province,
    /// Date the person moved into the house
    MoveinDate,
    /// Composed single-line address
    AddressFull,
    /// Gender inferred from the honorific
    Gender,
}

impl PersonField {
    /// Every field of a [`PersonRecord`], in record order.
    pub const ALL: &[Self] = &[
        Self::Fullname,
        Self::Cid,
        Self::Dob,
        Self::Age,
        Self::HouseNo,
        Self::Moo,
        Self::Tambon,
        Self::Amphur,
        Self::Province,
        Self::MoveinDate,
        Self::AddressFull,
        Self::Gender,
    ];

    /// Fields exposed in a suffixed per-person template context.
    ///
    /// [`PersonField::Gender`] is intentionally absent: templates have no
    /// slot for it.
    pub const CONTEXT: &[Self] = &[
        Self::Fullname,
        Self::Cid,
        Self::Dob,
        Self::Age,
        Self::HouseNo,
        Self::Moo,
        Self::Tambon,
        Self::Amphur,
        Self::Province,
        Self::AddressFull,
        Self::MoveinDate,
    ];

    /// Returns the context key for this field namespaced by `letter`
    /// (e.g. `CID_B`).
    #[must_use]
    pub fn suffixed_key(self, letter: SuffixLetter) -> String {
        format!("{}_{letter}", self.as_ref())
    }
}

/// Normalized personal and address fields extracted from one document.
///
/// Every field is always present; data that could not be found is the
/// empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct PersonRecord {
    /// See [`PersonField::Fullname`].
    pub fullname: String,
    /// See [`PersonField::Cid`].
    pub cid: String,
    /// See [`PersonField::Dob`].
    pub dob: String,
    /// See [`PersonField::Age`].
    pub age: String,
    /// See [`PersonField::HouseNo`].
    pub house_no: String,
    /// See [`PersonField::Moo`].
    pub moo: String,
    /// See [`PersonField::Tambon`].
    pub tambon: String,
    /// See [`PersonField::Amphur`].
    pub amphur: String,
    /// See [`PersonField::Province`].
    pub province: String,
    /// See [`PersonField::MoveinDate`].
    pub movein_date: String,
    /// See [`PersonField::AddressFull`].
    pub address_full: String,
    /// See [`PersonField::Gender`].
    pub gender: String,
}

impl PersonRecord {
    /// Returns the value of `field`.
    #[must_use]
    pub fn get(&self, field: PersonField) -> &str {
        match field {
            PersonField::Fullname => &self.fullname,
            PersonField::Cid => &self.cid,
            PersonField::Dob => &self.dob,
            PersonField::Age => &self.age,
            PersonField::HouseNo => &self.house_no,
            PersonField::Moo => &self.moo,
            PersonField::Tambon => &self.tambon,
            PersonField::Amphur => &self.amphur,
            PersonField::Province => &self.province,
            PersonField::MoveinDate => &self.movein_date,
            PersonField::AddressFull => &self.address_full,
            PersonField::Gender => &self.gender,
        }
    }

    /// Returns a mutable handle to the value of `field`.
    pub const fn get_mut(&mut self, field: PersonField) -> &mut String {
        match field {
            PersonField::Fullname => &mut self.fullname,
            PersonField::Cid => &mut self.cid,
            PersonField::Dob => &mut self.dob,
            PersonField::Age => &mut self.age,
            PersonField::HouseNo => &mut self.house_no,
            PersonField::Moo => &mut self.moo,
            PersonField::Tambon => &mut self.tambon,
            PersonField::Amphur => &mut self.amphur,
            PersonField::Province => &mut self.province,
            PersonField::MoveinDate => &mut self.movein_date,
            PersonField::AddressFull => &mut self.address_full,
            PersonField::Gender => &mut self.gender,
        }
    }

    /// Number of fields that ended up non-empty.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        PersonField::ALL
            .iter()
            .filter(|f| !self.get(**f).is_empty())
            .count()
    }
}

/// Positional namespace for one person within a merged context.
///
/// Letters are assigned by input order: the first document is `A`, the
/// sixth is `F`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum SuffixLetter {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl SuffixLetter {
    /// All letters in assignment order.
    pub const ALL: [Self; MAX_PEOPLE] = [Self::A, Self::B, Self::C, Self::D, Self::E, Self::F];

    /// Returns the letter for a zero-based input position, or `None` past
    /// [`MAX_PEOPLE`].
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Zero-based input position of this letter.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Gender derived from a name's honorific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

impl Gender {
    /// The value written into [`PersonRecord::gender`].
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "ชาย",
            Self::Female => "หญิง",
            Self::Unknown => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_keys_are_screaming_snake_case() {
        assert_eq!(PersonField::HouseNo.to_string(), "HOUSE_NO");
        assert_eq!(PersonField::MoveinDate.as_ref(), "MOVEIN_DATE");
        assert_eq!(PersonField::AddressFull.as_ref(), "ADDRESS_FULL");
        assert_eq!("CID".parse::<PersonField>().unwrap(), PersonField::Cid);
    }

    #[test]
    fn context_fields_exclude_gender() {
        assert_eq!(PersonField::CONTEXT.len(), 11);
        assert!(!PersonField::CONTEXT.contains(&PersonField::Gender));
        assert_eq!(PersonField::ALL.len(), 12);
    }

    #[test]
    fn suffixed_key_appends_letter() {
        assert_eq!(PersonField::Fullname.suffixed_key(SuffixLetter::C), "FULLNAME_C");
    }

    #[test]
    fn letters_follow_input_position() {
        assert_eq!(SuffixLetter::from_index(0), Some(SuffixLetter::A));
        assert_eq!(SuffixLetter::from_index(5), Some(SuffixLetter::F));
        assert_eq!(SuffixLetter::from_index(6), None);
        assert_eq!(SuffixLetter::D.index(), 3);
    }

    #[test]
    fn get_mut_writes_through() {
        let mut record = PersonRecord::default();
        PersonField::ALL.iter().for_each(|f| {
            *record.get_mut(*f) = f.to_string();
        });
        for field in PersonField::ALL {
            assert_eq!(record.get(*field), field.as_ref());
        }
        assert_eq!(record.filled_count(), 12);
    }

    #[test]
    fn record_serializes_every_key() {
        let json = serde_json::to_value(PersonRecord::default()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 12);
        for field in PersonField::ALL {
            assert_eq!(obj[field.as_ref()], "");
        }
    }

    #[test]
    fn gender_labels() {
        assert_eq!(Gender::Male.label(), "ชาย");
        assert_eq!(Gender::Female.label(), "หญิง");
        assert_eq!(Gender::Unknown.label(), "");
    }
}
