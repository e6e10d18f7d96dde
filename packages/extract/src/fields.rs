//! Label-driven field extraction.
//!
//! Registration printouts are loosely laid out: labels and values share
//! lines in varying combinations, spacing is inconsistent, and some
//! labels repeat. Instead of parsing a grammar, every field is pulled out
//! independently by a [`FieldRule`]: find lines containing the rule's
//! labels, run a small extraction step on each, and keep the first or the
//! last value depending on the rule's [`MatchPolicy`].
//!
//! An extraction step that finds nothing returns `None` and the field
//! keeps its empty default. One malformed field never affects another.

use house_reg_person_models::{PersonField, PersonRecord};

use crate::labels;

/// How a rule resolves several matching lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// The first line that yields a value wins; later lines are ignored.
    FirstMatch,
    /// Every matching line is tried and later values overwrite earlier
    /// ones.
    LastMatch,
}

/// Extraction rule for a single field.
struct FieldRule {
    field: PersonField,
    /// A line is only considered if it contains every one of these.
    labels: &'static [&'static str],
    policy: MatchPolicy,
    extract: fn(&str) -> Option<String>,
}

/// Rules evaluated in order. Date of birth and age come from the same
/// line and are handled by [`birth_and_age`] instead.
const RULES: &[FieldRule] = &[
    FieldRule {
        field: PersonField::Cid,
        labels: &[labels::NATIONAL_ID],
        policy: MatchPolicy::FirstMatch,
        extract: national_id,
    },
    FieldRule {
        field: PersonField::Fullname,
        labels: &[labels::FULL_NAME],
        policy: MatchPolicy::FirstMatch,
        extract: full_name,
    },
    FieldRule {
        field: PersonField::HouseNo,
        labels: &[labels::HOUSE_NO],
        policy: MatchPolicy::LastMatch,
        extract: house_no,
    },
    FieldRule {
        field: PersonField::Moo,
        labels: &[labels::MOO, labels::HOUSE_NO],
        policy: MatchPolicy::LastMatch,
        extract: moo,
    },
    FieldRule {
        field: PersonField::Tambon,
        labels: &[labels::TAMBON],
        policy: MatchPolicy::FirstMatch,
        extract: tambon,
    },
    FieldRule {
        field: PersonField::Amphur,
        labels: &[labels::AMPHUR],
        policy: MatchPolicy::FirstMatch,
        extract: amphur,
    },
    FieldRule {
        field: PersonField::Province,
        labels: &[labels::PROVINCE],
        policy: MatchPolicy::FirstMatch,
        extract: province,
    },
    FieldRule {
        field: PersonField::MoveinDate,
        labels: &[labels::MOVE_IN_DATE],
        policy: MatchPolicy::FirstMatch,
        extract: move_in_date,
    },
];

/// Extracts the ten base fields from already-normalized lines.
///
/// [`PersonField::AddressFull`] and [`PersonField::Gender`] are left
/// empty; see [`crate::parse_person`] for the full pipeline.
#[must_use]
pub fn extract_fields<S: AsRef<str>>(lines: &[S]) -> PersonRecord {
    let mut record = PersonRecord::default();

    for rule in RULES {
        if let Some(value) = scan(lines, rule.labels, rule.policy, rule.extract) {
            *record.get_mut(rule.field) = value;
        }
    }

    if let Some((dob, age)) = birth_and_age(lines) {
        record.dob = dob;
        record.age = age;
    }

    record
}

/// Runs `extract` over every line containing all of `required`.
fn scan<S: AsRef<str>>(
    lines: &[S],
    required: &[&str],
    policy: MatchPolicy,
    extract: fn(&str) -> Option<String>,
) -> Option<String> {
    let mut values = lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| required.iter().all(|label| line.contains(label)))
        .filter_map(extract);

    match policy {
        MatchPolicy::FirstMatch => values.next(),
        MatchPolicy::LastMatch => values.last(),
    }
}

/// Returns the text after the first occurrence of `label`, trimmed.
fn after_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.split_once(label).map(|(_, rest)| rest.trim())
}

/// Returns the token following a token that starts with `label`. When the
/// label token repeats on the line, the last pairing wins.
fn token_after(line: &str, label: &str) -> Option<String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    tokens
        .windows(2)
        .filter(|pair| pair[0].starts_with(label))
        .map(|pair| pair[1].to_owned())
        .last()
}

fn national_id(line: &str) -> Option<String> {
    line.replace(labels::NATIONAL_ID, " ")
        .split_whitespace()
        .find(|token| token.chars().any(char::is_numeric))
        .map(str::to_owned)
}

fn full_name(line: &str) -> Option<String> {
    let after = after_label(line, labels::FULL_NAME)?;
    let end = labels::NAME_STOP_WORDS
        .iter()
        .filter_map(|stop| after.find(stop))
        .min()
        .unwrap_or(after.len());
    Some(after[..end].trim().to_owned())
}

fn house_no(line: &str) -> Option<String> {
    token_after(line, labels::HOUSE_NO)
}

fn moo(line: &str) -> Option<String> {
    token_after(line, labels::MOO)
}

fn tambon(line: &str) -> Option<String> {
    token_after(line, labels::TAMBON)
}

fn amphur(line: &str) -> Option<String> {
    token_after(line, labels::AMPHUR)
}

fn province(line: &str) -> Option<String> {
    token_after(line, labels::PROVINCE)
}

fn move_in_date(line: &str) -> Option<String> {
    after_label(line, labels::MOVE_IN_DATE).map(str::to_owned)
}

/// Date of birth and age from the first line carrying the birth-date
/// label, even when that line has no value. Age is only read from that
/// same line. Without an age label the whole remainder is kept as the
/// date of birth.
fn birth_and_age<S: AsRef<str>>(lines: &[S]) -> Option<(String, String)> {
    let line = lines
        .iter()
        .map(AsRef::as_ref)
        .find(|line| line.contains(labels::DATE_OF_BIRTH))?;
    let part = after_label(line, labels::DATE_OF_BIRTH)?;

    Some(match part.split_once(labels::AGE) {
        Some((dob, age)) => (
            dob.trim().to_owned(),
            age.chars().filter(|c| c.is_numeric()).collect(),
        ),
        None => (part.to_owned(), String::new()),
    })
}
