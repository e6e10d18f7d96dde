//! Per-person suffixed context.

use std::collections::BTreeMap;

use house_reg_person_models::{PersonField, PersonRecord, SuffixLetter};

/// One person's template values keyed `{FIELD}_{LETTER}`.
pub type SuffixedContext = BTreeMap<String, String>;

/// Maps `record` into keys namespaced by `letter`.
///
/// Only [`PersonField::CONTEXT`] is exposed; the inferred gender stays on
/// the record.
#[must_use]
pub fn build_person_context(record: &PersonRecord, letter: SuffixLetter) -> SuffixedContext {
    PersonField::CONTEXT
        .iter()
        .map(|field| (field.suffixed_key(letter), record.get(*field).to_owned()))
        .collect()
}
