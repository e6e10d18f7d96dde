#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Template context assembly for multi-person registration documents.
//!
//! [`batch::build_document_context`] drives extraction over one to six
//! [`batch::SourceDocument`]s, namespaces each person's fields with a
//! suffix letter, and merges them with the shared document date and
//! start time into a single [`DocumentContext`].

pub mod batch;
pub mod document;
pub mod person;
pub mod progress;

pub use batch::{CollaboratorError, SourceDocument, build_document_context, clamp_person_count};
pub use document::{ContextValue, DocumentContext, DocumentMeta, PageImage};
pub use person::{SuffixedContext, build_person_context};
