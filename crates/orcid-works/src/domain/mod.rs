//! Domain models for orcid-works
//!
//! Records are built once per run from registry responses and serialized
//! straight to the output document.

pub mod work;

pub use work::{Identifiers, WorkRecord, NO_TITLE, NO_YEAR, UNKNOWN_AUTHOR};
