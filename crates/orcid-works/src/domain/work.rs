//! Publication records as listed for one ORCID iD

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Title used when a work summary carries no readable title
pub const NO_TITLE: &str = "No Title";
/// Year used when the publication date is missing or malformed
pub const NO_YEAR: &str = "No Year";
/// Name used for a contributor without a credit name
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

const DOI_RESOLVER: &str = "https://doi.org/";

/// External identifiers keyed by type (`doi`, `isbn`, `eid`, ...)
pub type Identifiers = BTreeMap<String, String>;

/// One discovered work.
///
/// Field order is the serialized order.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkRecord {
    pub name: String,
    pub publication_year: String,
    pub identifiers: Identifiers,
    pub authors: Vec<String>,
    pub url: Option<String>,
}

impl WorkRecord {
    /// Assemble a record, resolving `url` from the `doi` identifier if any
    pub fn new(
        name: impl Into<String>,
        publication_year: impl Into<String>,
        identifiers: Identifiers,
        authors: Vec<String>,
    ) -> Self {
        let url = doi_url(&identifiers);
        Self {
            name: name.into(),
            publication_year: publication_year.into(),
            identifiers,
            authors,
            url,
        }
    }
}

/// Resolver link for the `doi` entry, if present
pub fn doi_url(identifiers: &Identifiers) -> Option<String> {
    identifiers
        .get("doi")
        .map(|doi| format!("{}{}", DOI_RESOLVER, doi))
}
