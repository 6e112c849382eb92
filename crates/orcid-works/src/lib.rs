//! orcid-works: list the works attributed to an ORCID iD
//!
//! This library provides:
//! - A reqwest-backed client for the public ORCID API
//! - Parsing of works listings and work details into [`WorkRecord`]s
//! - Contributor enrichment, sequential or with bounded ordered fan-out
//! - YAML and JSON rendering of the result
//!
//! Failures are explicit [`SourceError`]s; the `_or_empty` variants and
//! [`FailurePolicy::Lenient`] reproduce the absorb-into-empty behaviour.

pub mod config;
pub mod domain;
pub mod http;
pub mod output;
pub mod sources;

use std::io::Write;

use thiserror::Error;

pub use config::{FailurePolicy, OrcidConfig, API_BASE_ENV_VAR, DEFAULT_API_BASE, ORCID_ENV_VAR};
pub use domain::{Identifiers, WorkRecord};
pub use output::{render, OutputError, OutputFormat};
pub use sources::{OrcidSource, SourceError, WorkSummary};

/// Fetch and enrich every work for the configured iD.
///
/// Under [`FailurePolicy::Lenient`] this never fails once the client is built.
pub async fn list_works(config: &OrcidConfig) -> Result<Vec<WorkRecord>, SourceError> {
    let source = OrcidSource::new(config)?;
    let orcid_id = config.orcid_id.as_deref();
    match config.policy {
        FailurePolicy::Strict => source.fetch_publications(orcid_id).await,
        FailurePolicy::Lenient => Ok(source.fetch_publications_or_empty(orcid_id).await),
    }
}

#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Output(#[from] OutputError),
    #[error("Could not write output: {0}")]
    Io(#[from] std::io::Error),
}

/// List the works and write the rendered document to `out`.
///
/// Returns the number of records written. An `Err` here is the only case the
/// command line reports as a failed run.
pub async fn run<W: Write>(
    config: &OrcidConfig,
    format: OutputFormat,
    out: &mut W,
) -> Result<usize, RunError> {
    let records = list_works(config).await?;
    out.write_all(render(&records, format)?.as_bytes())?;
    out.flush()?;
    Ok(records.len())
}
