//! Common types for registry sources

use crate::http::HttpError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
    #[error("Not found: {url}")]
    NotFound { url: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Work summary has no detail path")]
    MissingPath,
}
