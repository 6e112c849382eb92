//! Source plugins for fetching works from online registries

pub mod orcid;
pub mod traits;

pub use orcid::*;
pub use traits::*;
