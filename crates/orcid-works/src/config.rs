//! Run configuration
//!
//! Everything the source needs is carried in [`OrcidConfig`]; the fetch logic
//! never reads the environment itself.

use std::time::Duration;

/// Environment variable holding the ORCID iD to query
pub const ORCID_ENV_VAR: &str = "ORCID_ENVAR";
/// Environment variable overriding the registry host
pub const API_BASE_ENV_VAR: &str = "ORCID_API_BASE";
/// Public ORCID API host
pub const DEFAULT_API_BASE: &str = "https://pub.orcid.org";

/// What to do when a registry request fails
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Absorb the failure into an empty result
    #[default]
    Lenient,
    /// Propagate the failure to the caller
    Strict,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrcidConfig {
    /// ORCID iD, forwarded verbatim into the works URL
    pub orcid_id: Option<String>,
    /// Registry host, without trailing slash
    pub api_base: String,
    pub timeout: Option<Duration>,
    /// Maximum in-flight contributor lookups (at least 1)
    pub concurrency: usize,
    pub policy: FailurePolicy,
    pub user_agent: String,
}

impl Default for OrcidConfig {
    fn default() -> Self {
        Self {
            orcid_id: None,
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: None,
            concurrency: 1,
            policy: FailurePolicy::Lenient,
            user_agent: format!("orcid-works/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl OrcidConfig {
    /// Read `ORCID_ENVAR` and `ORCID_API_BASE` from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            orcid_id: lookup(ORCID_ENV_VAR),
            ..Self::default()
        };
        if let Some(base) = lookup(API_BASE_ENV_VAR).filter(|b| !b.trim().is_empty()) {
            config = config.with_api_base(base);
        }
        config
    }

    pub fn with_orcid_id(mut self, orcid_id: impl Into<String>) -> Self {
        self.orcid_id = Some(orcid_id.into());
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Zero is treated as one
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }
}
