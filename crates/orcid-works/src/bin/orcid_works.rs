//! orcid-works CLI
//!
//! Prints the works for an ORCID iD as YAML (or JSON) on stdout. Logs go to
//! stderr, filtered by `RUST_LOG`. Configuration starts from `ORCID_ENVAR` and
//! `ORCID_API_BASE`; flags given on the command line take precedence.

use std::time::Duration;

use clap::Parser;
use orcid_works::{run, FailurePolicy, OrcidConfig, OutputFormat, ORCID_ENV_VAR};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "orcid-works",
    version,
    about = "List the works attributed to an ORCID iD"
)]
struct Cli {
    /// ORCID iD to query, forwarded verbatim [default: $ORCID_ENVAR]
    #[arg(long)]
    orcid: Option<String>,

    /// Registry host [default: $ORCID_API_BASE, else https://pub.orcid.org]
    #[arg(long)]
    api_base: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "yaml")]
    format: OutputFormat,

    /// Contributor lookups in flight at once
    #[arg(long, default_value_t = 1)]
    concurrency: usize,

    /// Per-request timeout in seconds (none by default)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Fail with a non-zero exit on any registry error
    #[arg(long)]
    strict: bool,
}

impl Cli {
    fn apply(self, mut config: OrcidConfig) -> (OrcidConfig, OutputFormat) {
        if let Some(orcid) = self.orcid {
            config = config.with_orcid_id(orcid);
        }
        if let Some(api_base) = self.api_base {
            config = config.with_api_base(api_base);
        }
        config = config.with_concurrency(self.concurrency);
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if self.strict {
            config = config.with_policy(FailurePolicy::Strict);
        }
        (config, self.format)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let (config, format) = Cli::parse().apply(OrcidConfig::from_env());

    match config.orcid_id.as_deref() {
        Some(id) => info!(orcid = id, api_base = %config.api_base, "listing works"),
        None => warn!("{} is not set; querying the literal iD None", ORCID_ENV_VAR),
    }

    let count = run(&config, format, &mut std::io::stdout().lock()).await?;
    info!(count, "fetched works");
    Ok(())
}
