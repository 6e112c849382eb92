//! ORCID public API source
//!
//! API docs: https://info.orcid.org/documentation/api-tutorials/
//! Two calls per run shape: one works listing, then one work detail per
//! summary to collect contributor credit names.

use super::traits::SourceError;
use crate::config::{FailurePolicy, OrcidConfig};
use crate::domain::{Identifiers, WorkRecord, NO_TITLE, NO_YEAR, UNKNOWN_AUTHOR};
use crate::http::HttpClient;
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

// ===== Wire format =====

#[derive(Debug, Deserialize)]
struct WorksResponse {
    #[serde(default)]
    group: Option<Vec<WorkGroup>>,
}

#[derive(Debug, Deserialize)]
struct WorkGroup {
    #[serde(rename = "work-summary", default)]
    work_summary: Option<Vec<Value>>,
}

/// Every field degrades to `None` instead of failing the whole document.
#[derive(Debug, Deserialize)]
struct OrcidWorkSummary {
    #[serde(default, deserialize_with = "lenient")]
    title: Option<OrcidTitle>,
    #[serde(rename = "publication-date", default, deserialize_with = "lenient")]
    publication_date: Option<OrcidDate>,
    #[serde(rename = "external-ids", default, deserialize_with = "lenient")]
    external_ids: Option<OrcidExternalIds>,
    #[serde(default, deserialize_with = "lenient")]
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrcidTitle {
    title: Option<OrcidValue>,
}

#[derive(Debug, Deserialize)]
struct OrcidDate {
    year: Option<OrcidValue>,
}

/// The `{"value": ...}` wrapper ORCID uses for scalar fields
#[derive(Debug, Deserialize)]
struct OrcidValue {
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrcidExternalIds {
    #[serde(rename = "external-id", default)]
    external_id: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct OrcidExternalId {
    #[serde(rename = "external-id-type")]
    id_type: Option<String>,
    #[serde(rename = "external-id-value")]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WorkDetail {
    #[serde(default)]
    contributors: Option<OrcidContributors>,
}

#[derive(Debug, Deserialize)]
struct OrcidContributors {
    #[serde(default)]
    contributor: Option<Vec<OrcidContributor>>,
}

/// `credit_name` is `None` when the key is absent and `Some(None)` when it is null
#[derive(Debug, Deserialize)]
struct OrcidContributor {
    #[serde(rename = "credit-name", default, deserialize_with = "present")]
    credit_name: Option<Option<OrcidValue>>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ===== Parsed summaries =====

/// One work summary from the listing, before contributor lookup
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkSummary {
    pub name: String,
    pub publication_year: String,
    pub identifiers: Identifiers,
    /// Detail path, e.g. `/0000-0001-2345-6789/work/123`
    pub path: Option<String>,
}

impl WorkSummary {
    pub fn into_record(self, authors: Vec<String>) -> WorkRecord {
        WorkRecord::new(self.name, self.publication_year, self.identifiers, authors)
    }

    fn from_wire(summary: OrcidWorkSummary) -> Self {
        let name = summary
            .title
            .and_then(|t| t.title)
            .and_then(|t| t.value)
            .unwrap_or_else(|| NO_TITLE.to_string());

        let publication_year = summary
            .publication_date
            .and_then(|d| d.year)
            .and_then(|y| y.value)
            .unwrap_or_else(|| NO_YEAR.to_string());

        // Later entries of the same type overwrite earlier ones
        let identifiers = summary
            .external_ids
            .and_then(|ids| ids.external_id)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|raw| serde_json::from_value::<OrcidExternalId>(raw).ok())
            .filter_map(|ext| Some((ext.id_type?, ext.value?)))
            .collect();

        Self {
            name,
            publication_year,
            identifiers,
            path: summary.path,
        }
    }
}

/// Parse a `/v3.0/{id}/works` body into summaries, in registry order.
///
/// Null and empty summaries are skipped.
pub fn parse_works_response(json: &str) -> Result<Vec<WorkSummary>, SourceError> {
    let response: WorksResponse = serde_json::from_str(json)
        .map_err(|e| SourceError::Parse(format!("Invalid ORCID works JSON: {}", e)))?;

    let mut summaries = Vec::new();
    for group in response.group.unwrap_or_default() {
        for raw in group.work_summary.unwrap_or_default() {
            let map = match raw {
                Value::Object(map) if !map.is_empty() => map,
                _ => continue,
            };
            let summary: OrcidWorkSummary = serde_json::from_value(Value::Object(map))
                .map_err(|e| SourceError::Parse(format!("Invalid work summary: {}", e)))?;
            summaries.push(WorkSummary::from_wire(summary));
        }
    }
    Ok(summaries)
}

/// Parse a work detail body into contributor credit names, in registry order.
///
/// A contributor without `credit-name` is named [`UNKNOWN_AUTHOR`]; a null
/// `credit-name` fails the whole work.
pub fn parse_contributors_response(json: &str) -> Result<Vec<String>, SourceError> {
    let detail: WorkDetail = serde_json::from_str(json)
        .map_err(|e| SourceError::Parse(format!("Invalid ORCID work JSON: {}", e)))?;

    detail
        .contributors
        .and_then(|c| c.contributor)
        .unwrap_or_default()
        .into_iter()
        .map(|c| match c.credit_name {
            None => Ok(UNKNOWN_AUTHOR.to_string()),
            Some(Some(name)) => Ok(name.value.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())),
            Some(None) => Err(SourceError::Parse("Contributor credit-name is null".to_string())),
        })
        .collect()
}

// ===== Source =====

pub struct OrcidSource {
    client: HttpClient,
    api_base: String,
    concurrency: usize,
    policy: FailurePolicy,
}

impl OrcidSource {
    pub fn new(config: &OrcidConfig) -> Result<Self, SourceError> {
        let client = HttpClient::new(&config.user_agent, config.timeout)?;
        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            concurrency: config.concurrency.max(1),
            policy: config.policy,
        })
    }

    /// Works listing URL. A missing iD is rendered as `None`, unvalidated.
    pub fn works_url(&self, orcid_id: Option<&str>) -> String {
        format!("{}/v3.0/{}/works", self.api_base, orcid_id.unwrap_or("None"))
    }

    pub fn detail_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// List the works for `orcid_id`, each enriched with its contributors.
    ///
    /// Contributor failures follow the configured [`FailurePolicy`]: lenient
    /// leaves that work's author list empty, strict fails the whole listing.
    pub async fn fetch_publications(
        &self,
        orcid_id: Option<&str>,
    ) -> Result<Vec<WorkRecord>, SourceError> {
        let body = self.fetch_json(&self.works_url(orcid_id)).await?;
        let summaries = parse_works_response(&body)?;
        debug!(count = summaries.len(), "parsed work summaries");

        stream::iter(summaries)
            .map(move |summary| async move {
                let authors = self.authors_for(summary.path.as_deref()).await?;
                Ok::<_, SourceError>(summary.into_record(authors))
            })
            .buffered(self.concurrency)
            .try_collect()
            .await
    }

    /// Like [`fetch_publications`](Self::fetch_publications) but any failure
    /// yields an empty list.
    pub async fn fetch_publications_or_empty(&self, orcid_id: Option<&str>) -> Vec<WorkRecord> {
        self.fetch_publications(orcid_id)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "could not list works");
                Vec::new()
            })
    }

    /// Credit names on the work at `detail_path`
    pub async fn fetch_contributors(
        &self,
        detail_path: Option<&str>,
    ) -> Result<Vec<String>, SourceError> {
        let path = detail_path.ok_or(SourceError::MissingPath)?;
        let body = self.fetch_json(&self.detail_url(path)).await?;
        parse_contributors_response(&body)
    }

    pub async fn fetch_contributors_or_empty(&self, detail_path: Option<&str>) -> Vec<String> {
        self.fetch_contributors(detail_path)
            .await
            .unwrap_or_else(|e| {
                debug!(error = %e, path = ?detail_path, "could not fetch contributors");
                Vec::new()
            })
    }

    async fn authors_for(&self, detail_path: Option<&str>) -> Result<Vec<String>, SourceError> {
        match self.policy {
            FailurePolicy::Strict => self.fetch_contributors(detail_path).await,
            FailurePolicy::Lenient => Ok(self.fetch_contributors_or_empty(detail_path).await),
        }
    }

    async fn fetch_json(&self, url: &str) -> Result<String, SourceError> {
        debug!(url, "GET");
        let response = self.client.get_json(url).await?;

        if response.status == 404 {
            return Err(SourceError::NotFound {
                url: url.to_string(),
            });
        }
        if !response.is_success() {
            return Err(SourceError::Status {
                status: response.status,
                url: url.to_string(),
            });
        }
        Ok(response.body)
    }
}
