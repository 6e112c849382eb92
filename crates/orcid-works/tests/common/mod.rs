//! In-process stand-in for the ORCID API
//!
//! Serves canned bodies by exact request path and records what it was asked.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::{header::ACCEPT, HeaderMap, StatusCode, Uri};
use axum::Router;
use tokio::net::TcpListener;

pub const ORCID_ID: &str = "0000-0001-2345-6789";

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: String,
    delay: Duration,
}

#[derive(Clone, Debug)]
pub struct SeenRequest {
    pub path: String,
    pub accept: Option<String>,
}

#[derive(Default)]
pub struct MockRegistry {
    routes: HashMap<String, Canned>,
}

pub struct RunningRegistry {
    pub base_url: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(self, path: &str, body: &str) -> Self {
        self.respond(path, StatusCode::OK, body, Duration::ZERO)
    }

    pub fn status(self, path: &str, status: u16) -> Self {
        let status = StatusCode::from_u16(status).unwrap();
        self.respond(path, status, "", Duration::ZERO)
    }

    pub fn delayed_json(self, path: &str, body: &str, delay: Duration) -> Self {
        self.respond(path, StatusCode::OK, body, delay)
    }

    fn respond(mut self, path: &str, status: StatusCode, body: &str, delay: Duration) -> Self {
        self.routes.insert(
            path.to_string(),
            Canned {
                status,
                body: body.to_string(),
                delay,
            },
        );
        self
    }

    pub async fn start(self) -> RunningRegistry {
        let routes = Arc::new(self.routes);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();

        let app = Router::new().fallback(move |uri: Uri, headers: HeaderMap| {
            let routes = routes.clone();
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push(SeenRequest {
                    path: uri.path().to_string(),
                    accept: headers
                        .get(ACCEPT)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string),
                });
                match routes.get(uri.path()) {
                    Some(canned) => {
                        tokio::time::sleep(canned.delay).await;
                        (canned.status, canned.body.clone())
                    }
                    None => (StatusCode::NOT_FOUND, String::new()),
                }
            }
        });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        RunningRegistry {
            base_url: format!("http://{}", addr),
            seen,
        }
    }
}

impl RunningRegistry {
    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

/// An address nothing is listening on
pub async fn closed_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn works_path(orcid_id: &str) -> String {
    format!("/v3.0/{}/works", orcid_id)
}

/// One summary object as the works listing serves it
pub fn summary(title: &str, year: &str, doi: Option<&str>, path: &str) -> String {
    let ids = doi
        .map(|d| format!(r#"{{"external-id-type": "doi", "external-id-value": "{}"}}"#, d))
        .unwrap_or_default();
    format!(
        r#"{{
            "title": {{"title": {{"value": "{title}"}}}},
            "publication-date": {{"year": {{"value": "{year}"}}}},
            "external-ids": {{"external-id": [{ids}]}},
            "path": "{path}"
        }}"#
    )
}

/// A works listing with one group per summary
pub fn works_body(summaries: &[String]) -> String {
    let groups: Vec<String> = summaries
        .iter()
        .map(|s| format!(r#"{{"work-summary": [{}]}}"#, s))
        .collect();
    format!(r#"{{"group": [{}]}}"#, groups.join(","))
}

pub fn contributors_body(names: &[&str]) -> String {
    let entries: Vec<String> = names
        .iter()
        .map(|n| format!(r#"{{"credit-name": {{"value": "{}"}}}}"#, n))
        .collect();
    format!(r#"{{"contributors": {{"contributor": [{}]}}}}"#, entries.join(","))
}
