//! Native HTTP client using reqwest

use super::{HttpError, HttpResponse};
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;

const JSON: &str = "application/json";

pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    /// Build a client. Without a timeout, requests block until the peer answers.
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| HttpError::ClientBuild {
            message: e.to_string(),
        })?;

        Ok(Self {
            client,
            user_agent: user_agent.to_string(),
        })
    }

    /// GET `url` asking for a JSON body. Any status is returned as-is.
    pub async fn get_json(&self, url: &str) -> Result<HttpResponse, HttpError> {
        let url = reqwest::Url::parse(url).map_err(|_| HttpError::InvalidUrl {
            url: url.to_string(),
        })?;

        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header(ACCEPT, JSON)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    HttpError::Timeout
                } else {
                    HttpError::RequestFailed {
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status().as_u16();

        let body = response.text().await.map_err(|e| HttpError::Body {
            message: e.to_string(),
        })?;

        Ok(HttpResponse { status, body })
    }
}
