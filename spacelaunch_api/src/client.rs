//! HTTP client for the launch GraphQL endpoint.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{LaunchListQuery, Query},
    types::{GraphQlResponse, LaunchListData},
    Error,
};

/// Public Apollo tutorial server that hosts the launch schema.
pub const DEFAULT_ENDPOINT: &str = "https://apollo-fullstack-tutorial.herokuapp.com/graphql";

/// GraphQL-over-HTTP client.
///
/// Each request builds a fresh `reqwest::Client` with a 30-second timeout
/// and POSTs the operation as JSON.
#[derive(Clone, Debug)]
pub struct Client {
    /// GraphQL endpoint. Defaults to [`DEFAULT_ENDPOINT`].
    endpoint: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the public tutorial endpoint.
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Creates a new client with a custom endpoint. Used for testing with wiremock.
    pub fn with_base_url(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn get_url(&self) -> Result<Url, Error> {
        Url::parse(&self.endpoint).map_err(|e| {
            tracing::error!("Invalid endpoint URL {}: {}", self.endpoint, e);
            Error::RequestFailed
        })
    }

    async fn post<T, Q>(&self, query: &Q) -> Result<GraphQlResponse<T>, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .post(url)
            .header("content-type", "application/json")
            .header("accept", "application/json")
            .header("x-apollo-operation-name", query.operation_name())
            .json(&query.to_request_body())
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to execute {}: {}", query.operation_name(), e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<GraphQlResponse<T>>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse response: {} | body: {}", e, snippet);
            Error::RequestFailed
        })?;

        Ok(parsed)
    }

    /// Executes `LaunchList`, returning the raw envelope (data and errors may both be set).
    pub async fn get_launches(
        &self,
        query: &LaunchListQuery,
    ) -> Result<GraphQlResponse<LaunchListData>, Error> {
        self.post::<LaunchListData, LaunchListQuery>(query).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
