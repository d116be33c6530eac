//! SPARQL endpoint client.
//!
//! Issues one SELECT query per call and either returns the decoded result
//! set or streams it into a [`ResultConsumer`].

mod auth;
mod types;

pub use auth::{digest_response, is_digest_challenge, AuthMode, Credentials, EndpointTarget};
pub use types::{BindingRow, Bindings, Head, ResultSet, Value};

use crate::consumer::{stream, ResultConsumer};
use crate::error::{Result, StepsError};
use reqwest::header::{ACCEPT, AUTHORIZATION, WWW_AUTHENTICATE};
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, info};
use url::{Position, Url};

/// Content type requested from the endpoint.
pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Client bound to a single endpoint.
#[derive(Debug, Clone)]
pub struct SparqlClient {
    target: EndpointTarget,
    http: Client,
}

impl SparqlClient {
    /// Creates a client for the given target.
    ///
    /// No timeout is set; transport defaults apply.
    pub fn new(target: EndpointTarget) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| StepsError::request(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { target, http })
    }

    pub fn target(&self) -> &EndpointTarget {
        &self.target
    }

    /// Runs the query and returns the whole result set.
    pub async fn fetch(&self, query: &str) -> Result<ResultSet> {
        if query.trim().is_empty() {
            return Err(StepsError::request("Query must not be empty"));
        }

        let url = self.query_url(query);
        let auth = self.target.effective_auth();
        debug!(endpoint = %self.target.url(), %auth, "sending query");

        let mut response = self.send(&url, None).await?;

        if response.status() == StatusCode::UNAUTHORIZED && auth == AuthMode::Digest {
            if let Some(authorization) = self.answer_challenge(&response, &url) {
                debug!("answering digest challenge");
                response = self.send(&url, Some(authorization)).await?;
            }
        }

        let status = response.status();
        debug!(%status, "endpoint responded");
        check_status(status, &self.target)?;

        let body = response
            .text()
            .await
            .map_err(|e| StepsError::request(format!("Failed to read response: {e}")))?;
        let results = ResultSet::from_json(&body)?;

        info!(
            columns = results.columns().len(),
            rows = results.len(),
            "query returned"
        );
        Ok(results)
    }

    /// Runs the query and streams the result set into `consumer`.
    ///
    /// No callback fires if the request fails.
    pub async fn execute(&self, query: &str, consumer: &mut dyn ResultConsumer) -> Result<()> {
        let results = self.fetch(query).await?;
        stream(&results, consumer).await;
        Ok(())
    }

    /// Returns the result set when no consumer is given, otherwise streams it
    /// and returns `None`.
    pub async fn execute_with(
        &self,
        query: &str,
        consumer: Option<&mut dyn ResultConsumer>,
    ) -> Result<Option<ResultSet>> {
        match consumer {
            Some(consumer) => self.execute(query, consumer).await.map(|()| None),
            None => self.fetch(query).await.map(Some),
        }
    }

    fn query_url(&self, query: &str) -> Url {
        let mut url = self.target.url().clone();
        url.query_pairs_mut().append_pair("query", query);
        url
    }

    async fn send(&self, url: &Url, authorization: Option<String>) -> Result<Response> {
        let mut request = self.http.get(url.clone()).header(ACCEPT, SPARQL_RESULTS_JSON);

        if let Some(value) = authorization {
            request = request.header(AUTHORIZATION, value);
        } else if let (AuthMode::Basic, Some(credentials)) =
            (self.target.effective_auth(), self.target.credentials())
        {
            request = request.basic_auth(&credentials.user, Some(&credentials.password));
        }

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                StepsError::request(format!("Request to {} timed out", self.target.url()))
            } else if e.is_connect() {
                StepsError::request(format!("Failed to connect to {}", self.target.url()))
            } else {
                StepsError::request(e.to_string())
            }
        })
    }

    /// Builds the `Authorization` value for a digest challenge.
    ///
    /// `None` when no usable challenge was offered; the 401 then stands.
    fn answer_challenge(&self, response: &Response, url: &Url) -> Option<String> {
        let credentials = self.target.credentials()?;
        let challenge = response
            .headers()
            .get_all(WWW_AUTHENTICATE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find(|value| is_digest_challenge(value))?;

        let uri = &url[Position::BeforePath..];
        match digest_response(challenge, credentials, uri) {
            Ok(authorization) => Some(authorization),
            Err(e) => {
                debug!("ignoring digest challenge: {e}");
                None
            }
        }
    }
}

/// Maps an endpoint status to the error taxonomy.
pub fn check_status(status: StatusCode, target: &EndpointTarget) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }

    match status {
        StatusCode::NOT_FOUND => Err(StepsError::NotFound {
            endpoint: target.url().to_string(),
        }),
        StatusCode::UNAUTHORIZED => {
            let (user, password) = target
                .credentials()
                .map(|c| (c.user.clone(), c.password.clone()))
                .unwrap_or_default();
            Err(StepsError::Unauthorized { user, password })
        }
        s if s.is_server_error() => Err(StepsError::ServerError { status: s.as_u16() }),
        s => Err(StepsError::request(format!("Endpoint returned {s}"))),
    }
}
