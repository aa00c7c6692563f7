//! GraphQL transport
//!
//! The scan only needs two primitives from the remote side: introspect the
//! schema once, and run the programs query for a given cursor.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::TransportError;
use super::page::Page;
use super::query::QueryDocument;
use super::schema::{INTROSPECTION_QUERY, Schema};

/// Default HackerOne GraphQL endpoint
pub const DEFAULT_ENDPOINT: &str = "https://hackerone.com/graphql";

/// Query variables for one page request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Variables {
    /// End cursor of the previous page, `None` for the first page
    pub after: Option<String>,
}

/// Source of schema and pages for a scan
pub trait Transport {
    fn load_schema(&self) -> Result<Schema, TransportError>;

    fn execute(&self, query: &QueryDocument, variables: &Variables) -> Result<Page, TransportError>;
}

#[derive(Serialize)]
struct Request<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<ResponseError>>,
}

#[derive(Deserialize)]
struct ResponseError {
    message: String,
}

/// Blocking HTTP transport
#[derive(Clone)]
pub struct HttpTransport {
    endpoint: String,
    user_agent: String,
    agent: ureq::Agent,
}

impl HttpTransport {
    /// Create a transport for the default endpoint
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Create a transport for a custom endpoint with default timeouts
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self::with_timeouts(endpoint, Duration::from_secs(10), Duration::from_secs(120))
    }

    pub fn with_timeouts(endpoint: impl Into<String>, connect: Duration, read: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(connect)
            .timeout_read(read)
            .build();

        Self {
            endpoint: endpoint.into(),
            user_agent: concat!("bounty-targets/", env!("CARGO_PKG_VERSION")).to_string(),
            agent,
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST a GraphQL request and return its `data` member
    fn post<V: Serialize>(&self, query: &str, variables: V) -> Result<Value, TransportError> {
        let reader = self
            .agent
            .post(&self.endpoint)
            .set("User-Agent", &self.user_agent)
            .set("Accept", "application/json")
            .send_json(Request { query, variables })?
            .into_reader();

        let response: Response = serde_json::from_reader(reader)?;
        let messages: Vec<String> = response
            .errors
            .unwrap_or_default()
            .into_iter()
            .map(|e| e.message)
            .collect();

        match response.data {
            Some(data) if !data.is_null() => {
                if !messages.is_empty() {
                    tracing::warn!(
                        "GraphQL response carried {} error(s) alongside data: {}",
                        messages.len(),
                        messages.join("; ")
                    );
                }
                Ok(data)
            }
            _ if !messages.is_empty() => Err(TransportError::GraphQl(messages)),
            _ => Err(TransportError::MissingData),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn load_schema(&self) -> Result<Schema, TransportError> {
        let data = self.post(INTROSPECTION_QUERY, serde_json::json!({}))?;
        Ok(Schema::from_introspection(data)?)
    }

    fn execute(&self, query: &QueryDocument, variables: &Variables) -> Result<Page, TransportError> {
        let data = self.post(query.text(), variables)?;
        Ok(serde_json::from_value(data)?)
    }
}
