//! Error types for schema loading, querying and scanning

/// Failure inside the transport collaborator
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] Box<ureq::Error>),

    #[error("Failed to decode response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("Response has no data")]
    MissingData,
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        Self::Http(Box::new(err))
    }
}

/// Failure of a scan or of building its query
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// A type or field the query depends on is missing from the schema
    #[error("Schema error: {0}")]
    Schema(String),

    /// The remote returned a null entry where a full node was expected
    #[error("Partial result: {0}")]
    PartialResult(String),

    /// A nested scopes page came back full, so entries may have been dropped
    #[error("Program '{program}' returned {limit} scopes, the page size limit; scopes need pagination")]
    PaginationLimit { program: String, limit: usize },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ScanError {
    pub(crate) fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    pub(crate) fn partial(msg: impl Into<String>) -> Self {
        Self::PartialResult(msg.into())
    }
}
