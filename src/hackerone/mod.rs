//! HackerOne program scope scanner
//!
//! Walks the cursor-paginated programs → scopes collection and normalizes it
//! into a sorted, grouped `ResultSet`.
//!
//! # Architecture
//!
//! ```text
//!   Transport::load_schema ──► Schema ──► build_query ──► QueryDocument
//!                                                              │
//!   Transport::execute(after) ◄──────── cursor ◄───────────────┤
//!            │                                                 │
//!            ▼                                                 │
//!          Page ──► validate nodes ──► normalize ──► ResultSet ┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let scanner = Scanner::new(HttpTransport::new());
//!
//! for program in scanner.scan()? {
//!     println!("{}: {} in scope", program.name, program.targets.in_scope.len());
//! }
//!
//! let urls = scanner.uris()?;
//! ```

mod error;
mod models;
mod normalize;
mod page;
mod query;
mod schema;
mod transport;

pub use error::{ScanError, TransportError};
pub use models::{Program, ResultSet, Scope, Targets, URL_ASSET_TYPE};
pub use normalize::{PROGRAM_FIELDS, SCOPE_FIELDS, normalize, partition_scopes};
pub use page::{Edge, Page, PageInfo, ProgramConnection, RawProgram, RawScope, ScopeConnection};
pub use query::{
    DEFAULT_INNER_PAGE_SIZE, DEFAULT_OUTER_PAGE_SIZE, FieldSet, QueryDocument, QueryOptions,
    build_query,
};
pub use schema::{FieldMeta, INTROSPECTION_QUERY, Schema};
pub use transport::{DEFAULT_ENDPOINT, HttpTransport, Transport, Variables};

use once_cell::sync::OnceCell;

/// Scans every program once and memoizes the result.
///
/// The schema, query document and result set are each initialized at most
/// once. A failed scan leaves the result unset, so the next call starts over.
pub struct Scanner<T: Transport = HttpTransport> {
    transport: T,
    options: QueryOptions,
    schema: OnceCell<Schema>,
    query: OnceCell<QueryDocument>,
    results: OnceCell<ResultSet>,
}

impl<T: Transport> Scanner<T> {
    /// Create a scanner with the default HackerOne query options
    pub fn new(transport: T) -> Self {
        Self::with_options(transport, QueryOptions::default())
    }

    pub fn with_options(transport: T, options: QueryOptions) -> Self {
        Self {
            transport,
            options,
            schema: OnceCell::new(),
            query: OnceCell::new(),
            results: OnceCell::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// The introspected schema, loaded on first use
    pub fn schema(&self) -> Result<&Schema, ScanError> {
        self.schema.get_or_try_init(|| -> Result<Schema, ScanError> {
            let schema = self.transport.load_schema()?;
            tracing::info!("Loaded schema with {} types", schema.type_count());
            Ok(schema)
        })
    }

    /// The programs query, built from the schema on first use
    pub fn query(&self) -> Result<&QueryDocument, ScanError> {
        self.query
            .get_or_try_init(|| -> Result<QueryDocument, ScanError> {
                build_query(self.schema()?, &self.options)
            })
    }

    /// Fetch and normalize every program.
    ///
    /// The first successful call does the work; later calls return the same
    /// cached `ResultSet` without touching the transport.
    pub fn scan(&self) -> Result<&ResultSet, ScanError> {
        self.results.get_or_try_init(|| self.run_scan())
    }

    /// In-scope URL identifiers across all programs
    pub fn uris(&self) -> Result<Vec<String>, ScanError> {
        Ok(self.scan()?.uris())
    }

    fn run_scan(&self) -> Result<ResultSet, ScanError> {
        let query = self.query()?;
        let mut results = ResultSet::new();
        let mut variables = Variables::default();
        let mut pages = 0usize;
        let mut expected = None;

        loop {
            tracing::debug!("Requesting programs page {} (after: {:?})", pages + 1, variables.after);
            let page = self.transport.execute(query, &variables)?;
            pages += 1;

            let connection = page.programs;
            expected = connection.total_count.or(expected);

            let edges = connection.edges.ok_or_else(|| {
                ScanError::partial(format!("programs page {} has no edges", pages))
            })?;

            let nodes = edges
                .into_iter()
                .map(|edge| edge.and_then(|e| e.node).filter(|node| !node.is_empty()))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| ScanError::partial("some programs timed out"))?;

            for node in nodes {
                results.push(normalize(node, query.inner_page_size())?);
            }

            if !connection.page_info.has_next_page {
                break;
            }

            match connection.page_info.end_cursor {
                Some(cursor) => variables.after = Some(cursor),
                None => {
                    return Err(ScanError::partial(format!(
                        "programs page {} has a next page but no end cursor",
                        pages
                    )));
                }
            }
        }

        if let Some(expected) = expected {
            if expected != results.len() as u64 {
                tracing::warn!(
                    "Server reported {} programs but {} were received",
                    expected,
                    results.len()
                );
            }
        }

        tracing::info!("Scanned {} programs in {} pages", results.len(), pages);
        Ok(results)
    }
}
