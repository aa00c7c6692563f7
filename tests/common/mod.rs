//! Shared fixtures for scanner tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use serde_json::{json, Value};

use bounty_targets::hackerone::{
    FieldMeta, Page, QueryDocument, SCOPE_FIELDS, Schema, Transport, TransportError, Variables,
};

/// Schema exposing the HackerOne types the scanner queries
pub fn hackerone_schema() -> Schema {
    let mut team: Vec<FieldMeta> = ["handle", "name", "url", "offers_bounties", "offers_swag"]
        .into_iter()
        .map(FieldMeta::scalar)
        .collect();
    team.push(FieldMeta::scalar("submission_state"));
    team.push(FieldMeta::with_arguments("structured_scopes"));

    let mut scope: Vec<FieldMeta> = SCOPE_FIELDS.iter().copied().map(FieldMeta::scalar).collect();
    scope.push(FieldMeta::scalar("created_at"));

    Schema::new()
        .with_type("Team", team)
        .with_type("StructuredScope", scope)
        .with_type(
            "PageInfo",
            vec![
                FieldMeta::scalar("endCursor"),
                FieldMeta::scalar("hasNextPage"),
            ],
        )
}

/// A scope node with every projected attribute set
pub fn scope(id: &str, asset_type: &str, eligible: bool) -> Value {
    json!({
        "asset_identifier": id,
        "asset_type": asset_type,
        "availability_requirement": null,
        "confidentiality_requirement": "high",
        "eligible_for_bounty": eligible,
        "eligible_for_submission": eligible,
        "instruction": "",
        "integrity_requirement": "high",
        "max_severity": "critical"
    })
}

/// A program node whose scope edges wrap `scopes`
pub fn program(handle: &str, scopes: Vec<Value>) -> Value {
    let edges: Vec<Value> = scopes.into_iter().map(|node| json!({ "node": node })).collect();
    program_with_edges(handle, Value::Array(edges))
}

/// A program node with raw scope edges, for injecting nulls
pub fn program_with_edges(handle: &str, edges: Value) -> Value {
    json!({
        "handle": handle,
        "name": handle.to_uppercase(),
        "url": format!("https://hackerone.com/{}", handle),
        "offers_bounties": true,
        "offers_swag": false,
        "submission_state": "open",
        "scopes": { "total_count": edges.as_array().map_or(0, Vec::len), "edges": edges }
    })
}

/// One programs page; `cursor` is the end cursor handed to the next request
pub fn page(nodes: Vec<Value>, cursor: Option<&str>, has_next: bool) -> Value {
    let edges: Vec<Value> = nodes.into_iter().map(|node| json!({ "node": node })).collect();
    page_with_edges(Value::Array(edges), cursor, has_next)
}

pub fn page_with_edges(edges: Value, cursor: Option<&str>, has_next: bool) -> Value {
    json!({
        "programs": {
            "pageInfo": { "endCursor": cursor, "hasNextPage": has_next },
            "total_count": null,
            "edges": edges
        }
    })
}

/// Transport serving canned pages in sequence.
///
/// Page `i` is served for the request whose `after` equals the end cursor
/// of page `i - 1`, so repeated scans replay from the start.
pub struct MockTransport {
    schema: Schema,
    pages: RefCell<Vec<Value>>,
    requests: RefCell<Vec<Option<String>>>,
    schema_loads: Cell<usize>,
}

impl MockTransport {
    pub fn new(pages: Vec<Value>) -> Self {
        Self {
            schema: hackerone_schema(),
            pages: RefCell::new(pages),
            requests: RefCell::new(Vec::new()),
            schema_loads: Cell::new(0),
        }
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    /// Replace a canned page, e.g. to let a retried scan succeed
    pub fn set_page(&self, index: usize, page: Value) {
        self.pages.borrow_mut()[index] = page;
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// `after` variable of every request, in order
    pub fn cursors(&self) -> Vec<Option<String>> {
        self.requests.borrow().clone()
    }

    pub fn schema_loads(&self) -> usize {
        self.schema_loads.get()
    }

    fn page_index(&self, after: Option<&str>) -> usize {
        let Some(after) = after else {
            return 0;
        };
        let pages = self.pages.borrow();
        pages
            .iter()
            .position(|p| p["programs"]["pageInfo"]["endCursor"].as_str() == Some(after))
            .map_or(pages.len(), |i| i + 1)
    }
}

impl Transport for MockTransport {
    fn load_schema(&self) -> Result<Schema, TransportError> {
        self.schema_loads.set(self.schema_loads.get() + 1);
        Ok(self.schema.clone())
    }

    fn execute(&self, query: &QueryDocument, variables: &Variables) -> Result<Page, TransportError> {
        assert!(query.text().contains("$after"));
        self.requests.borrow_mut().push(variables.after.clone());

        let index = self.page_index(variables.after.as_deref());
        let page = self
            .pages
            .borrow()
            .get(index)
            .cloned()
            .ok_or(TransportError::MissingData)?;
        Ok(serde_json::from_value(page)?)
    }
}
