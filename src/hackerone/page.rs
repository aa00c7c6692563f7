//! Typed page responses
//!
//! Nodes and edges stay optional so that entries the server nulled out
//! (timeouts, truncation) reach the scan instead of failing decoding.

use serde::Deserialize;
use serde_json::{Map, Value};

/// The `data` member of one programs page
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub programs: ProgramConnection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgramConnection {
    #[serde(rename = "pageInfo", alias = "page_info")]
    pub page_info: PageInfo,
    #[serde(default, alias = "totalCount")]
    pub total_count: Option<u64>,
    /// `None` when the server returned `edges: null`
    #[serde(default)]
    pub edges: Option<Vec<Option<Edge<RawProgram>>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default, alias = "end_cursor")]
    pub end_cursor: Option<String>,
    #[serde(default, alias = "has_next_page")]
    pub has_next_page: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge<N> {
    pub node: Option<N>,
}

/// A program node: selected scalar fields plus its nested scopes
#[derive(Debug, Clone, Deserialize)]
pub struct RawProgram {
    #[serde(default)]
    pub scopes: Option<ScopeConnection>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScopeConnection {
    #[serde(default, alias = "totalCount")]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub edges: Option<Vec<Option<Edge<RawScope>>>>,
}

/// A scope node's selected scalar fields
pub type RawScope = Map<String, Value>;

impl RawProgram {
    /// No fields and no scopes, as returned for a timed-out program
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.scopes.is_none()
    }

    /// Display name for error messages
    pub fn label(&self) -> String {
        ["handle", "name"]
            .iter()
            .find_map(|key| self.fields.get(*key).and_then(Value::as_str))
            .unwrap_or("<unnamed>")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_null_edges_and_nodes() {
        let page: Page = serde_json::from_value(json!({
            "programs": {
                "pageInfo": { "endCursor": "MQ", "hasNextPage": true },
                "total_count": 3,
                "edges": [
                    { "node": { "name": "Acme", "url": "https://hackerone.com/acme" } },
                    null,
                    { "node": null }
                ]
            }
        }))
        .unwrap();

        let edges = page.programs.edges.unwrap();
        assert_eq!(edges.len(), 3);
        assert!(edges[0].as_ref().unwrap().node.is_some());
        assert!(edges[1].is_none());
        assert!(edges[2].as_ref().unwrap().node.is_none());
        assert_eq!(page.programs.page_info.end_cursor.as_deref(), Some("MQ"));
        assert!(page.programs.page_info.has_next_page);
        assert_eq!(page.programs.total_count, Some(3));
    }

    #[test]
    fn empty_program_object_is_empty() {
        let program: RawProgram = serde_json::from_value(json!({})).unwrap();
        assert!(program.is_empty());
        assert_eq!(program.label(), "<unnamed>");
    }

    #[test]
    fn accepts_snake_case_page_info() {
        let page: Page = serde_json::from_value(json!({
            "programs": {
                "page_info": { "end_cursor": null, "has_next_page": false },
                "edges": []
            }
        }))
        .unwrap();

        assert!(page.programs.page_info.end_cursor.is_none());
        assert!(!page.programs.page_info.has_next_page);
    }

    #[test]
    fn splits_program_fields_from_scopes() {
        let program: RawProgram = serde_json::from_value(json!({
            "handle": "acme",
            "name": "Acme",
            "scopes": { "total_count": 1, "edges": [{ "node": { "asset_identifier": "a" } }] }
        }))
        .unwrap();

        assert_eq!(program.label(), "acme");
        assert!(!program.is_empty());
        assert!(!program.fields.contains_key("scopes"));
        let scopes = program.scopes.unwrap();
        assert_eq!(scopes.edges.unwrap().len(), 1);
    }
}
