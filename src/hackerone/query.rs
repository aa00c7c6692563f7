//! Query builder
//!
//! Derives the selection for programs and their scopes from the introspected
//! schema and renders one paginated query document.

use serde::{Deserialize, Serialize};

use super::error::ScanError;
use super::normalize::{PROGRAM_FIELDS, SCOPE_FIELDS};
use super::schema::Schema;

/// Programs per outer page. More than 10 teams per page makes the API drop
/// results without reporting an error.
pub const DEFAULT_OUTER_PAGE_SIZE: usize = 10;

/// Scopes requested per program. A program returning exactly this many is
/// treated as truncated.
pub const DEFAULT_INNER_PAGE_SIZE: usize = 100;

/// Response alias for the outer collection
pub(crate) const PROGRAMS_ALIAS: &str = "programs";

/// Response alias for the nested collection on each program node
pub(crate) const SCOPES_ALIAS: &str = "scopes";

const END_CURSOR: &str = "endCursor";
const HAS_NEXT_PAGE: &str = "hasNextPage";

/// Which types and collections to query, and how to page them
///
/// Field lists are derived from the live schema; only exclusions are listed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    pub outer_type: String,
    pub inner_type: String,
    pub page_info_type: String,
    /// Root field returning the program connection
    pub outer_collection: String,
    /// Field on the outer type returning the scope connection
    pub inner_collection: String,
    /// Connection field holding the total number of nodes
    pub count_field: String,
    /// Program fields never selected (e.g. the nested scopes collection)
    pub outer_excludes: Vec<String>,
    /// Scope fields never selected
    pub inner_excludes: Vec<String>,
    /// Programs per page. Larger pages make the API silently drop results.
    pub outer_page_size: usize,
    /// Scopes requested per program. A full page is reported as an error.
    pub inner_page_size: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            outer_type: "Team".to_string(),
            inner_type: "StructuredScope".to_string(),
            page_info_type: "PageInfo".to_string(),
            outer_collection: "teams".to_string(),
            inner_collection: "structured_scopes".to_string(),
            count_field: "total_count".to_string(),
            outer_excludes: vec![
                "structured_scopes".to_string(),
                "submission_state".to_string(),
            ],
            inner_excludes: vec!["created_at".to_string()],
            outer_page_size: DEFAULT_OUTER_PAGE_SIZE,
            inner_page_size: DEFAULT_INNER_PAGE_SIZE,
        }
    }
}

/// Selectable fields of one type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    type_name: String,
    fields: Vec<String>,
}

impl FieldSet {
    /// Argument-free leaf fields of `type_name`, in schema order, minus `excludes`.
    pub fn for_type(
        schema: &Schema,
        type_name: &str,
        excludes: &[String],
    ) -> Result<Self, ScanError> {
        let fields = schema
            .fields_of(type_name)
            .ok_or_else(|| ScanError::schema(format!("type '{}' not found", type_name)))?;

        let fields = fields
            .iter()
            .filter(|f| !f.has_arguments && f.leaf)
            .filter(|f| !excludes.iter().any(|e| e == &f.name))
            .map(|f| f.name.clone())
            .collect();

        Ok(Self {
            type_name: type_name.to_string(),
            fields,
        })
    }

    pub fn names(&self) -> &[String] {
        &self.fields
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f == name)
    }

    fn require(&self, names: &[&str]) -> Result<(), ScanError> {
        match names.iter().find(|name| !self.contains(name)) {
            Some(missing) => Err(ScanError::schema(format!(
                "field '{}.{}' is not selectable",
                self.type_name, missing
            ))),
            None => Ok(()),
        }
    }

    fn without(mut self, name: &str) -> Self {
        self.fields.retain(|f| f != name);
        self
    }

    fn joined(&self) -> String {
        self.fields.join(", ")
    }
}

/// A rendered query plus what the scan needs to interpret its pages
#[derive(Debug, Clone)]
pub struct QueryDocument {
    text: String,
    inner_page_size: usize,
    program_fields: FieldSet,
    scope_fields: FieldSet,
}

impl QueryDocument {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Scope count at which a program is considered truncated
    pub fn inner_page_size(&self) -> usize {
        self.inner_page_size
    }

    pub fn program_fields(&self) -> &FieldSet {
        &self.program_fields
    }

    pub fn scope_fields(&self) -> &FieldSet {
        &self.scope_fields
    }
}

/// Build the paginated programs → scopes query for `schema`.
pub fn build_query(schema: &Schema, options: &QueryOptions) -> Result<QueryDocument, ScanError> {
    let program_fields = FieldSet::for_type(schema, &options.outer_type, &options.outer_excludes)?
        .without(SCOPES_ALIAS);
    let scope_fields = FieldSet::for_type(schema, &options.inner_type, &options.inner_excludes)?;
    let page_info_fields = FieldSet::for_type(schema, &options.page_info_type, &[])?;

    program_fields.require(PROGRAM_FIELDS)?;
    scope_fields.require(SCOPE_FIELDS)?;
    page_info_fields.require(&[END_CURSOR, HAS_NEXT_PAGE])?;

    let has_inner_collection = schema
        .fields_of(&options.outer_type)
        .unwrap_or_default()
        .iter()
        .any(|f| f.name == options.inner_collection);
    if !has_inner_collection {
        return Err(ScanError::schema(format!(
            "field '{}.{}' not found",
            options.outer_type, options.inner_collection
        )));
    }

    let text = format!(
        r#"query($after: String) {{
  {programs}: {outer}(first: {outer_size}, after: $after) {{
    pageInfo {{
      {page_info}
    }}
    total_count: {count}
    edges {{
      node {{
        {program_fields}
        {scopes}: {inner}(first: {inner_size}) {{
          total_count: {count}
          edges {{
            node {{
              {scope_fields}
            }}
          }}
        }}
      }}
    }}
  }}
}}"#,
        programs = PROGRAMS_ALIAS,
        outer = options.outer_collection,
        outer_size = options.outer_page_size,
        page_info = page_info_fields.joined(),
        count = options.count_field,
        program_fields = program_fields.joined(),
        scopes = SCOPES_ALIAS,
        inner = options.inner_collection,
        inner_size = options.inner_page_size,
        scope_fields = scope_fields.joined(),
    );

    Ok(QueryDocument {
        text,
        inner_page_size: options.inner_page_size,
        program_fields,
        scope_fields,
    })
}
