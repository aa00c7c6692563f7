//! Normalized program and scope records

use serde::{Deserialize, Serialize};

/// URL asset type as reported by the remote schema
pub const URL_ASSET_TYPE: &str = "URL";

/// A bug-bounty program with its scopes split into two buckets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub name: String,
    pub url: String,
    pub offers_bounties: Option<bool>,
    pub offers_swag: Option<bool>,
    /// Scopes partitioned by `eligible_for_submission`
    pub targets: Targets,
}

/// In-scope and out-of-scope assets, each sorted by `asset_identifier`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    pub in_scope: Vec<Scope>,
    pub out_of_scope: Vec<Scope>,
}

/// One asset definition under a program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scope {
    pub asset_identifier: String,
    /// e.g. "URL", "WILDCARD", "GOOGLE_PLAY_APP_ID"
    pub asset_type: String,
    pub availability_requirement: Option<String>,
    pub confidentiality_requirement: Option<String>,
    pub eligible_for_bounty: Option<bool>,
    pub eligible_for_submission: Option<bool>,
    pub instruction: Option<String>,
    pub integrity_requirement: Option<String>,
    pub max_severity: Option<String>,
}

impl Scope {
    /// Whether this scope belongs in the in-scope bucket.
    ///
    /// A missing flag counts as not eligible, same as an explicit `false`.
    pub fn is_in_scope(&self) -> bool {
        self.eligible_for_submission == Some(true)
    }

    pub fn is_url(&self) -> bool {
        self.asset_type == URL_ASSET_TYPE
    }
}

/// Every program returned by a scan, in the order pages were received
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    programs: Vec<Program>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, program: Program) {
        self.programs.push(program);
    }

    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Program> {
        self.programs.iter()
    }

    /// In-scope URL identifiers, in program order then sorted-scope order.
    pub fn uris(&self) -> Vec<String> {
        self.programs
            .iter()
            .flat_map(|program| program.targets.in_scope.iter())
            .filter(|scope| scope.is_url())
            .map(|scope| scope.asset_identifier.clone())
            .collect()
    }
}

impl From<Vec<Program>> for ResultSet {
    fn from(programs: Vec<Program>) -> Self {
        Self { programs }
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Program;
    type IntoIter = std::slice::Iter<'a, Program>;

    fn into_iter(self) -> Self::IntoIter {
        self.programs.iter()
    }
}
