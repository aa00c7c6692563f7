//! Reshape raw program nodes into canonical `Program` records

use serde::Deserialize;
use serde_json::Value;

use super::error::{ScanError, TransportError};
use super::models::{Program, Scope, Targets};
use super::page::{RawProgram, RawScope};

/// Program attributes kept after normalization
pub const PROGRAM_FIELDS: &[&str] = &["name", "url", "offers_bounties", "offers_swag"];

/// Scope attributes kept after normalization
pub const SCOPE_FIELDS: &[&str] = &[
    "asset_identifier",
    "asset_type",
    "availability_requirement",
    "confidentiality_requirement",
    "eligible_for_bounty",
    "eligible_for_submission",
    "instruction",
    "integrity_requirement",
    "max_severity",
];

#[derive(Deserialize)]
struct ProgramFields {
    name: String,
    url: String,
    #[serde(default)]
    offers_bounties: Option<bool>,
    #[serde(default)]
    offers_swag: Option<bool>,
}

/// Project a raw program node and its scopes.
///
/// Fails with `PaginationLimit` when the scope list is exactly `inner_limit`
/// long, and with `PartialResult` when any scope edge or node is null or empty.
pub fn normalize(raw: RawProgram, inner_limit: usize) -> Result<Program, ScanError> {
    let label = raw.label();

    let edges = raw.scopes.and_then(|c| c.edges).unwrap_or_default();
    if edges.len() == inner_limit {
        return Err(ScanError::PaginationLimit {
            program: label,
            limit: inner_limit,
        });
    }

    let scopes = edges
        .into_iter()
        .map(|edge| match edge.and_then(|e| e.node) {
            Some(node) if !node.is_empty() => project_scope(node),
            _ => Err(ScanError::partial(format!(
                "some scopes of program '{}' timed out",
                label
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let fields: ProgramFields = serde_json::from_value(Value::Object(raw.fields))
        .map_err(TransportError::from)?;

    Ok(Program {
        name: fields.name,
        url: fields.url,
        offers_bounties: fields.offers_bounties,
        offers_swag: fields.offers_swag,
        targets: partition_scopes(scopes),
    })
}

fn project_scope(node: RawScope) -> Result<Scope, ScanError> {
    serde_json::from_value(Value::Object(node)).map_err(|e| TransportError::from(e).into())
}

/// Split scopes into in-scope and out-of-scope buckets, each sorted by
/// `asset_identifier`. A missing `eligible_for_submission` counts as `false`.
/// Equal identifiers keep their original relative order.
pub fn partition_scopes(scopes: Vec<Scope>) -> Targets {
    let (mut in_scope, mut out_of_scope): (Vec<_>, Vec<_>) =
        scopes.into_iter().partition(Scope::is_in_scope);

    in_scope.sort_by(|a, b| a.asset_identifier.cmp(&b.asset_identifier));
    out_of_scope.sort_by(|a, b| a.asset_identifier.cmp(&b.asset_identifier));

    Targets {
        in_scope,
        out_of_scope,
    }
}
