//! bounty-targets - HackerOne program scope scanner
//!
//! Retrieves every bug-bounty program and its scope definitions from the
//! HackerOne GraphQL API and normalizes them into a stable structure:
//! programs in the order the API returns them, each with its scopes split
//! into in-scope and out-of-scope lists sorted by asset identifier.
//!
//! ## Pieces
//!
//! 1. **Query builder**: selects every argument-free scalar field of the
//!    program and scope types from the introspected schema.
//! 2. **Scanner**: pages through programs until exhausted, failing loudly on
//!    timed-out entries or truncated scope lists, and memoizes the result.

pub mod config;
pub mod hackerone;

pub use hackerone::{Program, ResultSet, ScanError, Scanner, Scope, Targets};
