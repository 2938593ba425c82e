use thiserror::Error;

use crate::Handle;

/// Errors raised by graph edits and graph queries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MrsError {
    /// A variable sort letter was not one of `h`, `e`, `x`, `i`, `u`, `l`
    #[error("Unknown variable sort {0:?}")]
    UnknownSort(String),

    /// A marked set was computed against an earlier revision of the graph
    #[error("Marked set is stale: computed at revision {marked}, graph is at {current}")]
    StaleMark { marked: u64, current: u64 },

    /// A marked predication no longer exists
    #[error("Marked predication #{0} does not exist")]
    MissingPredication(usize),

    /// A handle constraint points at a label that no predication carries
    #[error("Handle {hi} is constrained to {lo}, which labels no predication")]
    UnresolvedHandle { hi: Handle, lo: Handle },

    /// A predication lacks a role the caller depends on
    #[error("Predication {predicate} has no {role} role")]
    MissingRole { predicate: String, role: String },

    /// A role value could not be resolved to a predication
    #[error("{role} of {predicate} does not resolve to a predication")]
    Unresolved { predicate: String, role: String },
}

/// Errors raised while reading or writing the MRX exchange format
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The document is not well-formed XML or does not have an `<mrs>` root
    #[error("Could not parse MRX document: {0}")]
    Syntax(String),

    /// A required element or attribute is missing or invalid (strict mode)
    #[error("Malformed MRX {element}: {reason}")]
    Malformed { element: String, reason: String },

    /// The graph could not be serialised
    #[error("Could not write MRX document: {0}")]
    Write(String),
}

/// Result type for graph operations
pub type MrsResult<T> = Result<T, MrsError>;
