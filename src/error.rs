//! Error types for the rule engine.
//!
//! Two disjoint families: `CompileError` for everything that goes wrong
//! while turning a markup document into a specification tree (fail-fast,
//! never partially compiled), and `SpecificationError` for evaluation-time
//! failures that prevent a test from producing a verdict at all. Ordinary
//! "rule not satisfied" outcomes are `TestResult` values, never errors.

use thiserror::Error;

/// Compile-time errors raised while building a specification tree from a
/// markup document.
#[derive(Error, Debug)]
pub enum CompileError {
    /// Element tag has no registered node builder
    #[error("unknown rule element '{tag}'")]
    UnknownTag { tag: String },

    /// A required attribute was omitted
    #[error("attribute '{field}' is required for '{tag}'")]
    MissingRequiredField { tag: String, field: String },

    /// An attribute was present but unusable
    #[error("attribute '{field}' on '{tag}' is invalid: {message}")]
    InvalidAttribute {
        tag: String,
        field: String,
        message: String,
    },

    /// The element structure itself is malformed (case arms out of order,
    /// unresolvable rule references, reference cycles)
    #[error("malformed rule: {0}")]
    MalformedRule(String),

    /// A node constructor rejected its configuration
    #[error("invalid specification: {0}")]
    Specification(#[from] SpecificationError),

    /// The document could not be deserialized
    #[error("unreadable rule document: {0}")]
    Document(#[from] serde_json::Error),
}

/// Evaluation-time errors: the test could not produce a verdict.
///
/// `NegativeRange`/`InvalidRange` are raised at node construction rather
/// than evaluation, but belong to this family because they describe a
/// misconfigured specification, not a malformed document.
#[derive(Error, Debug)]
pub enum SpecificationError {
    /// Quantifier or count node was given a non-enumerable input
    #[error("expected an enumerable value, got {found}")]
    NotEnumerable { found: &'static str },

    /// A node was given input of the wrong shape
    #[error("expected {expected}, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Ordering comparison across categories with no common ground
    #[error("cannot order {left} against {right}")]
    IncomparableTypes {
        left: &'static str,
        right: &'static str,
    },

    /// Count range with a negative bound
    #[error("count range may not be negative (min {min}, max {max})")]
    NegativeRange { min: i64, max: i64 },

    /// Count range with inverted bounds
    #[error("count range is inverted (min {min} > max {max})")]
    InvalidRange { min: i64, max: i64 },

    /// Rule-name lookup failed
    #[error("no specification named '{name}'")]
    NotFound { name: String },
}
