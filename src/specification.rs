//! Core `Specification` trait.
//!
//! A specification is one node of a compiled rule tree: a predicate that can
//! be tested against a runtime value. Nodes are immutable once compiled and
//! shared as `Arc<dyn Specification>`, so a tree can be evaluated from any
//! number of threads concurrently.

use std::sync::Arc;

use crate::error::SpecificationError;
use crate::result::TestResult;
use crate::value::Value;

/// A shared, immutable specification node.
pub type BoxedSpec = Arc<dyn Specification>;

impl std::fmt::Debug for dyn Specification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Specification")
            .field("diagnostics", self.diagnostics())
            .finish_non_exhaustive()
    }
}

/// An evaluable predicate node; the unit of the rule tree.
pub trait Specification: Send + Sync {
    /// Test `value`, keeping `root` pointing at the original top-level
    /// object as evaluation descends into collections.
    fn test_with_root(
        &self,
        value: &Value,
        root: &Value,
    ) -> Result<TestResult, SpecificationError>;

    /// Test a top-level value; the root is the value itself.
    fn test(&self, value: &Value) -> Result<TestResult, SpecificationError> {
        self.test_with_root(value, value)
    }

    /// Advisory metadata attached by the compiler; never affects the
    /// verdict.
    fn diagnostics(&self) -> &Diagnostics;

    /// Attach advisory metadata. Called once, at compile time, before the
    /// node is shared.
    fn set_diagnostics(&mut self, diagnostics: Diagnostics);
}

/// Human-readable metadata carried by every node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Verbatim text of the rule author's `testExpression` attribute.
    pub test_expr: Option<String>,
    /// Verbatim text of the rule author's `failureMessage` attribute.
    pub failure_message: Option<String>,
}

impl Diagnostics {
    /// A failing result carrying this node's failure message, if any.
    pub(crate) fn fail(&self) -> TestResult {
        TestResult::fail_with(self.failure_message.iter().cloned().collect())
    }

    /// A failing result carrying this node's failure message followed by
    /// reasons collected from child nodes, in child order.
    pub(crate) fn fail_including(&self, child_reasons: Vec<String>) -> TestResult {
        let mut reasons: Vec<String> = self.failure_message.iter().cloned().collect();
        reasons.extend(child_reasons);
        TestResult::fail_with(reasons)
    }
}
