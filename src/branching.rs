//! Conditional and referencing specifications: Case and Defined.

use crate::error::SpecificationError;
use crate::result::TestResult;
use crate::specification::{BoxedSpec, Diagnostics, Specification};
use crate::value::Value;

/// One when/then arm of a [`Case`].
pub struct CaseArm {
    pub when: BoxedSpec,
    pub then: BoxedSpec,
}

/// Multi-way conditional: evaluates the `then` branch of the first arm
/// whose `when` passes, or the `otherwise` branch when no arm does.
pub struct Case {
    arms: Vec<CaseArm>,
    otherwise: BoxedSpec,
    diagnostics: Diagnostics,
}

impl Case {
    pub fn new(arms: Vec<CaseArm>, otherwise: BoxedSpec) -> Self {
        Self {
            arms,
            otherwise,
            diagnostics: Diagnostics::default(),
        }
    }
}

impl Specification for Case {
    fn test_with_root(
        &self,
        value: &Value,
        root: &Value,
    ) -> Result<TestResult, SpecificationError> {
        for arm in &self.arms {
            if arm.when.test_with_root(value, root)?.success {
                return arm.then.test_with_root(value, root);
            }
        }
        self.otherwise.test_with_root(value, root)
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn set_diagnostics(&mut self, diagnostics: Diagnostics) {
        self.diagnostics = diagnostics;
    }
}

/// Delegates to another named rule from the same document.
///
/// The reference is resolved at compile time; evaluation just forwards the
/// same value/root pair.
pub struct Defined {
    name: String,
    inner: BoxedSpec,
}

impl Defined {
    pub fn new(name: impl Into<String>, inner: BoxedSpec) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }

    /// The referenced rule's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Specification for Defined {
    fn test_with_root(
        &self,
        value: &Value,
        root: &Value,
    ) -> Result<TestResult, SpecificationError> {
        self.inner.test_with_root(value, root)
    }

    fn diagnostics(&self) -> &Diagnostics {
        self.inner.diagnostics()
    }

    fn set_diagnostics(&mut self, _diagnostics: Diagnostics) {
        // Diagnostics belong to the referenced rule; a reference carries
        // none of its own.
    }
}
