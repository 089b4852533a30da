//! Quantifier specifications: All and Any over an enumerable input.
//!
//! Each applies a single element specification once per item of a list,
//! keeping the original root object in scope. A non-list input is an
//! evaluation error, distinct from an ordinary false verdict.

use crate::error::SpecificationError;
use crate::result::TestResult;
use crate::specification::{BoxedSpec, Diagnostics, Specification};
use crate::value::Value;

fn items(value: &Value) -> Result<&[Value], SpecificationError> {
    match value {
        Value::List(items) => Ok(items),
        other => Err(SpecificationError::NotEnumerable {
            found: other.type_name(),
        }),
    }
}

/// Succeeds iff every element satisfies the element specification.
/// An empty input succeeds.
///
/// A compiled `each`/`all` element may legitimately carry no child (a
/// preserved quirk of the markup contract); in that case every element
/// passes vacuously.
pub struct All {
    element_spec: Option<BoxedSpec>,
    diagnostics: Diagnostics,
}

impl All {
    pub fn new(element_spec: Option<BoxedSpec>) -> Self {
        Self {
            element_spec,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn element_spec(&self) -> Option<&BoxedSpec> {
        self.element_spec.as_ref()
    }
}

impl Specification for All {
    fn test_with_root(
        &self,
        value: &Value,
        root: &Value,
    ) -> Result<TestResult, SpecificationError> {
        for item in items(value)? {
            let Some(element_spec) = &self.element_spec else {
                continue;
            };
            let result = element_spec.test_with_root(item, root)?;
            if !result.success {
                return Ok(self.diagnostics.fail_including(result.reasons));
            }
        }
        Ok(TestResult::pass())
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn set_diagnostics(&mut self, diagnostics: Diagnostics) {
        self.diagnostics = diagnostics;
    }
}

/// Succeeds iff at least one element satisfies the element specification.
/// An empty input fails.
pub struct Any {
    element_spec: Option<BoxedSpec>,
    diagnostics: Diagnostics,
}

impl Any {
    pub fn new(element_spec: Option<BoxedSpec>) -> Self {
        Self {
            element_spec,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn element_spec(&self) -> Option<&BoxedSpec> {
        self.element_spec.as_ref()
    }
}

impl Specification for Any {
    fn test_with_root(
        &self,
        value: &Value,
        root: &Value,
    ) -> Result<TestResult, SpecificationError> {
        for item in items(value)? {
            let passed = match &self.element_spec {
                Some(element_spec) => element_spec.test_with_root(item, root)?.success,
                None => true,
            };
            if passed {
                return Ok(TestResult::pass());
            }
        }
        Ok(self.diagnostics.fail())
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn set_diagnostics(&mut self, diagnostics: Diagnostics) {
        self.diagnostics = diagnostics;
    }
}
