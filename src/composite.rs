//! Composite specifications: And, Or, Not.
//!
//! Each holds an ordered list of child specifications. All children receive
//! the same value/root pair; child ordering is preserved for reproducible
//! diagnostics but never changes the verdict.

use crate::error::SpecificationError;
use crate::result::TestResult;
use crate::specification::{BoxedSpec, Diagnostics, Specification};
use crate::value::Value;

/// Succeeds iff every child succeeds. An empty child list succeeds
/// (vacuous truth) by design.
pub struct And {
    elements: Vec<BoxedSpec>,
    diagnostics: Diagnostics,
}

impl And {
    pub fn new(elements: Vec<BoxedSpec>) -> Self {
        Self {
            elements,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn elements(&self) -> &[BoxedSpec] {
        &self.elements
    }
}

impl Specification for And {
    fn test_with_root(
        &self,
        value: &Value,
        root: &Value,
    ) -> Result<TestResult, SpecificationError> {
        let mut reasons = Vec::new();
        let mut success = true;
        for element in &self.elements {
            let result = element.test_with_root(value, root)?;
            if !result.success {
                success = false;
                reasons.extend(result.reasons);
            }
        }
        if success {
            Ok(TestResult::pass())
        } else {
            Ok(self.diagnostics.fail_including(reasons))
        }
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn set_diagnostics(&mut self, diagnostics: Diagnostics) {
        self.diagnostics = diagnostics;
    }
}

/// Succeeds iff at least one child succeeds. An empty child list fails.
pub struct Or {
    elements: Vec<BoxedSpec>,
    diagnostics: Diagnostics,
}

impl Or {
    pub fn new(elements: Vec<BoxedSpec>) -> Self {
        Self {
            elements,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn elements(&self) -> &[BoxedSpec] {
        &self.elements
    }
}

impl Specification for Or {
    fn test_with_root(
        &self,
        value: &Value,
        root: &Value,
    ) -> Result<TestResult, SpecificationError> {
        let mut reasons = Vec::new();
        for element in &self.elements {
            let result = element.test_with_root(value, root)?;
            if result.success {
                return Ok(TestResult::pass());
            }
            reasons.extend(result.reasons);
        }
        Ok(self.diagnostics.fail_including(reasons))
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn set_diagnostics(&mut self, diagnostics: Diagnostics) {
        self.diagnostics = diagnostics;
    }
}

/// Negation of the logical And of its children: succeeds iff at least one
/// child fails. Defined over a child *list*, not a single wrapped child, so
/// an empty list (And = vacuously true) makes Not fail.
pub struct Not {
    elements: Vec<BoxedSpec>,
    diagnostics: Diagnostics,
}

impl Not {
    pub fn new(elements: Vec<BoxedSpec>) -> Self {
        Self {
            elements,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn elements(&self) -> &[BoxedSpec] {
        &self.elements
    }
}

impl Specification for Not {
    fn test_with_root(
        &self,
        value: &Value,
        root: &Value,
    ) -> Result<TestResult, SpecificationError> {
        for element in &self.elements {
            if !element.test_with_root(value, root)?.success {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{IsFalse, IsTrue};
    use std::sync::Arc;

    fn is_true() -> BoxedSpec {
        Arc::new(IsTrue::new())
    }

    fn is_false() -> BoxedSpec {
        Arc::new(IsFalse::new())
    }

    fn is_false_saying(message: &str) -> BoxedSpec {
        let mut spec = IsFalse::new();
        spec.set_diagnostics(Diagnostics {
            test_expr: None,
            failure_message: Some(message.to_string()),
        });
        Arc::new(spec)
    }

    #[test]
    fn empty_composites() {
        let value = Value::Bool(true);
        assert!(And::new(vec![]).test(&value).unwrap().success);
        assert!(!Or::new(vec![]).test(&value).unwrap().success);
        assert!(!Not::new(vec![]).test(&value).unwrap().success);
    }

    #[test]
    fn single_child_and_behaves_like_the_child() {
        for value in [Value::Bool(true), Value::Bool(false)] {
            let wrapped = And::new(vec![is_true()]).test(&value).unwrap();
            let bare = IsTrue::new().test(&value).unwrap();
            assert_eq!(wrapped.success, bare.success);
        }
    }

    #[test]
    fn and_collects_reasons_in_child_order() {
        let spec = And::new(vec![
            is_false_saying("first"),
            is_true(),
            is_false_saying("second"),
        ]);
        let result = spec.test(&Value::Bool(true)).unwrap();
        assert!(!result.success);
        assert_eq!(result.reasons, vec!["first", "second"]);
    }

    #[test]
    fn or_succeeds_on_any_child() {
        let value = Value::Bool(true);
        assert!(
            Or::new(vec![is_false(), is_true()])
                .test(&value)
                .unwrap()
                .success
        );
        assert!(
            !Or::new(vec![is_false(), is_false()])
                .test(&value)
                .unwrap()
                .success
        );
    }

    #[test]
    fn not_negates_the_and_of_children() {
        let value = Value::Bool(true);
        // Both children pass -> inner And passes -> Not fails.
        assert!(
            !Not::new(vec![is_true(), is_true()])
                .test(&value)
                .unwrap()
                .success
        );
        // One child fails -> inner And fails -> Not passes.
        assert!(
            Not::new(vec![is_true(), is_false()])
                .test(&value)
                .unwrap()
                .success
        );
    }

    #[test]
    fn errors_propagate_through_composites() {
        let spec = And::new(vec![is_true()]);
        let error = spec.test(&Value::Int(3)).unwrap_err();
        assert!(matches!(error, SpecificationError::TypeMismatch { .. }));
    }
}
