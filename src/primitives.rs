//! Boolean and null-check specifications.

use crate::error::SpecificationError;
use crate::result::TestResult;
use crate::specification::{Diagnostics, Specification};
use crate::value::Value;

/// Succeeds iff the value is the boolean `true`. Non-boolean input is a
/// type error, not a failure.
#[derive(Default)]
pub struct IsTrue {
    diagnostics: Diagnostics,
}

impl IsTrue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Specification for IsTrue {
    fn test_with_root(
        &self,
        value: &Value,
        _root: &Value,
    ) -> Result<TestResult, SpecificationError> {
        match value {
            Value::Bool(true) => Ok(TestResult::pass()),
            Value::Bool(false) => Ok(self.diagnostics.fail()),
            other => Err(SpecificationError::TypeMismatch {
                expected: "boolean",
                found: other.type_name(),
            }),
        }
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn set_diagnostics(&mut self, diagnostics: Diagnostics) {
        self.diagnostics = diagnostics;
    }
}

/// Succeeds iff the value is the boolean `false`.
#[derive(Default)]
pub struct IsFalse {
    diagnostics: Diagnostics,
}

impl IsFalse {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Specification for IsFalse {
    fn test_with_root(
        &self,
        value: &Value,
        _root: &Value,
    ) -> Result<TestResult, SpecificationError> {
        match value {
            Value::Bool(false) => Ok(TestResult::pass()),
            Value::Bool(true) => Ok(self.diagnostics.fail()),
            other => Err(SpecificationError::TypeMismatch {
                expected: "boolean",
                found: other.type_name(),
            }),
        }
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn set_diagnostics(&mut self, diagnostics: Diagnostics) {
        self.diagnostics = diagnostics;
    }
}

// Blank text counts as "no value" for the null checks. This is a domain
// rule, distinct from the string-match nodes where the empty string is an
// ordinary (non-null) input.
fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Text(s) => s.is_empty(),
        _ => false,
    }
}

/// Succeeds iff the value is the null marker or an empty string.
#[derive(Default)]
pub struct IsNull {
    diagnostics: Diagnostics,
}

impl IsNull {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Specification for IsNull {
    fn test_with_root(
        &self,
        value: &Value,
        _root: &Value,
    ) -> Result<TestResult, SpecificationError> {
        if is_absent(value) {
            Ok(TestResult::pass())
        } else {
            Ok(self.diagnostics.fail())
        }
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn set_diagnostics(&mut self, diagnostics: Diagnostics) {
        self.diagnostics = diagnostics;
    }
}

/// Exact negation of [`IsNull`].
#[derive(Default)]
pub struct NotNull {
    diagnostics: Diagnostics,
}

impl NotNull {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Specification for NotNull {
    fn test_with_root(
        &self,
        value: &Value,
        _root: &Value,
    ) -> Result<TestResult, SpecificationError> {
        if is_absent(value) {
            Ok(self.diagnostics.fail())
        } else {
            Ok(TestResult::pass())
        }
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

    #[test]
    fn boolean_checks_require_boolean_input() {
        assert!(IsTrue::new().test(&Value::Bool(true)).unwrap().success);
        assert!(!IsTrue::new().test(&Value::Bool(false)).unwrap().success);
        assert!(IsFalse::new().test(&Value::Bool(false)).unwrap().success);

        let error = IsTrue::new().test(&Value::from("true")).unwrap_err();
        assert!(matches!(
            error,
            SpecificationError::TypeMismatch {
                expected: "boolean",
                found: "text",
            }
        ));
        assert!(IsFalse::new().test(&Value::Null).is_err());
    }

    #[test]
    fn blank_text_counts_as_null() {
        assert!(IsNull::new().test(&Value::Null).unwrap().success);
        assert!(IsNull::new().test(&Value::from("")).unwrap().success);
        assert!(!IsNull::new().test(&Value::from(" ")).unwrap().success);
        assert!(!IsNull::new().test(&Value::Int(0)).unwrap().success);
    }

    #[test]
    fn not_null_is_the_exact_negation() {
        for value in [
            Value::Null,
            Value::from(""),
            Value::from("x"),
            Value::Int(0),
            Value::Bool(false),
        ] {
            let is_null = IsNull::new().test(&value).unwrap().success;
            let not_null = NotNull::new().test(&value).unwrap().success;
            assert_ne!(is_null, not_null, "disagreement on {value:?}");
        }
    }
}
