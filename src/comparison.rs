//! Comparison specifications: Equal, NotEqual, GreaterThan, LessThan.
//!
//! The reference value is resolved through an expression at evaluation
//! time, then related to the tested value via the coercion rules in
//! [`crate::coerce`]. Equality is lenient about values with no common
//! ground (they are simply unequal); ordering refuses to compare them.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::coerce::{Relation, relate};
use crate::error::SpecificationError;
use crate::expression::Expression;
use crate::result::TestResult;
use crate::specification::{Diagnostics, Specification};
use crate::value::Value;

fn equals(value: &Value, reference: &Value, strict: bool) -> bool {
    matches!(
        relate(value, reference, strict),
        Relation::Ordered(Ordering::Equal) | Relation::Equivalence(true)
    )
}

fn ordering(
    value: &Value,
    reference: &Value,
    strict: bool,
) -> Result<Ordering, SpecificationError> {
    match relate(value, reference, strict) {
        Relation::Ordered(ordering) => Ok(ordering),
        Relation::Equivalence(_) | Relation::Disjoint => {
            Err(SpecificationError::IncomparableTypes {
                left: value.type_name(),
                right: reference.type_name(),
            })
        }
    }
}

/// Succeeds iff the tested value equals the reference value under the
/// coercion rules (or plain structural equality in strict mode).
pub struct Equal {
    ref_value: Arc<dyn Expression>,
    strict: bool,
    diagnostics: Diagnostics,
}

impl Equal {
    pub fn new(ref_value: Arc<dyn Expression>) -> Self {
        Self {
            ref_value,
            strict: false,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn ref_value(&self) -> &dyn Expression {
        self.ref_value.as_ref()
    }

    pub fn strict(&self) -> bool {
        self.strict
    }
}

impl Specification for Equal {
    fn test_with_root(
        &self,
        value: &Value,
        root: &Value,
    ) -> Result<TestResult, SpecificationError> {
        let reference = self.ref_value.evaluate(value, root);
        if equals(value, &reference, self.strict) {
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

/// Exact negation of [`Equal`].
pub struct NotEqual {
    ref_value: Arc<dyn Expression>,
    strict: bool,
    diagnostics: Diagnostics,
}

impl NotEqual {
    pub fn new(ref_value: Arc<dyn Expression>) -> Self {
        Self {
            ref_value,
            strict: false,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn ref_value(&self) -> &dyn Expression {
        self.ref_value.as_ref()
    }

    pub fn strict(&self) -> bool {
        self.strict
    }
}

impl Specification for NotEqual {
    fn test_with_root(
        &self,
        value: &Value,
        root: &Value,
    ) -> Result<TestResult, SpecificationError> {
        let reference = self.ref_value.evaluate(value, root);
        if equals(value, &reference, self.strict) {
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

/// Succeeds iff the tested value orders above the reference value
/// (or equals it, when inclusive).
pub struct GreaterThan {
    ref_value: Arc<dyn Expression>,
    strict: bool,
    inclusive: bool,
    diagnostics: Diagnostics,
}

impl GreaterThan {
    pub fn new(ref_value: Arc<dyn Expression>) -> Self {
        Self {
            ref_value,
            strict: false,
            inclusive: false,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_inclusive(mut self, inclusive: bool) -> Self {
        self.inclusive = inclusive;
        self
    }

    pub fn ref_value(&self) -> &dyn Expression {
        self.ref_value.as_ref()
    }

    pub fn inclusive(&self) -> bool {
        self.inclusive
    }
}

impl Specification for GreaterThan {
    fn test_with_root(
        &self,
        value: &Value,
        root: &Value,
    ) -> Result<TestResult, SpecificationError> {
        let reference = self.ref_value.evaluate(value, root);
        let ordering = ordering(value, &reference, self.strict)?;
        let success =
            ordering == Ordering::Greater || (self.inclusive && ordering == Ordering::Equal);
        if success {
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

/// Succeeds iff the tested value orders below the reference value
/// (or equals it, when inclusive).
pub struct LessThan {
    ref_value: Arc<dyn Expression>,
    strict: bool,
    inclusive: bool,
    diagnostics: Diagnostics,
}

impl LessThan {
    pub fn new(ref_value: Arc<dyn Expression>) -> Self {
        Self {
            ref_value,
            strict: false,
            inclusive: false,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_inclusive(mut self, inclusive: bool) -> Self {
        self.inclusive = inclusive;
        self
    }

    pub fn ref_value(&self) -> &dyn Expression {
        self.ref_value.as_ref()
    }

    pub fn inclusive(&self) -> bool {
        self.inclusive
    }
}

impl Specification for LessThan {
    fn test_with_root(
        &self,
        value: &Value,
        root: &Value,
    ) -> Result<TestResult, SpecificationError> {
        let reference = self.ref_value.evaluate(value, root);
        let ordering = ordering(value, &reference, self.strict)?;
        let success =
            ordering == Ordering::Less || (self.inclusive && ordering == Ordering::Equal);
        if success {
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
