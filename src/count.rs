//! Count specification: bounds on the size of a (optionally filtered)
//! collection.

use crate::error::SpecificationError;
use crate::result::TestResult;
use crate::specification::{BoxedSpec, Diagnostics, Specification};
use crate::value::Value;

/// Succeeds iff the number of elements satisfying the filter (all elements,
/// when no filter is set) lies within `min..=max`.
///
/// The range is validated at construction: negative bounds and inverted
/// bounds are rejected as distinct error kinds, and a misconfigured node
/// never reaches evaluation.
#[derive(Debug)]
pub struct Count {
    min: i64,
    max: i64,
    filter: Option<BoxedSpec>,
    diagnostics: Diagnostics,
}

impl Count {
    pub fn new(min: i64, max: i64, filter: Option<BoxedSpec>) -> Result<Self, SpecificationError> {
        if min < 0 || max < 0 {
            return Err(SpecificationError::NegativeRange { min, max });
        }
        if min > max {
            return Err(SpecificationError::InvalidRange { min, max });
        }
        Ok(Self {
            min,
            max,
            filter,
            diagnostics: Diagnostics::default(),
        })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn filter(&self) -> Option<&BoxedSpec> {
        self.filter.as_ref()
    }
}

impl Specification for Count {
    fn test_with_root(
        &self,
        value: &Value,
        root: &Value,
    ) -> Result<TestResult, SpecificationError> {
        let items = match value {
            Value::List(items) => items,
            other => {
                return Err(SpecificationError::NotEnumerable {
                    found: other.type_name(),
                });
            }
        };

        let mut count: i64 = 0;
        for item in items {
            let retained = match &self.filter {
                Some(filter) => filter.test_with_root(item, root)?.success,
                None => true,
            };
            if retained {
                count += 1;
            }
        }

        if self.min <= count && count <= self.max {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::IsTrue;
    use std::sync::Arc;

    #[test]
    fn range_is_validated_at_construction() {
        assert!(matches!(
            Count::new(-1, 0, None).unwrap_err(),
            SpecificationError::NegativeRange { min: -1, max: 0 }
        ));
        assert!(matches!(
            Count::new(0, -1, None).unwrap_err(),
            SpecificationError::NegativeRange { .. }
        ));
        assert!(matches!(
            Count::new(2, 1, None).unwrap_err(),
            SpecificationError::InvalidRange { min: 2, max: 1 }
        ));
        assert!(Count::new(0, 0, None).is_ok());
    }

    #[test]
    fn unfiltered_count_bounds_are_inclusive() {
        let spec = Count::new(1, 2, None).unwrap();
        assert!(!spec.test(&Value::List(vec![])).unwrap().success);
        assert!(spec.test(&Value::list([1i64])).unwrap().success);
        assert!(spec.test(&Value::list([1i64, 2])).unwrap().success);
        assert!(!spec.test(&Value::list([1i64, 2, 3])).unwrap().success);
    }

    #[test]
    fn filter_retains_matching_elements_only() {
        let spec = Count::new(2, 2, Some(Arc::new(IsTrue::new()))).unwrap();
        assert!(
            spec.test(&Value::list([true, false, true]))
                .unwrap()
                .success
        );
        assert!(
            !spec
                .test(&Value::list([true, false, false]))
                .unwrap()
                .success
        );
    }

    #[test]
    fn filter_errors_propagate() {
        let spec = Count::new(0, 9, Some(Arc::new(IsTrue::new()))).unwrap();
        // Elements are not booleans: the filter raises, count does not guess.
        assert!(spec.test(&Value::list([1i64, 2])).is_err());
    }

    #[test]
    fn non_enumerable_input_is_an_error() {
        let spec = Count::new(0, 1, None).unwrap();
        assert!(matches!(
            spec.test(&Value::from("xy")).unwrap_err(),
            SpecificationError::NotEnumerable { found: "text" }
        ));
    }
}
