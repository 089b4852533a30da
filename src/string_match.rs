//! String-matching specifications: regex, prefix, suffix, substring.
//!
//! All four share the same input contract: the null marker is governed by
//! `null_matches`, text goes through the match operation, and anything else
//! is a type error. The empty string is an ordinary (non-null) input here,
//! even when `null_matches` is set.

use regex::{Regex, RegexBuilder};

use crate::error::SpecificationError;
use crate::result::TestResult;
use crate::specification::{Diagnostics, Specification};
use crate::value::Value;

fn test_text(
    value: &Value,
    null_matches: bool,
    diagnostics: &Diagnostics,
    matches: impl Fn(&str) -> bool,
) -> Result<TestResult, SpecificationError> {
    match value {
        Value::Null => Ok(if null_matches {
            TestResult::pass()
        } else {
            diagnostics.fail()
        }),
        Value::Text(text) => Ok(if matches(text) {
            TestResult::pass()
        } else {
            diagnostics.fail()
        }),
        other => Err(SpecificationError::TypeMismatch {
            expected: "text",
            found: other.type_name(),
        }),
    }
}

fn fold_match(value: &str, pattern: &str, ignore_case: bool, op: impl Fn(&str, &str) -> bool) -> bool {
    if ignore_case {
        op(&value.to_lowercase(), &pattern.to_lowercase())
    } else {
        op(value, pattern)
    }
}

/// Unanchored regular-expression search over the tested text.
pub struct RegexMatch {
    pattern: String,
    regex: Regex,
    ignore_case: bool,
    null_matches: bool,
    diagnostics: Diagnostics,
}

impl RegexMatch {
    /// Compile the pattern up front; an invalid pattern never becomes a
    /// testable node.
    pub fn new(pattern: &str, ignore_case: bool, null_matches: bool) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(ignore_case)
            .build()?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            ignore_case,
            null_matches,
            diagnostics: Diagnostics::default(),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    pub fn null_matches(&self) -> bool {
        self.null_matches
    }
}

impl Specification for RegexMatch {
    fn test_with_root(
        &self,
        value: &Value,
        _root: &Value,
    ) -> Result<TestResult, SpecificationError> {
        test_text(value, self.null_matches, &self.diagnostics, |text| {
            self.regex.is_match(text)
        })
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn set_diagnostics(&mut self, diagnostics: Diagnostics) {
        self.diagnostics = diagnostics;
    }
}

/// Prefix match.
pub struct StartsWith {
    pattern: String,
    ignore_case: bool,
    null_matches: bool,
    diagnostics: Diagnostics,
}

impl StartsWith {
    pub fn new(pattern: &str, ignore_case: bool, null_matches: bool) -> Self {
        Self {
            pattern: pattern.to_string(),
            ignore_case,
            null_matches,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    pub fn null_matches(&self) -> bool {
        self.null_matches
    }
}

impl Specification for StartsWith {
    fn test_with_root(
        &self,
        value: &Value,
        _root: &Value,
    ) -> Result<TestResult, SpecificationError> {
        test_text(value, self.null_matches, &self.diagnostics, |text| {
            fold_match(text, &self.pattern, self.ignore_case, |t, p| t.starts_with(p))
        })
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn set_diagnostics(&mut self, diagnostics: Diagnostics) {
        self.diagnostics = diagnostics;
    }
}

/// Suffix match.
pub struct EndsWith {
    pattern: String,
    ignore_case: bool,
    null_matches: bool,
    diagnostics: Diagnostics,
}

impl EndsWith {
    pub fn new(pattern: &str, ignore_case: bool, null_matches: bool) -> Self {
        Self {
            pattern: pattern.to_string(),
            ignore_case,
            null_matches,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    pub fn null_matches(&self) -> bool {
        self.null_matches
    }
}

impl Specification for EndsWith {
    fn test_with_root(
        &self,
        value: &Value,
        _root: &Value,
    ) -> Result<TestResult, SpecificationError> {
        test_text(value, self.null_matches, &self.diagnostics, |text| {
            fold_match(text, &self.pattern, self.ignore_case, |t, p| t.ends_with(p))
        })
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn set_diagnostics(&mut self, diagnostics: Diagnostics) {
        self.diagnostics = diagnostics;
    }
}

/// Substring match.
pub struct Contains {
    pattern: String,
    ignore_case: bool,
    null_matches: bool,
    diagnostics: Diagnostics,
}

impl Contains {
    pub fn new(pattern: &str, ignore_case: bool, null_matches: bool) -> Self {
        Self {
            pattern: pattern.to_string(),
            ignore_case,
            null_matches,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    pub fn null_matches(&self) -> bool {
        self.null_matches
    }
}

impl Specification for Contains {
    fn test_with_root(
        &self,
        value: &Value,
        _root: &Value,
    ) -> Result<TestResult, SpecificationError> {
        test_text(value, self.null_matches, &self.diagnostics, |text| {
            fold_match(text, &self.pattern, self.ignore_case, |t, p| t.contains(p))
        })
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn set_diagnostics(&mut self, diagnostics: Diagnostics) {
        self.diagnostics = diagnostics;
    }
}
