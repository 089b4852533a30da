//! Evaluation outcome reporting.

/// Outcome of testing a value against a specification.
///
/// Built fresh for every `test` call and never mutated afterward. The
/// `reasons` are advisory diagnostics (node failure messages collected in
/// evaluation order); they never influence control flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    pub success: bool,
    pub reasons: Vec<String>,
}

impl TestResult {
    pub fn pass() -> Self {
        Self {
            success: true,
            reasons: Vec::new(),
        }
    }

    pub fn fail() -> Self {
        Self {
            success: false,
            reasons: Vec::new(),
        }
    }

    pub fn fail_with(reasons: Vec<String>) -> Self {
        Self {
            success: false,
            reasons,
        }
    }

    /// `pass()` or `fail()` depending on `success`.
    pub fn from_success(success: bool) -> Self {
        if success { Self::pass() } else { Self::fail() }
    }
}
