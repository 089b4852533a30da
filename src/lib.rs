//! Declarative rule-evaluation engine built on the Specification Pattern.
//!
//! Business rules are trees of composable predicate nodes ("specifications")
//! compiled from a declarative markup document, then evaluated against
//! runtime values to produce a pass/fail verdict with diagnostic reasons.
//!
//! # Example
//!
//! ```
//! use themis_rules::prelude::*;
//! use serde_json::json;
//!
//! let factory = SpecificationFactory::from_json_value(json!({
//!     "rules": {
//!         "adultPatient": [
//!             { "tag": "greaterThan",
//!               "attributes": { "refValue": "18", "inclusive": true,
//!                               "failureMessage": "patient is a minor" } }
//!         ]
//!     }
//! })).unwrap();
//!
//! let rule = factory.get_specification("adultPatient").unwrap();
//! assert!(rule.test(&Value::Int(21)).unwrap().success);
//! assert!(!rule.test(&Value::Int(9)).unwrap().success);
//! ```
//!
//! Compiled trees are immutable and `Send + Sync`; one factory can serve
//! any number of concurrently evaluating threads.

pub mod branching;
mod coerce;
pub mod comparison;
pub mod compiler;
pub mod composite;
pub mod count;
pub mod document;
pub mod error;
pub mod expression;
pub mod factory;
pub mod primitives;
pub mod quantifier;
pub mod result;
pub mod specification;
pub mod string_match;
pub mod value;

/// Import everything you need with `use themis_rules::prelude::*`.
pub mod prelude {
    pub use crate::branching::{Case, CaseArm, Defined};
    pub use crate::comparison::{Equal, GreaterThan, LessThan, NotEqual};
    pub use crate::compiler::{CompileContext, Compiler, NodeBuilder, RuleResolver};
    pub use crate::composite::{And, Not, Or};
    pub use crate::count::Count;
    pub use crate::document::{Element, RuleDocument};
    pub use crate::error::{CompileError, SpecificationError};
    pub use crate::expression::{
        Constant, Expression, ExpressionFactory, ExpressionRegistry, PathExpression,
        PathExpressionFactory,
    };
    pub use crate::factory::SpecificationFactory;
    pub use crate::primitives::{IsFalse, IsNull, IsTrue, NotNull};
    pub use crate::quantifier::{All, Any};
    pub use crate::result::TestResult;
    pub use crate::specification::{BoxedSpec, Diagnostics, Specification};
    pub use crate::string_match::{Contains, EndsWith, RegexMatch, StartsWith};
    pub use crate::value::{Category, EnumSymbol, Value};
}
