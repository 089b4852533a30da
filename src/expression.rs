//! Reference-value expressions.
//!
//! Comparison nodes do not hold their reference value directly; they hold an
//! expression that resolves it at evaluation time from the tested value and
//! the root object. Rule documents carry expression *text*; an ordered list
//! of pluggable factories decides how each text is parsed, with a literal
//! constant as the universal fallback.

use std::sync::Arc;

use crate::value::Value;

/// Resolves a reference value from the tested value and the root object.
///
/// Evaluation is a pure function; expressions hold no mutable state.
pub trait Expression: Send + Sync {
    /// The original expression text.
    fn text(&self) -> &str;

    /// Resolve the reference value.
    fn evaluate(&self, value: &Value, root: &Value) -> Value;
}

/// A fixed reference value.
///
/// The markup fallback ([`Constant::new`]) keeps the attribute text as a
/// textual value; typing is deliberately left to the comparison node's
/// coercion step, so a constant `"1.0"` still compares equal to the integer
/// `1`. Programmatic rule builders can pin an already-typed value with
/// [`Constant::with_value`].
pub struct Constant {
    text: String,
    value: Value,
}

impl Constant {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            value: Value::Text(text.clone()),
            text,
        }
    }

    pub fn with_value(text: impl Into<String>, value: Value) -> Self {
        Self {
            text: text.into(),
            value,
        }
    }
}

impl Expression for Constant {
    fn text(&self) -> &str {
        &self.text
    }

    fn evaluate(&self, _value: &Value, _root: &Value) -> Value {
        self.value.clone()
    }
}

/// A pluggable expression parser.
///
/// Given expression text, a factory either claims it (returning a parsed
/// expression) or declines (`None`), in which case the next factory is
/// consulted.
pub trait ExpressionFactory: Send + Sync {
    fn try_parse(&self, text: &str) -> Option<Arc<dyn Expression>>;
}

/// Ordered collection of expression factories.
///
/// `resolve` asks each registered factory in registration order; if none
/// claims the text, it becomes a [`Constant`]. The default registry is
/// empty, so every attribute resolves as a literal.
#[derive(Clone, Default)]
pub struct ExpressionRegistry {
    factories: Vec<Arc<dyn ExpressionFactory>>,
}

impl ExpressionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F: ExpressionFactory + 'static>(&mut self, factory: F) {
        self.factories.push(Arc::new(factory));
    }

    pub fn resolve(&self, text: &str) -> Arc<dyn Expression> {
        for factory in &self.factories {
            if let Some(expression) = factory.try_parse(text) {
                return expression;
            }
        }
        Arc::new(Constant::new(text))
    }
}

/// Dotted field-path expression over the tested value or the root object.
///
/// Syntax: `$` (the tested value itself), `$root` (the root object), or
/// either followed by `.field` segments. Segments navigate map fields and,
/// when numeric, list indices. A path that runs off the data resolves to
/// the null marker rather than failing.
pub struct PathExpression {
    text: String,
    from_root: bool,
    segments: Vec<String>,
}

impl PathExpression {
    /// Parse `text` as a path expression; `None` if it is not one.
    pub fn parse(text: &str) -> Option<Self> {
        let rest = text.strip_prefix('$')?;
        let (from_root, rest) = if rest == "root" || rest.starts_with("root.") {
            (true, &rest[4..])
        } else {
            (false, rest)
        };

        let segments = if rest.is_empty() {
            Vec::new()
        } else {
            let rest = rest.strip_prefix('.')?;
            let segments: Vec<String> = rest.split('.').map(str::to_string).collect();
            if segments.iter().any(|s| s.is_empty()) {
                return None;
            }
            segments
        };

        Some(Self {
            text: text.to_string(),
            from_root,
            segments,
        })
    }
}

impl Expression for PathExpression {
    fn text(&self) -> &str {
        &self.text
    }

    fn evaluate(&self, value: &Value, root: &Value) -> Value {
        let mut current = if self.from_root { root } else { value };
        for segment in &self.segments {
            current = match current {
                Value::Map(fields) => match fields.get(segment) {
                    Some(field) => field,
                    None => return Value::Null,
                },
                Value::List(items) => {
                    match segment.parse::<usize>().ok().and_then(|i| items.get(i)) {
                        Some(item) => item,
                        None => return Value::Null,
                    }
                }
                _ => return Value::Null,
            };
        }
        current.clone()
    }
}

/// Factory claiming any text that starts with `$`.
pub struct PathExpressionFactory;

impl ExpressionFactory for PathExpressionFactory {
    fn try_parse(&self, text: &str) -> Option<Arc<dyn Expression>> {
        if !text.starts_with('$') {
            return None;
        }
        PathExpression::parse(text).map(|e| Arc::new(e) as Arc<dyn Expression>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn subject() -> Value {
        Value::from(json!({
            "patient": { "age": 42, "name": "Ada" },
            "studies": ["ct", "mr"],
        }))
    }

    #[test]
    fn constant_resolves_to_its_text() {
        let expression = Constant::new("1.0");
        assert_eq!(expression.text(), "1.0");
        assert_eq!(
            expression.evaluate(&Value::Int(9), &Value::Null),
            Value::from("1.0")
        );
    }

    #[test]
    fn empty_registry_falls_back_to_constant() {
        let registry = ExpressionRegistry::new();
        let expression = registry.resolve("$not.registered");
        assert_eq!(
            expression.evaluate(&subject(), &subject()),
            Value::from("$not.registered")
        );
    }

    #[test]
    fn path_expression_walks_fields_and_indices() {
        let root = subject();
        let expression = PathExpression::parse("$.patient.age").unwrap();
        assert_eq!(expression.evaluate(&root, &root), Value::Int(42));

        let expression = PathExpression::parse("$.studies.1").unwrap();
        assert_eq!(expression.evaluate(&root, &root), Value::from("mr"));

        let expression = PathExpression::parse("$.patient.missing").unwrap();
        assert_eq!(expression.evaluate(&root, &root), Value::Null);
    }

    #[test]
    fn root_paths_ignore_the_tested_value() {
        let root = subject();
        let element = Value::from("ct");
        let expression = PathExpression::parse("$root.patient.name").unwrap();
        assert_eq!(expression.evaluate(&element, &root), Value::from("Ada"));

        let expression = PathExpression::parse("$").unwrap();
        assert_eq!(expression.evaluate(&element, &root), element);
    }

    #[test]
    fn registered_factory_wins_over_constant_fallback() {
        let mut registry = ExpressionRegistry::new();
        registry.register(PathExpressionFactory);

        let root = subject();
        let claimed = registry.resolve("$.patient.age");
        assert_eq!(claimed.evaluate(&root, &root), Value::Int(42));

        // Not path syntax: declined by the factory, resolved as a literal.
        let fallback = registry.resolve("plain text");
        assert_eq!(fallback.evaluate(&root, &root), Value::from("plain text"));
        assert!(PathExpression::parse("$oops").is_none());
    }
}
