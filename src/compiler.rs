//! Markup compiler: turns document elements into specification trees.
//!
//! Compilation walks the element tree recursively, looking each tag up in a
//! registry of node builders. The built-in table covers the full rule
//! vocabulary; additional operators and expression parsers can be
//! registered before compiling. All errors are fail-fast: a malformed rule
//! never yields a partially-built tree.

use std::collections::HashMap;
use std::sync::Arc;

use crate::branching::{Case, CaseArm, Defined};
use crate::comparison::{Equal, GreaterThan, LessThan, NotEqual};
use crate::composite::{And, Not, Or};
use crate::count::Count;
use crate::document::Element;
use crate::error::CompileError;
use crate::expression::{Expression, ExpressionRegistry};
use crate::primitives::{IsFalse, IsNull, IsTrue, NotNull};
use crate::quantifier::{All, Any};
use crate::specification::{BoxedSpec, Diagnostics, Specification};
use crate::string_match::{Contains, EndsWith, RegexMatch, StartsWith};

/// What a node builder can ask of the compiler while building one element.
pub trait CompileContext {
    /// Compile a single child element.
    fn compile_element(&self, element: &Element) -> Result<BoxedSpec, CompileError>;

    /// Compile a sibling list through the implicit-And rule: a single
    /// element compiles to itself, anything else wraps in an `And`.
    fn compile_implicit_and(&self, elements: &[Element]) -> Result<BoxedSpec, CompileError>;

    /// Resolve reference-value text into an expression.
    fn resolve_expression(&self, text: &str) -> Arc<dyn Expression>;

    /// Resolve another named rule of the same document (for `defined`).
    fn resolve_rule(&self, name: &str) -> Result<BoxedSpec, CompileError>;
}

/// A pluggable node builder, keyed by element tag.
pub trait NodeBuilder: Send + Sync {
    fn build(
        &self,
        element: &Element,
        ctx: &dyn CompileContext,
    ) -> Result<Box<dyn Specification>, CompileError>;
}

impl<F> NodeBuilder for F
where
    F: Fn(&Element, &dyn CompileContext) -> Result<Box<dyn Specification>, CompileError>
        + Send
        + Sync,
{
    fn build(
        &self,
        element: &Element,
        ctx: &dyn CompileContext,
    ) -> Result<Box<dyn Specification>, CompileError> {
        self(element, ctx)
    }
}

/// Looks up other named rules while a document is being compiled.
pub trait RuleResolver {
    fn resolve(&self, name: &str) -> Result<BoxedSpec, CompileError>;
}

/// The markup compiler.
pub struct Compiler {
    operators: HashMap<String, Arc<dyn NodeBuilder>>,
    expressions: ExpressionRegistry,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    /// A compiler with the built-in operator table and an empty expression
    /// registry (every reference value resolves as a literal constant).
    pub fn new() -> Self {
        let mut compiler = Self {
            operators: HashMap::new(),
            expressions: ExpressionRegistry::new(),
        };

        compiler.register_operator("true", build_true);
        compiler.register_operator("false", build_false);
        compiler.register_operator("null", build_null);
        compiler.register_operator("notNull", build_not_null);
        compiler.register_operator("regex", build_regex);
        compiler.register_operator("startsWith", build_starts_with);
        compiler.register_operator("endsWith", build_ends_with);
        compiler.register_operator("contains", build_contains);
        compiler.register_operator("equal", build_equal);
        compiler.register_operator("notEqual", build_not_equal);
        compiler.register_operator("greaterThan", build_greater_than);
        compiler.register_operator("lessThan", build_less_than);
        compiler.register_operator("count", build_count);
        compiler.register_operator("and", build_and);
        compiler.register_operator("or", build_or);
        compiler.register_operator("not", build_not);
        compiler.register_operator("each", build_all);
        compiler.register_operator("all", build_all);
        compiler.register_operator("any", build_any);
        compiler.register_operator("case", build_case);
        compiler.register_operator("defined", build_defined);

        compiler
    }

    pub fn with_expressions(mut self, expressions: ExpressionRegistry) -> Self {
        self.expressions = expressions;
        self
    }

    pub fn expressions_mut(&mut self) -> &mut ExpressionRegistry {
        &mut self.expressions
    }

    /// Register (or replace) the builder for an element tag.
    pub fn register_operator(&mut self, tag: impl Into<String>, builder: impl NodeBuilder + 'static) {
        self.operators.insert(tag.into(), Arc::new(builder));
    }

    /// Compile a rule rooted at `elements`, without cross-rule resolution
    /// (`defined` elements fail).
    pub fn compile(&self, elements: &[Element]) -> Result<BoxedSpec, CompileError> {
        let ctx = Context {
            compiler: self,
            resolver: None,
        };
        ctx.compile_implicit_and(elements)
    }

    /// Compile a rule rooted at `elements`, resolving `defined` references
    /// through `resolver`.
    pub fn compile_with_resolver(
        &self,
        elements: &[Element],
        resolver: &dyn RuleResolver,
    ) -> Result<BoxedSpec, CompileError> {
        let ctx = Context {
            compiler: self,
            resolver: Some(resolver),
        };
        ctx.compile_implicit_and(elements)
    }

    fn build_node(
        &self,
        element: &Element,
        ctx: &dyn CompileContext,
    ) -> Result<BoxedSpec, CompileError> {
        let operator = self
            .operators
            .get(&element.tag)
            .ok_or_else(|| CompileError::UnknownTag {
                tag: element.tag.clone(),
            })?;

        let mut spec = operator.build(element, ctx)?;
        spec.set_diagnostics(Diagnostics {
            test_expr: element.attr_text("testExpression"),
            failure_message: element.attr_text("failureMessage"),
        });
        Ok(Arc::from(spec))
    }
}

struct Context<'a> {
    compiler: &'a Compiler,
    resolver: Option<&'a dyn RuleResolver>,
}

impl CompileContext for Context<'_> {
    fn compile_element(&self, element: &Element) -> Result<BoxedSpec, CompileError> {
        self.compiler.build_node(element, self)
    }

    fn compile_implicit_and(&self, elements: &[Element]) -> Result<BoxedSpec, CompileError> {
        if elements.len() == 1 {
            return self.compile_element(&elements[0]);
        }
        let children: Result<Vec<BoxedSpec>, CompileError> =
            elements.iter().map(|e| self.compile_element(e)).collect();
        Ok(Arc::new(And::new(children?)))
    }

    fn resolve_expression(&self, text: &str) -> Arc<dyn Expression> {
        self.compiler.expressions.resolve(text)
    }

    fn resolve_rule(&self, name: &str) -> Result<BoxedSpec, CompileError> {
        match self.resolver {
            Some(resolver) => resolver.resolve(name),
            None => Err(CompileError::MalformedRule(format!(
                "cannot resolve rule '{name}': no resolver available"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Built-in node builders
// ---------------------------------------------------------------------------

fn build_true(
    _element: &Element,
    _ctx: &dyn CompileContext,
) -> Result<Box<dyn Specification>, CompileError> {
    Ok(Box::new(IsTrue::new()))
}

fn build_false(
    _element: &Element,
    _ctx: &dyn CompileContext,
) -> Result<Box<dyn Specification>, CompileError> {
    Ok(Box::new(IsFalse::new()))
}

fn build_null(
    _element: &Element,
    _ctx: &dyn CompileContext,
) -> Result<Box<dyn Specification>, CompileError> {
    Ok(Box::new(IsNull::new()))
}

fn build_not_null(
    _element: &Element,
    _ctx: &dyn CompileContext,
) -> Result<Box<dyn Specification>, CompileError> {
    Ok(Box::new(NotNull::new()))
}

struct StringMatchConfig {
    pattern: String,
    ignore_case: bool,
    null_matches: bool,
}

fn string_match_config(element: &Element) -> Result<StringMatchConfig, CompileError> {
    Ok(StringMatchConfig {
        pattern: element.require_text("pattern")?,
        ignore_case: element.attr_bool("ignoreCase")?.unwrap_or(true),
        null_matches: element.attr_bool("nullMatches")?.unwrap_or(false),
    })
}

fn build_regex(
    element: &Element,
    _ctx: &dyn CompileContext,
) -> Result<Box<dyn Specification>, CompileError> {
    let config = string_match_config(element)?;
    let spec = RegexMatch::new(&config.pattern, config.ignore_case, config.null_matches)
        .map_err(|e| CompileError::InvalidAttribute {
            tag: element.tag.clone(),
            field: "pattern".to_string(),
            message: e.to_string(),
        })?;
    Ok(Box::new(spec))
}

fn build_starts_with(
    element: &Element,
    _ctx: &dyn CompileContext,
) -> Result<Box<dyn Specification>, CompileError> {
    let config = string_match_config(element)?;
    Ok(Box::new(StartsWith::new(
        &config.pattern,
        config.ignore_case,
        config.null_matches,
    )))
}

fn build_ends_with(
    element: &Element,
    _ctx: &dyn CompileContext,
) -> Result<Box<dyn Specification>, CompileError> {
    let config = string_match_config(element)?;
    Ok(Box::new(EndsWith::new(
        &config.pattern,
        config.ignore_case,
        config.null_matches,
    )))
}

fn build_contains(
    element: &Element,
    _ctx: &dyn CompileContext,
) -> Result<Box<dyn Specification>, CompileError> {
    let config = string_match_config(element)?;
    Ok(Box::new(Contains::new(
        &config.pattern,
        config.ignore_case,
        config.null_matches,
    )))
}

fn ref_value(
    element: &Element,
    ctx: &dyn CompileContext,
) -> Result<Arc<dyn Expression>, CompileError> {
    let text = element.require_text("refValue")?;
    Ok(ctx.resolve_expression(&text))
}

fn build_equal(
    element: &Element,
    ctx: &dyn CompileContext,
) -> Result<Box<dyn Specification>, CompileError> {
    let strict = element.attr_bool("strict")?.unwrap_or(false);
    Ok(Box::new(Equal::new(ref_value(element, ctx)?).with_strict(strict)))
}

fn build_not_equal(
    element: &Element,
    ctx: &dyn CompileContext,
) -> Result<Box<dyn Specification>, CompileError> {
    let strict = element.attr_bool("strict")?.unwrap_or(false);
    Ok(Box::new(
        NotEqual::new(ref_value(element, ctx)?).with_strict(strict),
    ))
}

fn build_greater_than(
    element: &Element,
    ctx: &dyn CompileContext,
) -> Result<Box<dyn Specification>, CompileError> {
    let strict = element.attr_bool("strict")?.unwrap_or(false);
    let inclusive = element.attr_bool("inclusive")?.unwrap_or(false);
    Ok(Box::new(
        GreaterThan::new(ref_value(element, ctx)?)
            .with_strict(strict)
            .with_inclusive(inclusive),
    ))
}

fn build_less_than(
    element: &Element,
    ctx: &dyn CompileContext,
) -> Result<Box<dyn Specification>, CompileError> {
    let strict = element.attr_bool("strict")?.unwrap_or(false);
    let inclusive = element.attr_bool("inclusive")?.unwrap_or(false);
    Ok(Box::new(
        LessThan::new(ref_value(element, ctx)?)
            .with_strict(strict)
            .with_inclusive(inclusive),
    ))
}

fn build_count(
    element: &Element,
    ctx: &dyn CompileContext,
) -> Result<Box<dyn Specification>, CompileError> {
    let min = element.attr_i64("min")?.unwrap_or(0);
    let max = element.attr_i64("max")?.unwrap_or(i64::MAX);
    let filter = if element.children.is_empty() {
        None
    } else {
        Some(ctx.compile_implicit_and(&element.children)?)
    };
    Ok(Box::new(Count::new(min, max, filter)?))
}

fn composite_elements(
    element: &Element,
    ctx: &dyn CompileContext,
) -> Result<Vec<BoxedSpec>, CompileError> {
    element
        .children
        .iter()
        .map(|child| ctx.compile_element(child))
        .collect()
}

fn build_and(
    element: &Element,
    ctx: &dyn CompileContext,
) -> Result<Box<dyn Specification>, CompileError> {
    Ok(Box::new(And::new(composite_elements(element, ctx)?)))
}

fn build_or(
    element: &Element,
    ctx: &dyn CompileContext,
) -> Result<Box<dyn Specification>, CompileError> {
    Ok(Box::new(Or::new(composite_elements(element, ctx)?)))
}

fn build_not(
    element: &Element,
    ctx: &dyn CompileContext,
) -> Result<Box<dyn Specification>, CompileError> {
    Ok(Box::new(Not::new(composite_elements(element, ctx)?)))
}

fn quantifier_element(
    element: &Element,
    ctx: &dyn CompileContext,
) -> Result<Option<BoxedSpec>, CompileError> {
    match element.children.len() {
        0 => {
            // Tolerated for compatibility with existing rule documents.
            tracing::warn!(
                "'{}' element has no child specification; it will pass vacuously",
                element.tag
            );
            Ok(None)
        }
        n => {
            if n > 1 {
                tracing::warn!(
                    "'{}' element has {} children; only the first is used",
                    element.tag,
                    n
                );
            }
            Ok(Some(ctx.compile_element(&element.children[0])?))
        }
    }
}

fn build_all(
    element: &Element,
    ctx: &dyn CompileContext,
) -> Result<Box<dyn Specification>, CompileError> {
    Ok(Box::new(All::new(quantifier_element(element, ctx)?)))
}

fn build_any(
    element: &Element,
    ctx: &dyn CompileContext,
) -> Result<Box<dyn Specification>, CompileError> {
    Ok(Box::new(Any::new(quantifier_element(element, ctx)?)))
}

fn build_case(
    element: &Element,
    ctx: &dyn CompileContext,
) -> Result<Box<dyn Specification>, CompileError> {
    let mut arms = Vec::new();
    let mut otherwise = None;

    let mut i = 0;
    while i < element.children.len() {
        let child = &element.children[i];
        if child.tag == "else" {
            otherwise = Some(ctx.compile_implicit_and(&child.children)?);
            break;
        }
        if child.tag != "when" {
            return Err(CompileError::MalformedRule(format!(
                "expected 'when' element in case, found '{}'",
                child.tag
            )));
        }
        let when = ctx.compile_implicit_and(&child.children)?;
        i += 1;

        let then = element
            .children
            .get(i)
            .filter(|c| c.tag == "then")
            .ok_or_else(|| {
                CompileError::MalformedRule("expected 'then' element after 'when'".to_string())
            })?;
        let then = ctx.compile_implicit_and(&then.children)?;
        i += 1;

        arms.push(CaseArm { when, then });
    }

    let otherwise = otherwise.ok_or_else(|| {
        CompileError::MalformedRule("expected 'else' element closing the case".to_string())
    })?;
    Ok(Box::new(Case::new(arms, otherwise)))
}

fn build_defined(
    element: &Element,
    ctx: &dyn CompileContext,
) -> Result<Box<dyn Specification>, CompileError> {
    let name = element.require_text("spec")?;
    let inner = ctx.resolve_rule(&name)?;
    Ok(Box::new(Defined::new(name, inner)))
}
