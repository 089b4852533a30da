//! Specification factory: loads a rule document once and serves compiled
//! rules by name.
//!
//! All named rules compile during construction; lookups afterward are
//! lock-free reads of an immutable cache. `defined` references between
//! rules resolve on demand while loading (forward references included),
//! with an in-progress set guarding against reference cycles.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::compiler::{Compiler, RuleResolver};
use crate::document::RuleDocument;
use crate::error::{CompileError, SpecificationError};
use crate::specification::BoxedSpec;

/// An immutable, shareable set of compiled named rules.
#[derive(Debug)]
pub struct SpecificationFactory {
    specs: HashMap<String, BoxedSpec>,
}

impl SpecificationFactory {
    /// Load a document with the default compiler.
    pub fn load(document: RuleDocument) -> Result<Self, CompileError> {
        Self::load_with(document, Compiler::new())
    }

    /// Load a document with a caller-configured compiler (custom operators
    /// or expression factories).
    pub fn load_with(document: RuleDocument, compiler: Compiler) -> Result<Self, CompileError> {
        let resolver = LoadResolver {
            document: &document,
            compiler: &compiler,
            cache: RefCell::new(HashMap::new()),
            in_progress: RefCell::new(HashSet::new()),
        };
        for name in document.rules.keys() {
            resolver.resolve(name)?;
        }
        Ok(Self {
            specs: resolver.cache.into_inner(),
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CompileError> {
        Self::load(RuleDocument::from_json_str(json)?)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self, CompileError> {
        Self::load(RuleDocument::from_json_value(value)?)
    }

    /// Look up a compiled rule by name.
    pub fn get_specification(&self, name: &str) -> Result<BoxedSpec, SpecificationError> {
        self.specs
            .get(name)
            .cloned()
            .ok_or_else(|| SpecificationError::NotFound {
                name: name.to_string(),
            })
    }

    /// Names of all compiled rules.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }
}

struct LoadResolver<'a> {
    document: &'a RuleDocument,
    compiler: &'a Compiler,
    cache: RefCell<HashMap<String, BoxedSpec>>,
    in_progress: RefCell<HashSet<String>>,
}

impl RuleResolver for LoadResolver<'_> {
    fn resolve(&self, name: &str) -> Result<BoxedSpec, CompileError> {
        if let Some(spec) = self.cache.borrow().get(name) {
            return Ok(spec.clone());
        }
        if !self.in_progress.borrow_mut().insert(name.to_string()) {
            return Err(CompileError::MalformedRule(format!(
                "circular rule reference involving '{name}'"
            )));
        }

        let elements = self.document.rules.get(name).ok_or_else(|| {
            CompileError::Specification(SpecificationError::NotFound {
                name: name.to_string(),
            })
        })?;
        let spec = self.compiler.compile_with_resolver(elements, self)?;
        tracing::debug!("compiled rule '{}'", name);

        self.in_progress.borrow_mut().remove(name);
        self.cache.borrow_mut().insert(name.to_string(), spec.clone());
        Ok(spec)
    }
}
