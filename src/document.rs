//! The declarative markup document model.
//!
//! A document is a set of named rules, each rooted at an ordered list of
//! elements. An element has a tag (its node kind), attributes (its
//! configuration), and child elements. The model is serde-deserializable,
//! so documents are authored as JSON and arrive here already structured.
//!
//! Attribute accessors accept both native JSON scalars and their string
//! spellings (`true` / `"true"`, `3` / `"3"`), the way markup attributes
//! are conventionally written. An empty-string attribute counts as absent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::CompileError;

/// One markup element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Element {
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, JsonValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn child(mut self, element: Element) -> Self {
        self.children.push(element);
        self
    }

    /// Textual attribute value. Numbers and booleans stringify; an empty
    /// string counts as absent.
    pub fn attr_text(&self, name: &str) -> Option<String> {
        match self.attributes.get(name)? {
            JsonValue::String(s) if s.is_empty() => None,
            JsonValue::String(s) => Some(s.clone()),
            JsonValue::Number(n) => Some(n.to_string()),
            JsonValue::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Textual attribute that the node cannot be built without.
    pub fn require_text(&self, name: &str) -> Result<String, CompileError> {
        self.attr_text(name)
            .ok_or_else(|| CompileError::MissingRequiredField {
                tag: self.tag.clone(),
                field: name.to_string(),
            })
    }

    /// Boolean attribute, allowing the `"true"`/`"false"` spelling.
    pub fn attr_bool(&self, name: &str) -> Result<Option<bool>, CompileError> {
        match self.attributes.get(name) {
            None | Some(JsonValue::Null) => Ok(None),
            Some(JsonValue::Bool(b)) => Ok(Some(*b)),
            Some(JsonValue::String(s)) if s.is_empty() => Ok(None),
            Some(JsonValue::String(s)) => match s.to_ascii_lowercase().as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(self.invalid_attr(name, format!("'{s}' is not a boolean"))),
            },
            Some(other) => Err(self.invalid_attr(name, format!("{other} is not a boolean"))),
        }
    }

    /// Integer attribute, allowing the string spelling.
    pub fn attr_i64(&self, name: &str) -> Result<Option<i64>, CompileError> {
        match self.attributes.get(name) {
            None | Some(JsonValue::Null) => Ok(None),
            Some(JsonValue::Number(n)) => n.as_i64().map(Some).ok_or_else(|| {
                self.invalid_attr(name, format!("{n} is not an integer"))
            }),
            Some(JsonValue::String(s)) if s.is_empty() => Ok(None),
            Some(JsonValue::String(s)) => s.parse::<i64>().map(Some).map_err(|_| {
                self.invalid_attr(name, format!("'{s}' is not an integer"))
            }),
            Some(other) => Err(self.invalid_attr(name, format!("{other} is not an integer"))),
        }
    }

    fn invalid_attr(&self, name: &str, message: String) -> CompileError {
        CompileError::InvalidAttribute {
            tag: self.tag.clone(),
            field: name.to_string(),
            message,
        }
    }
}

/// A full rule document: named rules, each a list of root elements.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RuleDocument {
    #[serde(default)]
    pub rules: BTreeMap<String, Vec<Element>>,
}

impl RuleDocument {
    pub fn from_json_str(json: &str) -> Result<Self, CompileError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_value(value: JsonValue) -> Result<Self, CompileError> {
        Ok(serde_json::from_value(value)?)
    }
}
