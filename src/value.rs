//! Runtime values that specifications are evaluated against.
//!
//! The engine is dynamically typed at its surface (rule documents do not
//! declare types), but internally every value belongs to a closed set of
//! categories so the comparison code can match category pairs exhaustively.

use std::collections::BTreeMap;
use std::sync::Arc;

/// A runtime value under test.
///
/// `List` is the only enumerable shape (quantifier and count nodes require
/// it); `Map` is the structural representation of an opaque object.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Decimal(f64),
    Text(String),
    Char(char),
    Enum(EnumSymbol),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

/// The comparable category of a non-null value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Boolean,
    Integer,
    Decimal,
    Text,
    Char,
    Enum,
    List,
    Map,
}

impl Value {
    /// The value's category, or `None` for the null marker (null is handled
    /// before categorization everywhere in the engine).
    pub fn category(&self) -> Option<Category> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(Category::Boolean),
            Value::Int(_) => Some(Category::Integer),
            Value::Decimal(_) => Some(Category::Decimal),
            Value::Text(_) => Some(Category::Text),
            Value::Char(_) => Some(Category::Char),
            Value::Enum(_) => Some(Category::Enum),
            Value::List(_) => Some(Category::List),
            Value::Map(_) => Some(Category::Map),
        }
    }

    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::Text(_) => "text",
            Value::Char(_) => "char",
            Value::Enum(_) => "enum",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Build a list value from anything convertible.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Decimal(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

impl From<EnumSymbol> for Value {
    fn from(v: EnumSymbol) -> Self {
        Value::Enum(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Decimal(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Value::Map(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// A member of a named enumeration.
///
/// Carries the full member list so that looking a textual value up by
/// member name can genuinely fail, and so ordering can follow declaration
/// order. Two symbols are equal when they belong to the same enumeration
/// type and select the same member.
#[derive(Debug, Clone)]
pub struct EnumSymbol {
    type_name: Arc<str>,
    members: Arc<[String]>,
    index: usize,
}

impl EnumSymbol {
    /// Create a symbol for `member` of the enumeration `type_name`.
    /// Returns `None` if `member` is not among `members`.
    pub fn new<I, S>(type_name: &str, members: I, member: &str) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let members: Arc<[String]> = members.into_iter().map(Into::into).collect();
        let index = members.iter().position(|m| m == member)?;
        Some(Self {
            type_name: Arc::from(type_name),
            members,
            index,
        })
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Name of the selected member.
    pub fn name(&self) -> &str {
        &self.members[self.index]
    }

    /// Position of the selected member in declaration order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Resolve another member of the same enumeration by name.
    pub fn with_member(&self, name: &str) -> Option<Self> {
        let index = self.members.iter().position(|m| m == name)?;
        Some(Self {
            type_name: Arc::clone(&self.type_name),
            members: Arc::clone(&self.members),
            index,
        })
    }
}

impl PartialEq for EnumSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.index == other.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn color(member: &str) -> EnumSymbol {
        EnumSymbol::new("Color", ["Red", "Green", "Blue"], member).unwrap()
    }

    #[test]
    fn converts_json_values() {
        assert_eq!(Value::from(json!(null)), Value::Null);
        assert_eq!(Value::from(json!(3)), Value::Int(3));
        assert_eq!(Value::from(json!(1.5)), Value::Decimal(1.5));
        assert_eq!(Value::from(json!("x")), Value::Text("x".to_string()));
        assert_eq!(
            Value::from(json!([1, "a"])),
            Value::List(vec![Value::Int(1), Value::Text("a".to_string())])
        );

        let obj = Value::from(json!({"name": "ct", "slices": 64}));
        match obj {
            Value::Map(fields) => {
                assert_eq!(fields.get("slices"), Some(&Value::Int(64)));
            }
            other => panic!("expected map, got {other:?}"),
        }
    }

    #[test]
    fn enum_symbol_member_lookup() {
        let green = color("Green");
        assert_eq!(green.name(), "Green");
        assert_eq!(green.index(), 1);

        let blue = green.with_member("Blue").unwrap();
        assert_eq!(blue.index(), 2);
        assert!(green.with_member("Purple").is_none());
        assert!(EnumSymbol::new("Color", ["Red"], "Purple").is_none());
    }

    #[test]
    fn enum_symbols_compare_by_type_and_member() {
        assert_eq!(color("Red"), color("Red"));
        assert_ne!(color("Red"), color("Blue"));

        let other = EnumSymbol::new("Mood", ["Red", "Green", "Blue"], "Red").unwrap();
        assert_ne!(color("Red"), other);
    }

    #[test]
    fn categories_cover_every_variant() {
        assert_eq!(Value::Null.category(), None);
        assert_eq!(Value::Bool(true).category(), Some(Category::Boolean));
        assert_eq!(Value::Int(1).category(), Some(Category::Integer));
        assert_eq!(Value::Decimal(1.0).category(), Some(Category::Decimal));
        assert_eq!(Value::from("a").category(), Some(Category::Text));
        assert_eq!(Value::Char('a').category(), Some(Category::Char));
        assert_eq!(Value::from(color("Red")).category(), Some(Category::Enum));
        assert_eq!(Value::list([1i64]).category(), Some(Category::List));
    }
}
