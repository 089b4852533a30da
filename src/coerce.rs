//! Category-driven coercion for comparison nodes.
//!
//! Comparing two runtime values first places them on common ground. Values
//! of the same category compare directly; values of differing categories go
//! through a one-directional conversion (textual to numeric, textual to
//! enum member, char to single-character text). The outcome distinguishes
//! "ordered", "equality only", and "no common ground" so equality nodes can
//! stay lenient while ordering nodes refuse to compare the incomparable.

use std::cmp::Ordering;

use crate::value::Value;

/// How two values relate once placed on common ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Relation {
    /// A common category with a total order was found.
    Ordered(Ordering),
    /// A common category was found, but it only supports equality
    /// (lists, maps).
    Equivalence(bool),
    /// No common ground: equality is false, ordering is an error.
    Disjoint,
}

/// Relate `value` (the tested side) to `reference` (the rule side).
///
/// The null marker sorts strictly below every non-null value in both
/// modes. Strict mode skips coercion entirely: categories either match
/// exactly or the values are disjoint.
pub(crate) fn relate(value: &Value, reference: &Value, strict: bool) -> Relation {
    use Value::*;

    match (value, reference) {
        (Null, Null) => Relation::Ordered(Ordering::Equal),
        (Null, _) => Relation::Ordered(Ordering::Less),
        (_, Null) => Relation::Ordered(Ordering::Greater),

        // Same category: direct comparison, identical in both modes.
        (Bool(a), Bool(b)) => Relation::Ordered(a.cmp(b)),
        (Int(a), Int(b)) => Relation::Ordered(a.cmp(b)),
        (Decimal(a), Decimal(b)) => numeric(*a, *b),
        (Text(a), Text(b)) => Relation::Ordered(a.as_str().cmp(b.as_str())),
        (Char(a), Char(b)) => Relation::Ordered(a.cmp(b)),
        (Enum(a), Enum(b)) => {
            if a.type_name() == b.type_name() {
                Relation::Ordered(a.index().cmp(&b.index()))
            } else {
                Relation::Disjoint
            }
        }
        (List(a), List(b)) => Relation::Equivalence(a == b),
        (Map(a), Map(b)) => Relation::Equivalence(a == b),

        _ if strict => Relation::Disjoint,

        // Mixed numerics widen to decimal.
        (Int(a), Decimal(b)) => numeric(*a as f64, *b),
        (Decimal(a), Int(b)) => numeric(*a, *b as f64),

        // Textual vs numeric: the textual side is parsed as a number.
        (Text(a), Int(b)) => parse_numeric(a).map_or(Relation::Disjoint, |a| numeric(a, *b as f64)),
        (Text(a), Decimal(b)) => parse_numeric(a).map_or(Relation::Disjoint, |a| numeric(a, *b)),
        (Int(a), Text(b)) => parse_numeric(b).map_or(Relation::Disjoint, |b| numeric(*a as f64, b)),
        (Decimal(a), Text(b)) => parse_numeric(b).map_or(Relation::Disjoint, |b| numeric(*a, b)),

        // Textual vs enum: member-name lookup, then declaration order.
        (Text(a), Enum(b)) => match b.with_member(a) {
            Some(a) => Relation::Ordered(a.index().cmp(&b.index())),
            None => Relation::Disjoint,
        },
        (Enum(a), Text(b)) => match a.with_member(b) {
            Some(b) => Relation::Ordered(a.index().cmp(&b.index())),
            None => Relation::Disjoint,
        },

        // Char vs text: single-character-string equivalence.
        (Char(a), Text(b)) => Relation::Ordered(a.to_string().as_str().cmp(b.as_str())),
        (Text(a), Char(b)) => Relation::Ordered(a.as_str().cmp(b.to_string().as_str())),

        _ => Relation::Disjoint,
    }
}

fn numeric(a: f64, b: f64) -> Relation {
    match a.partial_cmp(&b) {
        Some(ordering) => Relation::Ordered(ordering),
        None => Relation::Disjoint,
    }
}

fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::EnumSymbol;

    fn color(member: &str) -> Value {
        Value::Enum(EnumSymbol::new("Color", ["Red", "Green", "Blue"], member).unwrap())
    }

    #[test]
    fn null_sorts_below_everything() {
        assert_eq!(
            relate(&Value::Null, &Value::Null, false),
            Relation::Ordered(Ordering::Equal)
        );
        assert_eq!(
            relate(&Value::Null, &Value::Int(0), false),
            Relation::Ordered(Ordering::Less)
        );
        assert_eq!(
            relate(&Value::Int(0), &Value::Null, true),
            Relation::Ordered(Ordering::Greater)
        );
    }

    #[test]
    fn same_category_text_is_ordinal() {
        assert_eq!(
            relate(&Value::from("0.5"), &Value::from("1"), false),
            Relation::Ordered(Ordering::Less)
        );
        assert_eq!(
            relate(&Value::from("2.1"), &Value::from("1"), false),
            Relation::Ordered(Ordering::Greater)
        );
        // Exact character sequence; no numeric normalization.
        assert_eq!(
            relate(&Value::from("1.00"), &Value::from("1.0"), false),
            Relation::Ordered(Ordering::Greater)
        );
    }

    #[test]
    fn textual_side_parses_toward_numeric() {
        assert_eq!(
            relate(&Value::Int(1), &Value::from("1.0"), false),
            Relation::Ordered(Ordering::Equal)
        );
        assert_eq!(
            relate(&Value::from("1.000"), &Value::Decimal(1.0), false),
            Relation::Ordered(Ordering::Equal)
        );
        assert_eq!(
            relate(&Value::Decimal(0.5), &Value::from("1"), false),
            Relation::Ordered(Ordering::Less)
        );
        assert_eq!(
            relate(&Value::from("abc"), &Value::Int(1), false),
            Relation::Disjoint
        );
    }

    #[test]
    fn strict_mode_disables_coercion() {
        assert_eq!(relate(&Value::Int(1), &Value::Decimal(1.0), true), Relation::Disjoint);
        assert_eq!(relate(&Value::from("1"), &Value::Int(1), true), Relation::Disjoint);
        assert_eq!(
            relate(&Value::Int(2), &Value::Int(1), true),
            Relation::Ordered(Ordering::Greater)
        );
    }

    #[test]
    fn enum_member_lookup() {
        assert_eq!(
            relate(&Value::from("Green"), &color("Green"), false),
            Relation::Ordered(Ordering::Equal)
        );
        assert_eq!(
            relate(&Value::from("Blue"), &color("Red"), false),
            Relation::Ordered(Ordering::Greater)
        );
        assert_eq!(
            relate(&Value::from("Purple"), &color("Red"), false),
            Relation::Disjoint
        );
    }

    #[test]
    fn char_text_equivalence() {
        assert_eq!(
            relate(&Value::Char('a'), &Value::from("a"), false),
            Relation::Ordered(Ordering::Equal)
        );
        assert_eq!(
            relate(&Value::from("b"), &Value::Char('a'), false),
            Relation::Ordered(Ordering::Greater)
        );
    }

    #[test]
    fn structural_shapes_support_equality_only() {
        let a = Value::list([1i64, 2]);
        let b = Value::list([1i64, 2]);
        let c = Value::list([9i64]);
        assert_eq!(relate(&a, &b, false), Relation::Equivalence(true));
        assert_eq!(relate(&a, &c, false), Relation::Equivalence(false));
        assert_eq!(relate(&a, &Value::Int(1), false), Relation::Disjoint);
    }
}
