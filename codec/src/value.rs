//! Runtime values exchanged with the codec.

use std::collections::BTreeMap;
use std::fmt;

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint};
use num_traits::ToPrimitive;
use schema::Primitive;

/// A dynamically typed value.
///
/// Integers are normalized: anything that fits `i64` is [`Value::Int`], and
/// [`Value::BigInt`] only holds values outside that range. The `From`
/// conversions below keep that invariant. Object entries are ordered by key so
/// encodings are reproducible.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    BigInt(BigInt),
    Float(f64),
    Decimal(BigDecimal),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Returns a short lowercase name of the value's runtime kind.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) | Self::BigInt(_) => "integer",
            Self::Float(_) => "float",
            Self::Decimal(_) => "decimal",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the integer value if it fits `i128`.
    #[must_use]
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Self::Int(value) => Some(i128::from(*value)),
            Self::BigInt(value) => value.to_i128(),
            _ => None,
        }
    }

    /// Returns the integer value at arbitrary precision.
    #[must_use]
    pub fn to_bigint(&self) -> Option<BigInt> {
        match self {
            Self::Int(value) => Some(BigInt::from(*value)),
            Self::BigInt(value) => Some(value.clone()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns `true` if the value equals an enum member.
    ///
    /// Integers and floats compare numerically.
    #[must_use]
    pub fn matches(&self, member: &Primitive) -> bool {
        match (self, member) {
            (Self::Null, Primitive::Null) => true,
            (Self::Bool(a), Primitive::Bool(b)) => a == b,
            (Self::Int(a), Primitive::Int(b)) => a == b,
            (Self::Float(a), Primitive::Float(b)) => a == b,
            (Self::Int(a), Primitive::Float(b)) | (Self::Float(b), Primitive::Int(a)) => {
                float_equals_int(*b, *a)
            }
            (Self::String(a), Primitive::String(b)) => a == b,
            _ => false,
        }
    }
}

/// Exact comparison; `i64` values above 2^53 do not round to a nearby float.
fn float_equals_int(float: f64, int: i64) -> bool {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    float.fract() == 0.0 && (-LIMIT..LIMIT).contains(&float) && float as i64 == int
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or_else(|_| Self::BigInt(BigInt::from(value)), Self::Int)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        value.to_i64().map_or(Self::BigInt(value), Self::Int)
    }
}

impl From<BigUint> for Value {
    fn from(value: BigUint) -> Self {
        Self::from(BigInt::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<BigDecimal> for Value {
    fn from(value: BigDecimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::Array(items)
    }
}

impl From<BTreeMap<String, Self>> for Value {
    fn from(entries: BTreeMap<String, Self>) -> Self {
        Self::Object(entries)
    }
}

impl From<&Primitive> for Value {
    fn from(member: &Primitive) -> Self {
        match member {
            Primitive::Null => Self::Null,
            Primitive::Bool(value) => Self::Bool(*value),
            Primitive::Int(value) => Self::Int(*value),
            Primitive::Float(value) => Self::Float(*value),
            Primitive::String(value) => Self::String(value.clone()),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Object(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::BigInt(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Decimal(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value:?}"),
            Self::Array(items) => {
                write!(f, "[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Object(entries) => {
                write!(f, "{{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_normalized() {
        assert_eq!(Value::from(u64::MAX >> 1), Value::Int(i64::MAX));
        assert!(matches!(Value::from(u64::MAX), Value::BigInt(_)));
        assert_eq!(Value::from(BigInt::from(-5)), Value::Int(-5));
        assert_eq!(Value::from(BigUint::from(7u8)), Value::Int(7));
        let big: BigInt = BigInt::from(i64::MIN) - 1;
        assert_eq!(Value::from(big.clone()), Value::BigInt(big));
    }

    #[test]
    fn as_i128_covers_both_integer_forms() {
        assert_eq!(Value::Int(-3).as_i128(), Some(-3));
        assert_eq!(
            Value::from(u64::MAX).as_i128(),
            Some(i128::from(u64::MAX))
        );
        assert_eq!(Value::Float(1.0).as_i128(), None);
    }

    #[test]
    fn matches_compares_numbers_numerically() {
        assert!(Value::Int(2).matches(&Primitive::Float(2.0)));
        assert!(Value::Float(2.0).matches(&Primitive::Int(2)));
        assert!(!Value::Float(2.5).matches(&Primitive::Int(2)));
        assert!(!Value::Int((1 << 53) + 1).matches(&Primitive::Float(9_007_199_254_740_992.0)));
        assert!(Value::Int(1 << 53).matches(&Primitive::Float(9_007_199_254_740_992.0)));
        assert!(!Value::Float(f64::INFINITY).matches(&Primitive::Int(i64::MAX)));
        assert!(!Value::Float(9_223_372_036_854_775_808.0).matches(&Primitive::Int(i64::MAX)));
        assert!(Value::Float(-9_223_372_036_854_775_808.0).matches(&Primitive::Int(i64::MIN)));
        assert!(Value::from("a").matches(&Primitive::from("a")));
        assert!(!Value::Null.matches(&Primitive::Bool(false)));
    }

    #[test]
    fn object_from_pairs() {
        let value: Value = [("b", 2i64), ("a", 1i64)].into_iter().collect();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn display_renders_nested_values() {
        let value = Value::Array(vec![
            Value::Null,
            Value::from("x"),
            [("k", Value::Bool(true))].into_iter().collect(),
        ]);
        assert_eq!(value.to_string(), r#"[null, "x", {"k": true}]"#);
    }

    #[test]
    fn kind_names() {
        assert_eq!(Value::Int(0).kind_name(), "integer");
        assert_eq!(Value::from(u64::MAX).kind_name(), "integer");
        assert_eq!(Value::Object(BTreeMap::new()).kind_name(), "object");
    }
}
