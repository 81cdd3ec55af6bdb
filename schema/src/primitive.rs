//! Primitive constants used as enum members.

/// A scalar constant that can appear in an enum member list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Primitive {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Primitive {
    /// Returns a short lowercase name of the primitive's kind.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
        }
    }
}

impl From<bool> for Primitive {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Primitive {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Primitive {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Primitive {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Primitive {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        assert_eq!(Primitive::from(true), Primitive::Bool(true));
        assert_eq!(Primitive::from(7i64), Primitive::Int(7));
        assert_eq!(Primitive::from("a"), Primitive::String("a".to_owned()));
        assert_eq!(Primitive::from(0.5), Primitive::Float(0.5));
    }

    #[test]
    fn kind_names() {
        assert_eq!(Primitive::Null.kind_name(), "null");
        assert_eq!(Primitive::Int(0).kind_name(), "int");
    }
}
