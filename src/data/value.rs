use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

/// The kind of data an attribute holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Numeric,
    Nominal,
    Unknown,
}

/// A named column of the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    name: String,
    kind: AttributeType,
}

impl Attribute {
    pub fn new(name: impl Into<String>, kind: AttributeType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AttributeType {
        self.kind
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{:?}]", self.name, self.kind)
    }
}

/// A single cell of an instance vector.
///
/// Two values are equal iff they carry the same tag and the same payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Numeric(f64),
    Nominal(String),
    Unknown,
}

impl Value {
    /// Shorthand for building a nominal value from anything string-like.
    pub fn nominal(payload: impl Into<String>) -> Self {
        Value::Nominal(payload.into())
    }

    pub fn value_type(&self) -> AttributeType {
        match self {
            Value::Numeric(_) => AttributeType::Numeric,
            Value::Nominal(_) => AttributeType::Nominal,
            Value::Unknown => AttributeType::Unknown,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Numeric(x) => Some(*x),
            _ => None,
        }
    }

    /// Total ordering used when sorting instances by one attribute: Unknown
    /// sorts first, numeric values order by magnitude, nominal values
    /// lexically. Values of different tags order Unknown < Numeric < Nominal.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Unknown, Value::Unknown) => Ordering::Equal,
            (Value::Unknown, _) => Ordering::Less,
            (_, Value::Unknown) => Ordering::Greater,
            (Value::Numeric(a), Value::Numeric(b)) => a.total_cmp(b),
            (Value::Numeric(_), Value::Nominal(_)) => Ordering::Less,
            (Value::Nominal(_), Value::Numeric(_)) => Ordering::Greater,
            (Value::Nominal(a), Value::Nominal(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Numeric(x) => write!(f, "{}", x),
            Value::Nominal(s) => write!(f, "{}", s),
            Value::Unknown => write!(f, "?"),
        }
    }
}
