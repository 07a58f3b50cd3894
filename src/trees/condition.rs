use std::fmt::{self, Display, Formatter};

use crate::data::value::{Attribute, Value};

/// The comparison performed by a branch test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Operator::Eq => "==",
            Operator::Neq => "!=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
        };
        write!(f, "{}", symbol)
    }
}

/// One branch test of an internal tree node: attribute, operator and
/// threshold (or nominal value), plus the majority class of the subset the
/// branch was created from and the branch's reach.
///
/// The majority class answers two fallbacks: it labels the branch when its
/// partition turns out empty or uninformative, and it is the prediction for
/// instances whose value at the tested attribute is unknown. Reach is the
/// fraction of known-value instances that took this branch; clones of
/// missing-value instances are weighted by it.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    attribute: Attribute,
    attribute_index: usize,
    value: Value,
    operator: Operator,
    majority: Value,
    reach: f64,
}

impl Condition {
    pub fn new(
        attribute: Attribute,
        attribute_index: usize,
        value: Value,
        operator: Operator,
        majority: Value,
    ) -> Self {
        Self {
            attribute,
            attribute_index,
            value,
            operator,
            majority,
            reach: 0.0,
        }
    }

    pub fn attribute(&self) -> &Attribute {
        &self.attribute
    }

    pub fn attribute_index(&self) -> usize {
        self.attribute_index
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn majority_class(&self) -> &Value {
        &self.majority
    }

    pub fn reach(&self) -> f64 {
        self.reach
    }

    pub fn set_reach(&mut self, reach: f64) {
        self.reach = reach;
    }

    /// Whether the test holds for the given value. Ordering operators apply
    /// to numeric payloads only; anything else fails the test.
    pub fn holds(&self, value: &Value) -> bool {
        match self.operator {
            Operator::Eq => value == &self.value,
            Operator::Neq => value != &self.value,
            Operator::Lt | Operator::Lte | Operator::Gt | Operator::Gte => {
                match (value.as_f64(), self.value.as_f64()) {
                    (Some(x), Some(threshold)) => match self.operator {
                        Operator::Lt => x < threshold,
                        Operator::Lte => x <= threshold,
                        Operator::Gt => x > threshold,
                        _ => x >= threshold,
                    },
                    _ => false,
                }
            }
        }
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.attribute.name(), self.operator, self.value)
    }
}
