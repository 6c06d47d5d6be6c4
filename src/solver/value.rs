use serde::{Deserialize, Serialize};

/// A single candidate value in a variable's domain.
///
/// The engine is untyped at the problem level: a domain may mix integers,
/// booleans and strings, and constraint predicates receive values
/// positionally. `Tuple` values never appear in user-built problems; they are
/// the domain values of dual variables produced by
/// [`DualGraphBuilder`](crate::solver::dual::DualGraphBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Value {
    /// A 64-bit integer value.
    Int(i64),
    /// A boolean value.
    Bool(bool),
    /// A string value.
    Str(String),
    /// An ordered tuple of values, one per scope position of a dual variable.
    Tuple(Vec<Value>),
}

impl Value {
    /// Returns the integer payload, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Sums a slice of integer values.
    ///
    /// # Panics
    ///
    /// Panics if any value is not an `Int`. Sum constraints over non-integer
    /// domains are a modelling error, not a recoverable condition.
    pub fn sum(values: &[Value]) -> i64 {
        values
            .iter()
            .map(|v| {
                v.as_int()
                    .expect("sum constraints are only supported for Int values")
            })
            .sum()
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}
