use std::fmt;
use std::sync::Arc;

use crate::solver::{
    csp::Assignment,
    value::Value,
    variable::VariableName,
};

/// Identifies a constraint by its position in the problem's constraint list.
pub type ConstraintId = usize;

/// A caller-supplied predicate over positional values in scope order.
///
/// Predicates must be deterministic and side-effect free.
pub type Predicate = Arc<dyn Fn(&[Value]) -> bool + Send + Sync>;

/// The closed set of constraint tests the engine understands.
///
/// Every variant is a pure function of the positional values it is handed
/// plus its constructor parameters. Sum variants are integer-only and panic
/// on other value types.
#[derive(Clone)]
pub enum ConstraintKind {
    /// An opaque caller-supplied predicate.
    Predicate(Predicate),
    /// All values in scope are pairwise distinct.
    AllDifferent,
    /// All values in scope are equal.
    AllEqual,
    /// Exactly `limit` occurrences of `value` in scope.
    CountEqualTo { limit: usize, value: Value },
    /// At most `limit` occurrences of `value` in scope.
    CountUpperLimit { limit: usize, value: Value },
    /// At least `limit` occurrences of `value` in scope.
    CountLowerLimit { limit: usize, value: Value },
    /// The integer values in scope sum to exactly this total.
    ExactSum(i64),
    /// The integer values in scope sum to at least this total.
    MinSum(i64),
    /// The integer values in scope sum to at most this total.
    MaxSum(i64),
}

impl ConstraintKind {
    /// Wraps a closure as a predicate constraint.
    pub fn predicate(f: impl Fn(&[Value]) -> bool + Send + Sync + 'static) -> Self {
        ConstraintKind::Predicate(Arc::new(f))
    }

    /// Evaluates the test against positional values in scope order.
    pub fn is_satisfied(&self, values: &[Value]) -> bool {
        match self {
            ConstraintKind::Predicate(f) => f(values),
            ConstraintKind::AllDifferent => {
                let distinct: std::collections::HashSet<&Value> = values.iter().collect();
                distinct.len() == values.len()
            }
            ConstraintKind::AllEqual => match values.split_first() {
                Some((first, rest)) => rest.iter().all(|v| v == first),
                None => true,
            },
            ConstraintKind::CountEqualTo { limit, value } => {
                values.iter().filter(|v| *v == value).count() == *limit
            }
            ConstraintKind::CountUpperLimit { limit, value } => {
                values.iter().filter(|v| *v == value).count() <= *limit
            }
            ConstraintKind::CountLowerLimit { limit, value } => {
                values.iter().filter(|v| *v == value).count() >= *limit
            }
            ConstraintKind::ExactSum(total) => Value::sum(values) == *total,
            ConstraintKind::MinSum(total) => Value::sum(values) >= *total,
            ConstraintKind::MaxSum(total) => Value::sum(values) <= *total,
        }
    }
}

impl fmt::Debug for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintKind::Predicate(_) => write!(f, "Predicate(..)"),
            ConstraintKind::AllDifferent => write!(f, "AllDifferent"),
            ConstraintKind::AllEqual => write!(f, "AllEqual"),
            ConstraintKind::CountEqualTo { limit, value } => {
                write!(f, "CountEqualTo({limit}, {value:?})")
            }
            ConstraintKind::CountUpperLimit { limit, value } => {
                write!(f, "CountUpperLimit({limit}, {value:?})")
            }
            ConstraintKind::CountLowerLimit { limit, value } => {
                write!(f, "CountLowerLimit({limit}, {value:?})")
            }
            ConstraintKind::ExactSum(total) => write!(f, "ExactSum({total})"),
            ConstraintKind::MinSum(total) => write!(f, "MinSum({total})"),
            ConstraintKind::MaxSum(total) => write!(f, "MaxSum({total})"),
        }
    }
}

/// A constraint: an ordered scope of variable names plus a test evaluated
/// over values in scope order. Immutable after creation.
#[derive(Debug, Clone)]
pub struct Constraint {
    params: Vec<VariableName>,
    kind: ConstraintKind,
}

impl Constraint {
    pub fn new(kind: ConstraintKind, params: Vec<VariableName>) -> Self {
        Self { params, kind }
    }

    /// The ordered scope: the variable names the test is evaluated over.
    pub fn params(&self) -> &[VariableName] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    /// Evaluates the test against positional values in scope order.
    pub fn is_satisfied(&self, values: &[Value]) -> bool {
        debug_assert_eq!(values.len(), self.params.len());
        self.kind.is_satisfied(values)
    }

    /// Whether every scope variable is bound in the assignment.
    pub fn is_fully_bound(&self, assignment: &Assignment) -> bool {
        self.params.iter().all(|name| assignment.contains_key(name))
    }

    /// Evaluates the test over a fully bound assignment.
    ///
    /// # Panics
    ///
    /// Panics if a scope variable is unbound; callers gate on
    /// [`is_fully_bound`](Constraint::is_fully_bound) first.
    pub fn evaluate(&self, assignment: &Assignment) -> bool {
        let values: Vec<Value> = self
            .params
            .iter()
            .map(|name| {
                assignment
                    .get(name)
                    .cloned()
                    .expect("evaluate called with an unbound scope variable")
            })
            .collect();
        self.kind.is_satisfied(&values)
    }
}
