use crate::solver::value::Value;

/// The key under which a variable is declared in a [`Csp`](crate::solver::csp::Csp).
pub type VariableName = String;

/// A declared variable: a unique name plus, during search, an optional bound
/// value. Owned by the problem; solvers bind and unbind it through
/// [`Csp::assign`](crate::solver::csp::Csp::assign).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: VariableName,
    pub value: Option<Value>,
}

impl Variable {
    pub fn new(name: impl Into<VariableName>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.value.is_some()
    }
}
