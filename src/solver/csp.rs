use std::collections::HashMap;

use crate::{
    error::{ModelError, Result},
    solver::{
        constraint::{Constraint, ConstraintId, ConstraintKind},
        domain::Domain,
        value::Value,
        variable::{Variable, VariableName},
    },
};

/// A partial mapping from variable name to value. Grows monotonically during
/// search; complete once every declared variable is bound.
///
/// Persistent, so a hypothetical binding (`assignment.update(name, value)`)
/// is cheap — min-conflicts scoring leans on this.
pub type Assignment = im::HashMap<VariableName, Value>;

/// A constraint satisfaction problem: variables in declaration order, one
/// trailed [`Domain`] per variable, and the constraint list with
/// arity-indexed and per-variable lookups maintained incrementally.
#[derive(Debug, Default)]
pub struct Csp {
    variables: Vec<Variable>,
    index: HashMap<VariableName, usize>,
    domains: HashMap<VariableName, Domain>,
    constraints: Vec<Constraint>,
    by_arity: HashMap<usize, Vec<ConstraintId>>,
    by_variable: HashMap<VariableName, Vec<ConstraintId>>,
}

impl Csp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a variable with its candidate values.
    ///
    /// # Errors
    ///
    /// [`ModelError::DuplicateVariable`] if `name` is already declared.
    pub fn add_variable(
        &mut self,
        name: impl Into<VariableName>,
        values: impl IntoIterator<Item = impl Into<Value>>,
    ) -> Result<()> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(ModelError::DuplicateVariable(name).into());
        }
        self.index.insert(name.clone(), self.variables.len());
        self.domains.insert(
            name.clone(),
            Domain::new(values.into_iter().map(Into::into)),
        );
        self.by_variable.insert(name.clone(), Vec::new());
        self.variables.push(Variable::new(name));
        Ok(())
    }

    /// Declares several variables sharing one candidate-value set.
    pub fn add_variables(
        &mut self,
        names: impl IntoIterator<Item = impl Into<VariableName>>,
        values: impl IntoIterator<Item = impl Into<Value>>,
    ) -> Result<()> {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        for name in names {
            self.add_variable(name, values.iter().cloned())?;
        }
        Ok(())
    }

    /// Adds a constraint over an explicit ordered scope.
    ///
    /// # Errors
    ///
    /// [`ModelError::EmptyScope`] if the scope is empty.
    ///
    /// # Panics
    ///
    /// Panics if a scope name is not a declared variable; that is a contract
    /// violation, not a recoverable condition.
    pub fn add_constraint(
        &mut self,
        kind: ConstraintKind,
        scope: impl IntoIterator<Item = impl Into<VariableName>>,
    ) -> Result<ConstraintId> {
        let params: Vec<VariableName> = scope.into_iter().map(Into::into).collect();
        self.insert_constraint(Constraint::new(kind, params))
    }

    /// Adds a constraint whose scope is every declared variable, in
    /// declaration order — a global constraint, evaluated only once the
    /// assignment covers all of them.
    pub fn add_global_constraint(&mut self, kind: ConstraintKind) -> Result<ConstraintId> {
        let params: Vec<VariableName> =
            self.variables.iter().map(|v| v.name.clone()).collect();
        self.insert_constraint(Constraint::new(kind, params))
    }

    fn insert_constraint(&mut self, constraint: Constraint) -> Result<ConstraintId> {
        if constraint.params().is_empty() {
            return Err(ModelError::EmptyScope.into());
        }
        for name in constraint.params() {
            assert!(
                self.index.contains_key(name),
                "constraint scope references undeclared variable `{name}`"
            );
        }

        let id = self.constraints.len();
        self.by_arity
            .entry(constraint.arity())
            .or_default()
            .push(id);
        for name in constraint.params() {
            let incident = self
                .by_variable
                .get_mut(name)
                .expect("per-variable index missing a declared variable");
            // A name may appear once per constraint even if listed twice.
            if incident.last() != Some(&id) {
                incident.push(id);
            }
        }
        self.constraints.push(constraint);
        Ok(id)
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Variable names in declaration order.
    pub fn variable_names(&self) -> impl Iterator<Item = &VariableName> {
        self.variables.iter().map(|v| &v.name)
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.index.get(name).map(|&i| &self.variables[i])
    }

    /// # Panics
    ///
    /// Panics if `name` is not a declared variable.
    pub fn domain(&self, name: &str) -> &Domain {
        self.domains
            .get(name)
            .unwrap_or_else(|| panic!("unknown variable `{name}`"))
    }

    /// # Panics
    ///
    /// Panics if `name` is not a declared variable.
    pub fn domain_mut(&mut self, name: &str) -> &mut Domain {
        self.domains
            .get_mut(name)
            .unwrap_or_else(|| panic!("unknown variable `{name}`"))
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn constraint(&self, id: ConstraintId) -> &Constraint {
        &self.constraints[id]
    }

    /// Ids of every constraint with the given arity.
    pub fn constraints_with_arity(&self, arity: usize) -> &[ConstraintId] {
        self.by_arity.get(&arity).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ids of every constraint whose scope includes `name`.
    pub fn constraints_on(&self, name: &str) -> &[ConstraintId] {
        self.by_variable
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ids of the binary constraints incident to `name` — the arcs the
    /// inference machinery walks.
    pub fn binary_constraints_on<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = ConstraintId> + 'a {
        self.constraints_on(name)
            .iter()
            .copied()
            .filter(move |&id| self.constraints[id].arity() == 2)
    }

    /// The single checkpoint primitive: pushes a snapshot of every domain.
    pub fn save_domain_state(&mut self) {
        for domain in self.domains.values_mut() {
            domain.save_state();
        }
    }

    /// Pops the most recent whole-problem checkpoint.
    pub fn revert_domain_state(&mut self) {
        for domain in self.domains.values_mut() {
            domain.revert_state();
        }
    }

    /// Binds `name` in both the assignment and the variable record.
    pub fn assign(&mut self, name: &str, value: Value, assignment: &mut Assignment) {
        let idx = *self
            .index
            .get(name)
            .unwrap_or_else(|| panic!("unknown variable `{name}`"));
        self.variables[idx].value = Some(value.clone());
        assignment.insert(name.to_string(), value);
    }

    /// Removes `name` from the assignment and clears the variable record.
    pub fn unassign(&mut self, name: &str, assignment: &mut Assignment) {
        if let Some(&idx) = self.index.get(name) {
            self.variables[idx].value = None;
        }
        assignment.remove(name);
    }

    pub fn is_complete(&self, assignment: &Assignment) -> bool {
        assignment.len() == self.variables.len()
    }

    /// Counts the constraints referencing `name` that would be violated by
    /// binding `name` to `value` on top of `assignment`.
    ///
    /// Constraints whose scope is not fully covered by the hypothetical
    /// assignment are skipped — global and n-ary constraints are evaluated
    /// lazily, only once every scope variable is bound.
    pub fn conflict_count(&self, name: &str, value: &Value, assignment: &Assignment) -> usize {
        let hypothetical = assignment.update(name.to_string(), value.clone());
        self.constraints_on(name)
            .iter()
            .map(|&id| &self.constraints[id])
            .filter(|c| c.is_fully_bound(&hypothetical) && !c.evaluate(&hypothetical))
            .count()
    }
}
