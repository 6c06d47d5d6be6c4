use rand::{
    seq::{IteratorRandom, SliceRandom},
    SeedableRng,
};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::solver::{
    csp::{Assignment, Csp},
    inference,
    value::Value,
    variable::VariableName,
};

/// Incomplete, randomized local repair bounded by a step budget.
///
/// The solver always holds a full, possibly-invalid assignment and repairs
/// it in place — no trail or checkpointing is involved. Callers must check
/// the success flag: on budget exhaustion the best assignment reached is
/// returned with `false`.
pub struct MinConflictsSolver<'a> {
    csp: &'a mut Csp,
    max_steps: usize,
    rng: ChaCha8Rng,
}

impl<'a> MinConflictsSolver<'a> {
    pub fn new(csp: &'a mut Csp, max_steps: usize) -> Self {
        Self {
            csp,
            max_steps,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Seeds the randomness for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    /// Runs the repair loop.
    ///
    /// Starts from a complete assignment drawn uniformly at random from the
    /// node-consistent domains, then repeatedly reassigns a random conflicted
    /// variable to a value minimizing its conflict count, until no variable
    /// is conflicted or the step budget runs out.
    pub fn solve(&mut self) -> (Assignment, bool) {
        let mut assignment = Assignment::new();
        if !inference::node_consistency(self.csp) {
            return (assignment, false);
        }

        let names: Vec<VariableName> = self.csp.variable_names().cloned().collect();
        for name in &names {
            let Some(value) = self.csp.domain(name).iter().choose(&mut self.rng).cloned()
            else {
                // An initially empty domain: nothing to repair towards.
                return (assignment, false);
            };
            self.csp.assign(name, value, &mut assignment);
        }

        for step in 0..self.max_steps {
            let conflicted: Vec<&VariableName> = names
                .iter()
                .filter(|name| {
                    let value = assignment
                        .get(name.as_str())
                        .expect("repair loop always holds a complete assignment");
                    self.csp.conflict_count(name, value, &assignment) > 0
                })
                .collect();

            if conflicted.is_empty() {
                debug!(step, "min-conflicts reached zero conflicts");
                return (assignment, true);
            }

            let name = (*conflicted
                .choose(&mut self.rng)
                .expect("conflicted set is non-empty"))
            .clone();
            let value = self.min_conflicts_value(&name, &assignment);
            self.csp.assign(&name, value, &mut assignment);
        }

        debug!(max_steps = self.max_steps, "min-conflicts budget exhausted");
        (assignment, false)
    }

    /// The value of `name`'s domain minimizing the resulting conflict count,
    /// ties broken randomly.
    fn min_conflicts_value(&mut self, name: &str, assignment: &Assignment) -> Value {
        let mut values: Vec<Value> = self.csp.domain(name).iter().cloned().collect();
        values.shuffle(&mut self.rng);
        values
            .into_iter()
            .min_by_key(|value| self.csp.conflict_count(name, value, assignment))
            .expect("node-consistent domains are never empty")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::constraint::ConstraintKind;

    #[test]
    fn solves_the_unique_ordering_problem() {
        for seed in 0..10 {
            let mut csp = Csp::new();
            csp.add_variables(["a", "b"], 1..=3).unwrap();
            csp.add_constraint(ConstraintKind::predicate(|v| v[0] < v[1]), ["a", "b"])
                .unwrap();
            csp.add_global_constraint(ConstraintKind::ExactSum(5)).unwrap();

            let (assignment, solved) =
                MinConflictsSolver::new(&mut csp, 6000).with_seed(seed).solve();
            // Incomplete search: success is not guaranteed, but a reported
            // success must be exactly the unique solution.
            if solved {
                assert_eq!(assignment.get("a"), Some(&Value::Int(2)));
                assert_eq!(assignment.get("b"), Some(&Value::Int(3)));
            } else {
                assert_eq!(assignment.len(), csp.variable_count());
            }
        }
    }

    #[test]
    fn node_consistency_failure_is_immediate() {
        let mut csp = Csp::new();
        csp.add_variable("a", 1..=3).unwrap();
        csp.add_constraint(ConstraintKind::predicate(|_| false), ["a"])
            .unwrap();

        let (assignment, solved) = MinConflictsSolver::new(&mut csp, 100).with_seed(0).solve();
        assert!(!solved);
        assert!(assignment.is_empty());
    }

    #[test]
    fn zero_budget_returns_the_initial_assignment_as_failure() {
        let mut csp = Csp::new();
        csp.add_variables(["a", "b"], 1..=2).unwrap();
        csp.add_constraint(ConstraintKind::predicate(|v| v[0] < v[1]), ["a", "b"])
            .unwrap();

        let (assignment, solved) = MinConflictsSolver::new(&mut csp, 0).with_seed(0).solve();
        assert!(!solved);
        assert_eq!(assignment.len(), 2);
    }

    #[test]
    fn unconstrained_problem_succeeds_on_the_first_check() {
        let mut csp = Csp::new();
        csp.add_variables(["x", "y", "z"], 0..=1).unwrap();

        let (assignment, solved) = MinConflictsSolver::new(&mut csp, 10).with_seed(1).solve();
        assert!(solved);
        assert_eq!(assignment.len(), 3);
    }
}
