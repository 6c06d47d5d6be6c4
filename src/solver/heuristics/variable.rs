//! Standard heuristics for selecting which unassigned variable the
//! backtracking solver branches on next.

use rand::{seq::SliceRandom, RngCore};

use crate::solver::{
    csp::{Assignment, Csp},
    variable::VariableName,
};

/// A trait for variable-selection heuristics.
///
/// Implementors define a strategy for choosing which unassigned variable the
/// solver should branch on next. Selection only affects search order, never
/// correctness, so heuristics are free to randomize.
pub trait VariableSelectionHeuristic {
    /// Selects the next variable to be assigned, or `None` when every
    /// variable is already bound. `rng` is the solver's generator, so seeded
    /// runs stay reproducible.
    fn select(
        &self,
        csp: &Csp,
        assignment: &Assignment,
        rng: &mut dyn RngCore,
    ) -> Option<VariableName>;
}

/// Selects the first unassigned variable in declaration order. Deterministic;
/// useful in tests.
pub struct SelectFirst;

impl VariableSelectionHeuristic for SelectFirst {
    fn select(
        &self,
        csp: &Csp,
        assignment: &Assignment,
        _rng: &mut dyn RngCore,
    ) -> Option<VariableName> {
        csp.variable_names()
            .find(|name| !assignment.contains_key(*name))
            .cloned()
    }
}

/// Minimum-remaining-values: the unassigned variable with the smallest
/// current domain, a "fail-first" strategy. Ties are broken at random.
pub struct MinimumRemainingValues;

impl VariableSelectionHeuristic for MinimumRemainingValues {
    fn select(
        &self,
        csp: &Csp,
        assignment: &Assignment,
        rng: &mut dyn RngCore,
    ) -> Option<VariableName> {
        let mut unassigned: Vec<&VariableName> = csp
            .variable_names()
            .filter(|name| !assignment.contains_key(*name))
            .collect();
        unassigned.shuffle(rng);
        unassigned
            .into_iter()
            .min_by_key(|name| csp.domain(name).len())
            .cloned()
    }
}
