use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::solver::{
    csp::{Assignment, Csp},
    heuristics::{
        value::{DomainOrder, ValueOrderingHeuristic},
        variable::{MinimumRemainingValues, VariableSelectionHeuristic},
    },
    inference,
    stats::SearchStats,
    value::Value,
    variable::VariableName,
};

/// Complete, systematic search: depth-first backtracking that maintains arc
/// consistency (MAC) after every assignment.
///
/// Each accepted value is bracketed by one whole-problem domain checkpoint,
/// taken before propagation and popped on any exit from the branch, so a
/// failed branch can never leak pruned state into its siblings.
///
/// The result is deterministic given fixed heuristics; with the default
/// minimum-remaining-values heuristic only tie-breaks are random, and
/// [`with_seed`](BacktrackingSolver::with_seed) pins those down.
pub struct BacktrackingSolver<'a> {
    csp: &'a mut Csp,
    variable_heuristic: Box<dyn VariableSelectionHeuristic>,
    value_heuristic: Box<dyn ValueOrderingHeuristic>,
    rng: ChaCha8Rng,
    stats: SearchStats,
}

impl<'a> BacktrackingSolver<'a> {
    /// Creates a solver with the minimum-remaining-values variable heuristic
    /// and domain-order value ordering.
    pub fn new(csp: &'a mut Csp) -> Self {
        Self {
            csp,
            variable_heuristic: Box::new(MinimumRemainingValues),
            value_heuristic: Box::new(DomainOrder),
            rng: ChaCha8Rng::from_entropy(),
            stats: SearchStats::default(),
        }
    }

    /// Seeds the tie-break randomness for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    pub fn with_heuristics(
        mut self,
        variable_heuristic: Box<dyn VariableSelectionHeuristic>,
        value_heuristic: Box<dyn ValueOrderingHeuristic>,
    ) -> Self {
        self.variable_heuristic = variable_heuristic;
        self.value_heuristic = value_heuristic;
        self
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Runs the search to completion.
    ///
    /// Returns the assignment together with a success flag: `true` means a
    /// complete, validated assignment; `false` means the problem is
    /// unsatisfiable (the search tree was exhausted, or a consistency
    /// pre-pass already failed).
    pub fn solve(&mut self) -> (Assignment, bool) {
        let mut assignment = Assignment::new();
        if !inference::node_consistency(self.csp) {
            return (assignment, false);
        }
        if !inference::ac3_with_stats(self.csp, &mut self.stats) {
            debug!("AC3 proved the problem unsatisfiable before search");
            return (assignment, false);
        }
        let solved = self.backtrack(&mut assignment);
        debug!(solved, stats = %self.stats, "search finished");
        (assignment, solved)
    }

    fn backtrack(&mut self, assignment: &mut Assignment) -> bool {
        if self.csp.is_complete(assignment) {
            // Implicit inferences skip the per-assignment conflict check, so
            // validate the complete assignment against every constraint.
            return self.csp.constraints().iter().all(|c| c.evaluate(assignment));
        }
        self.stats.nodes_visited += 1;

        let Some(name) = self
            .variable_heuristic
            .select(self.csp, assignment, &mut self.rng)
        else {
            return false;
        };

        for value in self
            .value_heuristic
            .order(self.csp, &name, assignment, &mut self.rng)
        {
            if self.csp.conflict_count(&name, &value, assignment) != 0 {
                continue;
            }
            trace!(variable = %name, value = ?value, "trying value");

            self.csp.assign(&name, value.clone(), assignment);
            self.csp.save_domain_state();
            self.csp.domain_mut(&name).replace([value]);

            let mut inferred: Vec<VariableName> = Vec::new();
            if inference::mac_with_stats(self.csp, &name, &mut self.stats) {
                // Propagation may collapse other domains to one remaining
                // value; merge those into the assignment before recursing.
                let singletons: Vec<(VariableName, Value)> = self
                    .csp
                    .variable_names()
                    .filter(|n| !assignment.contains_key(*n))
                    .filter_map(|n| self.csp.domain(n).singleton().map(|v| (n.clone(), v)))
                    .collect();
                for (n, v) in singletons {
                    self.csp.assign(&n, v, assignment);
                    inferred.push(n);
                }

                if self.backtrack(assignment) {
                    return true;
                }
            }

            self.csp.revert_domain_state();
            for n in &inferred {
                self.csp.unassign(n, assignment);
            }
            self.csp.unassign(&name, assignment);
            self.stats.backtracks += 1;
        }

        // Every value failed: the variable is back in the unassigned pool
        // and this branch reports failure to its caller.
        false
    }
}
