use std::fmt;

/// Counters accumulated across one solver invocation.
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Search-tree nodes entered by the backtracking solver.
    pub nodes_visited: u64,
    /// Candidate values abandoned after a failed branch.
    pub backtracks: u64,
    /// Calls to `revise` during propagation.
    pub revisions: u64,
    /// Revisions that removed at least one value.
    pub prunings: u64,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes: {}, backtracks: {}, revisions: {}, prunings: {}",
            self.nodes_visited, self.backtracks, self.revisions, self.prunings
        )
    }
}
