//! End-to-end solver scenarios: ordering chains, the n-rooks counting
//! formulation, and the dual-graph route for n-ary constraints.

use arcsolve::solver::{
    backtracking::BacktrackingSolver,
    constraint::ConstraintKind,
    csp::{Assignment, Csp},
    dual::DualGraphBuilder,
    min_conflicts::MinConflictsSolver,
    value::Value,
};
use pretty_assertions::assert_eq;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn less_than() -> ConstraintKind {
    ConstraintKind::predicate(|v| v[0] < v[1])
}

/// The a < b < c chain with a minimum sum: exactly one solution.
fn ordering_chain() -> Csp {
    let mut csp = Csp::new();
    csp.add_variables(["a", "b", "c"], 1..=3).unwrap();
    csp.add_constraint(less_than(), ["a", "b"]).unwrap();
    csp.add_constraint(less_than(), ["b", "c"]).unwrap();
    csp.add_global_constraint(ConstraintKind::MinSum(5)).unwrap();
    csp
}

/// An n×n board of booleans: exactly n rooks in total, at most one per row
/// and per column.
fn n_rooks(n: usize) -> Csp {
    let mut csp = Csp::new();
    let names: Vec<String> = (0..n * n).map(|i| i.to_string()).collect();
    csp.add_variables(names.iter().cloned(), [true, false]).unwrap();

    csp.add_global_constraint(ConstraintKind::CountEqualTo {
        limit: n,
        value: Value::Bool(true),
    })
    .unwrap();

    let at_most_one = || ConstraintKind::CountUpperLimit {
        limit: 1,
        value: Value::Bool(true),
    };
    for row in 0..n {
        let row_names: Vec<String> = names[row * n..(row + 1) * n].to_vec();
        csp.add_constraint(at_most_one(), row_names).unwrap();
    }
    for col in 0..n {
        let col_names: Vec<String> = names.iter().skip(col).step_by(n).cloned().collect();
        csp.add_constraint(at_most_one(), col_names).unwrap();
    }
    csp
}

fn rook_positions(assignment: &Assignment, n: usize) -> Vec<usize> {
    (0..n * n)
        .filter(|i| assignment.get(&i.to_string()) == Some(&Value::Bool(true)))
        .collect()
}

#[test]
fn backtracking_without_constraints_finds_some_assignment() {
    let mut csp = Csp::new();
    csp.add_variable("x", 0..=1).unwrap();
    csp.add_variable("y", 0..=1).unwrap();

    let (assignment, solved) = BacktrackingSolver::new(&mut csp).solve();
    assert!(solved);
    assert_eq!(assignment.len(), 2);
    for name in ["x", "y"] {
        let value = assignment.get(name).unwrap();
        assert!(value == &Value::Int(0) || value == &Value::Int(1));
    }
}

#[test]
fn backtracking_solves_the_ordering_chain() {
    init_tracing();
    for seed in 0..10 {
        let mut csp = ordering_chain();
        let (assignment, solved) = BacktrackingSolver::new(&mut csp).with_seed(seed).solve();
        assert!(solved);
        assert_eq!(assignment.get("a"), Some(&Value::Int(1)));
        assert_eq!(assignment.get("b"), Some(&Value::Int(2)));
        assert_eq!(assignment.get("c"), Some(&Value::Int(3)));
    }
}

#[test]
fn min_conflicts_on_the_ordering_chain_agrees_when_it_succeeds() {
    for seed in 0..10 {
        let mut csp = ordering_chain();
        let (assignment, solved) = MinConflictsSolver::new(&mut csp, 6000)
            .with_seed(seed)
            .solve();
        if solved {
            assert_eq!(assignment.get("a"), Some(&Value::Int(1)));
            assert_eq!(assignment.get("b"), Some(&Value::Int(2)));
            assert_eq!(assignment.get("c"), Some(&Value::Int(3)));
        }
    }
}

#[test]
fn three_rooks_is_a_permutation_matrix() {
    init_tracing();
    let n = 3;
    let mut csp = n_rooks(n);
    let (assignment, solved) = BacktrackingSolver::new(&mut csp).with_seed(42).solve();
    assert!(solved);

    let rooks = rook_positions(&assignment, n);
    assert_eq!(rooks.len(), n);
    let rows: std::collections::HashSet<usize> = rooks.iter().map(|i| i / n).collect();
    let cols: std::collections::HashSet<usize> = rooks.iter().map(|i| i % n).collect();
    assert_eq!(rows.len(), n, "one rook per row");
    assert_eq!(cols.len(), n, "one rook per column");
}

#[test]
fn five_rooks_is_solvable() {
    let n = 5;
    let mut csp = n_rooks(n);
    let (assignment, solved) = BacktrackingSolver::new(&mut csp).with_seed(7).solve();
    assert!(solved);
    assert_eq!(rook_positions(&assignment, n).len(), n);
}

#[test]
fn min_conflicts_three_rooks_reports_only_valid_boards() {
    let n = 3;
    let mut csp = n_rooks(n);
    let (assignment, solved) = MinConflictsSolver::new(&mut csp, 20_000)
        .with_seed(11)
        .solve();
    assert_eq!(assignment.len(), n * n);
    if solved {
        let rooks = rook_positions(&assignment, n);
        assert_eq!(rooks.len(), n);
        let rows: std::collections::HashSet<usize> = rooks.iter().map(|i| i / n).collect();
        assert_eq!(rows.len(), n);
    }
}

#[test]
fn dual_graph_route_solves_the_ordering_chain() {
    let csp = ordering_chain();
    let mut dual = DualGraphBuilder::build(&csp).unwrap();

    let (dual_assignment, solved) = BacktrackingSolver::new(&mut dual.csp).with_seed(0).solve();
    assert!(solved);

    let assignment = dual.translate(&dual_assignment);
    assert_eq!(assignment.get("a"), Some(&Value::Int(1)));
    assert_eq!(assignment.get("b"), Some(&Value::Int(2)));
    assert_eq!(assignment.get("c"), Some(&Value::Int(3)));
}

#[test]
fn assignments_round_trip_through_serde() {
    let mut csp = ordering_chain();
    let (assignment, solved) = BacktrackingSolver::new(&mut csp).with_seed(1).solve();
    assert!(solved);

    let json = serde_json::to_string(&assignment).unwrap();
    let restored: Assignment = serde_json::from_str(&json).unwrap();
    assert_eq!(assignment, restored);
}
