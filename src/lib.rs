//! Arcsolve is a generic constraint satisfaction problem (CSP) engine.
//!
//! A caller declares variables with candidate-value domains and constraints
//! over subsets of those variables, then asks a solver for an assignment
//! satisfying every constraint.
//!
//! # Core Concepts
//!
//! - **[`Csp`]**: the problem itself — variables, trailed domains, and the
//!   constraint list with arity and per-variable indices.
//! - **[`ConstraintKind`]**: the closed set of constraint tests: opaque
//!   predicates plus built-ins (`AllDifferent`, count bounds, sum bounds).
//! - **[`BacktrackingSolver`]**: complete depth-first search that maintains
//!   arc consistency after every assignment.
//! - **[`MinConflictsSolver`]**: incomplete randomized local repair under a
//!   step budget.
//! - **[`DualGraphBuilder`]**: re-encodes an n-ary problem as a binary one
//!   so the same propagation machinery handles global constraints.
//!
//! Both solvers return `(assignment, success)`; an unsatisfiable problem is
//! a first-class result, never an error.
//!
//! # Example: two variables, one solution
//!
//! `a` and `b` range over 1..=3, `a < b`, and the pair must sum to 5. The
//! only answer is `{a: 2, b: 3}`.
//!
//! ```
//! use arcsolve::solver::{
//!     backtracking::BacktrackingSolver, constraint::ConstraintKind, csp::Csp, value::Value,
//! };
//!
//! let mut csp = Csp::new();
//! csp.add_variable("a", 1..=3)?;
//! csp.add_variable("b", 1..=3)?;
//! csp.add_constraint(ConstraintKind::predicate(|v| v[0] < v[1]), ["a", "b"])?;
//! csp.add_global_constraint(ConstraintKind::ExactSum(5))?;
//!
//! let (assignment, solved) = BacktrackingSolver::new(&mut csp).with_seed(0).solve();
//! assert!(solved);
//! assert_eq!(assignment.get("a"), Some(&Value::Int(2)));
//! assert_eq!(assignment.get("b"), Some(&Value::Int(3)));
//! # Ok::<(), arcsolve::error::Error>(())
//! ```
//!
//! [`Csp`]: solver::csp::Csp
//! [`ConstraintKind`]: solver::constraint::ConstraintKind
//! [`BacktrackingSolver`]: solver::backtracking::BacktrackingSolver
//! [`MinConflictsSolver`]: solver::min_conflicts::MinConflictsSolver
//! [`DualGraphBuilder`]: solver::dual::DualGraphBuilder

pub mod error;
pub mod solver;
