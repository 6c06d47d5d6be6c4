//! Arc-consistency propagation: the AC-3 fixpoint loop, whole-problem
//! seeding (`ac3`) and incremental seeding from one variable (`mac`).
//!
//! Propagation mutates domains in place. On a wipeout the functions return
//! `false` and leave the partially-pruned domains as they are; the caller
//! restores them through the trail checkpoint it took before propagating.

use tracing::{debug, trace};

use crate::solver::{
    constraint::ConstraintId,
    csp::Csp,
    stats::SearchStats,
    value::Value,
    variable::VariableName,
    work_list::WorkList,
};

/// Node-consistency pre-pass: filters every domain against the arity-1
/// constraints. Returns `false` if a domain is emptied — the problem is
/// unsatisfiable before any search.
pub fn node_consistency(csp: &mut Csp) -> bool {
    let unary: Vec<ConstraintId> = csp.constraints_with_arity(1).to_vec();
    for id in unary {
        let constraint = csp.constraint(id).clone();
        let name = constraint.params()[0].clone();
        let domain = csp.domain_mut(&name);
        let keep: Vec<Value> = domain
            .iter()
            .filter(|v| constraint.is_satisfied(std::slice::from_ref(*v)))
            .cloned()
            .collect();
        let emptied = keep.is_empty();
        domain.replace(keep);
        if emptied {
            debug!(variable = %name, "node consistency emptied a domain");
            return false;
        }
    }
    true
}

/// Revises the domain of `target` with respect to the other endpoint of the
/// given binary constraint: a value of `target` survives only if some value
/// of the other variable satisfies the constraint with it, in scope order.
/// Unsupported values are removed in one batch. Returns whether the domain
/// changed.
pub fn revise(
    csp: &mut Csp,
    target: &str,
    constraint_id: ConstraintId,
    stats: &mut SearchStats,
) -> bool {
    stats.revisions += 1;
    let constraint = csp.constraint(constraint_id).clone();
    let params = constraint.params();
    debug_assert_eq!(params.len(), 2, "revise only applies to binary constraints");
    let target_first = params[0] == target;
    let other = if target_first { &params[1] } else { &params[0] };

    let target_domain = csp.domain(target);
    let other_domain = csp.domain(other);
    let mut unsupported: Vec<Value> = Vec::new();
    for x in target_domain.iter() {
        let supported = other_domain.iter().any(|y| {
            if target_first {
                constraint.is_satisfied(&[x.clone(), y.clone()])
            } else {
                constraint.is_satisfied(&[y.clone(), x.clone()])
            }
        });
        if !supported {
            unsupported.push(x.clone());
        }
    }

    if unsupported.is_empty() {
        return false;
    }
    stats.prunings += 1;
    trace!(
        variable = %target,
        removed = unsupported.len(),
        constraint = constraint_id,
        "revise pruned unsupported values"
    );
    csp.domain_mut(target).remove_all(unsupported.iter());
    true
}

/// The AC-3 fixpoint loop over a seeded worklist of arcs.
///
/// Each successful revision strictly shrinks a finite domain, so the loop
/// terminates. A shrink re-enqueues the far endpoint of every other binary
/// constraint incident to the revised variable, so effects propagate
/// transitively. Returns `false` on a wipeout.
pub fn arc_consistency(csp: &mut Csp, mut worklist: WorkList, stats: &mut SearchStats) -> bool {
    while let Some((target, constraint_id)) = worklist.pop() {
        if revise(csp, &target, constraint_id, stats) {
            if csp.domain(&target).is_empty() {
                debug!(variable = %target, "domain wiped out during propagation");
                return false;
            }
            let requeue: Vec<(usize, VariableName, ConstraintId)> = csp
                .binary_constraints_on(&target)
                .filter(|&id| id != constraint_id)
                .map(|id| {
                    let params = csp.constraint(id).params();
                    let neighbor = if params[0] == target {
                        params[1].clone()
                    } else {
                        params[0].clone()
                    };
                    (csp.domain(&neighbor).len(), neighbor, id)
                })
                .collect();
            for (size, neighbor, id) in requeue {
                worklist.push(size, neighbor, id);
            }
        }
    }
    true
}

/// Full propagation: seeds the worklist with every binary arc in the
/// problem, in both directions. Run once before search starts.
pub fn ac3_with_stats(csp: &mut Csp, stats: &mut SearchStats) -> bool {
    let mut worklist = WorkList::new();
    for &id in csp.constraints_with_arity(2) {
        let params = csp.constraint(id).params();
        for name in [&params[0], &params[1]] {
            worklist.push(csp.domain(name).len(), name.clone(), id);
        }
    }
    arc_consistency(csp, worklist, stats)
}

/// See [`ac3_with_stats`].
pub fn ac3(csp: &mut Csp) -> bool {
    ac3_with_stats(csp, &mut SearchStats::default())
}

/// Incremental propagation ("maintaining arc consistency"): seeds the
/// worklist with only the arcs incident to `name`, in both directions.
/// Invoked after each new assignment during search.
pub fn mac_with_stats(csp: &mut Csp, name: &str, stats: &mut SearchStats) -> bool {
    let mut worklist = WorkList::new();
    let incident: Vec<ConstraintId> = csp.binary_constraints_on(name).collect();
    for id in incident {
        let params = csp.constraint(id).params();
        for endpoint in [&params[0], &params[1]] {
            worklist.push(csp.domain(endpoint).len(), endpoint.clone(), id);
        }
    }
    arc_consistency(csp, worklist, stats)
}

/// See [`mac_with_stats`].
pub fn mac(csp: &mut Csp, name: &str) -> bool {
    mac_with_stats(csp, name, &mut SearchStats::default())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::constraint::ConstraintKind;

    fn less_than() -> ConstraintKind {
        ConstraintKind::predicate(|v| v[0] < v[1])
    }

    #[test]
    fn ac3_prunes_to_singletons_on_a_chain() {
        let mut csp = Csp::new();
        csp.add_variables(["a", "b", "c"], 1..=3).unwrap();
        csp.add_constraint(less_than(), ["a", "b"]).unwrap();
        csp.add_constraint(less_than(), ["b", "c"]).unwrap();

        assert!(ac3(&mut csp));
        assert_eq!(csp.domain("a").singleton(), Some(Value::Int(1)));
        assert_eq!(csp.domain("b").singleton(), Some(Value::Int(2)));
        assert_eq!(csp.domain("c").singleton(), Some(Value::Int(3)));
    }

    #[test]
    fn ac3_soundness_every_value_keeps_a_support() {
        let mut csp = Csp::new();
        csp.add_variables(["a", "b"], 1..=4).unwrap();
        csp.add_constraint(less_than(), ["a", "b"]).unwrap();

        assert!(ac3(&mut csp));
        // Every remaining value of each variable has a supporting value in
        // the other's current domain.
        for x in csp.domain("a").iter() {
            assert!(csp.domain("b").iter().any(|y| x < y), "{x:?} lost support");
        }
        for y in csp.domain("b").iter() {
            assert!(csp.domain("a").iter().any(|x| x < y), "{y:?} lost support");
        }
    }

    #[test]
    fn ac3_fails_on_contradictory_orderings() {
        let mut csp = Csp::new();
        csp.add_variables(["a", "b"], 1..=2).unwrap();
        csp.add_constraint(less_than(), ["a", "b"]).unwrap();
        csp.add_constraint(less_than(), ["b", "a"]).unwrap();

        assert!(!ac3(&mut csp));
    }

    #[test]
    fn revise_respects_scope_order() {
        let mut csp = Csp::new();
        csp.add_variables(["a", "b"], 1..=3).unwrap();
        let id = csp.add_constraint(less_than(), ["a", "b"]).unwrap();
        let mut stats = SearchStats::default();

        // `b` sits in the second scope position, so its values need some
        // a < b, which removes 1.
        assert!(revise(&mut csp, "b", id, &mut stats));
        assert!(!csp.domain("b").contains(&Value::Int(1)));
        assert_eq!(csp.domain("b").len(), 2);
        assert_eq!(stats.prunings, 1);
    }

    #[test]
    fn mac_propagates_from_a_collapsed_variable() {
        let mut csp = Csp::new();
        csp.add_variables(["a", "b"], 1..=3).unwrap();
        csp.add_constraint(less_than(), ["a", "b"]).unwrap();

        csp.domain_mut("a").replace([Value::Int(2)]);
        assert!(mac(&mut csp, "a"));
        assert_eq!(csp.domain("b").singleton(), Some(Value::Int(3)));
    }

    #[test]
    fn mac_detects_an_unsupported_assignment() {
        let mut csp = Csp::new();
        csp.add_variables(["a", "b"], 1..=3).unwrap();
        csp.add_constraint(less_than(), ["a", "b"]).unwrap();

        csp.domain_mut("a").replace([Value::Int(3)]);
        assert!(!mac(&mut csp, "a"));
    }

    #[test]
    fn node_consistency_filters_unary_constraints() {
        let mut csp = Csp::new();
        csp.add_variables(["a", "b"], 1..=4).unwrap();
        csp.add_constraint(
            ConstraintKind::predicate(|v| v[0].as_int().is_some_and(|i| i % 2 == 0)),
            ["a"],
        )
        .unwrap();

        assert!(node_consistency(&mut csp));
        assert_eq!(csp.domain("a").len(), 2);
        assert_eq!(csp.domain("b").len(), 4);
    }

    #[test]
    fn node_consistency_reports_an_emptied_domain() {
        let mut csp = Csp::new();
        csp.add_variable("a", 1..=3).unwrap();
        csp.add_constraint(ConstraintKind::predicate(|_| false), ["a"])
            .unwrap();

        assert!(!node_consistency(&mut csp));
    }
}
