//! The dual-graph transformation: re-encodes an n-ary problem as a binary
//! one so the arc-consistency machinery and the solvers can process global
//! and n-ary constraints unchanged.
//!
//! Each original constraint becomes one dual variable whose domain is the
//! set of value tuples satisfying it. Two dual variables whose parameter
//! lists intersect are linked by a binary constraint requiring their tuples
//! to agree on every shared original variable — overlap equality stands in
//! for direct predicate evaluation.
//!
//! A constraint of arity k has a dual domain bounded by the product of its
//! k original domain sizes before filtering; this path is meant for
//! bounded-arity constraints.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    error::Result,
    solver::{
        constraint::{Constraint, ConstraintKind},
        csp::{Assignment, Csp},
        value::Value,
        variable::VariableName,
    },
};

/// A binary-compatible re-encoding of an n-ary problem, built once by
/// [`DualGraphBuilder::build`] and independent of the source thereafter.
///
/// `csp` is an ordinary problem over tuple-valued dual variables; hand it to
/// either solver, then map a dual solution back with
/// [`translate`](DualCsp::translate).
#[derive(Debug)]
pub struct DualCsp {
    pub csp: Csp,
    /// Ordered original-variable names per dual variable, for position
    /// mapping.
    params: HashMap<VariableName, Vec<VariableName>>,
    /// Shared original-variable names per pair of overlapping dual
    /// variables, keyed in build order.
    overlaps: HashMap<(VariableName, VariableName), Vec<VariableName>>,
}

impl DualCsp {
    /// The ordered parameter list of a dual variable.
    pub fn params(&self, dual_name: &str) -> &[VariableName] {
        self.params
            .get(dual_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The shared original-variable names between two dual variables, if
    /// their parameter lists intersect.
    pub fn overlap(&self, x: &str, y: &str) -> Option<&[VariableName]> {
        self.overlaps
            .get(&(x.to_string(), y.to_string()))
            .or_else(|| self.overlaps.get(&(y.to_string(), x.to_string())))
            .map(Vec::as_slice)
    }

    /// Maps a dual assignment back onto the original variables.
    ///
    /// Overlapping dual variables agree on their shared positions in any
    /// conflict-free dual assignment, so the order in which tuples are
    /// unpacked does not matter.
    pub fn translate(&self, dual_assignment: &Assignment) -> Assignment {
        let mut original = Assignment::new();
        for (dual_name, value) in dual_assignment {
            if let Value::Tuple(items) = value {
                for (param, item) in self.params(dual_name).iter().zip(items) {
                    original.insert(param.clone(), item.clone());
                }
            }
        }
        original
    }
}

/// Whether two dual tuple values agree on every shared original-variable
/// position. `positions_x[i]` and `positions_y[i]` index the same original
/// variable in the respective tuples.
pub fn overlap_equality(
    x: &Value,
    y: &Value,
    positions_x: &[usize],
    positions_y: &[usize],
) -> bool {
    match (x, y) {
        (Value::Tuple(xs), Value::Tuple(ys)) => positions_x
            .iter()
            .zip(positions_y)
            .all(|(&px, &py)| xs[px] == ys[py]),
        _ => false,
    }
}

/// Offline transformation of a finalized n-ary [`Csp`] into a [`DualCsp`].
pub struct DualGraphBuilder;

impl DualGraphBuilder {
    pub fn build(source: &Csp) -> Result<DualCsp> {
        let mut csp = Csp::new();
        let mut params: HashMap<VariableName, Vec<VariableName>> = HashMap::new();
        let mut dual_names: Vec<VariableName> = Vec::new();

        for (id, constraint) in source.constraints().iter().enumerate() {
            let dual_name = format!("c{id}");
            let tuples: Vec<Value> = satisfying_tuples(source, constraint)
                .into_iter()
                .map(Value::Tuple)
                .collect();
            debug!(
                dual = %dual_name,
                domain_size = tuples.len(),
                "built dual variable"
            );
            csp.add_variable(dual_name.clone(), tuples)?;
            params.insert(dual_name.clone(), constraint.params().to_vec());
            dual_names.push(dual_name);
        }

        let mut overlaps: HashMap<(VariableName, VariableName), Vec<VariableName>> =
            HashMap::new();
        for i in 0..dual_names.len() {
            for j in (i + 1)..dual_names.len() {
                let (x, y) = (&dual_names[i], &dual_names[j]);
                let params_x = &params[x];
                let params_y = &params[y];
                let shared: Vec<VariableName> = params_x
                    .iter()
                    .filter(|name| params_y.contains(name))
                    .cloned()
                    .collect();
                if shared.is_empty() {
                    continue;
                }

                let positions_x: Vec<usize> = shared
                    .iter()
                    .map(|name| position_of(params_x, name))
                    .collect();
                let positions_y: Vec<usize> = shared
                    .iter()
                    .map(|name| position_of(params_y, name))
                    .collect();
                csp.add_constraint(
                    ConstraintKind::predicate(move |values| {
                        overlap_equality(&values[0], &values[1], &positions_x, &positions_y)
                    }),
                    [x.clone(), y.clone()],
                )?;
                overlaps.insert((x.clone(), y.clone()), shared);
            }
        }

        Ok(DualCsp {
            csp,
            params,
            overlaps,
        })
    }
}

fn position_of(params: &[VariableName], name: &VariableName) -> usize {
    params
        .iter()
        .position(|p| p == name)
        .expect("shared name is drawn from the parameter list")
}

/// The cartesian product of the constraint's scope domains, filtered to the
/// tuples the constraint accepts.
fn satisfying_tuples(source: &Csp, constraint: &Constraint) -> Vec<Vec<Value>> {
    let mut tuples: Vec<Vec<Value>> = vec![Vec::new()];
    for name in constraint.params() {
        let mut extended = Vec::new();
        for tuple in &tuples {
            for value in source.domain(name).iter() {
                let mut next = tuple.clone();
                next.push(value.clone());
                extended.push(next);
            }
        }
        tuples = extended;
    }
    tuples.retain(|tuple| constraint.is_satisfied(tuple));
    tuples
}
