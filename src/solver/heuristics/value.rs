use rand::RngCore;

use crate::solver::{
    csp::{Assignment, Csp},
    value::Value,
};

/// A trait for strategies that determine the order in which a variable's
/// candidate values are tried.
///
/// This is the extension point for a least-constraining-value heuristic; the
/// default simply follows domain iteration order.
pub trait ValueOrderingHeuristic {
    /// Returns the candidate values for `name`, in the order they should be
    /// tried. The returned values are snapshotted so the solver can mutate
    /// the domain while iterating.
    fn order(
        &self,
        csp: &Csp,
        name: &str,
        assignment: &Assignment,
        rng: &mut dyn RngCore,
    ) -> Vec<Value>;
}

/// Yields values in domain iteration order.
pub struct DomainOrder;

impl ValueOrderingHeuristic for DomainOrder {
    fn order(
        &self,
        csp: &Csp,
        name: &str,
        _assignment: &Assignment,
        _rng: &mut dyn RngCore,
    ) -> Vec<Value> {
        csp.domain(name).iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn domain_order_snapshots_the_current_domain() {
        let mut csp = Csp::new();
        csp.add_variable("a", 1..=3).unwrap();
        csp.domain_mut("a").remove_all([&Value::Int(2)]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let mut values = DomainOrder.order(&csp, "a", &Assignment::new(), &mut rng);
        values.sort();
        assert_eq!(values, vec![Value::Int(1), Value::Int(3)]);
    }
}
