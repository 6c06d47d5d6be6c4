use im::HashSet;

use crate::solver::value::Value;

/// The trailed set of candidate values for one variable.
///
/// The value set is an `im::HashSet`, so [`save_state`](Domain::save_state)
/// pushes a structurally-shared snapshot onto the trail rather than a deep
/// copy. Solvers bracket "assign one variable and propagate" with a
/// save/revert pair; the calls must nest with strict stack discipline.
#[derive(Debug, Clone)]
pub struct Domain {
    values: HashSet<Value>,
    trail: Vec<HashSet<Value>>,
}

impl Domain {
    pub fn new(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            values: values.into_iter().collect(),
            trail: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.values.contains(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    /// If the domain holds exactly one value, returns it.
    pub fn singleton(&self) -> Option<Value> {
        if self.values.len() == 1 {
            self.values.iter().next().cloned()
        } else {
            None
        }
    }

    /// Pushes the current value set onto the trail.
    pub fn save_state(&mut self) {
        self.trail.push(self.values.clone());
    }

    /// Pops the most recent snapshot and restores it.
    ///
    /// # Panics
    ///
    /// Panics if there is no matching [`save_state`](Domain::save_state);
    /// mismatched trail pairing is a programmer error.
    pub fn revert_state(&mut self) {
        let state = self
            .trail
            .pop()
            .expect("revert_state called without a matching save_state");
        self.values = state;
    }

    /// Overwrites the value set in place. The trail is untouched.
    pub fn replace(&mut self, values: impl IntoIterator<Item = Value>) {
        self.values = values.into_iter().collect();
    }

    /// Removes every listed value in one batch.
    pub fn remove_all<'a>(&mut self, values: impl IntoIterator<Item = &'a Value>) {
        for value in values {
            self.values.remove(value);
        }
    }
}
