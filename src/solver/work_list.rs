use std::collections::{BinaryHeap, HashSet};

use crate::solver::{constraint::ConstraintId, variable::VariableName};

/// One pending arc: revise `target` with respect to the other endpoint of
/// `constraint`. Ordered by the target's domain size at the moment of
/// enqueueing, so arcs touching larger domains pop first. The ordering is a
/// performance heuristic only; the fixpoint is the same in any order.
#[derive(Debug, Clone, Eq, PartialEq)]
struct WorkItem {
    domain_size: usize,
    target: VariableName,
    constraint: ConstraintId,
}

impl Ord for WorkItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.domain_size.cmp(&other.domain_size)
    }
}

impl PartialOrd for WorkItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// The AC-3 worklist: a priority queue of arcs with a membership set so an
/// arc is never queued twice.
pub struct WorkList {
    queue: BinaryHeap<WorkItem>,
    members: HashSet<(VariableName, ConstraintId)>,
}

impl WorkList {
    pub fn new() -> Self {
        Self {
            queue: BinaryHeap::new(),
            members: HashSet::new(),
        }
    }

    pub fn push(&mut self, domain_size: usize, target: VariableName, constraint: ConstraintId) {
        let key = (target, constraint);
        if !self.members.contains(&key) {
            self.queue.push(WorkItem {
                domain_size,
                target: key.0.clone(),
                constraint,
            });
            self.members.insert(key);
        }
    }

    pub fn pop(&mut self) -> Option<(VariableName, ConstraintId)> {
        let item = self.queue.pop()?;
        self.members.remove(&(item.target.clone(), item.constraint));
        Some((item.target, item.constraint))
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for WorkList {
    fn default() -> Self {
        Self::new()
    }
}
