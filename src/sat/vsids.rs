use std::cmp::Ordering;

use crate::finite_collections::{Comparator, FiniteHeapedMap};

use super::clause::Clause;
use super::trail::Trail;
use super::types::{Literal, VariableSize};
use super::variable_selector::Heuristic;

/// Activity-ordered priority queue of unassigned variables.
pub struct Vsids {
    increment: f64,
    multiplier: f64,
    limit: f64,
    queue: FiniteHeapedMap<VariableSize, f64, ActivityComparator>,
}

impl Vsids {
    pub fn new(multiplier: f64, limit: f64) -> Self {
        assert!(multiplier >= 1.0);
        assert!(limit.is_finite() && limit > 1.0);
        Vsids { increment: 1.0, multiplier, limit, queue: FiniteHeapedMap::default() }
    }

    pub fn activity(&self, variable: VariableSize) -> f64 {
        *self.queue.value(variable)
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    pub fn is_queued(&self, variable: VariableSize) -> bool {
        self.queue.contains_key(variable)
    }

    #[inline(never)]
    fn bump(&mut self, variable: VariableSize) {
        let increment = self.increment;
        self.queue.update(variable, |a| *a += increment);
        if self.activity(variable) > self.limit {
            let limit = self.limit;
            self.queue.for_each_value_monotone(|a| *a /= limit);
            self.increment /= limit;
            // rescaling can collapse distinct activities into ties, so re-heapify
            let queued = Vec::from_iter(self.queue.keys().copied());
            self.queue.rebuild(queued);
        }
    }
}

impl Heuristic for Vsids {
    fn add_variable(&mut self) {
        let variable = self.queue.push_key(0.0);
        self.queue.insert(variable);
    }

    fn build<'a, I>(&mut self, clauses: I, trail: &Trail)
    where
        I: IntoIterator<Item = &'a Clause>,
    {
        for clause in clauses {
            for literal in clause.iter() {
                self.bump(literal.variable());
            }
        }
        let unassigned = (0..trail.number_of_variables()).filter(|v| !trail.var(*v).is_assigned());
        self.queue.rebuild(unassigned);
    }

    fn pick_branching_variable(&mut self, trail: &Trail) -> Option<VariableSize> {
        // assigned variables stay in the heap until they surface here
        while let Some(variable) = self.queue.pop_first() {
            if !trail.var(variable).is_assigned() {
                return Some(variable);
            }
        }
        None
    }

    fn update(&mut self, lemma: &[Literal]) {
        for literal in lemma {
            self.bump(literal.variable());
        }
        self.increment *= self.multiplier;
    }

    fn back_track(&mut self, variable: VariableSize) {
        self.queue.insert(variable);
    }
}

pub struct ActivityComparator {}

impl Comparator<VariableSize, f64> for ActivityComparator {
    #[inline(always)]
    fn compare(lhs: (VariableSize, &f64), rhs: (VariableSize, &f64)) -> Ordering {
        rhs.1.partial_cmp(lhs.1).unwrap_or(Ordering::Equal).then_with(|| lhs.0.cmp(&rhs.0))
    }
}
