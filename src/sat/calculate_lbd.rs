use crate::finite_collections::Set;

use super::trail::Trail;
use super::types::{Literal, VariableSize};

/// Counts the distinct decision levels among the assigned literals of a clause.
#[derive(Default)]
pub struct CalculateLBD {
    decision_level_set: Set<VariableSize>,
}

impl CalculateLBD {
    #[inline(never)]
    pub fn calculate(&mut self, trail: &Trail, literals: &[Literal]) -> VariableSize {
        self.decision_level_set.clear();
        self.decision_level_set.reserve_to(trail.current_decision_level() + 1);
        for literal in literals {
            let state = trail.var(literal.variable());
            if state.is_assigned() {
                self.decision_level_set.insert(state.level);
            }
        }
        let lbd = self.decision_level_set.len();
        self.decision_level_set.clear();
        lbd
    }
}
