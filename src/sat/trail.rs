use crate::finite_collections::Array;

use super::types::{ClauseIndex, Literal, Value, VariableSize};

/// Assignment state of one variable.
#[derive(Clone, Copy, Debug)]
pub struct VarState {
    pub value: Value,
    /// Clause that forced the assignment, `None` for decisions and level 0 units.
    pub reason: Option<ClauseIndex>,
    pub level: VariableSize,
    /// Polarity of the last assignment, reused when the variable is branched on.
    pub phase: Option<bool>,
}

impl VarState {
    pub const NULL_LEVEL: VariableSize = VariableSize::MAX;

    fn unassigned() -> Self {
        VarState { value: Value::Undefined, reason: None, level: Self::NULL_LEVEL, phase: None }
    }

    #[inline(always)]
    pub fn is_assigned(&self) -> bool {
        self.value != Value::Undefined
    }
}

/// Chronological record of assignments together with per-variable state.
#[derive(Default)]
pub struct Trail {
    decision_level: VariableSize,
    vars: Array<VariableSize, VarState>,
    literals: Array<VariableSize, Literal>,
    qhead: VariableSize,
}

impl Trail {
    #[inline(always)]
    pub fn number_of_variables(&self) -> VariableSize {
        self.vars.len()
    }

    #[inline(always)]
    pub fn number_of_assigned_variables(&self) -> VariableSize {
        self.literals.len()
    }

    #[inline(always)]
    pub fn current_decision_level(&self) -> VariableSize {
        self.decision_level
    }

    pub fn new_decision_level(&mut self) {
        self.decision_level += 1;
    }

    pub fn add_variable(&mut self) -> VariableSize {
        let index = self.vars.len();
        self.vars.push(VarState::unassigned());
        index
    }

    #[inline(always)]
    pub fn var(&self, variable: VariableSize) -> &VarState {
        &self.vars[variable]
    }

    pub fn literals(&self) -> &[Literal] {
        self.literals.as_slice()
    }

    #[inline(always)]
    pub fn value_of(&self, literal: Literal) -> Value {
        let value = self.vars[literal.variable()].value;
        if literal.sign() {
            value
        } else {
            !value
        }
    }

    #[inline(always)]
    pub fn is_true(&self, literal: Literal) -> bool {
        self.value_of(literal) == Value::True
    }

    #[inline(always)]
    pub fn is_false(&self, literal: Literal) -> bool {
        self.value_of(literal) == Value::False
    }

    #[inline(always)]
    pub fn level_of(&self, literal: Literal) -> VariableSize {
        self.vars[literal.variable()].level
    }

    #[inline(always)]
    pub fn reason_of(&self, variable: VariableSize) -> Option<ClauseIndex> {
        self.vars[variable].reason
    }

    /// Makes `literal` true at the current decision level without propagating it.
    #[inline(always)]
    pub fn unchecked_enqueue(&mut self, literal: Literal, reason: Option<ClauseIndex>) {
        let state = &mut self.vars[literal.variable()];
        debug_assert!(!state.is_assigned());
        state.value = Value::from_bool(literal.sign());
        state.reason = reason;
        state.level = self.decision_level;
        self.literals.push(literal);
    }

    /// Next literal whose consequences have not been propagated yet.
    #[inline(always)]
    pub fn next_pending(&mut self) -> Option<Literal> {
        if self.qhead < self.literals.len() {
            let literal = self.literals[self.qhead];
            self.qhead += 1;
            Some(literal)
        } else {
            None
        }
    }

    /// Unassigns every literal above `level`, newest first, reporting each freed
    /// variable to `on_unassign`.
    #[inline(never)]
    pub fn clear_until<F>(&mut self, level: VariableSize, mut on_unassign: F)
    where
        F: FnMut(VariableSize),
    {
        while let Some(&literal) = self.literals.last() {
            let state = &mut self.vars[literal.variable()];
            if state.level <= level {
                break;
            }
            self.literals.pop();
            state.phase = Some(state.value == Value::True);
            state.value = Value::Undefined;
            state.reason = None;
            state.level = VarState::NULL_LEVEL;
            on_unassign(literal.variable());
        }
        self.decision_level = self.decision_level.min(level);
        self.qhead = self.qhead.min(self.literals.len());
    }

    /// Returns `true` if `clause` is the reason of an assignment still on the trail.
    pub fn is_reason(&self, clause_index: ClauseIndex, first_literal: Literal) -> bool {
        let state = &self.vars[first_literal.variable()];
        state.is_assigned() && state.reason == Some(clause_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trail_with(n: VariableSize) -> Trail {
        let mut trail = Trail::default();
        for _ in 0..n {
            trail.add_variable();
        }
        trail
    }

    #[test]
    fn values_follow_literal_parity() {
        let mut trail = trail_with(2);
        trail.unchecked_enqueue(Literal::negative(1), None);
        assert_eq!(trail.value_of(Literal::negative(1)), Value::True);
        assert_eq!(trail.value_of(Literal::positive(1)), Value::False);
        assert_eq!(trail.value_of(Literal::positive(0)), Value::Undefined);
    }

    #[test]
    fn clear_until_keeps_lower_levels_and_saves_phase() {
        let mut trail = trail_with(3);
        trail.unchecked_enqueue(Literal::positive(0), None);
        trail.new_decision_level();
        trail.unchecked_enqueue(Literal::negative(1), None);
        trail.unchecked_enqueue(Literal::positive(2), Some(7));
        while trail.next_pending().is_some() {}

        let mut freed = vec![];
        trail.clear_until(0, |v| freed.push(v));
        assert_eq!(freed, vec![2, 1]);
        assert_eq!(trail.current_decision_level(), 0);
        assert_eq!(trail.number_of_assigned_variables(), 1);
        assert!(trail.next_pending().is_none());
        assert_eq!(trail.var(1).phase, Some(false));
        assert_eq!(trail.var(2).phase, Some(true));
        assert_eq!(trail.var(2).reason, None);
        assert_eq!(trail.var(2).level, VarState::NULL_LEVEL);
        assert!(trail.is_true(Literal::positive(0)));
    }
}
