use crate::finite_collections::{Array, Set};

use super::calculate_lbd::CalculateLBD;
use super::clause_theory::ClauseTheory;
use super::config::MinimizationMode;
use super::minimize::Minimize;
use super::trail::Trail;
use super::types::{ClauseIndex, Literal, VariableSize};

/// Learnt clause derived from a conflict.
#[derive(Debug)]
pub struct Analysis {
    /// Index 0 is the asserting literal, index 1 (if any) has the highest level of the rest.
    pub learnt: Array<VariableSize, Literal>,
    pub backjump_level: VariableSize,
    pub lbd: VariableSize,
}

#[derive(Default)]
pub struct Analyze {
    active: Set<VariableSize>,
    in_lemma: Set<VariableSize>,
    lemma: Array<VariableSize, Literal>,
    minimize: Minimize,
    calculate_lbd: CalculateLBD,
}

impl Analyze {
    #[inline(never)]
    pub fn analyze(
        &mut self,
        conflict: ClauseIndex,
        trail: &Trail,
        theory: &ClauseTheory,
        minimization: MinimizationMode,
    ) -> Analysis {
        let level = trail.current_decision_level();
        assert!(level > 0);
        self.active.clear();
        self.active.reserve_to(trail.number_of_variables());
        self.in_lemma.clear();
        self.in_lemma.reserve_to(trail.number_of_variables());
        self.lemma.clear();

        let mut number_of_active_variables = 0;
        for literal in theory.clause(conflict).iter() {
            number_of_active_variables += self.add_literal(*literal, level, trail);
        }
        assert!(number_of_active_variables >= 1);

        // resolve current-level variables away, newest first, until one is left
        let trail_literals = trail.literals();
        let mut position = trail_literals.len();
        while number_of_active_variables > 1 {
            position -= 1;
            let variable = trail_literals[position].variable();
            if !self.active.contains_key(variable) {
                continue;
            }
            let Some(reason) = trail.reason_of(variable) else {
                unreachable!("only the decision of the current level lacks a reason");
            };
            for literal in theory.clause(reason).iter() {
                if literal.variable() != variable {
                    number_of_active_variables += self.add_literal(*literal, level, trail);
                }
            }
            self.active.remove(variable);
            number_of_active_variables -= 1;
        }

        let uip = loop {
            position -= 1;
            let literal = trail_literals[position];
            if self.active.contains_key(literal.variable()) {
                break !literal;
            }
        };

        let mut learnt: Array<VariableSize, Literal> = Array::default();
        learnt.reserve(self.lemma.len() + 1);
        learnt.push(uip);
        learnt.extend(self.lemma.iter().copied());
        self.minimize.minimize(minimization, &mut learnt, trail, theory);

        let mut backjump_level = 0;
        if learnt.len() > 1 {
            let mut max_position = 1;
            for k in 2..learnt.len() {
                if trail.level_of(learnt[k]) > trail.level_of(learnt[max_position]) {
                    max_position = k;
                }
            }
            learnt.swap(1, max_position);
            backjump_level = trail.level_of(learnt[1]);
        }
        let lbd = self.calculate_lbd.calculate(trail, learnt.as_slice());
        tracing::trace!(?learnt, lbd, backjump_level, "learnt clause");
        Analysis { learnt, backjump_level, lbd }
    }

    /// Marks a current-level literal active (returns 1 if newly marked) or appends a
    /// lower-level literal to the lemma. Level 0 literals are dropped.
    #[inline(always)]
    fn add_literal(&mut self, literal: Literal, level: VariableSize, trail: &Trail) -> u32 {
        let variable = literal.variable();
        let literal_level = trail.level_of(literal);
        debug_assert!(trail.is_false(literal));
        if literal_level == level {
            return self.active.insert(variable) as u32;
        }
        if literal_level != 0 && self.in_lemma.insert(variable) {
            self.lemma.push(literal);
        }
        0
    }
}
