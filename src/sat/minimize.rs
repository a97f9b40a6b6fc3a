use crate::finite_collections::{Array, Set};

use super::clause_theory::ClauseTheory;
use super::config::MinimizationMode;
use super::trail::Trail;
use super::types::{ClauseIndex, Literal, VariableSize};

/// Removes literals implied by the rest of a learnt clause.
#[derive(Default)]
pub struct Minimize {
    in_clause: Set<VariableSize>,
    clause_levels: Set<VariableSize>,
    redundant: Set<VariableSize>,
    not_redundant: Set<VariableSize>,
    // (variable, reason, next reason position) of the pending walk
    stack: Vec<(VariableSize, ClauseIndex, VariableSize)>,
}

impl Minimize {
    /// Shrinks `clause` in place. The literal at index 0 is always kept.
    #[inline(never)]
    pub fn minimize(
        &mut self,
        mode: MinimizationMode,
        clause: &mut Array<VariableSize, Literal>,
        trail: &Trail,
        theory: &ClauseTheory,
    ) {
        if mode == MinimizationMode::None || clause.len() <= 1 {
            return;
        }
        self.in_clause.clear();
        self.in_clause.reserve_to(trail.number_of_variables());
        self.clause_levels.clear();
        self.clause_levels.reserve_to(trail.current_decision_level() + 1);
        self.redundant.clear();
        self.redundant.reserve_to(trail.number_of_variables());
        self.not_redundant.clear();
        self.not_redundant.reserve_to(trail.number_of_variables());
        for literal in clause.iter() {
            debug_assert!(trail.is_false(*literal));
            self.in_clause.insert(literal.variable());
            self.clause_levels.insert(trail.level_of(*literal));
        }

        let mut j: VariableSize = 1;
        for k in 1..clause.len() {
            let literal = clause[k];
            let removable = match mode {
                MinimizationMode::Local => self.is_covered(literal.variable(), trail, theory),
                MinimizationMode::Recursive => self.is_redundant(literal.variable(), trail, theory),
                MinimizationMode::None => unreachable!(),
            };
            if !removable {
                clause[j] = literal;
                j += 1;
            }
        }
        clause.truncate(j);
    }

    /// Every other literal of the reason is in the clause or fixed at level 0.
    fn is_covered(&self, variable: VariableSize, trail: &Trail, theory: &ClauseTheory) -> bool {
        let Some(reason) = trail.reason_of(variable) else {
            return false;
        };
        theory
            .clause(reason)
            .iter()
            .filter(|l| l.variable() != variable)
            .all(|l| self.in_clause.contains_key(l.variable()) || trail.level_of(*l) == 0)
    }

    fn redundancy(&self, variable: VariableSize, trail: &Trail) -> Redundancy {
        if self.redundant.contains_key(variable) {
            return Redundancy::Known(true);
        }
        if self.not_redundant.contains_key(variable) {
            return Redundancy::Known(false);
        }
        let state = trail.var(variable);
        match state.reason {
            _ if state.level == 0 => Redundancy::Known(true),
            // a decision cannot be implied by anything else
            None => Redundancy::Known(false),
            // without a clause literal on its level the implication cannot reach the clause
            Some(_) if !self.clause_levels.contains_key(state.level) => Redundancy::Known(false),
            Some(reason) => Redundancy::Expand(reason),
        }
    }

    /// Depth-first walk over reasons with an explicit stack. A variable is marked
    /// redundant once every antecedent of its reason is.
    fn is_redundant(&mut self, variable: VariableSize, trail: &Trail, theory: &ClauseTheory) -> bool {
        let reason = match self.redundancy(variable, trail) {
            Redundancy::Known(known) => return known,
            Redundancy::Expand(reason) => reason,
        };
        self.stack.clear();
        self.stack.push((variable, reason, 0));
        while let Some(&(top, reason, position)) = self.stack.last() {
            let clause = theory.clause(reason);
            let mut next = None;
            for k in position..clause.len() {
                let v = clause[k].variable();
                if v == top || self.in_clause.contains_key(v) {
                    continue;
                }
                match self.redundancy(v, trail) {
                    Redundancy::Known(true) => {}
                    Redundancy::Known(false) => {
                        for &(v, _, _) in self.stack.iter() {
                            self.not_redundant.insert(v);
                        }
                        self.stack.clear();
                        return false;
                    }
                    Redundancy::Expand(reason) => {
                        next = Some((k + 1, v, reason));
                        break;
                    }
                }
            }
            match next {
                Some((resume, v, reason)) => {
                    if let Some(last) = self.stack.last_mut() {
                        last.2 = resume;
                    }
                    self.stack.push((v, reason, 0));
                }
                None => {
                    self.stack.pop();
                    self.redundant.insert(top);
                }
            }
        }
        true
    }
}

enum Redundancy {
    Known(bool),
    Expand(ClauseIndex),
}
