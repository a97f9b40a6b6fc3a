use std::cmp::Reverse;

use average::{Estimate, Mean};

use crate::finite_collections::Array;

use super::clause::Clause;
use super::trail::Trail;
use super::types::{ClauseIndex, Literal, VariableSize};

/// Entry of a watch list: the watching clause and a literal of it that, when true,
/// lets propagation skip the clause without touching it.
#[derive(Clone, Copy, Debug)]
struct Watcher {
    clause_index: ClauseIndex,
    blocker: Literal,
}

/// Outcome of one database reduction.
#[derive(Clone, Debug)]
pub struct Reduction {
    pub deleted: usize,
    pub kept: usize,
    pub kept_lbd: Mean,
}

/// Arena of original and learnt clauses plus the watch lists over them.
///
/// Clauses are addressed by a stable `ClauseIndex` so that `VarState::reason` stays
/// valid while the learnt list is compacted. A deleted clause is only released
/// (its storage cleared and its slot recycled) once no assignment uses it as reason.
#[derive(Default)]
pub struct ClauseTheory {
    clauses: Array<ClauseIndex, Clause>,
    constraints: Array<ClauseIndex, ClauseIndex>,
    learnts: Array<ClauseIndex, ClauseIndex>,
    free_slots: Vec<ClauseIndex>,
    locked_tombstones: Vec<ClauseIndex>,
    // indexed by literal code
    watches: Array<VariableSize, Array<ClauseIndex, Watcher>>,
    propagation_count: u64,
}

impl ClauseTheory {
    pub fn add_variable(&mut self) {
        self.watches.push(Array::default());
        self.watches.push(Array::default());
    }

    #[inline(always)]
    pub fn clause(&self, clause_index: ClauseIndex) -> &Clause {
        &self.clauses[clause_index]
    }

    pub fn number_of_constraints(&self) -> ClauseIndex {
        self.constraints.len()
    }

    pub fn propagation_count(&self) -> u64 {
        self.propagation_count
    }

    pub fn constraints(&self) -> impl Iterator<Item = &Clause> {
        self.constraints.iter().map(|i| &self.clauses[*i])
    }

    pub fn learnts(&self) -> impl Iterator<Item = &Clause> {
        self.learnts.iter().map(|i| &self.clauses[*i])
    }

    pub fn add_constraint(&mut self, clause: Clause) -> ClauseIndex {
        debug_assert!(!clause.learnt);
        let clause_index = self.allocate(clause);
        self.constraints.push(clause_index);
        clause_index
    }

    pub fn add_learnt(&mut self, clause: Clause) -> ClauseIndex {
        debug_assert!(clause.learnt);
        let clause_index = self.allocate(clause);
        self.learnts.push(clause_index);
        clause_index
    }

    fn allocate(&mut self, clause: Clause) -> ClauseIndex {
        assert!(clause.len() > 1);
        let watchers = [
            (clause[0], Watcher { clause_index: 0, blocker: clause[1] }),
            (clause[1], Watcher { clause_index: 0, blocker: clause[0] }),
        ];
        let clause_index = match self.free_slots.pop() {
            Some(slot) => {
                self.clauses[slot] = clause;
                slot
            }
            None => {
                self.clauses.push(clause);
                self.clauses.len() - 1
            }
        };
        for (literal, mut watcher) in watchers {
            watcher.clause_index = clause_index;
            self.watches[literal.code()].push(watcher);
        }
        clause_index
    }

    /// Propagates every pending literal of `trail`. Returns the conflicting clause, if any.
    #[inline(never)]
    pub fn propagate(&mut self, trail: &mut Trail) -> Option<ClauseIndex> {
        while let Some(literal) = trail.next_pending() {
            let false_literal = !literal;
            let mut watchers = std::mem::take(&mut self.watches[false_literal.code()]);
            let conflict = self.propagate_literal(false_literal, &mut watchers, trail);
            self.watches[false_literal.code()] = watchers;
            if conflict.is_some() {
                return conflict;
            }
        }
        None
    }

    fn propagate_literal(
        &mut self,
        false_literal: Literal,
        watchers: &mut Array<ClauseIndex, Watcher>,
        trail: &mut Trail,
    ) -> Option<ClauseIndex> {
        let n = watchers.len();
        let mut i: ClauseIndex = 0;
        let mut j: ClauseIndex = 0;
        'loop_watching_clause: while i < n {
            let watcher = watchers[i];
            i += 1;
            let clause = &mut self.clauses[watcher.clause_index];
            if clause.deleted {
                continue;
            }
            if trail.is_true(watcher.blocker) {
                watchers[j] = watcher;
                j += 1;
                continue;
            }
            if clause[0] == false_literal {
                clause.swap(0, 1);
            }
            debug_assert!(clause[1] == false_literal);
            let other = clause[0];
            let kept = Watcher { clause_index: watcher.clause_index, blocker: other };
            if other != watcher.blocker && trail.is_true(other) {
                watchers[j] = kept;
                j += 1;
                continue;
            }
            for k in 2..clause.len() {
                if !trail.is_false(clause[k]) {
                    clause.swap(1, k);
                    self.watches[clause[1].code()].push(kept);
                    continue 'loop_watching_clause;
                }
            }
            watchers[j] = kept;
            j += 1;
            if trail.is_false(other) {
                while i < n {
                    watchers[j] = watchers[i];
                    i += 1;
                    j += 1;
                }
                watchers.truncate(j);
                return Some(watcher.clause_index);
            }
            trail.unchecked_enqueue(other, Some(watcher.clause_index));
            self.propagation_count += 1;
        }
        watchers.truncate(j);
        None
    }

    /// Deletes the worse half of the learnt clauses by LBD.
    #[inline(never)]
    pub fn reduce(&mut self, trail: &Trail) -> Reduction {
        let mut order = Vec::from_iter(self.learnts.iter().copied());
        order.sort_by_key(|i| Reverse(self.clauses[*i].lbd));
        let deletion_limit = order.len() / 2;
        let mut deleted = Vec::with_capacity(deletion_limit);
        for clause_index in order.iter().take(deletion_limit) {
            self.clauses[*clause_index].deleted = true;
            deleted.push(*clause_index);
        }
        let clauses = &self.clauses;
        self.learnts.retain(|i| !clauses[*i].deleted);
        for list in self.watches.iter_mut() {
            list.retain(|w| !clauses[w.clause_index].deleted);
        }

        let mut tombstones = std::mem::take(&mut self.locked_tombstones);
        tombstones.extend(deleted.iter().copied());
        for clause_index in tombstones {
            let clause = &mut self.clauses[clause_index];
            if !clause.is_empty() && trail.is_reason(clause_index, clause[0]) {
                self.locked_tombstones.push(clause_index);
            } else {
                clause.release();
                self.free_slots.push(clause_index);
            }
        }

        let mut kept_lbd = Mean::new();
        for clause in self.learnts() {
            kept_lbd.add(clause.lbd as f64);
        }
        Reduction { deleted: deleted.len(), kept: self.learnts.len() as usize, kept_lbd }
    }

    /// Checks that no live clause is unsatisfied with a false watch. Valid right after
    /// `propagate` returned `None`.
    pub fn watches_are_consistent(&self, trail: &Trail) -> bool {
        let live = self.constraints.iter().chain(self.learnts.iter()).map(|i| (*i, &self.clauses[*i]));
        for (clause_index, clause) in live {
            if clause.deleted {
                return false;
            }
            let watched = [clause[0], clause[1]];
            let listed = watched
                .iter()
                .all(|l| self.watches[l.code()].iter().any(|w| w.clause_index == clause_index));
            if !listed {
                return false;
            }
            let satisfied = clause.iter().any(|l| trail.is_true(*l));
            if !satisfied && watched.iter().any(|l| trail.is_false(*l)) {
                return false;
            }
        }
        true
    }
}
