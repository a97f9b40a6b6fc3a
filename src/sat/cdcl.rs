use average::{Estimate, Mean};

use crate::finite_collections::Array;

use super::analyze::Analyze;
use super::clause::Clause;
use super::clause_theory::ClauseTheory;
use super::config::SolverConfig;
use super::error::{Result, SolverError};
use super::restarter::Restarter;
use super::trail::Trail;
use super::types::{ClauseIndex, Literal, Value, VariableSize};
use super::variable_selector::{NextDecision, VariableSelector};

/// Search counters, cumulative over every `solve` of one engine.
#[derive(Clone, Debug)]
pub struct Statistics {
    pub conflicts: u64,
    pub decisions: u64,
    pub propagations: u64,
    pub restarts: u64,
    pub reductions: u64,
    pub learnt_clauses: u64,
    /// LBD of every clause learnt so far, units included.
    pub learnt_lbd: Mean,
}

impl Default for Statistics {
    fn default() -> Self {
        Statistics {
            conflicts: 0,
            decisions: 0,
            propagations: 0,
            restarts: 0,
            reductions: 0,
            learnt_clauses: 0,
            learnt_lbd: Mean::new(),
        }
    }
}

enum SearchResult {
    Satisfiable,
    Unsatisfiable,
}

/// Conflict-driven clause learning over internal literals.
pub struct Cdcl {
    config: SolverConfig,
    trail: Trail,
    theory: ClauseTheory,
    selector: VariableSelector,
    restarter: Restarter,
    analyze: Analyze,
    // false once a conflict has been derived at level 0
    ok: bool,
    // constraints whose occurrences already seeded the heuristic
    seeded_constraints: ClauseIndex,
    conflicts_since_reduction: u64,
    reduce_threshold: u64,
    statistics: Statistics,
}

impl Cdcl {
    #[inline(never)]
    pub fn new(config: SolverConfig) -> Self {
        Cdcl {
            trail: Trail::default(),
            theory: ClauseTheory::default(),
            selector: VariableSelector::new(&config),
            restarter: Restarter::new(config.luby_multiplier),
            analyze: Analyze::default(),
            ok: true,
            seeded_constraints: 0,
            conflicts_since_reduction: 0,
            reduce_threshold: config.reduce_base,
            statistics: Statistics::default(),
            config,
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn number_of_variables(&self) -> VariableSize {
        self.trail.number_of_variables()
    }

    pub fn number_of_constraints(&self) -> ClauseIndex {
        self.theory.number_of_constraints()
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn theory(&self) -> &ClauseTheory {
        &self.theory
    }

    pub fn add_variable(&mut self) -> VariableSize {
        self.theory.add_variable();
        self.selector.add_variable();
        self.trail.add_variable()
    }

    pub fn ensure_variables(&mut self, number_of_variables: VariableSize) {
        while self.number_of_variables() < number_of_variables {
            self.add_variable();
        }
    }

    /// Adds an original clause. Clauses satisfied at level 0 and tautologies are
    /// dropped, false literals are removed and units go straight onto the trail.
    #[inline(never)]
    pub fn new_clause(&mut self, literals: &[Literal]) -> Result<()> {
        let level = self.trail.current_decision_level();
        if level != 0 {
            return Err(SolverError::NotAtRootLevel { level });
        }
        if let Some(max_variable) = literals.iter().map(|l| l.variable()).max() {
            self.ensure_variables(max_variable + 1);
        }
        if !self.ok {
            return Ok(());
        }

        let mut literals = literals.to_vec();
        literals.sort_unstable();
        literals.dedup();
        // after sorting, `l` and `!l` are neighbours
        if literals.windows(2).any(|w| w[0] == !w[1]) {
            return Ok(());
        }
        if literals.iter().any(|l| self.trail.is_true(*l)) {
            return Ok(());
        }
        literals.retain(|l| !self.trail.is_false(*l));

        match literals.len() {
            0 => {
                self.ok = false;
            }
            1 => {
                self.trail.unchecked_enqueue(literals[0], None);
            }
            _ => {
                self.theory.add_constraint(Clause::new(Array::from(literals), false));
            }
        }
        Ok(())
    }

    /// Searches for a model in which every assumption holds. Returns the value of each
    /// variable on success. The engine is back at level 0 on return.
    #[inline(never)]
    pub fn solve(&mut self, assumptions: Vec<Literal>) -> Option<Array<VariableSize, bool>> {
        debug_assert_eq!(self.trail.current_decision_level(), 0);
        if let Some(max_variable) = assumptions.iter().map(|l| l.variable()).max() {
            self.ensure_variables(max_variable + 1);
        }
        if !self.ok {
            return None;
        }

        let fresh = self.theory.constraints().skip(self.seeded_constraints as usize);
        self.selector.build(fresh, &self.trail);
        self.seeded_constraints = self.theory.number_of_constraints();

        self.selector.init_assumptions(assumptions);
        let result = self.search();
        self.selector.clear_assumptions();

        let model = match result {
            SearchResult::Satisfiable => {
                let n = self.trail.number_of_variables();
                Some((0..n).map(|v| self.trail.var(v).value == Value::True).collect())
            }
            SearchResult::Unsatisfiable => None,
        };
        self.clear_trail(0);
        self.statistics.propagations = self.theory.propagation_count();
        model
    }

    #[inline(never)]
    fn search(&mut self) -> SearchResult {
        loop {
            if let Some(conflict) = self.theory.propagate(&mut self.trail) {
                self.statistics.conflicts += 1;
                if self.trail.current_decision_level() == 0 {
                    self.ok = false;
                    return SearchResult::Unsatisfiable;
                }
                self.resolve_conflict(conflict);
                continue;
            }

            match self.selector.next_decision(&self.trail) {
                NextDecision::Exhausted => return SearchResult::Satisfiable,
                NextDecision::FailedAssumption(literal) => {
                    tracing::debug!(%literal, "assumption failed");
                    return SearchResult::Unsatisfiable;
                }
                NextDecision::Decide(literal) => {
                    self.statistics.decisions += 1;
                    self.trail.new_decision_level();
                    self.trail.unchecked_enqueue(literal, None);
                }
            }
        }
    }

    fn resolve_conflict(&mut self, conflict: ClauseIndex) {
        let analysis = self.analyze.analyze(conflict, &self.trail, &self.theory, self.config.minimization);
        self.clear_trail(analysis.backjump_level);
        self.selector.update(analysis.learnt.as_slice());
        self.statistics.learnt_lbd.add(analysis.lbd as f64);

        let asserting = analysis.learnt[0];
        if analysis.learnt.len() == 1 {
            debug_assert_eq!(analysis.backjump_level, 0);
            self.trail.unchecked_enqueue(asserting, None);
        } else {
            let mut clause = Clause::new(analysis.learnt, true);
            clause.lbd = analysis.lbd;
            let clause_index = self.theory.add_learnt(clause);
            self.trail.unchecked_enqueue(asserting, Some(clause_index));
            self.statistics.learnt_clauses += 1;
        }

        let restart_due = self.restarter.on_conflict();
        self.conflicts_since_reduction += 1;
        if self.conflicts_since_reduction >= self.reduce_threshold {
            self.reduce();
        } else if restart_due {
            self.restart();
        }
    }

    fn clear_trail(&mut self, level: VariableSize) {
        let selector = &mut self.selector;
        self.trail.clear_until(level, |variable| selector.back_track(variable));
    }

    fn restart(&mut self) {
        self.clear_trail(0);
        self.restarter.restarted();
        self.statistics.restarts += 1;
        tracing::debug!(
            restarts = self.statistics.restarts,
            conflicts = self.statistics.conflicts,
            fixed = self.trail.number_of_assigned_variables(),
            next_threshold = self.restarter.threshold(),
            "restart"
        );
    }

    #[inline(never)]
    fn reduce(&mut self) {
        self.restart();
        let reduction = self.theory.reduce(&self.trail);
        self.statistics.reductions += 1;
        self.conflicts_since_reduction = 0;
        self.reduce_threshold += self.config.reduce_increment;
        tracing::info!(
            deleted = reduction.deleted,
            kept = reduction.kept,
            mean_lbd = reduction.kept_lbd.mean(),
            next_threshold = self.reduce_threshold,
            "reduced learnt clauses"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literals(dimacs: &[i64]) -> Vec<Literal> {
        dimacs.iter().map(|l| Literal::from_dimacs(*l).unwrap()).collect()
    }

    fn engine(config: SolverConfig, clauses: &[&[i64]]) -> Cdcl {
        let mut cdcl = Cdcl::new(config);
        for clause in clauses {
            cdcl.new_clause(&literals(clause)).unwrap();
        }
        cdcl
    }

    fn satisfies(model: &Array<VariableSize, bool>, clauses: &[&[i64]]) -> bool {
        clauses.iter().all(|c| literals(c).iter().any(|l| model[l.variable()] == l.sign()))
    }

    #[test]
    fn simplifies_clauses_at_root() {
        let mut cdcl = engine(SolverConfig::default(), &[&[1]]);
        // satisfied, tautology, and [-1 2 3] shrinks to [2 3]
        cdcl.new_clause(&literals(&[1, 4])).unwrap();
        cdcl.new_clause(&literals(&[2, -2])).unwrap();
        cdcl.new_clause(&literals(&[-1, 2, 3, 3])).unwrap();
        assert_eq!(cdcl.number_of_variables(), 4);
        assert_eq!(cdcl.number_of_constraints(), 1);
        let clause = cdcl.theory().constraints().next().unwrap();
        assert_eq!(clause.literals(), literals(&[2, 3]).as_slice());
    }

    #[test]
    fn empty_clause_after_simplification_is_unsat() {
        let mut cdcl = engine(SolverConfig::default(), &[&[1], &[-1]]);
        assert!(cdcl.solve(vec![]).is_none());
        cdcl.new_clause(&literals(&[2])).unwrap();
        assert!(cdcl.solve(vec![]).is_none());
    }

    #[test]
    fn learns_and_stays_consistent() {
        let clauses: &[&[i64]] = &[&[1, 2], &[-1, 3], &[-2, 3], &[-3, 4, 5], &[-4, -5], &[-3, -4], &[1, -5]];
        let mut cdcl = engine(SolverConfig::default(), clauses);
        let model = cdcl.solve(vec![]).expect("satisfiable");
        assert!(satisfies(&model, clauses));
        assert_eq!(cdcl.trail().current_decision_level(), 0);
        assert!(cdcl.theory().watches_are_consistent(cdcl.trail()));
    }

    #[test]
    fn failed_assumption_keeps_instance_usable() {
        let clauses: &[&[i64]] = &[&[1, 2], &[1, -2]];
        let mut cdcl = engine(SolverConfig::default(), clauses);
        assert!(cdcl.solve(literals(&[-1])).is_none());
        let model = cdcl.solve(vec![]).expect("satisfiable");
        assert!(model[0]);
    }

    #[test]
    fn frequent_reductions_and_restarts() {
        // pigeonhole 5 into 4
        let mut clauses: Vec<Vec<i64>> = vec![];
        let var = |p: i64, h: i64| p * 4 + h + 1;
        for p in 0..5 {
            clauses.push((0..4).map(|h| var(p, h)).collect());
        }
        for h in 0..4 {
            for p in 0..5 {
                for q in p + 1..5 {
                    clauses.push(vec![-var(p, h), -var(q, h)]);
                }
            }
        }
        let config = SolverConfig { luby_multiplier: 2.0, reduce_base: 10, reduce_increment: 2, ..SolverConfig::default() };
        let mut cdcl = Cdcl::new(config);
        for clause in &clauses {
            cdcl.new_clause(&literals(clause)).unwrap();
        }
        assert!(cdcl.solve(vec![]).is_none());
        let statistics = cdcl.statistics();
        assert!(statistics.reductions > 0);
        assert!(statistics.restarts >= statistics.reductions);
        assert!(statistics.conflicts > 0);
        assert!(statistics.learnt_lbd.mean() >= 1.0);
    }
}
