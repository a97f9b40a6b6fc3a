use crate::finite_collections::Array;

use super::cdcl::{Cdcl, Statistics};
use super::config::{SolverConfig, SolverType};
use super::error::{Result, SolverError};
use super::read_cnf::SATProblem;
use super::types::{Literal, VariableSize};

pub enum SATSolverResult {
    Satisfiable { solution: Array<VariableSize, bool> },
    Unsatisfiable,
}

/// Solver facade over external literals: variable `v >= 1` is written `v` or `-v`.
pub struct SATSolver {
    cdcl: Cdcl,
    // assignment of the last satisfiable solve, dropped when the formula changes
    model: Option<Array<VariableSize, bool>>,
}

impl Default for SATSolver {
    fn default() -> Self {
        SATSolver::new(SolverConfig::default())
    }
}

impl SATSolver {
    pub fn new(config: SolverConfig) -> Self {
        SATSolver { cdcl: Cdcl::new(config), model: None }
    }

    /// Registers a fresh variable and returns its external index.
    pub fn add_variable(&mut self) -> i64 {
        self.model = None;
        self.cdcl.add_variable() as i64 + 1
    }

    pub fn number_of_variables(&self) -> usize {
        self.cdcl.number_of_variables() as usize
    }

    /// Original clauses kept in the database, after simplification at level 0.
    pub fn number_of_clauses(&self) -> usize {
        self.cdcl.number_of_constraints() as usize
    }

    pub fn statistics(&self) -> &Statistics {
        self.cdcl.statistics()
    }

    /// Adds a clause. Variables mentioned for the first time are created implicitly.
    #[inline(never)]
    pub fn add_clause(&mut self, literals: &[i64]) -> Result<()> {
        let literals = renumber(literals)?;
        self.model = None;
        self.cdcl.new_clause(&literals)
    }

    pub fn solve(&mut self) -> bool {
        self.model = self.cdcl.solve(Vec::new());
        self.model.is_some()
    }

    /// Solves under the given assumptions, which only hold for this call.
    #[inline(never)]
    pub fn solve_with_assumptions(&mut self, assumptions: &[i64]) -> Result<bool> {
        if self.cdcl.config().solver_type != SolverType::Incremental {
            return Err(SolverError::IncrementalDisabled);
        }
        let assumptions = renumber(assumptions)?;
        self.model = self.cdcl.solve(assumptions);
        Ok(self.model.is_some())
    }

    /// Value of an external literal in the last model.
    pub fn value(&self, literal: i64) -> Result<bool> {
        let model = self.model.as_ref().ok_or(SolverError::NoModel)?;
        let literal = Literal::from_dimacs(literal)?;
        let value = *model.get(literal.variable()).ok_or(SolverError::NoModel)?;
        Ok(value == literal.sign())
    }

    /// Last model as one signed literal per variable.
    pub fn model(&self) -> Result<Vec<i64>> {
        let model = self.model.as_ref().ok_or(SolverError::NoModel)?;
        let literals = model
            .iter()
            .enumerate()
            .map(|(v, value)| Literal::new(v as VariableSize, *value).to_dimacs())
            .collect();
        Ok(literals)
    }
}

fn renumber(literals: &[i64]) -> Result<Vec<Literal>> {
    literals.iter().map(|l| Literal::from_dimacs(*l)).collect()
}

/// Solves a parsed problem from scratch.
#[inline(never)]
pub fn solve_cnf(problem: &SATProblem, config: SolverConfig) -> Result<SATSolverResult> {
    let mut solver = SATSolver::new(config);
    while solver.number_of_variables() < problem.num_variables {
        solver.add_variable();
    }
    for clause in problem.clauses.iter() {
        solver.add_clause(clause)?;
    }
    if solver.solve() {
        let solution = solver.model.take().ok_or(SolverError::NoModel)?;
        Ok(SATSolverResult::Satisfiable { solution })
    } else {
        Ok(SATSolverResult::Unsatisfiable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_reported() {
        let mut solver = SATSolver::default();
        assert!(matches!(solver.add_clause(&[1, 0]), Err(SolverError::ZeroLiteral)));
        assert!(matches!(solver.model(), Err(SolverError::NoModel)));
        solver.add_clause(&[1]).unwrap();
        solver.add_clause(&[-1]).unwrap();
        assert!(!solver.solve());
        assert!(matches!(solver.value(1), Err(SolverError::NoModel)));

        let config = SolverConfig { solver_type: SolverType::NonIncremental, ..SolverConfig::default() };
        let mut solver = SATSolver::new(config);
        assert!(matches!(solver.solve_with_assumptions(&[1]), Err(SolverError::IncrementalDisabled)));
    }

    #[test]
    fn model_is_signed_per_variable() {
        let mut solver = SATSolver::default();
        assert_eq!(solver.add_variable(), 1);
        solver.add_clause(&[-2]).unwrap();
        solver.add_clause(&[1, 3]).unwrap();
        solver.add_clause(&[-1]).unwrap();
        assert!(solver.solve());
        assert_eq!(solver.model().unwrap(), vec![-1, -2, 3]);
        assert!(solver.value(-2).unwrap());
        assert!(!solver.value(1).unwrap());

        solver.add_clause(&[4]).unwrap();
        assert!(matches!(solver.model(), Err(SolverError::NoModel)));
    }

    #[test]
    fn value_outside_the_model_is_an_error() {
        let mut solver = SATSolver::default();
        solver.add_clause(&[1, -3]).unwrap();
        assert!(solver.solve());
        assert_eq!(solver.model().unwrap().len(), 3);
        assert!(matches!(solver.value(5), Err(SolverError::NoModel)));
        assert!(matches!(solver.value(-4), Err(SolverError::NoModel)));
        assert!(matches!(solver.value(0), Err(SolverError::ZeroLiteral)));
    }

    #[test]
    fn oversized_literals_leave_the_formula_untouched() {
        let mut solver = SATSolver::default();
        solver.add_clause(&[1]).unwrap();
        assert!(matches!(
            solver.add_clause(&[-4294967297]),
            Err(SolverError::LiteralOutOfRange { literal: -4294967297 })
        ));
        assert!(matches!(solver.add_clause(&[2, i64::MIN]), Err(SolverError::LiteralOutOfRange { .. })));
        assert!(matches!(solver.solve_with_assumptions(&[2147483648]), Err(SolverError::LiteralOutOfRange { .. })));
        assert!(solver.solve());
        assert_eq!(solver.model().unwrap(), vec![1]);
        assert!(matches!(solver.value(-4294967297), Err(SolverError::LiteralOutOfRange { .. })));
    }
}
