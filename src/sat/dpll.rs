//! Plain recursive DPLL. Exponential, kept as an independent reference for small
//! formulas.

use super::read_cnf::SATProblem;

type Clauses = Vec<Vec<i64>>;

/// Assigns `literal` true: drops satisfied clauses and strips its complement.
/// Returns `false` if a clause became empty.
fn substitute(clauses: &mut Clauses, literal: i64) -> bool {
    clauses.retain(|c| !c.contains(&literal));
    for clause in clauses.iter_mut() {
        clause.retain(|l| *l != -literal);
        if clause.is_empty() {
            return false;
        }
    }
    true
}

fn unit_propagate(clauses: &mut Clauses, assigned: &mut Vec<i64>) -> bool {
    loop {
        let Some(unit) = clauses.iter().find(|c| c.len() == 1).map(|c| c[0]) else {
            return true;
        };
        assigned.push(unit);
        if !substitute(clauses, unit) {
            return false;
        }
    }
}

fn dpll(mut clauses: Clauses, assigned: &mut Vec<i64>) -> bool {
    if clauses.iter().any(|c| c.is_empty()) {
        return false;
    }
    let mark = assigned.len();
    if !unit_propagate(&mut clauses, assigned) {
        assigned.truncate(mark);
        return false;
    }
    let Some(chosen) = clauses.first().map(|c| c[0]) else {
        return true;
    };
    for literal in [chosen, -chosen] {
        let mut branch = clauses.clone();
        if substitute(&mut branch, literal) {
            assigned.push(literal);
            if dpll(branch, assigned) {
                return true;
            }
            assigned.pop();
        }
    }
    assigned.truncate(mark);
    false
}

/// Returns one signed literal per variable of a model, or `None` if unsatisfiable.
/// Variables the search never had to fix are reported positive.
pub fn solve_dpll(problem: &SATProblem) -> Option<Vec<i64>> {
    let mut clauses = problem.clauses.clone();
    for clause in clauses.iter_mut() {
        clause.sort_unstable();
        clause.dedup();
    }
    // tautologies would survive `substitute` of either polarity
    clauses.retain(|c| !c.iter().any(|l| c.contains(&-l)));

    let mut assigned = vec![];
    if !dpll(clauses, &mut assigned) {
        return None;
    }
    let num_variables = problem
        .clauses
        .iter()
        .flatten()
        .map(|l| l.unsigned_abs() as usize)
        .max()
        .unwrap_or(0)
        .max(problem.num_variables);
    let mut model: Vec<i64> = (1..=num_variables as i64).collect();
    for literal in assigned {
        model[literal.unsigned_abs() as usize - 1] = literal;
    }
    Some(model)
}
