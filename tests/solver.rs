use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use cdcl_sat::sat::{
    read_cnf, solve_cnf, MinimizationMode, SATProblem, SATSolver, SATSolverResult, SelectorKind, SolverConfig,
    SolverError,
};

fn solver_with(config: SolverConfig, clauses: &[Vec<i64>]) -> SATSolver {
    let mut solver = SATSolver::new(config);
    for clause in clauses {
        solver.add_clause(clause).unwrap();
    }
    solver
}

fn satisfies(solver: &SATSolver, clauses: &[Vec<i64>]) -> bool {
    clauses.iter().all(|c| c.iter().any(|l| solver.value(*l).unwrap()))
}

/// `pigeons` pigeons into `holes` holes, one per hole.
fn pigeonhole(pigeons: i64, holes: i64) -> Vec<Vec<i64>> {
    let var = |p: i64, h: i64| p * holes + h + 1;
    let mut clauses: Vec<Vec<i64>> = (0..pigeons).map(|p| (0..holes).map(|h| var(p, h)).collect()).collect();
    for h in 0..holes {
        for p in 0..pigeons {
            for q in p + 1..pigeons {
                clauses.push(vec![-var(p, h), -var(q, h)]);
            }
        }
    }
    clauses
}

/// Random 3-SAT built around a hidden assignment, so it is always satisfiable.
fn planted_3sat(rng: &mut StdRng, variables: i64, clauses: usize) -> Vec<Vec<i64>> {
    let hidden: Vec<bool> = (0..variables).map(|_| rng.random_bool(0.5)).collect();
    let mut formula = vec![];
    while formula.len() < clauses {
        let clause: Vec<i64> = (0..3)
            .map(|_| {
                let v = rng.random_range(1..=variables);
                if rng.random_bool(0.5) {
                    v
                } else {
                    -v
                }
            })
            .collect();
        let holds = clause.iter().any(|l| hidden[(l.abs() - 1) as usize] == (*l > 0));
        if holds {
            formula.push(clause);
        }
    }
    formula
}

#[test]
fn single_unit_clause() {
    let mut solver = solver_with(SolverConfig::default(), &[vec![1]]);
    assert!(solver.solve());
    assert_eq!(solver.model().unwrap(), vec![1]);
}

#[test]
fn contradicting_units() {
    let mut solver = solver_with(SolverConfig::default(), &[vec![1], vec![-1]]);
    assert!(!solver.solve());
    assert!(matches!(solver.model(), Err(SolverError::NoModel)));
}

#[test]
fn empty_formula_is_satisfiable() {
    let mut solver = SATSolver::default();
    assert!(solver.solve());
    assert!(solver.model().unwrap().is_empty());
}

#[test]
fn pigeonhole_4_into_3() {
    for selector in [SelectorKind::Vsids, SelectorKind::VsidsWithoutQueue, SelectorKind::FixedOrder] {
        for minimization in [MinimizationMode::None, MinimizationMode::Local, MinimizationMode::Recursive] {
            let config = SolverConfig { selector, minimization, ..SolverConfig::default() };
            let mut solver = solver_with(config, &pigeonhole(4, 3));
            assert!(!solver.solve(), "{selector:?} {minimization:?}");
        }
    }
}

#[test]
fn pigeonhole_with_room_is_satisfiable() {
    let clauses = pigeonhole(4, 4);
    let mut solver = solver_with(SolverConfig::default(), &clauses);
    assert!(solver.solve());
    assert!(satisfies(&solver, &clauses));
}

#[test]
fn random_3sat_model_checks() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..20 {
        let clauses = planted_3sat(&mut rng, 30, 90);
        let mut solver = solver_with(SolverConfig::default(), &clauses);
        assert!(solver.solve());
        assert!(satisfies(&solver, &clauses));
    }
}

#[test]
fn tiny_thresholds_exercise_restarts_and_reductions() {
    let config = SolverConfig { luby_multiplier: 1.0, reduce_base: 5, reduce_increment: 1, ..SolverConfig::default() };
    let mut solver = solver_with(config.clone(), &pigeonhole(6, 5));
    assert!(!solver.solve());
    assert!(solver.statistics().reductions > 0);
    assert!(solver.statistics().restarts > solver.statistics().reductions);

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..10 {
        let clauses = planted_3sat(&mut rng, 60, 250);
        let mut solver = solver_with(config.clone(), &clauses);
        assert!(solver.solve());
        assert!(satisfies(&solver, &clauses));
    }
}

#[test]
fn assumptions_hold_for_one_call() {
    // every model sets 1
    let clauses = vec![vec![1, 2], vec![1, -2], vec![-1, 3]];
    let mut solver = solver_with(SolverConfig::default(), &clauses);
    assert!(solver.solve_with_assumptions(&[1]).unwrap());
    assert!(solver.value(1).unwrap());
    assert!(!solver.solve_with_assumptions(&[-1]).unwrap());
    assert!(solver.solve());
    assert!(solver.solve_with_assumptions(&[3, 2]).unwrap());
    assert!(solver.value(3).unwrap() && solver.value(2).unwrap());
}

#[test]
fn clauses_can_be_added_between_solves() {
    let mut solver = solver_with(SolverConfig::default(), &[vec![1, 2, 3]]);
    let mut blocked = vec![];
    // enumerate all 7 models by blocking each one
    while solver.solve() {
        let model = solver.model().unwrap();
        blocked.push(model.clone());
        solver.add_clause(&model.iter().map(|l| -l).collect::<Vec<_>>()).unwrap();
    }
    assert_eq!(blocked.len(), 7);
    assert!(!solver.solve());
}

#[test]
fn repeated_solves_agree() {
    let mut rng = StdRng::seed_from_u64(42);
    let clauses = planted_3sat(&mut rng, 40, 170);
    let mut solver = solver_with(SolverConfig::default(), &clauses);
    assert!(solver.solve());
    assert!(solver.solve());
    assert!(satisfies(&solver, &clauses));

    let mut solver = solver_with(SolverConfig::default(), &pigeonhole(5, 4));
    assert!(!solver.solve());
    assert!(!solver.solve());
    assert!(!solver.solve_with_assumptions(&[1]).unwrap());
}

#[test]
fn solves_dimacs_text() {
    let text = "c tiny\np cnf 3 3\n1 2 0\n-1 0\n-2 3 0\n";
    let problem = read_cnf(text.as_bytes()).unwrap();
    let SATSolverResult::Satisfiable { solution } = solve_cnf(&problem, SolverConfig::default()).unwrap() else {
        panic!("expected a model");
    };
    assert_eq!(solution.iter().copied().collect::<Vec<_>>(), vec![false, true, true]);

    let problem = SATProblem { num_variables: 2, clauses: vec![vec![1], vec![-1, 2], vec![-2]] };
    assert!(matches!(solve_cnf(&problem, SolverConfig::default()).unwrap(), SATSolverResult::Unsatisfiable));
}
