use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use cdcl_sat::finite_collections::Array;
use cdcl_sat::sat::{
    read_cnf, solve_dpll, write_result, write_statistics, MinimizationMode, SATProblem, SATSolver, SATSolverResult,
    SelectorKind, SolverConfig, VariableSize,
};

#[derive(Clone, Copy, ValueEnum)]
enum Selector {
    Vsids,
    VsidsWithoutQueue,
    FixedOrder,
}

#[derive(Clone, Copy, ValueEnum)]
enum Minimization {
    None,
    Local,
    Recursive,
}

#[derive(Parser)]
#[command(name = "cdcl_sat")]
#[command(version, about = "CDCL SAT solver for DIMACS CNF input", long_about = None)]
struct Cli {
    /// DIMACS CNF file, read from stdin when omitted
    input: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(long, value_enum, default_value = "vsids")]
    selector: Selector,

    #[arg(long, value_enum, default_value = "local")]
    minimization: Minimization,

    /// Conflicts per Luby unit between restarts
    #[arg(long, default_value_t = 50.0)]
    luby_multiplier: f64,

    /// Conflicts before the first learnt clause reduction
    #[arg(long, default_value_t = 6000)]
    reduce_base: u64,

    #[arg(long, default_value_t = 500)]
    reduce_increment: u64,

    /// Check the model against every input clause
    #[arg(long)]
    verify: bool,

    /// Use the DPLL reference solver instead of CDCL
    #[arg(long)]
    dpll: bool,
}

impl Cli {
    fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            selector: match self.selector {
                Selector::Vsids => SelectorKind::Vsids,
                Selector::VsidsWithoutQueue => SelectorKind::VsidsWithoutQueue,
                Selector::FixedOrder => SelectorKind::FixedOrder,
            },
            minimization: match self.minimization {
                Minimization::None => MinimizationMode::None,
                Minimization::Local => MinimizationMode::Local,
                Minimization::Recursive => MinimizationMode::Recursive,
            },
            luby_multiplier: self.luby_multiplier,
            reduce_base: self.reduce_base,
            reduce_increment: self.reduce_increment,
            ..SolverConfig::default()
        }
    }
}

fn read_problem(input: Option<&PathBuf>) -> anyhow::Result<SATProblem> {
    let reader: Box<dyn BufRead> = match input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(std::io::stdin())),
    };
    Ok(read_cnf(reader)?)
}

fn verify(problem: &SATProblem, solution: &Array<VariableSize, bool>) -> anyhow::Result<()> {
    for (index, clause) in problem.clauses.iter().enumerate() {
        let satisfied = clause.iter().any(|l| {
            let variable = (l.unsigned_abs() - 1) as VariableSize;
            solution.get(variable).is_some_and(|value| *value == (*l > 0))
        });
        if !satisfied {
            bail!("model violates clause {} ({:?})", index + 1, clause);
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt().with_env_filter(EnvFilter::new(filter)).with_writer(std::io::stderr).init();

    let problem = read_problem(cli.input.as_ref())?;
    tracing::info!(variables = problem.num_variables, clauses = problem.clauses.len(), "parsed input");

    let start = Instant::now();
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = if cli.dpll {
        match solve_dpll(&problem) {
            Some(model) => SATSolverResult::Satisfiable { solution: model.iter().map(|l| *l > 0).collect() },
            None => SATSolverResult::Unsatisfiable,
        }
    } else {
        let mut solver = SATSolver::new(cli.solver_config());
        while solver.number_of_variables() < problem.num_variables {
            solver.add_variable();
        }
        for clause in problem.clauses.iter() {
            solver.add_clause(clause)?;
        }
        let result = if solver.solve() {
            let solution = solver.model()?.iter().map(|l| *l > 0).collect();
            SATSolverResult::Satisfiable { solution }
        } else {
            SATSolverResult::Unsatisfiable
        };
        write_statistics(&mut out, solver.statistics())?;
        result
    };
    writeln!(out, "c time           {:.3}s", start.elapsed().as_secs_f64())?;

    if let (true, SATSolverResult::Satisfiable { solution }) = (cli.verify, &result) {
        verify(&problem, solution)?;
        writeln!(out, "c model verified")?;
    }
    write_result(&mut out, &result)?;
    out.flush()?;
    Ok(())
}
