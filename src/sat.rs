mod analyze;
mod calculate_lbd;
mod cdcl;
mod clause;
mod clause_theory;
mod config;
mod dpll;
mod error;
mod minimize;
mod read_cnf;
mod restarter;
mod solver;
mod trail;
mod types;
mod variable_selector;
mod vsids;
mod write_result;

pub use cdcl::Statistics;
pub use config::{MinimizationMode, SelectorKind, SolverConfig, SolverType};
pub use dpll::solve_dpll;
pub use error::{Result, SolverError};
pub use read_cnf::{read_cnf, SATProblem};
pub use restarter::luby;
pub use solver::{solve_cnf, SATSolver, SATSolverResult};
pub use types::{Literal, Value, VariableSize};
pub use write_result::{write_result, write_statistics};
