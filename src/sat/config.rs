/// Whether `solve_with_assumptions` is available.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SolverType {
    #[default]
    Incremental,
    NonIncremental,
}

/// Branching heuristic picked at construction time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SelectorKind {
    #[default]
    Vsids,
    VsidsWithoutQueue,
    FixedOrder,
}

/// Learnt clause minimization applied after 1-UIP analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MinimizationMode {
    None,
    /// Drop literals whose reason is covered by the rest of the clause.
    #[default]
    Local,
    /// Like `Local`, but reason literals may themselves be shown redundant.
    Recursive,
}

#[derive(Clone, Debug)]
pub struct SolverConfig {
    pub solver_type: SolverType,
    pub selector: SelectorKind,
    pub minimization: MinimizationMode,
    /// Conflicts between restarts are `luby_multiplier * luby(i)`.
    pub luby_multiplier: f64,
    /// Conflicts before the first learnt clause reduction.
    pub reduce_base: u64,
    /// Growth of the reduction interval after each reduction.
    pub reduce_increment: u64,
    /// Factor applied to the VSIDS bump increment after each conflict.
    pub vsids_multiplier: f64,
    /// Activities are rescaled once one of them exceeds this value.
    pub activity_limit: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            solver_type: SolverType::default(),
            selector: SelectorKind::default(),
            minimization: MinimizationMode::default(),
            luby_multiplier: 50.0,
            reduce_base: 6000,
            reduce_increment: 500,
            vsids_multiplier: 1.1,
            activity_limit: 1e100,
        }
    }
}
