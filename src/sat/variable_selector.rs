use super::clause::Clause;
use super::config::{SelectorKind, SolverConfig};
use super::trail::Trail;
use super::types::{Literal, Value, VariableSize};
use super::vsids::Vsids;

/// Branching heuristic over variables. The literal sign is chosen by the caller.
pub trait Heuristic {
    fn add_variable(&mut self);
    /// Called at the start of every search with the clauses not seen before.
    fn build<'a, I>(&mut self, clauses: I, trail: &Trail)
    where
        I: IntoIterator<Item = &'a Clause>;
    fn pick_branching_variable(&mut self, trail: &Trail) -> Option<VariableSize>;
    /// Called once per conflict with the learnt clause.
    fn update(&mut self, lemma: &[Literal]);
    fn back_track(&mut self, variable: VariableSize);
}

/// Picks the lowest-indexed unassigned variable.
#[derive(Default)]
pub struct FixedOrder {
    number_of_variables: VariableSize,
}

impl Heuristic for FixedOrder {
    fn add_variable(&mut self) {
        self.number_of_variables += 1;
    }

    fn build<'a, I>(&mut self, _clauses: I, _trail: &Trail)
    where
        I: IntoIterator<Item = &'a Clause>,
    {
    }

    fn pick_branching_variable(&mut self, trail: &Trail) -> Option<VariableSize> {
        (0..self.number_of_variables).find(|v| !trail.var(*v).is_assigned())
    }

    fn update(&mut self, _lemma: &[Literal]) {}

    fn back_track(&mut self, _variable: VariableSize) {}
}

/// VSIDS scored by a linear scan instead of a heap. The bump increment doubles
/// every `DECAY_PERIOD` conflicts.
pub struct VsidsWithoutQueue {
    activities: Vec<f64>,
    increment: f64,
    conflicts: u32,
}

impl VsidsWithoutQueue {
    const DECAY_PERIOD: u32 = 50;
    const MULTIPLIER: f64 = 2.0;
    const LIMIT: f64 = 1e100;

    pub fn new() -> Self {
        VsidsWithoutQueue { activities: Vec::new(), increment: 1.0, conflicts: 0 }
    }
}

impl Heuristic for VsidsWithoutQueue {
    fn add_variable(&mut self) {
        self.activities.push(0.0);
    }

    fn build<'a, I>(&mut self, clauses: I, _trail: &Trail)
    where
        I: IntoIterator<Item = &'a Clause>,
    {
        for clause in clauses {
            for literal in clause.iter() {
                self.activities[literal.variable() as usize] += self.increment;
            }
        }
    }

    fn pick_branching_variable(&mut self, trail: &Trail) -> Option<VariableSize> {
        let mut best: Option<(VariableSize, f64)> = None;
        for (v, activity) in self.activities.iter().enumerate() {
            let v = v as VariableSize;
            if trail.var(v).is_assigned() {
                continue;
            }
            if best.map_or(true, |(_, max)| max < *activity) {
                best = Some((v, *activity));
            }
        }
        best.map(|(v, _)| v)
    }

    fn update(&mut self, lemma: &[Literal]) {
        for literal in lemma {
            self.activities[literal.variable() as usize] += self.increment;
        }
        self.conflicts += 1;
        if self.conflicts == Self::DECAY_PERIOD {
            self.conflicts = 0;
            self.increment *= Self::MULTIPLIER;
            if self.increment > Self::LIMIT {
                for activity in self.activities.iter_mut() {
                    *activity /= self.increment;
                }
                self.increment = 1.0;
            }
        }
    }

    fn back_track(&mut self, _variable: VariableSize) {}
}

pub enum Strategy {
    Vsids(Vsids),
    VsidsWithoutQueue(VsidsWithoutQueue),
    FixedOrder(FixedOrder),
}

macro_rules! dispatch {
    ($strategy:expr, $h:ident => $body:expr) => {
        match $strategy {
            Strategy::Vsids($h) => $body,
            Strategy::VsidsWithoutQueue($h) => $body,
            Strategy::FixedOrder($h) => $body,
        }
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextDecision {
    Decide(Literal),
    /// An assumption is false under the current assignment.
    FailedAssumption(Literal),
    /// Every variable is assigned.
    Exhausted,
}

/// Chooses decision literals: pending assumptions first, then the heuristic's pick
/// signed by its saved phase.
pub struct VariableSelector {
    assumptions: Vec<Literal>,
    strategy: Strategy,
}

impl VariableSelector {
    pub fn new(config: &SolverConfig) -> Self {
        let strategy = match config.selector {
            SelectorKind::Vsids => Strategy::Vsids(Vsids::new(config.vsids_multiplier, config.activity_limit)),
            SelectorKind::VsidsWithoutQueue => Strategy::VsidsWithoutQueue(VsidsWithoutQueue::new()),
            SelectorKind::FixedOrder => Strategy::FixedOrder(FixedOrder::default()),
        };
        VariableSelector { assumptions: Vec::new(), strategy }
    }

    pub fn init_assumptions(&mut self, assumptions: Vec<Literal>) {
        self.assumptions = assumptions;
    }

    pub fn clear_assumptions(&mut self) {
        self.assumptions.clear();
    }

    pub fn add_variable(&mut self) {
        dispatch!(&mut self.strategy, h => h.add_variable())
    }

    pub fn build<'a, I>(&mut self, clauses: I, trail: &Trail)
    where
        I: IntoIterator<Item = &'a Clause>,
    {
        dispatch!(&mut self.strategy, h => h.build(clauses, trail))
    }

    pub fn update(&mut self, lemma: &[Literal]) {
        dispatch!(&mut self.strategy, h => h.update(lemma))
    }

    pub fn back_track(&mut self, variable: VariableSize) {
        dispatch!(&mut self.strategy, h => h.back_track(variable))
    }

    #[inline(never)]
    pub fn next_decision(&mut self, trail: &Trail) -> NextDecision {
        if let Some(failed) = self.assumptions.iter().find(|l| trail.is_false(**l)) {
            return NextDecision::FailedAssumption(*failed);
        }
        if let Some(pending) = self.assumptions.iter().find(|l| trail.value_of(**l) == Value::Undefined) {
            return NextDecision::Decide(*pending);
        }
        let picked = dispatch!(&mut self.strategy, h => h.pick_branching_variable(trail));
        match picked {
            Some(variable) => {
                let sign = trail.var(variable).phase.unwrap_or(true);
                NextDecision::Decide(Literal::new(variable, sign))
            }
            None => NextDecision::Exhausted,
        }
    }
}
