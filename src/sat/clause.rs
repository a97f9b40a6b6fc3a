use std::ops::Index;

use crate::finite_collections::Array;

use super::error::Result;
use super::types::{Literal, VariableSize};

/// Disjunction of literals. Positions 0 and 1 are the watched literals.
#[derive(Clone, Debug)]
pub struct Clause {
    literals: Array<VariableSize, Literal>,
    pub learnt: bool,
    pub deleted: bool,
    pub lbd: VariableSize,
}

impl Clause {
    pub fn new(literals: Array<VariableSize, Literal>, learnt: bool) -> Self {
        Clause { literals, learnt, deleted: false, lbd: 0 }
    }

    /// Builds a clause from external 1-based signed literals.
    pub fn from_dimacs(literals: &[i64]) -> Result<Self> {
        let literals = literals.iter().map(|l| Literal::from_dimacs(*l)).collect::<Result<Array<_, _>>>()?;
        Ok(Clause::new(literals, false))
    }

    #[inline(always)]
    pub fn len(&self) -> VariableSize {
        self.literals.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn literals(&self) -> &[Literal] {
        self.literals.as_slice()
    }

    #[inline(always)]
    pub fn swap(&mut self, i: VariableSize, j: VariableSize) {
        self.literals.swap(i, j);
    }

    /// Frees the literal storage of a deleted clause.
    pub(crate) fn release(&mut self) {
        debug_assert!(self.deleted);
        self.literals.clear();
        self.literals.shrink_to_fit();
    }
}

impl Index<VariableSize> for Clause {
    type Output = Literal;

    #[inline(always)]
    fn index(&self, index: VariableSize) -> &Literal {
        &self.literals[index]
    }
}
