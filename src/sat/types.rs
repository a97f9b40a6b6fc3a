use std::fmt;
use std::ops::Not;

use super::error::{Result, SolverError};

pub type VariableSize = u32;

pub type ClauseIndex = u32;

/// Literal in the internal encoding: `2 * variable` for the positive literal and
/// `2 * variable + 1` for the negative one.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    code: VariableSize,
}

impl Literal {
    #[inline(always)]
    pub fn positive(variable: VariableSize) -> Self {
        Literal { code: variable * 2 }
    }

    #[inline(always)]
    pub fn negative(variable: VariableSize) -> Self {
        Literal { code: variable * 2 + 1 }
    }

    #[inline(always)]
    pub fn new(variable: VariableSize, sign: bool) -> Self {
        if sign {
            Literal::positive(variable)
        } else {
            Literal::negative(variable)
        }
    }

    #[inline(always)]
    pub fn code(self) -> VariableSize {
        self.code
    }

    #[inline(always)]
    pub fn variable(self) -> VariableSize {
        self.code / 2
    }

    /// `true` for the positive literal.
    #[inline(always)]
    pub fn sign(self) -> bool {
        self.code % 2 == 0
    }

    /// Largest external variable index whose literal codes fit in `VariableSize`.
    pub const MAX_DIMACS_VARIABLE: u64 = (VariableSize::MAX / 2) as u64;

    /// Translates an external 1-based signed literal.
    pub fn from_dimacs(literal: i64) -> Result<Self> {
        if literal == 0 {
            return Err(SolverError::ZeroLiteral);
        }
        if literal.unsigned_abs() > Self::MAX_DIMACS_VARIABLE {
            return Err(SolverError::LiteralOutOfRange { literal });
        }
        let variable = (literal.unsigned_abs() - 1) as VariableSize;
        Ok(Literal::new(variable, literal > 0))
    }

    pub fn to_dimacs(self) -> i64 {
        let variable = self.variable() as i64 + 1;
        if self.sign() {
            variable
        } else {
            -variable
        }
    }
}

impl Not for Literal {
    type Output = Literal;

    #[inline(always)]
    fn not(self) -> Literal {
        Literal { code: self.code ^ 1 }
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

/// Three-valued truth value of a variable or literal.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Value {
    True,
    False,
    #[default]
    Undefined,
}

impl Value {
    pub fn from_bool(value: bool) -> Self {
        if value {
            Value::True
        } else {
            Value::False
        }
    }
}

impl Not for Value {
    type Output = Value;

    fn not(self) -> Value {
        match self {
            Value::True => Value::False,
            Value::False => Value::True,
            Value::Undefined => Value::Undefined,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_matches_parity() {
        let p = Literal::positive(3);
        let n = Literal::negative(3);
        assert_eq!(p.code(), 6);
        assert_eq!(n.code(), 7);
        assert_eq!(p.variable(), 3);
        assert_eq!(n.variable(), 3);
        assert!(p.sign());
        assert!(!n.sign());
        assert_eq!(!p, n);
        assert_eq!(!n, p);
    }

    #[test]
    fn dimacs_translation() {
        assert_eq!(Literal::from_dimacs(1).unwrap(), Literal::positive(0));
        assert_eq!(Literal::from_dimacs(-4).unwrap(), Literal::negative(3));
        assert!(matches!(Literal::from_dimacs(0), Err(SolverError::ZeroLiteral)));
        assert_eq!(Literal::negative(9).to_dimacs(), -10);
    }

    #[test]
    fn dimacs_range_is_bounded_by_code_width() {
        let max = Literal::MAX_DIMACS_VARIABLE as i64;
        let largest = Literal::from_dimacs(-max).unwrap();
        assert_eq!(largest.to_dimacs(), -max);
        assert_eq!(largest.code(), VariableSize::MAX - 2);
        for literal in [max + 1, -(max + 1), -4294967297, i64::MIN, i64::MAX] {
            assert!(matches!(
                Literal::from_dimacs(literal),
                Err(SolverError::LiteralOutOfRange { literal: l }) if l == literal
            ));
        }
    }

    #[test]
    fn value_negation() {
        assert_eq!(!Value::True, Value::False);
        assert_eq!(!Value::False, Value::True);
        assert_eq!(!Value::Undefined, Value::Undefined);
    }
}
