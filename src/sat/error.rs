use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolverError {
    /// Clauses can only be added between searches.
    #[error("clause added at decision level {level}, expected level 0")]
    NotAtRootLevel { level: u32 },

    #[error("no model available: the last solve did not return SATISFIABLE")]
    NoModel,

    #[error("literal 0 is not a valid literal")]
    ZeroLiteral,

    #[error("literal {literal} is out of range")]
    LiteralOutOfRange { literal: i64 },

    #[error("assumptions require an incremental solver")]
    IncrementalDisabled,

    #[error("line {line}: {message} (token `{token}`)")]
    ParseError { line: usize, token: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SolverError>;
