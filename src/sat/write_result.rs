use std::io::Write;

use super::cdcl::Statistics;
use super::solver::SATSolverResult;
use super::types::{Literal, VariableSize};

/// Writes the `s` status line and, for satisfiable results, the `v` model line.
pub fn write_result<W: Write>(writer: &mut W, result: &SATSolverResult) -> std::io::Result<()> {
    match result {
        SATSolverResult::Satisfiable { solution } => {
            writeln!(writer, "s SATISFIABLE")?;
            write!(writer, "v")?;
            for (v, value) in solution.iter().enumerate() {
                write!(writer, " {}", Literal::new(v as VariableSize, *value))?;
            }
            writeln!(writer, " 0")
        }
        SATSolverResult::Unsatisfiable => writeln!(writer, "s UNSATISFIABLE"),
    }
}

/// Writes the counters as DIMACS comment lines.
pub fn write_statistics<W: Write>(writer: &mut W, statistics: &Statistics) -> std::io::Result<()> {
    writeln!(writer, "c conflicts      {}", statistics.conflicts)?;
    writeln!(writer, "c decisions      {}", statistics.decisions)?;
    writeln!(writer, "c propagations   {}", statistics.propagations)?;
    writeln!(writer, "c restarts       {}", statistics.restarts)?;
    writeln!(writer, "c reductions     {}", statistics.reductions)?;
    writeln!(writer, "c learnt clauses {}", statistics.learnt_clauses)?;
    writeln!(writer, "c mean lbd       {:.2}", statistics.learnt_lbd.mean())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finite_collections::Array;

    #[test]
    fn formats_model_line() {
        let mut out = vec![];
        let solution: Array<VariableSize, bool> = Array::from(vec![true, false, true]);
        write_result(&mut out, &SATSolverResult::Satisfiable { solution }).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "s SATISFIABLE\nv 1 -2 3 0\n");

        let mut out = vec![];
        write_result(&mut out, &SATSolverResult::Unsatisfiable).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "s UNSATISFIABLE\n");
    }

    #[test]
    fn statistics_are_comments() {
        let mut out = vec![];
        write_statistics(&mut out, &Statistics::default()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().all(|l| l.starts_with("c ")));
        assert!(text.contains("c conflicts      0"));
    }
}
