use super::error::{Result, SolverError};
use super::types::Literal;

/// CNF formula over external literals as read from a DIMACS file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SATProblem {
    pub num_variables: usize,
    pub clauses: Vec<Vec<i64>>,
}

fn parse_error(line: usize, token: &str, message: &str) -> SolverError {
    SolverError::ParseError { line, token: token.to_string(), message: message.to_string() }
}

fn parse_header(line_number: usize, line: &str) -> Result<usize> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [_, format, variables, clauses] = fields.as_slice() else {
        return Err(parse_error(line_number, line, "expected `p cnf <variables> <clauses>`"));
    };
    if *format != "cnf" {
        return Err(parse_error(line_number, format, "unsupported format"));
    }
    clauses.parse::<usize>().map_err(|_| parse_error(line_number, clauses, "invalid clause count"))?;
    let count = variables.parse::<u64>().map_err(|_| parse_error(line_number, variables, "invalid variable count"))?;
    if count > Literal::MAX_DIMACS_VARIABLE {
        return Err(parse_error(line_number, variables, "variable count out of range"));
    }
    Ok(count as usize)
}

/// Reads a DIMACS CNF formula. Clauses end with `0` and may span lines; a line
/// starting with `%` ends the input.
#[inline(never)]
pub fn read_cnf<R>(reader: R) -> Result<SATProblem>
where
    R: std::io::BufRead,
{
    let mut problem = SATProblem::default();
    let mut header_seen = false;
    let mut clause = vec![];
    let mut last_line = 0;
    for (index, read_result) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = read_result?;
        last_line = line_number;
        let line = line.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        if line.starts_with('%') {
            break;
        }
        if line.starts_with('p') {
            if header_seen {
                return Err(parse_error(line_number, line, "duplicate header"));
            }
            header_seen = true;
            problem.num_variables = parse_header(line_number, line)?;
            continue;
        }
        for token in line.split_whitespace() {
            let literal = token.parse::<i64>().map_err(|_| parse_error(line_number, token, "invalid literal"))?;
            if literal.unsigned_abs() > Literal::MAX_DIMACS_VARIABLE {
                return Err(parse_error(line_number, token, "literal out of range"));
            }
            if literal == 0 {
                problem.clauses.push(std::mem::take(&mut clause));
                continue;
            }
            problem.num_variables = problem.num_variables.max(literal.unsigned_abs() as usize);
            clause.push(literal);
        }
    }
    if !clause.is_empty() {
        let token = clause.last().map(|l| l.to_string()).unwrap_or_default();
        return Err(parse_error(last_line, &token, "clause is not terminated by 0"));
    }
    Ok(problem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_comments_header_and_multiline_clauses() {
        let text = "c example\np cnf 4 3\n1 -2 0\n3\n-4 0 2 0\n%\n0\n";
        let problem = read_cnf(text.as_bytes()).unwrap();
        assert_eq!(problem.num_variables, 4);
        assert_eq!(problem.clauses, vec![vec![1, -2], vec![3, -4], vec![2]]);
    }

    #[test]
    fn variable_count_covers_literals_beyond_header() {
        let problem = read_cnf("p cnf 1 1\n5 0\n".as_bytes()).unwrap();
        assert_eq!(problem.num_variables, 5);
    }

    #[test]
    fn errors_name_line_and_token() {
        let Err(SolverError::ParseError { line, token, .. }) = read_cnf("p cnf 2 1\n1 x 0\n".as_bytes()) else {
            panic!("expected a parse error");
        };
        assert_eq!((line, token.as_str()), (2, "x"));

        let Err(SolverError::ParseError { line, token, .. }) = read_cnf("p dnf 2 1\n".as_bytes()) else {
            panic!("expected a parse error");
        };
        assert_eq!((line, token.as_str()), (1, "dnf"));

        let Err(SolverError::ParseError { line, token, .. }) = read_cnf("1 2 0\n\n-2".as_bytes()) else {
            panic!("expected a parse error");
        };
        assert_eq!((line, token.as_str()), (3, "-2"));
    }

    #[test]
    fn literals_beyond_code_width_are_rejected() {
        let largest = Literal::MAX_DIMACS_VARIABLE as i64;
        let problem = read_cnf(format!("1 -{largest} 0\n").as_bytes()).unwrap();
        assert_eq!(problem.num_variables, largest as usize);

        for token in ["-4294967297", "2147483648", "-9223372036854775808"] {
            let text = format!("p cnf 1 2\n1 0\n{token} 0\n");
            let Err(SolverError::ParseError { line, token: reported, .. }) = read_cnf(text.as_bytes()) else {
                panic!("expected a parse error for {token}");
            };
            assert_eq!((line, reported.as_str()), (3, token));
        }

        let Err(SolverError::ParseError { line, token, .. }) = read_cnf("p cnf 4294967296 0\n".as_bytes()) else {
            panic!("expected a parse error");
        };
        assert_eq!((line, token.as_str()), (1, "4294967296"));
    }
}
