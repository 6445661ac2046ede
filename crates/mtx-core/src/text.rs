//! Whitespace-separated text format.
//!
//! A matrix is written as its row count, its column count, then
//! `rows * columns` numbers in row-major order. Line breaks carry no
//! meaning and `#` starts a comment that runs to the end of the line:
//!
//! ```text
//! # A
//! 3 3
//! 1 2 3
//! 9 8 7
//! 4 2 6
//! ```

use std::collections::VecDeque;
use std::io::{BufRead, Lines};
use std::str::FromStr;

use crate::error::{MatrixError, MatrixResult};
use crate::matrix::{check_dimensions, Matrix};

/// Read one matrix from `reader`. Anything after it is left unread.
pub fn read_matrix<R: BufRead>(reader: R) -> MatrixResult<Matrix> {
    let mut tokens = Tokens::new(reader);
    next_matrix(&mut tokens)?.ok_or(MatrixError::UnexpectedEof {
        expected: 2,
        found: 0,
    })
}

/// Read consecutive matrices until the input is exhausted.
pub fn read_matrices<R: BufRead>(reader: R) -> MatrixResult<Vec<Matrix>> {
    let mut tokens = Tokens::new(reader);
    let mut out = Vec::new();
    while let Some(m) = next_matrix(&mut tokens)? {
        out.push(m);
    }
    Ok(out)
}

/// Write `m` in the format accepted by [`read_matrix`], one row per line.
pub fn to_text(m: &Matrix) -> String {
    let mut out = format!("{} {}\n", m.rows(), m.columns());
    for row in m.as_slice().chunks(m.columns().max(1)) {
        let line: Vec<String> = row.iter().map(f64::to_string).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

impl FromStr for Matrix {
    type Err = MatrixError;

    /// Parse exactly one matrix; trailing tokens are rejected.
    fn from_str(s: &str) -> MatrixResult<Self> {
        let mut tokens = Tokens::new(s.as_bytes());
        let m = next_matrix(&mut tokens)?.ok_or(MatrixError::UnexpectedEof {
            expected: 2,
            found: 0,
        })?;
        if let Some(token) = tokens.next_token()? {
            return Err(MatrixError::Parse {
                token,
                reason: "trailing input after matrix".into(),
            });
        }
        Ok(m)
    }
}

struct Tokens<R> {
    lines: Lines<R>,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            pending: VecDeque::new(),
        }
    }

    fn next_token(&mut self) -> MatrixResult<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let Some(line) = self.lines.next() else {
                return Ok(None);
            };
            let line = line?;
            let content = line.split_once('#').map_or(line.as_str(), |(c, _)| c);
            self.pending
                .extend(content.split_whitespace().map(str::to_owned));
        }
    }
}

fn next_matrix<R: BufRead>(tokens: &mut Tokens<R>) -> MatrixResult<Option<Matrix>> {
    let Some(first) = tokens.next_token()? else {
        return Ok(None);
    };
    let rows = parse_dimension(first)?;
    let columns = match tokens.next_token()? {
        Some(t) => parse_dimension(t)?,
        None => {
            return Err(MatrixError::UnexpectedEof {
                expected: 2,
                found: 1,
            })
        }
    };
    let expected = check_dimensions(rows, columns)?;

    let mut data = Vec::with_capacity(expected.min(4096));
    while data.len() < expected {
        match tokens.next_token()? {
            Some(t) => data.push(parse_value(t)?),
            None => {
                return Err(MatrixError::UnexpectedEof {
                    expected,
                    found: data.len(),
                })
            }
        }
    }
    Matrix::from_vec(rows, columns, data).map(Some)
}

fn parse_dimension(token: String) -> MatrixResult<usize> {
    match token.parse::<usize>() {
        Ok(n) => Ok(n),
        Err(e) => Err(MatrixError::Parse {
            reason: e.to_string(),
            token,
        }),
    }
}

fn parse_value(token: String) -> MatrixResult<f64> {
    match token.parse::<f64>() {
        Ok(v) => Ok(v),
        Err(e) => Err(MatrixError::Parse {
            reason: e.to_string(),
            token,
        }),
    }
}
