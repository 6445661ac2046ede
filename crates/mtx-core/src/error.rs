use std::fmt;

use thiserror::Error;

/// Binary operation named in a shape mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
}

impl Op {
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "addition"),
            Self::Sub => write!(f, "subtraction"),
            Self::Mul => write!(f, "multiplication"),
        }
    }
}

#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("invalid matrix size {rows}x{columns}: both dimensions must be at least 1")]
    InvalidDimension { rows: usize, columns: usize },

    #[error(
        "shape mismatch in {op}: {}x{} and {}x{}",
        .left.0, .left.1, .right.0, .right.1
    )]
    ShapeMismatch {
        op: Op,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("matrix of {rows}x{columns} elements does not fit in memory")]
    TooLarge { rows: usize, columns: usize },

    #[error("not a square matrix: {rows}x{columns}")]
    NotSquare { rows: usize, columns: usize },

    #[error("matrix is empty")]
    Empty,

    #[error("index ({row}, {column}) out of bounds for {rows}x{columns} matrix")]
    IndexOutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    #[error("expected {expected} elements, got {found}")]
    ElementCount { expected: usize, found: usize },

    #[error("cannot parse {token:?}: {reason}")]
    Parse { token: String, reason: String },

    #[error("unexpected end of input: expected {expected} values, found {found}")]
    UnexpectedEof { expected: usize, found: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MatrixResult<T> = Result<T, MatrixError>;
