//! Bordered grid rendering.
//!
//! ```text
//! ┌ 1 2 3 ┐
//! | 9 8 7 |
//! └ 4 2 6 ┘
//! ```
//!
//! Each column is right-aligned to its widest cell. A formatter precision
//! (`{:.2}`) applies to every cell.

use std::fmt;

use serde::Deserialize;

use crate::matrix::Matrix;

/// Glyph set used for the left and right edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Border {
    #[default]
    Unicode,
    Ascii,
}

impl Border {
    /// (left, right) edge glyphs for a row.
    fn edges(self, first: bool, last: bool) -> (&'static str, &'static str) {
        match self {
            Self::Unicode if first => ("┌", "┐"),
            Self::Unicode if last => ("└", "┘"),
            Self::Unicode => ("|", "|"),
            Self::Ascii if first || last => ("+", "+"),
            Self::Ascii => ("|", "|"),
        }
    }
}

impl fmt::Display for Border {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unicode => write!(f, "unicode"),
            Self::Ascii => write!(f, "ascii"),
        }
    }
}

impl std::str::FromStr for Border {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unicode" => Ok(Self::Unicode),
            "ascii" => Ok(Self::Ascii),
            _ => Err(format!("invalid border: {s}")),
        }
    }
}

/// Display adapter returned by [`Matrix::grid`].
pub struct Grid<'a> {
    matrix: &'a Matrix,
    border: Border,
    precision: Option<usize>,
}

impl Matrix {
    /// Width of the widest rendered cell in each column.
    pub fn column_widths(&self, precision: Option<usize>) -> Vec<usize> {
        let mut widths = vec![0; self.columns()];
        for row in self.as_slice().chunks_exact(self.columns().max(1)) {
            for (w, &v) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell(v, precision).chars().count());
            }
        }
        widths
    }

    pub fn grid(&self, border: Border, precision: Option<usize>) -> Grid<'_> {
        Grid {
            matrix: self,
            border,
            precision,
        }
    }
}

fn cell(v: f64, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{v:.p$}"),
        None => v.to_string(),
    }
}

impl fmt::Display for Grid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.matrix;
        if m.is_empty() {
            return writeln!(f, "[]");
        }

        let widths = m.column_widths(self.precision);
        let rows = m.rows();
        for (i, row) in m.as_slice().chunks_exact(m.columns()).enumerate() {
            let (left, right) = self.border.edges(i == 0, i + 1 == rows);
            write!(f, "{left} ")?;
            for (&v, &w) in row.iter().zip(&widths) {
                write!(f, "{:>w$} ", cell(v, self.precision))?;
            }
            writeln!(f, "{right}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.grid(Border::Unicode, f.precision()), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix {
        Matrix::from_rows(&[&[1.0, 2.0, 3.0], &[9.0, 8.0, 7.0], &[4.0, 2.0, 6.0]]).unwrap()
    }

    #[test]
    fn test_render_square() {
        let expected = "┌ 1 2 3 ┐\n| 9 8 7 |\n└ 4 2 6 ┘\n";
        assert_eq!(sample().to_string(), expected);
    }

    #[test]
    fn test_render_right_aligns_columns() {
        let m = Matrix::from_rows(&[&[1.0, -20.0], &[100.0, 3.0]]).unwrap();
        assert_eq!(m.column_widths(None), vec![3, 3]);
        assert_eq!(m.to_string(), "┌   1 -20 ┐\n└ 100   3 ┘\n");
    }

    #[test]
    fn test_render_single_row_uses_top_corners() {
        let m = Matrix::from_rows(&[&[0.5, 12.0]]).unwrap();
        assert_eq!(m.to_string(), "┌ 0.5 12 ┐\n");
    }

    #[test]
    fn test_render_precision() {
        let m = Matrix::from_rows(&[&[1.0], &[2.5]]).unwrap();
        assert_eq!(format!("{m:.2}"), "┌ 1.00 ┐\n└ 2.50 ┘\n");
    }

    #[test]
    fn test_render_ascii() {
        let out = sample().grid(Border::Ascii, None).to_string();
        assert_eq!(out, "+ 1 2 3 +\n| 9 8 7 |\n+ 4 2 6 +\n");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(Matrix::default().to_string(), "[]\n");
    }

    #[test]
    fn test_border_from_str() {
        assert_eq!("ASCII".parse::<Border>().unwrap(), Border::Ascii);
        assert!("fancy".parse::<Border>().is_err());
    }
}
