use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde_json::json;

use mtx_core::{Border, Matrix, MatrixError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Bordered grids and plain lines
    Text,
    /// One JSON object per line
    Json,
}

/// Writes labelled results in the selected output format.
pub struct Printer<W> {
    out: W,
    format: OutputFormat,
    border: Border,
    precision: Option<usize>,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, format: OutputFormat, border: Border, precision: Option<usize>) -> Self {
        Self {
            out,
            format,
            border,
            precision,
        }
    }

    pub fn matrix(&mut self, label: &str, m: &Matrix) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.out, "{label}:")?;
                writeln!(self.out, "{}", m.grid(self.border, self.precision))?;
            }
            OutputFormat::Json => {
                writeln!(self.out, "{}", json!({ "label": label, "matrix": m }))?;
            }
        }
        Ok(())
    }

    pub fn scalar(&mut self, label: &str, value: f64) -> Result<()> {
        match self.format {
            OutputFormat::Text => match self.precision {
                Some(p) => writeln!(self.out, "{label}: {value:.p$}")?,
                None => writeln!(self.out, "{label}: {value}")?,
            },
            OutputFormat::Json => {
                writeln!(self.out, "{}", json!({ "label": label, "value": value }))?;
            }
        }
        Ok(())
    }

    /// Report a rejected operation without aborting the run.
    pub fn rejected(&mut self, label: &str, err: &MatrixError) -> Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{label}: error: {err}")?,
            OutputFormat::Json => {
                writeln!(
                    self.out,
                    "{}",
                    json!({ "label": label, "error": err.to_string() })
                )?;
            }
        }
        Ok(())
    }

    /// Free-form text; suppressed in JSON mode.
    pub fn note(&mut self, text: &str) -> Result<()> {
        if self.format == OutputFormat::Text {
            writeln!(self.out, "{text}")?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_printer() -> Printer<Vec<u8>> {
        Printer::new(Vec::new(), OutputFormat::Text, Border::Unicode, None)
    }

    fn rendered(p: Printer<Vec<u8>>) -> String {
        String::from_utf8(p.into_inner()).unwrap()
    }

    #[test]
    fn test_text_matrix() {
        let mut p = text_printer();
        let m = Matrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0]]).unwrap();
        p.matrix("A", &m).unwrap();
        assert_eq!(rendered(p), "A:\n┌ 1 2 ┐\n└ 3 4 ┘\n\n");
    }

    #[test]
    fn test_text_scalar_precision() {
        let mut p = Printer::new(Vec::new(), OutputFormat::Text, Border::Unicode, Some(2));
        p.scalar("det(A)", -60.0).unwrap();
        assert_eq!(rendered(p), "det(A): -60.00\n");
    }

    #[test]
    fn test_json_lines() {
        let mut p = Printer::new(Vec::new(), OutputFormat::Json, Border::Unicode, None);
        let m = Matrix::identity(2).unwrap();
        p.note("ignored").unwrap();
        p.matrix("I", &m).unwrap();
        p.rejected("det(C)", &MatrixError::NotSquare { rows: 2, columns: 3 })
            .unwrap();

        let out = rendered(p);
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["matrix"]["rows"], 2);
        assert_eq!(lines[0]["matrix"]["data"][3], 1.0);
        assert!(lines[1]["error"].as_str().unwrap().contains("not a square"));
    }
}
