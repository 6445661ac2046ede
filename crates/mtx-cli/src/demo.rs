//! Walkthrough of every matrix operation on a fixed set of inputs.

use std::io::Write;

use anyhow::Result;
use mtx_core::Matrix;

use crate::output::Printer;

fn filled(rows: usize, columns: usize, values: &[f64]) -> Result<Matrix> {
    let mut m = Matrix::new(rows, columns)?;
    m.set(values)?;
    Ok(m)
}

pub fn run<W: Write>(out: &mut Printer<W>) -> Result<()> {
    let mut a = filled(3, 3, &[1.0, 2.0, 3.0, 9.0, 8.0, 7.0, 4.0, 2.0, 6.0])?;
    let b = filled(3, 3, &[5.0, 5.0, 4.0, 1.0, 2.0, 3.0, 6.0, 9.0, 8.0])?;
    let c = filled(2, 3, &[3.0, 4.0, 1.0, 2.0, 5.0, 6.0])?;
    let values: Vec<f64> = (1..=20).map(f64::from).collect();
    let mut d = filled(5, 4, &values)?;

    out.matrix("A", &a)?;
    out.matrix("B", &b)?;
    out.matrix("C", &c)?;

    out.note("-- arithmetic --")?;
    out.matrix("A + B", &(&a + &b)?)?;
    out.matrix("A - B", &(&a - &b)?)?;
    out.matrix("A * B", &(&a * &b)?)?;
    out.matrix("C * B", &(&c * &b)?)?;
    match &b * &c {
        Ok(m) => out.matrix("B * C", &m)?,
        Err(e) => out.rejected("B * C", &e)?,
    }

    out.note("-- minors --")?;
    out.matrix("D", &d)?;
    out.matrix("D without row 2 and column 2", &d.delete_row_column(2, 2)?)?;

    out.note("-- determinants --")?;
    out.scalar("det(A)", a.determinant()?)?;
    out.scalar("det(B)", b.determinant()?)?;
    match c.determinant() {
        Ok(v) => out.scalar("det(C)", v)?,
        Err(e) => out.rejected("det(C)", &e)?,
    }

    out.note("-- copy --")?;
    let a_copy = a.clone();
    a[(1, 1)] = 0.0;
    out.matrix("A after A(1, 1) = 0", &a)?;
    out.matrix("copy of original A", &a_copy)?;

    out.note("-- move --")?;
    let e = d.take();
    out.matrix("E (moved from D)", &e)?;
    out.matrix("D after move", &d)?;
    out.scalar("size of D", d.size() as f64)?;

    Ok(())
}
