//! `+ - *` operators. Each returns [`MatrixResult`] so that a shape
//! mismatch surfaces as an error at the call site.

use std::ops::{Add, Mul, Sub};

use crate::error::MatrixResult;
use crate::matrix::Matrix;

macro_rules! forward_binop {
    ($trait:ident, $method:ident, $checked:ident) => {
        impl $trait<&Matrix> for &Matrix {
            type Output = MatrixResult<Matrix>;

            fn $method(self, rhs: &Matrix) -> Self::Output {
                self.$checked(rhs)
            }
        }

        impl $trait<Matrix> for Matrix {
            type Output = MatrixResult<Matrix>;

            fn $method(self, rhs: Matrix) -> Self::Output {
                self.$checked(&rhs)
            }
        }

        impl $trait<&Matrix> for Matrix {
            type Output = MatrixResult<Matrix>;

            fn $method(self, rhs: &Matrix) -> Self::Output {
                self.$checked(rhs)
            }
        }
    };
}

forward_binop!(Add, add, checked_add);
forward_binop!(Sub, sub, checked_sub);
forward_binop!(Mul, mul, checked_mul);
