pub mod error;
pub mod matrix;
pub mod ops;
pub mod render;
pub mod text;

pub use error::{MatrixError, MatrixResult, Op};
pub use matrix::Matrix;
pub use render::{Border, Grid};
pub use text::{read_matrices, read_matrix, to_text};
