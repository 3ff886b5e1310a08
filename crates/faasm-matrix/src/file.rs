//! Block layout persisted to a file.

use std::path::Path;

use crate::conf::MatrixConf;
use crate::error::MatrixError;
use crate::layout::{reconstruct_matrix_from_bytes, subdivide_matrix_into_bytes};
use crate::matrix::Matrix;

/// Write `matrix` to `path` in the stored block layout.
pub fn subdivide_matrix_into_file(
    conf: &MatrixConf,
    matrix: &Matrix,
    path: impl AsRef<Path>,
) -> Result<(), MatrixError> {
    let bytes = subdivide_matrix_into_bytes(conf, matrix)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Read a matrix written by [`subdivide_matrix_into_file`].
pub fn reconstruct_matrix_from_file(
    conf: &MatrixConf,
    path: impl AsRef<Path>,
) -> Result<Matrix, MatrixError> {
    let bytes = std::fs::read(path)?;
    reconstruct_matrix_from_bytes(conf, &bytes)
}
