//! Conversion between a matrix and its stored block layout.

use alloc::vec::Vec;

use crate::conf::MatrixConf;
use crate::error::MatrixError;
use crate::matrix::Matrix;

/// Concatenate the blocks of `matrix` in row-major block order.
pub fn subdivide_matrix_into_bytes(
    conf: &MatrixConf,
    matrix: &Matrix,
) -> Result<Vec<u8>, MatrixError> {
    if matrix.size() != conf.matrix_size() {
        return Err(MatrixError::SizeMismatch {
            expected: conf.matrix_size(),
            actual: matrix.size(),
        });
    }

    let per_row = conf.submatrices_per_row();
    let block_size = conf.submatrix_size();
    let mut bytes = Vec::with_capacity(conf.bytes_per_matrix());
    for row in 0..per_row {
        for col in 0..per_row {
            bytes.extend_from_slice(&matrix.block(row, col, block_size).to_bytes());
        }
    }
    Ok(bytes)
}

/// Rebuild a matrix from blocks laid out by [`subdivide_matrix_into_bytes`].
pub fn reconstruct_matrix_from_bytes(
    conf: &MatrixConf,
    bytes: &[u8],
) -> Result<Matrix, MatrixError> {
    if bytes.len() != conf.bytes_per_matrix() {
        return Err(MatrixError::ByteLength {
            expected: conf.bytes_per_matrix(),
            actual: bytes.len(),
        });
    }

    let per_row = conf.submatrices_per_row();
    let block_size = conf.submatrix_size();

    let mut matrix = Matrix::zeros(conf.matrix_size());
    for (idx, chunk) in bytes.chunks_exact(conf.bytes_per_submatrix()).enumerate() {
        let block = Matrix::from_bytes(block_size, chunk)?;
        matrix.set_block(idx / per_row, idx % per_row, &block);
    }
    Ok(matrix)
}
