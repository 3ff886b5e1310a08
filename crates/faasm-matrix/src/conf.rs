//! Sub-block layout of a square matrix.
//!
//! A matrix of `matrix_size` rows is split `n_splits` times along each axis,
//! giving `2^n_splits` blocks per row. Blocks are stored back to back in
//! row-major block order, each block itself row-major.

use crate::error::MatrixError;

/// Bytes per matrix element (`f64`).
pub const ELEMENT_SIZE: usize = core::mem::size_of::<f64>();

/// Encoded size of a [`MatrixConf`].
pub const CONF_ENCODED_LEN: usize = 8;

/// Largest supported split count.
const MAX_SPLITS: u32 = 15;

/// Matrix dimension and split count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatrixConf {
    matrix_size: u32,
    n_splits: u32,
}

impl MatrixConf {
    /// Validate that `matrix_size` divides into `2^n_splits` equal blocks.
    pub fn new(matrix_size: u32, n_splits: u32) -> Result<Self, MatrixError> {
        let invalid = MatrixError::InvalidConf {
            matrix_size,
            n_splits,
        };
        if matrix_size == 0 || n_splits > MAX_SPLITS {
            return Err(invalid);
        }
        if matrix_size % (1u32 << n_splits) != 0 {
            return Err(invalid);
        }
        // Whole-matrix byte length must be addressable
        let size = matrix_size as usize;
        let bytes = size
            .checked_mul(size)
            .and_then(|n| n.checked_mul(ELEMENT_SIZE))
            .filter(|&n| n <= isize::MAX as usize);
        if bytes.is_none() {
            return Err(invalid);
        }
        Ok(Self {
            matrix_size,
            n_splits,
        })
    }

    pub fn matrix_size(&self) -> usize {
        self.matrix_size as usize
    }

    pub fn n_splits(&self) -> u32 {
        self.n_splits
    }

    pub fn submatrices_per_row(&self) -> usize {
        1usize << self.n_splits
    }

    pub fn submatrix_size(&self) -> usize {
        self.matrix_size() / self.submatrices_per_row()
    }

    pub fn bytes_per_matrix(&self) -> usize {
        self.matrix_size() * self.matrix_size() * ELEMENT_SIZE
    }

    pub fn bytes_per_submatrix(&self) -> usize {
        self.submatrix_size() * self.submatrix_size() * ELEMENT_SIZE
    }

    /// Byte offset of block `(row, col)` in the stored layout.
    pub fn submatrix_byte_offset(&self, row: usize, col: usize) -> Result<usize, MatrixError> {
        self.check_block(row, col)?;
        Ok((row * self.submatrices_per_row() + col) * self.bytes_per_submatrix())
    }

    pub(crate) fn check_block(&self, row: usize, col: usize) -> Result<(), MatrixError> {
        let per_row = self.submatrices_per_row();
        if row >= per_row || col >= per_row {
            return Err(MatrixError::BlockOutOfRange { row, col, per_row });
        }
        Ok(())
    }

    /// Encode as two little-endian `u32` values.
    pub fn to_bytes(&self) -> [u8; CONF_ENCODED_LEN] {
        let mut out = [0u8; CONF_ENCODED_LEN];
        out[..4].copy_from_slice(&self.matrix_size.to_le_bytes());
        out[4..].copy_from_slice(&self.n_splits.to_le_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MatrixError> {
        if bytes.len() != CONF_ENCODED_LEN {
            return Err(MatrixError::ConfEncoding {
                expected: CONF_ENCODED_LEN,
                actual: bytes.len(),
            });
        }
        let matrix_size = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let n_splits = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        Self::new(matrix_size, n_splits)
    }
}
