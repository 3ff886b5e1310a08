//! Error types for matrix state operations.

use faasm_bindings::AdapterError;

/// Errors from matrix layout and state operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// A state call was rejected by the bindings.
    #[error("state call rejected: {0}")]
    Adapter(#[from] AdapterError),

    /// Matrix size cannot be split evenly.
    #[error("matrix size {matrix_size} cannot be split {n_splits} times")]
    InvalidConf { matrix_size: u32, n_splits: u32 },

    /// Stored configuration has the wrong length.
    #[error("matrix configuration must be {expected} bytes, got {actual}")]
    ConfEncoding { expected: usize, actual: usize },

    /// Matrix dimension does not match the configuration.
    #[error("matrix size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Byte buffer does not hold a square matrix of the requested size.
    #[error("expected {expected} bytes of matrix data, got {actual}")]
    ByteLength { expected: usize, actual: usize },

    /// Reading or writing a layout file failed.
    #[cfg(feature = "std")]
    #[error("matrix file i/o failed: {0:?}")]
    Io(std::io::ErrorKind),

    /// Sub-block index past the last block.
    #[error("submatrix ({row}, {col}) out of range for {per_row} blocks per row")]
    BlockOutOfRange {
        row: usize,
        col: usize,
        per_row: usize,
    },
}

#[cfg(feature = "std")]
impl From<std::io::Error> for MatrixError {
    fn from(err: std::io::Error) -> Self {
        MatrixError::Io(err.kind())
    }
}
