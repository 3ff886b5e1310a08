//! Dense square matrices of `f64`, row-major.

use alloc::vec;
use alloc::vec::Vec;

use crate::conf::ELEMENT_SIZE;
use crate::error::MatrixError;

#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    size: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            data: vec![0.0; size * size],
        }
    }

    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                data.push(f(row, col));
            }
        }
        Self { size, data }
    }

    /// Entries drawn uniformly from `[0, 1)`.
    #[cfg(feature = "random")]
    pub fn random<R: rand::Rng>(size: usize, rng: &mut R) -> Self {
        Self::from_fn(size, |_, _| rng.gen::<f64>())
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.size + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.size + col] = value;
    }

    /// Copy out the `block_size` square block at block coordinates `(row, col)`.
    pub fn block(&self, row: usize, col: usize, block_size: usize) -> Matrix {
        let (r0, c0) = (row * block_size, col * block_size);
        Matrix::from_fn(block_size, |r, c| self.get(r0 + r, c0 + c))
    }

    /// Overwrite the block at block coordinates `(row, col)` with `block`.
    pub fn set_block(&mut self, row: usize, col: usize, block: &Matrix) {
        let n = block.size;
        let (r0, c0) = (row * n, col * n);
        for r in 0..n {
            for c in 0..n {
                self.set(r0 + r, c0 + c, block.get(r, c));
            }
        }
    }

    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        self.check_same_size(other)?;
        let n = self.size;
        Ok(Matrix::from_fn(n, |r, c| {
            (0..n).map(|k| self.get(r, k) * other.get(k, c)).sum()
        }))
    }

    /// `self += a * b`
    pub fn add_product(&mut self, a: &Matrix, b: &Matrix) -> Result<(), MatrixError> {
        self.check_same_size(a)?;
        self.check_same_size(b)?;
        let product = a.multiply(b)?;
        for (acc, value) in self.data.iter_mut().zip(product.data) {
            *acc += value;
        }
        Ok(())
    }

    fn check_same_size(&self, other: &Matrix) -> Result<(), MatrixError> {
        if self.size != other.size {
            return Err(MatrixError::SizeMismatch {
                expected: self.size,
                actual: other.size,
            });
        }
        Ok(())
    }

    /// Little-endian `f64` elements, row-major.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() * ELEMENT_SIZE);
        for value in &self.data {
            out.extend_from_slice(&value.to_le_bytes());
        }
        out
    }

    pub fn from_bytes(size: usize, bytes: &[u8]) -> Result<Matrix, MatrixError> {
        let expected = size * size * ELEMENT_SIZE;
        if bytes.len() != expected {
            return Err(MatrixError::ByteLength {
                expected,
                actual: bytes.len(),
            });
        }
        let mut data = Vec::with_capacity(size * size);
        for chunk in bytes.chunks_exact(ELEMENT_SIZE) {
            let mut raw = [0u8; ELEMENT_SIZE];
            raw.copy_from_slice(chunk);
            data.push(f64::from_le_bytes(raw));
        }
        Ok(Matrix { size, data })
    }
}
