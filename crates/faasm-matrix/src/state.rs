//! Matrices stored as sub-blocks in keyed state.
//!
//! Functions here pull every key they read before reading it and push every
//! key they write once the write is done, so functions running on different
//! nodes see each other's blocks. `push_state` publishes the whole local
//! value: concurrent writers of one key must not overlap in time.

use alloc::format;

use faasm_bindings::{Adapter, HostFunctions};

use crate::conf::{MatrixConf, CONF_ENCODED_LEN};
use crate::error::MatrixError;
use crate::layout::{reconstruct_matrix_from_bytes, subdivide_matrix_into_bytes};
use crate::matrix::Matrix;

/// Key holding the encoded [`MatrixConf`].
pub const MATRIX_CONF_STATE_KEY: &str = "matrix_state";
/// Key holding the blocks of the left operand.
pub const SUBMATRICES_KEY_A: &str = "submatrices_a";
/// Key holding the blocks of the right operand.
pub const SUBMATRICES_KEY_B: &str = "submatrices_b";
/// Key receiving the blocks of the product.
pub const RESULT_MATRIX_KEY: &str = "result_matrix";

pub fn write_matrix_conf<H: HostFunctions>(
    adapter: &Adapter<H>,
    conf: &MatrixConf,
) -> Result<(), MatrixError> {
    adapter.set_state(MATRIX_CONF_STATE_KEY, &conf.to_bytes())?;
    adapter.push_state(MATRIX_CONF_STATE_KEY)?;
    Ok(())
}

pub fn load_matrix_conf<H: HostFunctions>(adapter: &Adapter<H>) -> Result<MatrixConf, MatrixError> {
    adapter.pull_state(MATRIX_CONF_STATE_KEY, CONF_ENCODED_LEN)?;
    let bytes = adapter.get_state(MATRIX_CONF_STATE_KEY, CONF_ENCODED_LEN)?;
    MatrixConf::from_bytes(&bytes)
}

/// Write `matrix` under `key` as contiguous blocks and push it.
pub fn subdivide_matrix_into_state<H: HostFunctions>(
    adapter: &Adapter<H>,
    conf: &MatrixConf,
    matrix: &Matrix,
    key: &str,
) -> Result<(), MatrixError> {
    let bytes = subdivide_matrix_into_bytes(conf, matrix)?;
    adapter.set_state(key, &bytes)?;
    adapter.push_state(key)?;

    let per_row = conf.submatrices_per_row();
    adapter.host().debug_write(&format!(
        "[faasm-matrix] wrote {}x{} matrix to '{}' as {} blocks",
        conf.matrix_size(),
        conf.matrix_size(),
        key,
        per_row * per_row
    ));
    Ok(())
}

/// Write a matrix of uniform `[0, 1)` entries under `key` and push it.
#[cfg(feature = "random")]
pub fn subdivide_random_matrix_into_state<H: HostFunctions, R: rand::Rng>(
    adapter: &Adapter<H>,
    conf: &MatrixConf,
    key: &str,
    rng: &mut R,
) -> Result<(), MatrixError> {
    let matrix = Matrix::random(conf.matrix_size(), rng);
    subdivide_matrix_into_state(adapter, conf, &matrix, key)
}

/// Pull the matrix under `key` and read block `(row, col)`.
pub fn read_submatrix_from_state<H: HostFunctions>(
    adapter: &Adapter<H>,
    conf: &MatrixConf,
    key: &str,
    row: usize,
    col: usize,
) -> Result<Matrix, MatrixError> {
    conf.check_block(row, col)?;
    adapter.pull_state(key, conf.bytes_per_matrix())?;
    read_local_submatrix(adapter, conf, key, row, col)
}

fn read_local_submatrix<H: HostFunctions>(
    adapter: &Adapter<H>,
    conf: &MatrixConf,
    key: &str,
    row: usize,
    col: usize,
) -> Result<Matrix, MatrixError> {
    let offset = conf.submatrix_byte_offset(row, col)?;
    let bytes = adapter.get_state_range(
        key,
        conf.bytes_per_matrix(),
        offset,
        conf.bytes_per_submatrix(),
    )?;
    Matrix::from_bytes(conf.submatrix_size(), &bytes)
}

/// Pull the blocks under `key` and reassemble the full matrix.
pub fn reconstruct_matrix_from_submatrices<H: HostFunctions>(
    adapter: &Adapter<H>,
    conf: &MatrixConf,
    key: &str,
) -> Result<Matrix, MatrixError> {
    adapter.pull_state(key, conf.bytes_per_matrix())?;
    let bytes = adapter.get_state(key, conf.bytes_per_matrix())?;
    reconstruct_matrix_from_bytes(conf, &bytes)
}

fn pull_operands<H: HostFunctions>(
    adapter: &Adapter<H>,
    conf: &MatrixConf,
    keys: [&str; 3],
) -> Result<(), MatrixError> {
    for key in keys {
        adapter.pull_state(key, conf.bytes_per_matrix())?;
    }
    Ok(())
}

/// Sum of `A[row][k] * B[k][col]` over k, written into the local result.
fn write_result_block<H: HostFunctions>(
    adapter: &Adapter<H>,
    conf: &MatrixConf,
    keys: [&str; 3],
    row: usize,
    col: usize,
) -> Result<(), MatrixError> {
    let [a_key, b_key, result_key] = keys;
    let offset = conf.submatrix_byte_offset(row, col)?;

    let mut acc = Matrix::zeros(conf.submatrix_size());
    for k in 0..conf.submatrices_per_row() {
        let a = read_local_submatrix(adapter, conf, a_key, row, k)?;
        let b = read_local_submatrix(adapter, conf, b_key, k, col)?;
        acc.add_product(&a, &b)?;
    }

    adapter.set_state_range(result_key, conf.bytes_per_matrix(), offset, &acc.to_bytes())?;
    Ok(())
}

/// Compute result block `(row, col)` and publish it under `result_key`.
///
/// Pulls both operands and the current result first, so other blocks
/// already pushed to `result_key` survive the push.
pub fn multiply_block_into_state<H: HostFunctions>(
    adapter: &Adapter<H>,
    conf: &MatrixConf,
    a_key: &str,
    b_key: &str,
    result_key: &str,
    row: usize,
    col: usize,
) -> Result<(), MatrixError> {
    conf.check_block(row, col)?;
    let keys = [a_key, b_key, result_key];
    pull_operands(adapter, conf, keys)?;
    write_result_block(adapter, conf, keys, row, col)?;
    adapter.push_state(result_key)?;
    Ok(())
}

/// Block-multiply the matrices under `a_key` and `b_key` into `result_key`
/// and push the result.
pub fn multiply_into_state<H: HostFunctions>(
    adapter: &Adapter<H>,
    conf: &MatrixConf,
    a_key: &str,
    b_key: &str,
    result_key: &str,
) -> Result<(), MatrixError> {
    let keys = [a_key, b_key, result_key];
    pull_operands(adapter, conf, keys)?;

    let per_row = conf.submatrices_per_row();
    for row in 0..per_row {
        for col in 0..per_row {
            write_result_block(adapter, conf, keys, row, col)?;
        }
    }

    adapter.push_state(result_key)?;
    Ok(())
}
