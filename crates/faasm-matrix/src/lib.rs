//! Block-partitioned matrices in Faasm keyed state
//!
//! A square matrix is split into `2^n_splits` blocks per row and stored
//! under one key, block after block. Functions on different nodes read and
//! write single blocks with ranged state calls, so a product can be built
//! one result block at a time.
//!
//! - [`MatrixConf`]: matrix dimension and split count, itself kept in state
//! - [`Matrix`]: dense row-major `f64` matrix
//! - [`layout`]: the stored block layout as plain bytes
//! - [`state`]: writing, reading and multiplying blocks through an
//!   [`Adapter`](faasm_bindings::Adapter)
//!
//! # Features
//!
//! - `std`: write and read the block layout to and from files
//! - `random`: random matrices via `rand`

#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod conf;
pub mod error;
#[cfg(feature = "std")]
pub mod file;
pub mod layout;
pub mod matrix;
pub mod state;

pub use conf::{MatrixConf, CONF_ENCODED_LEN, ELEMENT_SIZE};
pub use error::MatrixError;
#[cfg(feature = "std")]
pub use file::{reconstruct_matrix_from_file, subdivide_matrix_into_file};
pub use layout::{reconstruct_matrix_from_bytes, subdivide_matrix_into_bytes};
pub use matrix::Matrix;
#[cfg(feature = "random")]
pub use state::subdivide_random_matrix_into_state;
pub use state::{
    load_matrix_conf, multiply_block_into_state, multiply_into_state, read_submatrix_from_state,
    reconstruct_matrix_from_submatrices, subdivide_matrix_into_state, write_matrix_conf,
    MATRIX_CONF_STATE_KEY, RESULT_MATRIX_KEY, SUBMATRICES_KEY_A, SUBMATRICES_KEY_B,
};
