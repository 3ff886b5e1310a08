//! Guest-side bindings for Faasm
//!
//! This crate is the boundary between guest code and the host functions a
//! Faasm runtime injects. It does one thing: move byte buffers of unknown
//! length across that boundary safely.
//!
//! - **Adapter**: [`Adapter`] sizes, allocates and fills buffers for input,
//!   output and keyed state
//! - **Keys**: [`Key`] names a state slot
//! - **Call surface**: [`call::dispatch`] resolves entry points by name and
//!   checks loosely typed arguments
//!
//! # Features
//!
//! - `io` (default): input and output entry points
//! - `state` (default): keyed state entry points
//! - `trace`: log every host call through [`HostFunctions::debug_write`]
//!
//! # Errors
//!
//! Only local argument errors are reported ([`AdapterError`]). The host
//! functions have no status channel, so failures inside the host are
//! invisible here. Callers conventionally `pull_state` before reading a
//! keyed value and `push_state` after writing one; neither order is
//! enforced.
//!
//! # Example
//!
//! ```ignore
//! use faasm_bindings::Adapter;
//!
//! let adapter = faasm_bindings::wasm_adapter();
//! let input = adapter.get_input();
//! adapter.set_output(&input);
//! ```

#![no_std]
extern crate alloc;

pub mod adapter;
pub mod call;
pub mod error;
pub mod key;

pub use adapter::{check_range, Adapter, CHECK_INPUT, HELLO_MESSAGE};
pub use call::{dispatch, Method, Value};
pub use error::{AdapterError, ArgKind};
pub use faasm_host::{HostFunctions, WasmHost};
pub use key::Key;

/// Adapter over the host functions imported from the Faasm runtime.
pub fn wasm_adapter() -> Adapter<WasmHost> {
    Adapter::new(WasmHost::new())
}
