//! Host functions imported from the Faasm runtime
//!
//! On `wasm32` the guest module imports the `__faasm_*` symbols and the
//! runtime resolves them at load time. On other targets there is no runtime
//! to link against, so `WasmHost` behaves as a host with no input and no
//! state: probes report zero bytes and writes are dropped.

use crate::HostFunctions;

#[cfg(target_arch = "wasm32")]
use alloc::vec::Vec;
#[cfg(target_arch = "wasm32")]
use core::ffi::{c_char, c_long};

// ============================================================================
// External functions (provided by the Faasm runtime)
// ============================================================================

#[cfg(target_arch = "wasm32")]
extern "C" {
    /// Copy up to `buffer_len` input bytes; returns the full input size
    fn __faasm_read_input(buffer: *mut u8, buffer_len: c_long) -> c_long;

    fn __faasm_write_output(output: *const u8, output_len: c_long);

    fn __faasm_read_state(key: *const c_char, buffer: *mut u8, buffer_len: c_long);

    /// Returns a pointer into host-owned memory, valid until the next host call
    fn __faasm_read_state_offset_ptr(
        key: *const c_char,
        total_len: c_long,
        offset: c_long,
        len: c_long,
    ) -> *mut u8;

    fn __faasm_write_state(key: *const c_char, data: *const u8, data_len: c_long);

    fn __faasm_write_state_offset(
        key: *const c_char,
        total_len: c_long,
        offset: c_long,
        data: *const u8,
        data_len: c_long,
    );

    fn __faasm_push_state(key: *const c_char);

    fn __faasm_pull_state(key: *const c_char, state_len: c_long);
}

/// NUL-terminated copy of `key` for the C ABI.
///
/// Keys with interior NUL bytes are rejected before they get here.
#[cfg(target_arch = "wasm32")]
fn c_key(key: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(key.len() + 1);
    out.extend_from_slice(key.as_bytes());
    out.push(0);
    out
}

/// Host backed by the Faasm runtime's imported functions.
///
/// The Faasm import set has no log function, so `debug_write` keeps the
/// default no-op: rejection and trace lines from the bindings are dropped on
/// the real host and off-target alike. Use an emulator to see them.
#[derive(Clone, Copy, Debug, Default)]
pub struct WasmHost;

impl WasmHost {
    pub const fn new() -> Self {
        WasmHost
    }
}

#[cfg(target_arch = "wasm32")]
impl HostFunctions for WasmHost {
    fn read_input(&self, buffer: &mut [u8]) -> usize {
        let available = unsafe { __faasm_read_input(buffer.as_mut_ptr(), buffer.len() as c_long) };
        usize::try_from(available).unwrap_or(0)
    }

    fn write_output(&self, output: &[u8]) {
        unsafe { __faasm_write_output(output.as_ptr(), output.len() as c_long) }
    }

    fn read_state(&self, key: &str, buffer: &mut [u8]) {
        let key = c_key(key);
        unsafe {
            __faasm_read_state(
                key.as_ptr() as *const c_char,
                buffer.as_mut_ptr(),
                buffer.len() as c_long,
            )
        }
    }

    fn read_state_offset(&self, key: &str, total_len: usize, offset: usize, buffer: &mut [u8]) {
        let key = c_key(key);
        unsafe {
            let ptr = __faasm_read_state_offset_ptr(
                key.as_ptr() as *const c_char,
                total_len as c_long,
                offset as c_long,
                buffer.len() as c_long,
            );
            if ptr.is_null() {
                return;
            }
            // Copy out immediately: the view does not outlive this call
            let view = core::slice::from_raw_parts(ptr as *const u8, buffer.len());
            buffer.copy_from_slice(view);
        }
    }

    fn write_state(&self, key: &str, value: &[u8]) {
        let key = c_key(key);
        unsafe {
            __faasm_write_state(
                key.as_ptr() as *const c_char,
                value.as_ptr(),
                value.len() as c_long,
            )
        }
    }

    fn write_state_offset(&self, key: &str, total_len: usize, offset: usize, value: &[u8]) {
        let key = c_key(key);
        unsafe {
            __faasm_write_state_offset(
                key.as_ptr() as *const c_char,
                total_len as c_long,
                offset as c_long,
                value.as_ptr(),
                value.len() as c_long,
            )
        }
    }

    fn push_state(&self, key: &str) {
        let key = c_key(key);
        unsafe { __faasm_push_state(key.as_ptr() as *const c_char) }
    }

    fn pull_state(&self, key: &str, state_len: usize) {
        let key = c_key(key);
        unsafe { __faasm_pull_state(key.as_ptr() as *const c_char, state_len as c_long) }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HostFunctions for WasmHost {
    fn read_input(&self, _buffer: &mut [u8]) -> usize {
        0 // No runtime off-target
    }

    fn write_output(&self, _output: &[u8]) {}

    fn read_state(&self, _key: &str, _buffer: &mut [u8]) {}

    fn read_state_offset(&self, _key: &str, _total_len: usize, _offset: usize, _buffer: &mut [u8]) {}

    fn write_state(&self, _key: &str, _value: &[u8]) {}

    fn write_state_offset(&self, _key: &str, _total_len: usize, _offset: usize, _value: &[u8]) {}

    fn push_state(&self, _key: &str) {}

    fn pull_state(&self, _key: &str, _state_len: usize) {}
}
