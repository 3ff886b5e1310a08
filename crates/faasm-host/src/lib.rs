//! Host function set for Faasm guest code
//!
//! This crate defines the `HostFunctions` trait: the fixed set of functions
//! a Faasm host injects into a guest at load time. Guest-side bindings are
//! written against the trait so the same code runs on the real host (via
//! wasm imports, see [`wasm::WasmHost`]) and on an in-memory emulator.
//!
//! # Wire contract
//!
//! | Function            | Inputs                                   | Output          |
//! |---------------------|------------------------------------------|-----------------|
//! | read_input          | destination buffer, capacity             | bytes available |
//! | write_output        | source buffer, length                    | none            |
//! | read_state          | key, destination buffer, capacity        | none            |
//! | read_state_offset   | key, total length, offset, length        | bytes           |
//! | write_state         | key, source buffer, length               | none            |
//! | write_state_offset  | key, total length, offset, source, length| none            |
//! | push_state          | key                                      | none            |
//! | pull_state          | key, expected length                     | none            |
//!
//! All lengths are byte counts. A capacity of zero on `read_input` is a pure
//! size probe.
//!
//! # Error channel
//!
//! There is none. Every host function is best-effort and returns no status,
//! so a caller cannot tell "succeeded", "key missing" and "host failed"
//! apart. Callers may reject malformed arguments before calling the host;
//! nothing that happens inside the host is reported back.

#![no_std]

extern crate alloc;

pub mod wasm;

pub use wasm::WasmHost;

/// Functions imported from the Faasm host.
///
/// Implementations provide:
/// - Input and output channels for the current invocation
/// - Keyed state with full and partial reads/writes
/// - Explicit publish (`push_state`) and refresh (`pull_state`) of keyed state
///
/// No method returns an error. Implementations hold the state; callers hold
/// nothing beyond the duration of a single call.
pub trait HostFunctions {
    // === Input / Output ===

    /// Copy the invocation input into `buffer`.
    ///
    /// Returns the number of input bytes the host has. When `buffer` is
    /// empty nothing is copied and the return value is the size the caller
    /// must allocate.
    ///
    /// # Precondition
    /// The host must present the same logical input on consecutive calls.
    /// Callers probe with an empty buffer and then read again with a buffer
    /// of the probed size; a host that changes input between the two calls
    /// breaks that sequence and this is not checked.
    fn read_input(&self, buffer: &mut [u8]) -> usize;

    /// Publish `output` as the invocation output.
    fn write_output(&self, output: &[u8]);

    // === Keyed State ===

    /// Read the full local value of `key` into `buffer`.
    ///
    /// The capacity is `buffer.len()` and must match the value's length.
    fn read_state(&self, key: &str, buffer: &mut [u8]);

    /// Read `buffer.len()` bytes starting at `offset` from the value of `key`.
    ///
    /// `total_len` is the logical size of the whole value. The host exposes
    /// the range as a view valid only for this call, so implementations copy
    /// it into `buffer` before returning.
    fn read_state_offset(&self, key: &str, total_len: usize, offset: usize, buffer: &mut [u8]);

    /// Overwrite the local value of `key` with `value`.
    fn write_state(&self, key: &str, value: &[u8]);

    /// Overwrite `value.len()` bytes at `offset` in the local value of `key`.
    ///
    /// `total_len` is the logical size of the whole value, used by the host
    /// to allocate it.
    fn write_state_offset(&self, key: &str, total_len: usize, offset: usize, value: &[u8]);

    /// Publish the local value of `key` to the shared store.
    fn push_state(&self, key: &str);

    /// Refresh the local value of `key` from the shared store.
    fn pull_state(&self, key: &str, state_len: usize);

    // === Debug ===

    /// Write a debug line to the host's log.
    ///
    /// Not part of the imported function set; hosts without a log sink keep
    /// the default no-op.
    fn debug_write(&self, _msg: &str) {}
}

impl<H: HostFunctions + ?Sized> HostFunctions for &H {
    fn read_input(&self, buffer: &mut [u8]) -> usize {
        (**self).read_input(buffer)
    }

    fn write_output(&self, output: &[u8]) {
        (**self).write_output(output)
    }

    fn read_state(&self, key: &str, buffer: &mut [u8]) {
        (**self).read_state(key, buffer)
    }

    fn read_state_offset(&self, key: &str, total_len: usize, offset: usize, buffer: &mut [u8]) {
        (**self).read_state_offset(key, total_len, offset, buffer)
    }

    fn write_state(&self, key: &str, value: &[u8]) {
        (**self).write_state(key, value)
    }

    fn write_state_offset(&self, key: &str, total_len: usize, offset: usize, value: &[u8]) {
        (**self).write_state_offset(key, total_len, offset, value)
    }

    fn push_state(&self, key: &str) {
        (**self).push_state(key)
    }

    fn pull_state(&self, key: &str, state_len: usize) {
        (**self).pull_state(key, state_len)
    }

    fn debug_write(&self, msg: &str) {
        (**self).debug_write(msg)
    }
}
