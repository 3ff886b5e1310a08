//! Boundary adapter between guest code and the Faasm host.
//!
//! Every operation is synchronous and stateless across calls: the adapter
//! allocates a buffer, asks the host to fill or consume it, and hands the
//! result to the caller. Nothing is retained between calls.

use crate::error::AdapterError;
#[cfg(feature = "state")]
use crate::key::Key;
#[cfg(any(feature = "io", feature = "state"))]
use alloc::vec;
use alloc::vec::Vec;
use faasm_host::HostFunctions;

/// Greeting returned by [`Adapter::hello`].
pub const HELLO_MESSAGE: &str = "Hello, Faasm extension!";

/// Fixed input returned by [`Adapter::check_input`].
pub const CHECK_INPUT: &[u8] = b"01234";

macro_rules! trace_call {
    ($host:expr, $($arg:tt)*) => {
        #[cfg(feature = "trace")]
        $host.debug_write(&alloc::format!("[faasm-bindings] {}", format_args!($($arg)*)));
    };
}

/// Marshals byte buffers to and from a [`HostFunctions`] implementation.
///
/// Errors returned by the adapter are local argument errors only. A call
/// that reaches the host always "succeeds" from the adapter's point of view.
#[derive(Clone, Debug, Default)]
pub struct Adapter<H> {
    host: H,
}

impl<H: HostFunctions> Adapter<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Check the bindings are loaded.
    pub fn hello(&self) -> &'static str {
        HELLO_MESSAGE
    }

    /// Return the fixed `b"01234"` without touching the host.
    pub fn check_input(&self) -> Vec<u8> {
        CHECK_INPUT.to_vec()
    }

    #[cfg(feature = "state")]
    fn reject(&self, err: AdapterError) -> AdapterError {
        self.host
            .debug_write(&alloc::format!("[faasm-bindings] rejected: {}", err));
        err
    }

    // === Input / Output ===

    /// Read the invocation input.
    ///
    /// Probes the size with an empty buffer, then reads into a buffer of
    /// exactly that size. A zero-size input returns an empty vector without
    /// a second host call.
    #[cfg(feature = "io")]
    pub fn get_input(&self) -> Vec<u8> {
        let input_size = self.host.read_input(&mut []);
        trace_call!(self.host, "get_input: probe reported {} bytes", input_size);
        if input_size == 0 {
            return Vec::new();
        }

        let mut input = vec![0u8; input_size];
        self.host.read_input(&mut input);
        input
    }

    /// Publish `output` with a single host call.
    ///
    /// Fire-and-forget: the host reports nothing back.
    #[cfg(feature = "io")]
    pub fn set_output(&self, output: &[u8]) {
        trace_call!(self.host, "set_output: {} bytes", output.len());
        self.host.write_output(output);
    }

    // === Keyed State ===

    /// Read the full value of `key` into a buffer of `expected_len` bytes.
    ///
    /// The caller must know the value's length. A wrong length yields a
    /// truncated or partially filled buffer; this is not detected. A zero
    /// length still reaches the host, with an empty buffer.
    #[cfg(feature = "state")]
    pub fn get_state(&self, key: &str, expected_len: usize) -> Result<Vec<u8>, AdapterError> {
        let key = Key::new(key).map_err(|e| self.reject(e))?;
        trace_call!(self.host, "get_state: key={} len={}", key, expected_len);
        let mut value = vec![0u8; expected_len];
        self.host.read_state(key.as_str(), &mut value);
        Ok(value)
    }

    /// Read `length` bytes at `offset` from a value of `total_len` bytes.
    #[cfg(feature = "state")]
    pub fn get_state_range(
        &self,
        key: &str,
        total_len: usize,
        offset: usize,
        length: usize,
    ) -> Result<Vec<u8>, AdapterError> {
        let key = Key::new(key).map_err(|e| self.reject(e))?;
        check_range(total_len, offset, length).map_err(|e| self.reject(e))?;
        trace_call!(
            self.host,
            "get_state_range: key={} total={} offset={} len={}",
            key,
            total_len,
            offset,
            length
        );
        let mut segment = vec![0u8; length];
        self.host
            .read_state_offset(key.as_str(), total_len, offset, &mut segment);
        Ok(segment)
    }

    /// Overwrite the whole value of `key`.
    #[cfg(feature = "state")]
    pub fn set_state(&self, key: &str, value: &[u8]) -> Result<(), AdapterError> {
        let key = Key::new(key).map_err(|e| self.reject(e))?;
        trace_call!(self.host, "set_state: key={} len={}", key, value.len());
        self.host.write_state(key.as_str(), value);
        Ok(())
    }

    /// Overwrite `value.len()` bytes at `offset` in a value of `total_len` bytes.
    #[cfg(feature = "state")]
    pub fn set_state_range(
        &self,
        key: &str,
        total_len: usize,
        offset: usize,
        value: &[u8],
    ) -> Result<(), AdapterError> {
        let key = Key::new(key).map_err(|e| self.reject(e))?;
        check_range(total_len, offset, value.len()).map_err(|e| self.reject(e))?;
        trace_call!(
            self.host,
            "set_state_range: key={} total={} offset={} len={}",
            key,
            total_len,
            offset,
            value.len()
        );
        self.host
            .write_state_offset(key.as_str(), total_len, offset, value);
        Ok(())
    }

    /// Publish the local value of `key` to the shared store.
    #[cfg(feature = "state")]
    pub fn push_state(&self, key: &str) -> Result<(), AdapterError> {
        let key = Key::new(key).map_err(|e| self.reject(e))?;
        trace_call!(self.host, "push_state: key={}", key);
        self.host.push_state(key.as_str());
        Ok(())
    }

    /// Refresh the local value of `key` from the shared store.
    #[cfg(feature = "state")]
    pub fn pull_state(&self, key: &str, expected_len: usize) -> Result<(), AdapterError> {
        let key = Key::new(key).map_err(|e| self.reject(e))?;
        trace_call!(self.host, "pull_state: key={} len={}", key, expected_len);
        self.host.pull_state(key.as_str(), expected_len);
        Ok(())
    }
}

/// Check `[offset, offset + length)` lies within `total_len`.
pub fn check_range(total_len: usize, offset: usize, length: usize) -> Result<(), AdapterError> {
    match offset.checked_add(length) {
        Some(end) if end <= total_len => Ok(()),
        _ => Err(AdapterError::RangeOutOfBounds {
            offset,
            length,
            total_length: total_len,
        }),
    }
}
