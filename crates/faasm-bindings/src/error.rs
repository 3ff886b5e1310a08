//! Error types for the binding layer.
//!
//! Only local argument errors exist here. Host functions return no status,
//! so nothing that fails inside the host can be represented.

use alloc::string::String;

/// Argument kinds accepted by the call surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgKind {
    Bytes,
    Str,
    Int,
    None,
}

impl ArgKind {
    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            ArgKind::Bytes => "bytes",
            ArgKind::Str => "str",
            ArgKind::Int => "int",
            ArgKind::None => "None",
        }
    }
}

/// Errors raised before a call crosses the host boundary.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    /// Key cannot be passed as a C string.
    #[error("invalid state key {key:?}: contains a NUL byte")]
    InvalidKey { key: String },

    /// Requested range does not fit inside the value.
    #[error("range out of bounds: offset {offset} + length {length} exceeds total length {total_length}")]
    RangeOutOfBounds {
        offset: usize,
        length: usize,
        total_length: usize,
    },

    /// No method with this name is exposed.
    #[error("unknown method: {0}")]
    UnknownMethod(String),

    /// Wrong number of arguments.
    #[error("{method}() takes {expected} argument(s) ({got} given)")]
    ArgCount {
        method: &'static str,
        expected: usize,
        got: usize,
    },

    /// Argument has the wrong type.
    #[error("{method}() argument {index} must be {}, not {}", .expected.name(), .got.name())]
    ArgType {
        method: &'static str,
        index: usize,
        expected: ArgKind,
        got: ArgKind,
    },

    /// Length or offset argument is negative or does not fit in `usize`.
    #[error("{method}() argument {index} is not a valid length: {value}")]
    InvalidLength {
        method: &'static str,
        index: usize,
        value: i64,
    },
}
