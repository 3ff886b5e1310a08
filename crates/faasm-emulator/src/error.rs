//! Error types for the emulator.

use alloc::string::String;

/// Errors from emulator control operations.
///
/// Host functions themselves never fail; these come from the emulator's own
/// configuration and invocation API.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EmulatorError {
    /// Message JSON could not be parsed.
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// No function registered under this user and name.
    #[error("function not found: {user}/{function}")]
    FunctionNotFound { user: String, function: String },
}

impl From<serde_json::Error> for EmulatorError {
    fn from(e: serde_json::Error) -> Self {
        EmulatorError::InvalidMessage(alloc::format!("{}", e))
    }
}
