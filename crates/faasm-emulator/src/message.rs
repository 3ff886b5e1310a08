//! Messages that configure the emulator.

use alloc::string::String;
use serde::{Deserialize, Serialize};

/// The function the emulator is currently standing in for.
///
/// Mirrors the JSON message a Faasm host hands to a guest. `py_*` fields
/// name the script run by a language-runtime function.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmulatorMessage {
    pub user: String,
    pub function: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub py_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub py_func: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub py_idx: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_data: Option<String>,
}

impl EmulatorMessage {
    pub fn new(user: &str, function: &str) -> Self {
        Self {
            user: String::from(user),
            function: String::from(function),
            ..Self::default()
        }
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Whether `other` targets the same user and function.
    pub fn same_function(&self, other: &EmulatorMessage) -> bool {
        self.user == other.user && self.function == other.function
    }
}

/// Request to run a registered function.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRequest {
    pub py_user: String,
    pub py_func: String,
    #[serde(default)]
    pub py_idx: u32,
    #[serde(default)]
    pub input_data: String,
}

impl InvocationRequest {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_message() {
        let msg = EmulatorMessage::from_json(r#"{"user": "foo", "function": "bar"}"#).unwrap();
        assert_eq!(msg, EmulatorMessage::new("foo", "bar"));
    }

    #[test]
    fn test_parse_python_message() {
        let json = r#"{
            "user": "python",
            "function": "py_func",
            "py_user": "python",
            "py_func": "echo",
            "py_idx": 2
        }"#;
        let msg = EmulatorMessage::from_json(json).unwrap();
        assert_eq!(msg.py_func.as_deref(), Some("echo"));
        assert_eq!(msg.py_idx, Some(2));
        assert!(msg.input_data.is_none());
        assert!(msg.same_function(&EmulatorMessage::new("python", "py_func")));
    }

    #[test]
    fn test_message_requires_user_and_function() {
        assert!(EmulatorMessage::from_json(r#"{"user": "foo"}"#).is_err());
        assert!(EmulatorMessage::from_json("not json").is_err());
    }

    #[test]
    fn test_invocation_defaults() {
        let req =
            InvocationRequest::from_json(r#"{"py_user": "demo", "py_func": "echo"}"#).unwrap();
        assert_eq!(req.py_idx, 0);
        assert_eq!(req.input_data, "");
    }
}
