//! Running registered functions from invocation messages.
//!
//! A message names a function by `py_user`/`py_func`, an optional index and
//! the input to hand it. The registry looks the function up, prepares the
//! emulator and returns whatever the function wrote as output.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::emulator::Emulator;
use crate::error::EmulatorError;
use crate::message::{EmulatorMessage, InvocationRequest};

/// Function body run against an emulator.
pub type GuestFunction = fn(&Emulator);

/// Functions addressable by user and name.
#[derive(Default)]
pub struct FunctionRegistry {
    functions: BTreeMap<(String, String), GuestFunction>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `func` as `user/function`, replacing any previous entry.
    pub fn register(&mut self, user: &str, function: &str, func: GuestFunction) {
        self.functions
            .insert((String::from(user), String::from(function)), func);
    }

    pub fn get(&self, user: &str, function: &str) -> Option<GuestFunction> {
        self.functions
            .get(&(String::from(user), String::from(function)))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Run the function named by `request` on `emulator`.
    ///
    /// Output left over from earlier invocations is cleared first, so the
    /// result is `None` when the function writes nothing.
    pub fn invoke(
        &self,
        emulator: &Emulator,
        request: &InvocationRequest,
    ) -> Result<Option<Vec<u8>>, EmulatorError> {
        let func = self
            .get(&request.py_user, &request.py_func)
            .ok_or_else(|| EmulatorError::FunctionNotFound {
                user: request.py_user.clone(),
                function: request.py_func.clone(),
            })?;

        emulator.log(alloc::format!(
            "[emulator] Executing {}/{} (idx {}) with input {}",
            request.py_user,
            request.py_func,
            request.py_idx,
            request.input_data
        ));

        let mut msg = EmulatorMessage::new(&request.py_user, &request.py_func);
        msg.py_user = Some(request.py_user.clone());
        msg.py_func = Some(request.py_func.clone());
        msg.py_idx = Some(request.py_idx);
        msg.input_data = Some(request.input_data.clone());
        emulator.set_message(msg);
        emulator.clear_output();

        func(emulator);

        Ok(emulator.output())
    }

    /// Parse `json` as an [`InvocationRequest`] and run it.
    pub fn handle_message(
        &self,
        emulator: &Emulator,
        json: &str,
    ) -> Result<Option<Vec<u8>>, EmulatorError> {
        let request = InvocationRequest::from_json(json)?;
        self.invoke(emulator, &request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faasm_host::HostFunctions;

    fn echo(emu: &Emulator) {
        let mut input = alloc::vec![0u8; emu.read_input(&mut [])];
        emu.read_input(&mut input);
        emu.write_output(&input);
    }

    fn silent(_emu: &Emulator) {}

    fn index_reporter(emu: &Emulator) {
        let idx = emu.function_idx().to_le_bytes();
        emu.write_output(&idx);
    }

    fn registry() -> FunctionRegistry {
        let mut registry = FunctionRegistry::new();
        registry.register("dummy_user", "dummy_echo", echo);
        registry.register("dummy_user", "silent", silent);
        registry.register("dummy_user", "idx", index_reporter);
        registry
    }

    #[test]
    fn test_executing_dummy_func() {
        let emu = Emulator::new();
        let json = r#"{
            "py_user": "dummy_user",
            "py_func": "dummy_echo",
            "input_data": "This is input"
        }"#;

        let output = registry().handle_message(&emu, json).unwrap();
        assert_eq!(output, Some(b"This is input".to_vec()));
        assert!(emu.has_log_containing("Executing dummy_user/dummy_echo (idx 0)"));
    }

    #[test]
    fn test_stale_output_not_returned() {
        let emu = Emulator::new();
        let registry = registry();

        registry
            .handle_message(
                &emu,
                r#"{"py_user": "dummy_user", "py_func": "dummy_echo", "input_data": "x"}"#,
            )
            .unwrap();
        let output = registry
            .handle_message(&emu, r#"{"py_user": "dummy_user", "py_func": "silent"}"#)
            .unwrap();
        assert_eq!(output, None);
    }

    #[test]
    fn test_function_index_passed() {
        let emu = Emulator::new();
        let output = registry()
            .handle_message(
                &emu,
                r#"{"py_user": "dummy_user", "py_func": "idx", "py_idx": 7}"#,
            )
            .unwrap();
        assert_eq!(output, Some(7u32.to_le_bytes().to_vec()));
    }

    #[test]
    fn test_unknown_function() {
        let emu = Emulator::new();
        let err = registry()
            .handle_message(&emu, r#"{"py_user": "nobody", "py_func": "nothing"}"#)
            .unwrap_err();
        assert_eq!(
            err,
            EmulatorError::FunctionNotFound {
                user: String::from("nobody"),
                function: String::from("nothing"),
            }
        );
    }

    #[test]
    fn test_missing_fields_rejected() {
        let emu = Emulator::new();
        let err = registry()
            .handle_message(&emu, r#"{"py_user": "dummy_user"}"#)
            .unwrap_err();
        assert!(matches!(err, EmulatorError::InvalidMessage(_)));
    }
}
