//! In-memory host.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use faasm_host::HostFunctions;

use crate::error::EmulatorError;
use crate::message::EmulatorMessage;
use crate::store::SharedStore;

/// Emulated Faasm host
///
/// Provides the input and output channels of one invocation, a local view
/// of keyed state, and a [`SharedStore`] that `push_state`/`pull_state`
/// copy to and from. Debug lines written by guest code are captured.
///
/// Single-threaded: all state sits behind `RefCell`s.
#[derive(Debug, Default)]
pub struct Emulator {
    /// Input returned by `read_input`
    input: RefCell<Vec<u8>>,
    /// Last value passed to `write_output`
    output: RefCell<Option<Vec<u8>>>,
    /// Local view of keyed state
    local: RefCell<BTreeMap<String, Vec<u8>>>,
    /// Shared store behind push/pull
    global: SharedStore,
    /// Function currently emulated
    message: RefCell<Option<EmulatorMessage>>,
    function_idx: Cell<u32>,
    /// Captured debug messages
    debug_log: RefCell<Vec<String>>,
}

impl Emulator {
    /// Create an emulator with its own shared store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an emulator on an existing shared store.
    pub fn with_store(store: SharedStore) -> Self {
        Self {
            global: store,
            ..Self::default()
        }
    }

    /// Handle to the shared store.
    pub fn store(&self) -> &SharedStore {
        &self.global
    }

    pub(crate) fn log(&self, msg: String) {
        self.debug_log.borrow_mut().push(msg);
    }

    // === Input / Output ===

    pub fn set_input(&self, input: &[u8]) {
        *self.input.borrow_mut() = input.to_vec();
    }

    pub fn input(&self) -> Vec<u8> {
        self.input.borrow().clone()
    }

    /// Output written so far, `None` if nothing was written.
    pub fn output(&self) -> Option<Vec<u8>> {
        self.output.borrow().clone()
    }

    pub fn clear_output(&self) {
        *self.output.borrow_mut() = None;
    }

    // === Function ===

    /// Switch the emulated function.
    ///
    /// Moving to a different user/function clears the captured output. An
    /// `input_data` field replaces the current input.
    pub fn set_message(&self, msg: EmulatorMessage) {
        let changed = match &*self.message.borrow() {
            Some(current) => !current.same_function(&msg),
            None => true,
        };
        if changed {
            self.clear_output();
        }
        if let Some(input) = &msg.input_data {
            self.set_input(input.as_bytes());
        }
        if let Some(idx) = msg.py_idx {
            self.function_idx.set(idx);
        }

        self.log(alloc::format!(
            "[emulator] Emulating {}/{}",
            msg.user,
            msg.function
        ));
        *self.message.borrow_mut() = Some(msg);
    }

    /// Parse `json` as an [`EmulatorMessage`] and switch to it.
    pub fn set_emulator_message(&self, json: &str) -> Result<(), EmulatorError> {
        let msg = EmulatorMessage::from_json(json)?;
        self.set_message(msg);
        Ok(())
    }

    pub fn message(&self) -> Option<EmulatorMessage> {
        self.message.borrow().clone()
    }

    pub fn function_idx(&self) -> u32 {
        self.function_idx.get()
    }

    pub fn set_function_idx(&self, idx: u32) {
        self.function_idx.set(idx);
    }

    // === State inspection ===

    /// Local value of `key`, if any.
    pub fn local_state(&self, key: &str) -> Option<Vec<u8>> {
        self.local.borrow().get(key).cloned()
    }

    /// Shared value of `key`, if any.
    pub fn global_state(&self, key: &str) -> Option<Vec<u8>> {
        self.global.get(key)
    }

    /// Drop local state, input, output and the current message.
    ///
    /// The shared store is left alone.
    pub fn reset(&self) {
        self.local.borrow_mut().clear();
        self.input.borrow_mut().clear();
        self.clear_output();
        *self.message.borrow_mut() = None;
        self.function_idx.set(0);
    }

    // === Debug log ===

    /// Get all captured debug messages
    pub fn debug_log(&self) -> Vec<String> {
        self.debug_log.borrow().clone()
    }

    pub fn clear_debug_log(&self) {
        self.debug_log.borrow_mut().clear();
    }

    /// Check if a specific message was logged
    pub fn has_log_containing(&self, substr: &str) -> bool {
        self.debug_log
            .borrow()
            .iter()
            .any(|msg| msg.contains(substr))
    }
}

/// Grow `value` with zeros to at least `len` bytes.
fn ensure_len(value: &mut Vec<u8>, len: usize) {
    if value.len() < len {
        value.resize(len, 0);
    }
}

impl HostFunctions for Emulator {
    fn read_input(&self, buffer: &mut [u8]) -> usize {
        let input = self.input.borrow();
        let n = buffer.len().min(input.len());
        buffer[..n].copy_from_slice(&input[..n]);
        input.len()
    }

    fn write_output(&self, output: &[u8]) {
        *self.output.borrow_mut() = Some(output.to_vec());
    }

    fn read_state(&self, key: &str, buffer: &mut [u8]) {
        match self.local.borrow().get(key) {
            Some(value) => {
                let n = buffer.len().min(value.len());
                buffer[..n].copy_from_slice(&value[..n]);
            }
            None => self.log(alloc::format!(
                "[emulator] read_state: no local value for '{}'",
                key
            )),
        }
    }

    fn read_state_offset(&self, key: &str, total_len: usize, offset: usize, buffer: &mut [u8]) {
        let mut local = self.local.borrow_mut();
        let value = local.entry(String::from(key)).or_default();
        ensure_len(value, total_len);

        if offset >= value.len() {
            return;
        }
        let n = buffer.len().min(value.len() - offset);
        buffer[..n].copy_from_slice(&value[offset..offset + n]);
    }

    fn write_state(&self, key: &str, value: &[u8]) {
        self.local
            .borrow_mut()
            .insert(String::from(key), value.to_vec());
    }

    fn write_state_offset(&self, key: &str, total_len: usize, offset: usize, value: &[u8]) {
        let Some(end) = offset.checked_add(value.len()) else {
            self.log(alloc::format!(
                "[emulator] write_state_offset: range overflows for '{}'",
                key
            ));
            return;
        };
        let mut local = self.local.borrow_mut();
        let current = local.entry(String::from(key)).or_default();
        ensure_len(current, total_len.max(end));
        current[offset..end].copy_from_slice(value);
    }

    fn push_state(&self, key: &str) {
        let value = self.local.borrow().get(key).cloned();
        match value {
            Some(value) => self.global.set(key, value),
            None => self.log(alloc::format!(
                "[emulator] push_state: no local value for '{}'",
                key
            )),
        }
    }

    fn pull_state(&self, key: &str, state_len: usize) {
        match self.global.get(key) {
            Some(mut value) => {
                value.resize(state_len, 0);
                self.local.borrow_mut().insert(String::from(key), value);
            }
            None => self.log(alloc::format!(
                "[emulator] pull_state: no shared value for '{}'",
                key
            )),
        }
    }

    fn debug_write(&self, msg: &str) {
        self.log(String::from(msg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_read_input_probe() {
        let emu = Emulator::new();
        emu.set_input(b"12345");

        assert_eq!(emu.read_input(&mut []), 5);

        let mut buf = [0u8; 5];
        assert_eq!(emu.read_input(&mut buf), 5);
        assert_eq!(&buf, b"12345");
    }

    #[test]
    fn test_output_initially_empty_then_replaced() {
        let emu = Emulator::new();
        assert_eq!(emu.output(), None);

        emu.write_output(b"12345");
        assert_eq!(emu.output(), Some(b"12345".to_vec()));

        emu.write_output(b"666777");
        assert_eq!(emu.output(), Some(b"666777".to_vec()));
    }

    #[test]
    fn test_offset_write_zero_extends() {
        let emu = Emulator::new();
        emu.write_state_offset("x", 10, 3, b"abc");
        assert_eq!(emu.local_state("x"), Some(b"\0\0\0abc\0\0\0\0".to_vec()));

        let mut buf = [0u8; 3];
        emu.read_state_offset("x", 10, 3, &mut buf);
        assert_eq!(&buf, b"abc");
    }

    #[test]
    fn test_offset_read_allocates_missing_value() {
        let emu = Emulator::new();
        let mut buf = [9u8; 4];
        emu.read_state_offset("fresh", 8, 2, &mut buf);
        assert_eq!(buf, [0u8; 4]);
        assert_eq!(emu.local_state("fresh"), Some(vec![0u8; 8]));
    }

    #[test]
    fn test_read_missing_state_is_logged() {
        let emu = Emulator::new();
        let mut buf = [1u8; 2];
        emu.read_state("missing", &mut buf);
        assert_eq!(buf, [1u8; 2]);
        assert!(emu.has_log_containing("no local value for 'missing'"));
    }

    #[test]
    fn test_push_pull_between_nodes() {
        let store = SharedStore::new();
        let node_a = Emulator::with_store(store.clone());
        let node_b = Emulator::with_store(store);

        node_a.write_state("k", b"0123456789");
        assert_eq!(node_b.global_state("k"), None);

        node_a.push_state("k");
        node_b.pull_state("k", 10);
        assert_eq!(node_b.local_state("k"), Some(b"0123456789".to_vec()));
    }

    #[test]
    fn test_pull_resizes_to_expected_length() {
        let emu = Emulator::new();
        emu.store().set("k", b"abcdef".to_vec());

        emu.pull_state("k", 4);
        assert_eq!(emu.local_state("k"), Some(b"abcd".to_vec()));

        emu.pull_state("k", 8);
        assert_eq!(emu.local_state("k"), Some(b"abcdef\0\0".to_vec()));
    }

    #[test]
    fn test_pull_missing_leaves_local_view() {
        let emu = Emulator::new();
        emu.write_state("k", b"local");
        emu.pull_state("k", 5);
        assert_eq!(emu.local_state("k"), Some(b"local".to_vec()));
        assert!(emu.has_log_containing("pull_state: no shared value for 'k'"));
    }

    #[test]
    fn test_local_output_with_message() {
        let emu = Emulator::new();
        let json = r#"{
            "user": "python",
            "function": "py_func",
            "py_user": "python",
            "py_func": "echo"
        }"#;
        emu.set_emulator_message(json).unwrap();

        assert_eq!(emu.output(), None);

        emu.write_output(b"12345");
        assert_eq!(emu.output(), Some(b"12345".to_vec()));

        // Same function again keeps output
        emu.set_emulator_message(json).unwrap();
        assert_eq!(emu.output(), Some(b"12345".to_vec()));
    }

    #[test]
    fn test_changing_function_clears_output() {
        let emu = Emulator::new();
        emu.set_message(EmulatorMessage::new("python", "py_func"));
        emu.write_output(b"12345");

        emu.set_emulator_message(r#"{"user": "foo", "function": "bar"}"#)
            .unwrap();
        assert_eq!(emu.output(), None);
        assert_eq!(emu.message(), Some(EmulatorMessage::new("foo", "bar")));
    }

    #[test]
    fn test_message_sets_input_and_index() {
        let emu = Emulator::new();
        emu.set_emulator_message(
            r#"{"user": "u", "function": "f", "py_idx": 3, "input_data": "abc"}"#,
        )
        .unwrap();
        assert_eq!(emu.input(), b"abc");
        assert_eq!(emu.function_idx(), 3);
    }

    #[test]
    fn test_bad_message_rejected() {
        let emu = Emulator::new();
        let err = emu.set_emulator_message("{").unwrap_err();
        assert!(matches!(err, EmulatorError::InvalidMessage(_)));
        assert_eq!(emu.message(), None);
    }

    #[test]
    fn test_reset_keeps_shared_store() {
        let emu = Emulator::new();
        emu.write_state("k", b"v");
        emu.push_state("k");
        emu.write_output(b"out");

        emu.reset();
        assert_eq!(emu.local_state("k"), None);
        assert_eq!(emu.output(), None);
        assert_eq!(emu.global_state("k"), Some(b"v".to_vec()));
    }
}
