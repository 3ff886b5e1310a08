//! Adapter tests against the in-memory emulator.

#![cfg(all(feature = "io", feature = "state"))]

use faasm_bindings::{dispatch, Adapter, AdapterError, Value};
use faasm_emulator::{Emulator, SharedStore};

fn adapter() -> Adapter<Emulator> {
    Adapter::new(Emulator::new())
}

// ============================================================================
// Input / Output
// ============================================================================

#[test]
fn test_output_round_trip() {
    let adapter = adapter();
    let outputs: [&[u8]; 3] = [b"", b"12345", &[0, 255, 0, 1]];
    for output in outputs {
        adapter.set_output(output);
        assert_eq!(adapter.host().output(), Some(output.to_vec()));
    }
}

#[test]
fn test_empty_input() {
    let adapter = adapter();
    assert_eq!(adapter.get_input(), Vec::<u8>::new());
}

#[test]
fn test_input_of_five_bytes() {
    let adapter = adapter();
    adapter.host().set_input(b"01234");

    let input = adapter.get_input();
    assert_eq!(input.len(), 5);
    assert_eq!(input, b"01234");
}

#[test]
fn test_binary_input_not_truncated_at_nul() {
    let adapter = adapter();
    adapter.host().set_input(b"ab\0cd");
    assert_eq!(adapter.get_input(), b"ab\0cd");
}

// ============================================================================
// Keyed state
// ============================================================================

#[test]
fn test_state_round_trip() {
    let adapter = adapter();
    let value = b"0123456789";

    adapter.set_state("pyStateTest", value).unwrap();
    assert_eq!(adapter.get_state("pyStateTest", value.len()).unwrap(), value);
}

#[test]
fn test_state_range_scenario() {
    let adapter = adapter();
    adapter.set_state_range("x", 10, 3, b"abc").unwrap();
    assert_eq!(adapter.get_state_range("x", 10, 3, 3).unwrap(), b"abc");
}

#[test]
fn test_range_write_leaves_rest_untouched() {
    let adapter = adapter();
    adapter.set_state("k", b"0123456789").unwrap();
    adapter.set_state_range("k", 10, 2, b"999").unwrap();

    assert_eq!(adapter.get_state_range("k", 10, 2, 3).unwrap(), b"999");
    assert_eq!(adapter.get_state_range("k", 10, 0, 2).unwrap(), b"01");
    assert_eq!(adapter.get_state_range("k", 10, 5, 5).unwrap(), b"56789");
}

#[test]
fn test_state_read_write_with_push_pull() {
    let adapter = adapter();
    let key = "pyStateTest";
    let value_len = 10;

    adapter.set_state(key, b"0123456789").unwrap();
    adapter.push_state(key).unwrap();

    adapter.pull_state(key, value_len).unwrap();
    assert_eq!(adapter.get_state(key, value_len).unwrap(), b"0123456789");

    // Update a segment, push and pull
    adapter.set_state_range(key, value_len, 2, b"999").unwrap();
    adapter.push_state(key).unwrap();
    adapter.pull_state(key, value_len).unwrap();

    assert_eq!(adapter.get_state(key, value_len).unwrap(), b"0199956789");
    assert_eq!(adapter.get_state_range(key, value_len, 2, 3).unwrap(), b"999");
}

#[test]
fn test_push_then_pull_is_noop() {
    let adapter = adapter();
    adapter.set_state("k", b"stable").unwrap();

    adapter.push_state("k").unwrap();
    adapter.pull_state("k", 6).unwrap();

    assert_eq!(adapter.host().local_state("k"), Some(b"stable".to_vec()));
    assert_eq!(adapter.get_state("k", 6).unwrap(), b"stable");
}

#[test]
fn test_state_visible_across_nodes_after_push() {
    let store = SharedStore::new();
    let writer = Adapter::new(Emulator::with_store(store.clone()));
    let reader = Adapter::new(Emulator::with_store(store));

    writer.set_state("shared", b"hello").unwrap();
    assert_eq!(reader.get_state("shared", 5).unwrap(), vec![0u8; 5]);

    writer.push_state("shared").unwrap();
    reader.pull_state("shared", 5).unwrap();
    assert_eq!(reader.get_state("shared", 5).unwrap(), b"hello");
}

#[test]
fn test_short_expected_length_truncates() {
    let adapter = adapter();
    adapter.set_state("k", b"abcdef").unwrap();
    assert_eq!(adapter.get_state("k", 3).unwrap(), b"abc");
}

#[test]
fn test_zero_length_state_read_reaches_host() {
    let adapter = adapter();
    assert!(adapter.get_state("missing", 0).unwrap().is_empty());
    assert!(adapter
        .host()
        .has_log_containing("read_state: no local value for 'missing'"));

    // The emulator sizes the local view on any ranged read
    assert!(adapter.get_state_range("sized", 4, 2, 0).unwrap().is_empty());
    assert_eq!(adapter.host().local_state("sized"), Some(vec![0u8; 4]));
}

// ============================================================================
// Local argument errors
// ============================================================================

#[test]
fn test_bad_key_never_reaches_host() {
    let adapter = adapter();
    let err = adapter.set_state("bad\0key", b"v").unwrap_err();

    assert!(matches!(err, AdapterError::InvalidKey { .. }));
    assert_eq!(adapter.host().local_state("bad\0key"), None);
    assert_eq!(adapter.host().local_state("bad"), None);
    assert!(adapter.host().has_log_containing("rejected"));
}

#[test]
fn test_out_of_bounds_range_never_reaches_host() {
    let adapter = adapter();
    let err = adapter.set_state_range("k", 4, 3, b"abc").unwrap_err();

    assert_eq!(
        err,
        AdapterError::RangeOutOfBounds {
            offset: 3,
            length: 3,
            total_length: 4
        }
    );
    assert_eq!(adapter.host().local_state("k"), None);

    assert!(adapter.get_state_range("k", 4, 5, 0).is_err());
    assert_eq!(adapter.host().local_state("k"), None);
}

// ============================================================================
// Call surface
// ============================================================================

#[test]
fn test_dispatch_state_calls() {
    let adapter = adapter();

    let set = dispatch(
        &adapter,
        "faasm_set_state_offset",
        &[
            Value::from("x"),
            Value::Int(10),
            Value::Int(3),
            Value::from(&b"abc"[..]),
        ],
    )
    .unwrap();
    assert_eq!(set, Value::None);

    let got = dispatch(
        &adapter,
        "faasm_get_state_offset",
        &[Value::from("x"), Value::Int(10), Value::Int(3), Value::Int(3)],
    )
    .unwrap();
    assert_eq!(got, Value::Bytes(b"abc".to_vec()));

    dispatch(&adapter, "faasm_push_state", &[Value::from("x")]).unwrap();
    assert_eq!(
        adapter.host().global_state("x"),
        Some(b"\0\0\0abc\0\0\0\0".to_vec())
    );
}

#[test]
fn test_dispatch_io_calls() {
    let adapter = adapter();
    adapter.host().set_input(b"input");

    let input = dispatch(&adapter, "faasm_get_input", &[]).unwrap();
    assert_eq!(input.as_bytes(), Some(&b"input"[..]));

    dispatch(&adapter, "faasm_set_output", &[input]).unwrap();
    assert_eq!(adapter.host().output(), Some(b"input".to_vec()));
}

#[test]
fn test_dispatch_argument_errors_never_reach_host() {
    let adapter = adapter();

    let err = dispatch(&adapter, "faasm_set_state", &[Value::from("k")]).unwrap_err();
    assert_eq!(
        err,
        AdapterError::ArgCount {
            method: "faasm_set_state",
            expected: 2,
            got: 1
        }
    );

    // Wrong type in the last position: nothing may be written
    let err = dispatch(
        &adapter,
        "faasm_set_state",
        &[Value::from("k"), Value::from("not bytes")],
    )
    .unwrap_err();
    assert!(matches!(err, AdapterError::ArgType { index: 1, .. }));
    assert_eq!(adapter.host().local_state("k"), None);

    assert!(adapter
        .host()
        .has_log_containing("faasm_set_state: faasm_set_state() takes 2 argument(s) (1 given)"));
}

#[cfg(feature = "trace")]
#[test]
fn test_trace_logs_host_calls() {
    let adapter = adapter();
    adapter.set_state("k", b"abc").unwrap();
    assert!(adapter
        .host()
        .has_log_containing("[faasm-bindings] set_state: key=k len=3"));
}
