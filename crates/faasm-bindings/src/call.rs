//! Loosely typed call surface
//!
//! Entry points are looked up by name and receive a slice of [`Value`]s, the
//! way an extension module's method table is called from a scripting
//! runtime. Argument count and types are checked here, before anything
//! reaches the host.
//!
//! | Name                      | Arguments                          | Returns |
//! |---------------------------|------------------------------------|---------|
//! | `hello_faasm`             | -                                  | str     |
//! | `check_input`             | -                                  | bytes   |
//! | `faasm_get_input`         | -                                  | bytes   |
//! | `faasm_set_output`        | bytes                              | None    |
//! | `faasm_get_state`         | key, len                           | bytes   |
//! | `faasm_get_state_offset`  | key, total len, offset, len        | bytes   |
//! | `faasm_set_state`         | key, bytes                         | None    |
//! | `faasm_set_state_offset`  | key, total len, offset, bytes      | None    |
//! | `faasm_push_state`        | key                                | None    |
//! | `faasm_pull_state`        | key, len                           | None    |
//!
//! The `faasm_*` entries are only present when the matching feature
//! (`io` or `state`) is enabled.

use crate::adapter::Adapter;
use crate::error::{AdapterError, ArgKind};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use faasm_host::HostFunctions;

/// Argument or return value on the call surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    None,
    Bytes(Vec<u8>),
    Str(String),
    Int(i64),
}

impl Value {
    pub fn kind(&self) -> ArgKind {
        match self {
            Value::None => ArgKind::None,
            Value::Bytes(_) => ArgKind::Bytes,
            Value::Str(_) => ArgKind::Str,
            Value::Int(_) => ArgKind::Int,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

/// Entry points exposed on the call surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    HelloFaasm,
    CheckInput,
    #[cfg(feature = "io")]
    GetInput,
    #[cfg(feature = "io")]
    SetOutput,
    #[cfg(feature = "state")]
    GetState,
    #[cfg(feature = "state")]
    GetStateOffset,
    #[cfg(feature = "state")]
    SetState,
    #[cfg(feature = "state")]
    SetStateOffset,
    #[cfg(feature = "state")]
    PushState,
    #[cfg(feature = "state")]
    PullState,
}

impl Method {
    /// Every method enabled in this build.
    pub fn all() -> impl Iterator<Item = Method> {
        BASE_METHODS
            .iter()
            .chain(IO_METHODS)
            .chain(STATE_METHODS)
            .copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Method::HelloFaasm => "hello_faasm",
            Method::CheckInput => "check_input",
            #[cfg(feature = "io")]
            Method::GetInput => "faasm_get_input",
            #[cfg(feature = "io")]
            Method::SetOutput => "faasm_set_output",
            #[cfg(feature = "state")]
            Method::GetState => "faasm_get_state",
            #[cfg(feature = "state")]
            Method::GetStateOffset => "faasm_get_state_offset",
            #[cfg(feature = "state")]
            Method::SetState => "faasm_set_state",
            #[cfg(feature = "state")]
            Method::SetStateOffset => "faasm_set_state_offset",
            #[cfg(feature = "state")]
            Method::PushState => "faasm_push_state",
            #[cfg(feature = "state")]
            Method::PullState => "faasm_pull_state",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().find(|m| m.name() == name)
    }

    /// Expected argument kinds, in order.
    pub fn signature(&self) -> &'static [ArgKind] {
        use ArgKind::{Bytes, Int, Str};
        match self {
            Method::HelloFaasm | Method::CheckInput => &[],
            #[cfg(feature = "io")]
            Method::GetInput => &[],
            #[cfg(feature = "io")]
            Method::SetOutput => &[Bytes],
            #[cfg(feature = "state")]
            Method::GetState => &[Str, Int],
            #[cfg(feature = "state")]
            Method::GetStateOffset => &[Str, Int, Int, Int],
            #[cfg(feature = "state")]
            Method::SetState => &[Str, Bytes],
            #[cfg(feature = "state")]
            Method::SetStateOffset => &[Str, Int, Int, Bytes],
            #[cfg(feature = "state")]
            Method::PushState => &[Str],
            #[cfg(feature = "state")]
            Method::PullState => &[Str, Int],
        }
    }
}

const BASE_METHODS: &[Method] = &[Method::HelloFaasm, Method::CheckInput];

#[cfg(feature = "io")]
const IO_METHODS: &[Method] = &[Method::GetInput, Method::SetOutput];
#[cfg(not(feature = "io"))]
const IO_METHODS: &[Method] = &[];

#[cfg(feature = "state")]
const STATE_METHODS: &[Method] = &[
    Method::GetState,
    Method::GetStateOffset,
    Method::SetState,
    Method::SetStateOffset,
    Method::PushState,
    Method::PullState,
];
#[cfg(not(feature = "state"))]
const STATE_METHODS: &[Method] = &[];

/// Checked view over a call's arguments.
struct Args<'a> {
    method: Method,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    fn new(method: Method, values: &'a [Value]) -> Result<Self, AdapterError> {
        let expected = method.signature().len();
        if values.len() != expected {
            return Err(AdapterError::ArgCount {
                method: method.name(),
                expected,
                got: values.len(),
            });
        }
        Ok(Self { method, values })
    }

    #[allow(dead_code)]
    fn type_error(&self, index: usize, expected: ArgKind) -> AdapterError {
        AdapterError::ArgType {
            method: self.method.name(),
            index,
            expected,
            got: self.values[index].kind(),
        }
    }

    #[allow(dead_code)]
    fn bytes(&self, index: usize) -> Result<&'a [u8], AdapterError> {
        let values: &'a [Value] = self.values;
        match &values[index] {
            Value::Bytes(b) => Ok(b),
            _ => Err(self.type_error(index, ArgKind::Bytes)),
        }
    }

    #[allow(dead_code)]
    fn str(&self, index: usize) -> Result<&'a str, AdapterError> {
        let values: &'a [Value] = self.values;
        match &values[index] {
            Value::Str(s) => Ok(s),
            _ => Err(self.type_error(index, ArgKind::Str)),
        }
    }

    #[allow(dead_code)]
    fn len(&self, index: usize) -> Result<usize, AdapterError> {
        match &self.values[index] {
            Value::Int(i) => usize::try_from(*i).map_err(|_| AdapterError::InvalidLength {
                method: self.method.name(),
                index,
                value: *i,
            }),
            _ => Err(self.type_error(index, ArgKind::Int)),
        }
    }
}

/// Call the entry point `name` with `args`.
///
/// All arguments are extracted and checked before the adapter is called, so
/// a rejected call never reaches the host.
pub fn dispatch<H: HostFunctions>(
    adapter: &Adapter<H>,
    name: &str,
    args: &[Value],
) -> Result<Value, AdapterError> {
    call(adapter, name, args).map_err(|err| {
        adapter
            .host()
            .debug_write(&alloc::format!("[faasm-bindings] {}: {}", name, err));
        err
    })
}

fn call<H: HostFunctions>(
    adapter: &Adapter<H>,
    name: &str,
    args: &[Value],
) -> Result<Value, AdapterError> {
    let method =
        Method::from_name(name).ok_or_else(|| AdapterError::UnknownMethod(name.to_string()))?;
    let args = Args::new(method, args)?;

    match method {
        Method::HelloFaasm => Ok(Value::Str(adapter.hello().to_string())),
        Method::CheckInput => Ok(Value::Bytes(adapter.check_input())),
        #[cfg(feature = "io")]
        Method::GetInput => Ok(Value::Bytes(adapter.get_input())),
        #[cfg(feature = "io")]
        Method::SetOutput => {
            adapter.set_output(args.bytes(0)?);
            Ok(Value::None)
        }
        #[cfg(feature = "state")]
        Method::GetState => {
            let (key, len) = (args.str(0)?, args.len(1)?);
            adapter.get_state(key, len).map(Value::Bytes)
        }
        #[cfg(feature = "state")]
        Method::GetStateOffset => {
            let (key, total, offset, len) =
                (args.str(0)?, args.len(1)?, args.len(2)?, args.len(3)?);
            adapter
                .get_state_range(key, total, offset, len)
                .map(Value::Bytes)
        }
        #[cfg(feature = "state")]
        Method::SetState => {
            let (key, value) = (args.str(0)?, args.bytes(1)?);
            adapter.set_state(key, value).map(|()| Value::None)
        }
        #[cfg(feature = "state")]
        Method::SetStateOffset => {
            let (key, total, offset, value) =
                (args.str(0)?, args.len(1)?, args.len(2)?, args.bytes(3)?);
            adapter
                .set_state_range(key, total, offset, value)
                .map(|()| Value::None)
        }
        #[cfg(feature = "state")]
        Method::PushState => adapter.push_state(args.str(0)?).map(|()| Value::None),
        #[cfg(feature = "state")]
        Method::PullState => {
            let (key, len) = (args.str(0)?, args.len(1)?);
            adapter.pull_state(key, len).map(|()| Value::None)
        }
    }
}
