//! In-memory Faasm host for native builds and testing
//!
//! Guest code compiled for a native target has no Faasm runtime to import
//! host functions from. [`Emulator`] implements the same host function set
//! in memory so guest code and its bindings can run and be tested without a
//! runtime:
//!
//! - **Input/output**: set the input, read back the output
//! - **State**: a local view per emulator plus a [`SharedStore`] reached
//!   through push/pull, so several emulators can act as nodes
//! - **Messages**: [`EmulatorMessage`] selects the emulated function
//! - **Invocation**: [`FunctionRegistry`] runs registered functions from JSON
//!   invocation messages

#![no_std]
extern crate alloc;

pub mod emulator;
pub mod error;
pub mod invoke;
pub mod message;
pub mod store;

pub use emulator::Emulator;
pub use error::EmulatorError;
pub use invoke::{FunctionRegistry, GuestFunction};
pub use message::{EmulatorMessage, InvocationRequest};
pub use store::SharedStore;
