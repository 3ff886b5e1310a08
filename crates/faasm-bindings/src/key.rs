//! State keys.

use crate::error::AdapterError;
use alloc::string::ToString;

/// Name of a keyed state slot.
///
/// The host owns the key space; the only check made here is that the key
/// can be passed as a C string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key<'a>(&'a str);

impl<'a> Key<'a> {
    /// Wrap `key`, rejecting interior NUL bytes.
    pub fn new(key: &'a str) -> Result<Self, AdapterError> {
        if key.as_bytes().contains(&0) {
            return Err(AdapterError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(Key(key))
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }
}

impl core::fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.0)
    }
}
