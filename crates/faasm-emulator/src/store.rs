//! Shared state store.
//!
//! Stands in for the host's durable store. Each [`Emulator`](crate::Emulator)
//! keeps its own local view; `push_state` and `pull_state` copy between that
//! view and a `SharedStore`. Emulators built from clones of the same store
//! behave like nodes sharing one backend.

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

/// Cloneable handle to one keyed store.
#[derive(Clone, Debug, Default)]
pub struct SharedStore {
    values: Rc<RefCell<BTreeMap<String, Vec<u8>>>>,
}

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.values.borrow().get(key).cloned()
    }

    pub fn set(&self, key: &str, value: Vec<u8>) {
        self.values.borrow_mut().insert(String::from(key), value);
    }

    pub fn remove(&self, key: &str) -> Option<Vec<u8>> {
        self.values.borrow_mut().remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.borrow().contains_key(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.values.borrow().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.values.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_values() {
        let a = SharedStore::new();
        let b = a.clone();

        a.set("k", b"v".to_vec());
        assert_eq!(b.get("k"), Some(b"v".to_vec()));
        assert_eq!(b.keys(), alloc::vec![String::from("k")]);

        b.clear();
        assert!(a.is_empty());
    }

    #[test]
    fn test_remove() {
        let store = SharedStore::new();
        store.set("k", b"v".to_vec());
        assert!(store.contains("k"));
        assert_eq!(store.remove("k"), Some(b"v".to_vec()));
        assert!(!store.contains("k"));
        assert_eq!(store.len(), 0);
    }
}
