//! Ordered key/value map backed by an association list.
//!
//! Keys are located by equality scan only. Keys may stand for values whose
//! hash cannot be computed yet, so no code path here hashes anything,
//! including map equality.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use im::Vector;

use crate::error::ShellError;
use crate::value::{render_guarded, Value};

/// Shared handle to an entry list. Clones alias the same entries; use
/// [`AssocMap::copy`] for an independent map.
#[derive(Clone, Default)]
pub struct AssocMap {
    entries: Rc<RefCell<Vector<(Value, Value)>>>,
}

impl AssocMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later pairs overwrite earlier ones with an equal key.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ShellError>
    where
        I: IntoIterator<Item = (Value, Value)>,
    {
        let map = AssocMap::new();
        for (key, value) in pairs {
            map.set(key, value)?;
        }
        Ok(map)
    }

    fn snapshot(&self) -> Vector<(Value, Value)> {
        self.entries.borrow().clone()
    }

    fn position(&self, key: &Value) -> Option<usize> {
        self.snapshot().iter().position(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, key: &Value) -> Result<Value, ShellError> {
        key.require_hashable()?;
        self.snapshot()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .ok_or_else(|| ShellError::key_not_found(key))
    }

    pub fn get_or(&self, key: &Value, default: Value) -> Result<Value, ShellError> {
        match self.get(key) {
            Err(ShellError::KeyNotFound(_)) => Ok(default),
            other => other,
        }
    }

    pub fn contains_key(&self, key: &Value) -> Result<bool, ShellError> {
        key.require_hashable()?;
        Ok(self.position(key).is_some())
    }

    /// Replaces in place when the key exists, otherwise appends.
    pub fn set(&self, key: Value, value: Value) -> Result<(), ShellError> {
        key.require_hashable()?;
        let found = self.position(&key);
        let mut entries = self.entries.borrow_mut();
        match found {
            Some(idx) => {
                let old_key = entries[idx].0.clone();
                entries.set(idx, (old_key, value));
            }
            None => entries.push_back((key, value)),
        }
        Ok(())
    }

    pub fn delete(&self, key: &Value) -> Result<(), ShellError> {
        key.require_hashable()?;
        let idx = self
            .position(key)
            .ok_or_else(|| ShellError::key_not_found(key))?;
        self.entries.borrow_mut().remove(idx);
        Ok(())
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = Value> {
        self.snapshot().into_iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = Value> {
        self.snapshot().into_iter().map(|(_, v)| v)
    }

    pub fn items(&self) -> impl Iterator<Item = (Value, Value)> {
        self.snapshot().into_iter()
    }

    /// Shallow copy; the entry list shares structure until either side
    /// changes.
    pub fn copy(&self) -> AssocMap {
        AssocMap {
            entries: Rc::new(RefCell::new(self.snapshot())),
        }
    }

    pub fn ptr_eq(&self, other: &AssocMap) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }

    /// Equality by nested scan: for each of our entries, find the equal key
    /// on the other side and compare values.
    pub fn equals(&self, other: &AssocMap) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let mine = self.snapshot();
        let theirs = other.snapshot();
        if mine.len() != theirs.len() {
            return false;
        }
        mine.iter().all(|(key, value)| {
            theirs
                .iter()
                .find(|(other_key, _)| other_key == key)
                .is_some_and(|(_, other_value)| other_value == value)
        })
    }
}

impl PartialEq for AssocMap {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Display for AssocMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = Rc::as_ptr(&self.entries) as *const () as usize;
        render_guarded(f, id, "{...}", |f| {
            f.write_str("{")?;
            for (idx, (key, value)) in self.items().enumerate() {
                if idx > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}: {}", key, value)?;
            }
            f.write_str("}")
        })
    }
}

impl fmt::Debug for AssocMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
