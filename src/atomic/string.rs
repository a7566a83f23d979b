//! Lock-guarded string cell.

use std::fmt;

use parking_lot::Mutex;

/// A [`String`] shared across threads without caller locking.
///
/// There is no lock-free string swap, so every operation takes an internal
/// mutex for exactly the duration of that operation. The guard is scoped,
/// so the lock is released on every exit path, including unwinding.
///
/// # Example
///
/// ```
/// use syncrs::AtomicString;
///
/// let state = AtomicString::new("idle");
/// assert!(state.compare_and_swap("idle", "running"));
/// assert!(!state.compare_and_swap("idle", "stopped"));
/// assert_eq!(state.get(), "running");
/// ```
#[derive(Default)]
pub struct AtomicString {
    value: Mutex<String>,
}

impl AtomicString {
    /// Creates a cell holding `value`.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(value.into()),
        }
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> String {
        self.value.lock().clone()
    }

    /// Stores `value`.
    pub fn set(&self, value: impl Into<String>) {
        let value = value.into();
        *self.value.lock() = value;
    }

    /// Stores `value` and returns the previous value.
    pub fn swap(&self, value: impl Into<String>) -> String {
        let value = value.into();
        std::mem::replace(&mut *self.value.lock(), value)
    }

    /// Leaves the cell empty and returns the previous value.
    pub fn reset(&self) -> String {
        std::mem::take(&mut *self.value.lock())
    }

    /// Replaces the value with `new` iff it currently equals `old`.
    ///
    /// The comparison and the store happen under one lock acquisition.
    pub fn compare_and_swap(&self, old: &str, new: impl Into<String>) -> bool {
        let mut guard = self.value.lock();
        if *guard != old {
            return false;
        }
        *guard = new.into();
        true
    }

    /// Runs `f` against the current value without cloning it.
    ///
    /// The lock is held while `f` runs, so `f` must not touch this cell.
    pub fn with<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        f(&self.value.lock())
    }
}

impl From<String> for AtomicString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for AtomicString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for AtomicString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with(|s| f.write_str(s))
    }
}

impl fmt::Debug for AtomicString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with(|s| f.debug_tuple("AtomicString").field(&s).finish())
    }
}
