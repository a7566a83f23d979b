//! Fixed-width integer cells backed by hardware atomics.

use std::fmt;
use std::sync::atomic::{AtomicI32, AtomicI64, Ordering};

macro_rules! atomic_int {
    ($(#[$meta:meta])* $name:ident, $prim:ty, $atomic:ty) => {
        $(#[$meta])*
        #[derive(Default)]
        pub struct $name {
            value: $atomic,
        }

        impl $name {
            /// Creates a cell holding `value`.
            pub const fn new(value: $prim) -> Self {
                Self {
                    value: <$atomic>::new(value),
                }
            }

            /// Returns the current value.
            pub fn get(&self) -> $prim {
                self.value.load(Ordering::SeqCst)
            }

            /// Stores `value`.
            pub fn set(&self, value: $prim) {
                self.value.store(value, Ordering::SeqCst);
            }

            /// Stores `value` and returns the previous value.
            pub fn swap(&self, value: $prim) -> $prim {
                self.value.swap(value, Ordering::SeqCst)
            }

            /// Stores zero and returns the previous value.
            pub fn reset(&self) -> $prim {
                self.swap(0)
            }

            /// Adds `delta` and returns the new value. Wraps on overflow.
            pub fn add(&self, delta: $prim) -> $prim {
                self.value
                    .fetch_add(delta, Ordering::SeqCst)
                    .wrapping_add(delta)
            }

            /// Subtracts `delta` and returns the new value. Wraps on overflow.
            pub fn sub(&self, delta: $prim) -> $prim {
                self.value
                    .fetch_sub(delta, Ordering::SeqCst)
                    .wrapping_sub(delta)
            }

            /// Adds one and returns the new value.
            pub fn incr(&self) -> $prim {
                self.add(1)
            }

            /// Subtracts one and returns the new value.
            pub fn decr(&self) -> $prim {
                self.sub(1)
            }

            /// Replaces the value with `new` iff it currently equals `old`.
            ///
            /// Returns whether the swap happened. On failure the cell is left
            /// untouched; callers that need the update retry in a loop.
            pub fn compare_and_swap(&self, old: $prim, new: $prim) -> bool {
                self.value
                    .compare_exchange(old, new, Ordering::SeqCst, Ordering::SeqCst)
                    .is_ok()
            }
        }

        impl From<$prim> for $name {
            fn from(value: $prim) -> Self {
                Self::new(value)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.get()).finish()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.get())
            }
        }
    };
}

atomic_int!(
    /// A 32-bit signed integer shared across threads without caller locking.
    ///
    /// Every operation is a single lock-free atomic instruction on a 32-bit
    /// word. Use [`AtomicInt64`] when the value may exceed `i32`.
    ///
    /// # Example
    ///
    /// ```
    /// use syncrs::AtomicInt;
    ///
    /// let hits = AtomicInt::default();
    /// assert_eq!(hits.incr(), 1);
    /// assert_eq!(hits.add(4), 5);
    /// assert_eq!(hits.reset(), 5);
    /// assert_eq!(hits.get(), 0);
    /// ```
    AtomicInt,
    i32,
    AtomicI32
);

atomic_int!(
    /// A 64-bit signed integer shared across threads without caller locking.
    ///
    /// # Example
    ///
    /// ```
    /// use syncrs::AtomicInt64;
    ///
    /// let bytes = AtomicInt64::new(1 << 40);
    /// assert!(bytes.compare_and_swap(1 << 40, 7));
    /// assert!(!bytes.compare_and_swap(1 << 40, 9));
    /// assert_eq!(bytes.get(), 7);
    /// ```
    AtomicInt64,
    i64,
    AtomicI64
);
