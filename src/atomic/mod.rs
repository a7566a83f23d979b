//! Atomic scalar cells.
//!
//! - [`AtomicInt`] - 32-bit integer, lock-free
//! - [`AtomicInt64`] - 64-bit integer, lock-free
//! - [`AtomicDuration`] - nanosecond duration accumulator, lock-free
//! - [`AtomicString`] - string behind an internal mutex
//!
//! All operations on one cell are linearizable. Nothing is promised about
//! ordering across different cells.

mod duration;
mod int;
mod string;

pub use duration::AtomicDuration;
pub use int::{AtomicInt, AtomicInt64};
pub use string::AtomicString;
