//! Bounded object reuse.
//!
//! - [`ObjectPool`] - generic free-list pool with factory and optional reset
//! - [`Pooled`] - RAII guard returned by [`ObjectPool::checkout`]
//! - [`BufferPool`] - ready-made pool of [`bytes::BytesMut`] buffers
//! - [`PoolStats`] - cumulative counters
//!
//! # Ownership Model
//!
//! ```text
//! ObjectPool::acquire()  ──► T (caller owns it, pool forgets it)
//! ObjectPool::release(T) ──► free list, or dropped when full
//!
//! ObjectPool::checkout() ──► Pooled<T> ──drop──► release(T)
//! ```

mod buffer;
mod guard;
mod object;
mod stats;

pub use buffer::{BufferPool, DEFAULT_BUFFER_SIZE, DEFAULT_MAX_BUFFERS};
pub use guard::Pooled;
pub use object::ObjectPool;
pub use stats::PoolStats;

pub(crate) use stats::PoolCounters;
