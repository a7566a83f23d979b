//! syncrs
//!
//! Small in-process concurrency primitives for Rust.
//!
//! `syncrs` covers three independent jobs that keep coming up in
//! thread-based code:
//!
//! - shared scalar state without caller-side locking ([`AtomicInt`],
//!   [`AtomicInt64`], [`AtomicDuration`], [`AtomicString`])
//! - bounded reuse of expensive objects ([`ObjectPool`], [`BufferPool`])
//! - decoupling a slow blocking source from its consumers
//!   ([`BufferedReader`])
//!
//! plus two thread helpers in [`task`].
//!
//! The crate intentionally:
//! - does NOT speak any wire protocol
//! - does NOT persist anything
//! - does NOT coordinate across processes
//!
//! # Atomics
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//! use syncrs::AtomicInt64;
//!
//! let counter = Arc::new(AtomicInt64::default());
//! let workers: Vec<_> = (0..4)
//!     .map(|_| {
//!         let counter = Arc::clone(&counter);
//!         thread::spawn(move || {
//!             for _ in 0..100 {
//!                 counter.incr();
//!             }
//!         })
//!     })
//!     .collect();
//! for w in workers {
//!     w.join().unwrap();
//! }
//! assert_eq!(counter.get(), 400);
//! ```
//!
//! # Pooling
//!
//! ```
//! use syncrs::ObjectPool;
//!
//! let pool = ObjectPool::with_reset(32, || Vec::<u8>::with_capacity(4096), |v| v.clear());
//! let mut buf = pool.checkout();
//! buf.extend_from_slice(b"payload");
//! drop(buf); // back in the pool
//! assert_eq!(pool.free_count(), 1);
//! ```
//!
//! # Buffered reading
//!
//! ```
//! use std::io::{Cursor, Read};
//! use syncrs::{BufferedReader, ReaderConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = Cursor::new(vec![7u8; 10_000]);
//!     let mut reader = BufferedReader::new(source, ReaderConfig::default())?;
//!
//!     let mut total = 0;
//!     let mut buf = [0u8; 512];
//!     loop {
//!         match reader.read(&mut buf)? {
//!             0 => break,
//!             n => total += n,
//!         }
//!     }
//!     assert_eq!(total, 10_000);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod atomic;
mod config;
mod error;
mod pool;
mod reader;

pub mod task;

//
// Public surface
//

pub use atomic::{AtomicDuration, AtomicInt, AtomicInt64, AtomicString};
pub use config::{DEFAULT_CHUNK_SIZE, FillMode, ReaderConfig};
pub use error::{SourceError, SyncError};
pub use pool::{BufferPool, DEFAULT_BUFFER_SIZE, DEFAULT_MAX_BUFFERS, ObjectPool, PoolStats, Pooled};
pub use reader::BufferedReader;
