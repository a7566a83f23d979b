//! Buffered reading over slow sources.
//!
//! - [`BufferedReader`] - queue filled from a blocking [`std::io::Read`]
//!   source by a background worker or eagerly on construction
//!
//! With the `async-io` feature the reader also implements
//! `futures_io::AsyncRead`.

mod buffered;
mod shared;

#[cfg(feature = "async-io")]
mod async_read;

pub use buffered::BufferedReader;
