//! Error types for syncrs.

use std::io;
use std::sync::Arc;
use std::time::Duration;

/// Errors that can occur while setting up or driving syncrs primitives.
///
/// Reads from a [`BufferedReader`](crate::BufferedReader) report through
/// [`std::io::Error`] instead, so the reader stays a plain [`std::io::Read`].
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// An I/O error occurred, for example while spawning a worker thread.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// A task did not finish before its deadline.
    #[error("task timed out after {elapsed:?}")]
    Timeout {
        /// How long the caller waited.
        elapsed: Duration,
    },

    /// A task panicked before producing a value.
    #[error("task panicked")]
    TaskPanicked,
}

/// The terminal failure recorded by a buffered reader's source.
///
/// Every read after the failure returns an [`io::Error`] of the same kind
/// carrying a clone of this value, reachable through
/// [`io::Error::get_ref`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("source read failed: {inner}")]
pub struct SourceError {
    #[source]
    inner: Arc<io::Error>,
}

impl SourceError {
    pub(crate) fn new(err: io::Error) -> Self {
        Self {
            inner: Arc::new(err),
        }
    }

    /// Returns the kind of the original error.
    pub fn kind(&self) -> io::ErrorKind {
        self.inner.kind()
    }

    /// Returns the original error produced by the source.
    pub fn original(&self) -> &io::Error {
        &self.inner
    }

    /// Builds a fresh `io::Error` that reports this failure.
    pub(crate) fn to_io_error(&self) -> io::Error {
        io::Error::new(self.kind(), self.clone())
    }
}
