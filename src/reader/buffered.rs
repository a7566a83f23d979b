//! Background-filled buffered reader.
//!
//! [`BufferedReader`] puts an in-memory queue between a slow, blocking
//! [`std::io::Read`] source and its consumers. A single producer pulls the
//! source in fixed-size chunks and appends them to the queue; consumers take
//! whatever is queued, or block until the producer delivers more or the
//! source ends.
//!
//! ```text
//! source ──read(chunk)──► worker ──append──► [ queue ] ──read(buf)──► consumer
//!                           │                    ▲
//!                           └── EOF / error ─────┘ (sticky terminal state)
//! ```
//!
//! # Example
//!
//! ```
//! use std::io::{Cursor, Read};
//! use syncrs::{BufferedReader, ReaderConfig};
//!
//! let mut reader = BufferedReader::new(Cursor::new(b"hello".to_vec()), ReaderConfig::default())?;
//!
//! let mut out = String::new();
//! reader.read_to_string(&mut out)?;
//! assert_eq!(out, "hello");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;
use std::io::{self, Read};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::config::{FillMode, ReaderConfig};
use crate::error::SyncError;
use crate::reader::shared::Shared;

/// Name given to background fill threads.
const WORKER_THREAD_NAME: &str = "syncrs-reader";

type CloseHook = Box<dyn FnOnce() -> io::Result<()> + Send>;

/// A reader whose data is pulled from the source ahead of time.
///
/// Reads return as soon as any bytes are queued, so short reads are normal.
/// Once the source reports end of data every later read returns `Ok(0)`;
/// once it fails every later read returns an error of the same kind whose
/// payload is a [`SourceError`](crate::SourceError). Neither is ever
/// retried. A read never returns `Ok(0)` while the source is still live.
///
/// Reading through `&BufferedReader` is supported, so several consumers may
/// share one reader. Bytes are handed out in exactly the order the source
/// produced them.
///
/// Dropping the reader does not close the source. A background worker keeps
/// running until its source ends; use [`with_close`](Self::with_close) and
/// [`close`](Self::close) to stop a source that never ends on its own.
pub struct BufferedReader {
    shared: Arc<Shared>,
    close: Mutex<Option<CloseHook>>,
    fill_mode: FillMode,
}

impl BufferedReader {
    /// Wraps `source` according to `config`.
    ///
    /// In [`FillMode::Background`] a worker thread is spawned and this
    /// returns at once. In [`FillMode::Eager`] the source is drained on the
    /// calling thread before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidConfig`] for an invalid configuration and
    /// [`SyncError::Io`] if the worker thread cannot be spawned. Source
    /// errors are never reported here; they surface on read.
    pub fn new<R>(source: R, config: ReaderConfig) -> Result<Self, SyncError>
    where
        R: Read + Send + 'static,
    {
        Self::build(source, config, None)
    }

    /// Like [`new`](Self::new), with a hook that [`close`](Self::close)
    /// runs to close the underlying source.
    ///
    /// The hook usually acts on a second handle to the source, such as a
    /// cloned socket that is shut down. Closing makes the worker's pending
    /// read end, which in turn terminates the worker.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::net::{Shutdown, TcpStream};
    /// use syncrs::{BufferedReader, ReaderConfig};
    ///
    /// let stream = TcpStream::connect("127.0.0.1:9000")?;
    /// let control = stream.try_clone()?;
    /// let reader = BufferedReader::with_close(stream, ReaderConfig::default(), move || {
    ///     control.shutdown(Shutdown::Both)
    /// })?;
    ///
    /// // ... read from `reader` ...
    /// reader.close()?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn with_close<R, C>(source: R, config: ReaderConfig, close: C) -> Result<Self, SyncError>
    where
        R: Read + Send + 'static,
        C: FnOnce() -> io::Result<()> + Send + 'static,
    {
        Self::build(source, config, Some(Box::new(close)))
    }

    fn build<R>(source: R, config: ReaderConfig, close: Option<CloseHook>) -> Result<Self, SyncError>
    where
        R: Read + Send + 'static,
    {
        config.validate()?;

        let shared = Arc::new(Shared::default());
        let chunk_size = config.chunk_size();

        match config.fill_mode() {
            FillMode::Eager => shared.fill(source, chunk_size),
            FillMode::Background => {
                let worker = Arc::clone(&shared);
                thread::Builder::new()
                    .name(WORKER_THREAD_NAME.to_string())
                    .spawn(move || worker.fill(source, chunk_size))?;
                tracing::trace!(chunk_size, "fill worker started");
            }
        }

        Ok(Self {
            shared,
            close: Mutex::new(close),
            fill_mode: config.fill_mode(),
        })
    }

    /// Reads like [`Read::read`], but gives up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::TimedOut`] if no data and no terminal state
    /// arrived in time. Nothing is consumed in that case.
    ///
    /// # Example
    ///
    /// ```
    /// use std::io::{self, Read};
    /// use std::time::Duration;
    /// use syncrs::{BufferedReader, ReaderConfig};
    ///
    /// struct Silent;
    /// impl Read for Silent {
    ///     fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
    ///         std::thread::sleep(Duration::from_secs(3600));
    ///         Ok(0)
    ///     }
    /// }
    ///
    /// let reader = BufferedReader::new(Silent, ReaderConfig::default())?;
    /// let mut buf = [0u8; 8];
    /// let err = reader.read_timeout(&mut buf, Duration::from_millis(10)).unwrap_err();
    /// assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    /// # Ok::<(), syncrs::SyncError>(())
    /// ```
    pub fn read_timeout(&self, out: &mut [u8], timeout: Duration) -> io::Result<usize> {
        self.read_until(out, Instant::now().checked_add(timeout))
    }

    fn read_until(&self, out: &mut [u8], deadline: Option<Instant>) -> io::Result<usize> {
        if out.is_empty() {
            return Ok(0);
        }

        let mut state = self.shared.lock();
        loop {
            if let Some(result) = state.take_into(out) {
                return result;
            }

            match deadline {
                None => self.shared.ready().wait(&mut state),
                Some(deadline) => {
                    let waited = self.shared.ready().wait_until(&mut state, deadline);
                    if waited.timed_out() {
                        return state.take_into(out).unwrap_or_else(|| {
                            Err(io::Error::new(
                                io::ErrorKind::TimedOut,
                                "no data from source before deadline",
                            ))
                        });
                    }
                }
            }
        }
    }

    /// Closes the underlying source through the hook given to
    /// [`with_close`](Self::with_close).
    ///
    /// The hook runs at most once; later calls, and readers built with
    /// [`new`](Self::new), return `Ok(())` without doing anything. Bytes
    /// already queued stay readable.
    pub fn close(&self) -> io::Result<()> {
        let hook = self.close.lock().take();
        match hook {
            Some(hook) => {
                tracing::debug!("closing buffered reader source");
                hook()
            }
            None => Ok(()),
        }
    }

    /// Returns the number of bytes queued and ready to read.
    pub fn buffered(&self) -> usize {
        self.shared.lock().buf.len()
    }

    /// Returns `true` once the source has ended or failed.
    ///
    /// Queued bytes may still be readable.
    pub fn is_terminated(&self) -> bool {
        self.shared.lock().terminal.is_some()
    }

    /// Returns the fill mode this reader was built with.
    pub fn fill_mode(&self) -> FillMode {
        self.fill_mode
    }

    #[cfg(feature = "async-io")]
    pub(crate) fn shared(&self) -> &Shared {
        &self.shared
    }
}

impl Read for &BufferedReader {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        self.read_until(out, None)
    }
}

impl Read for BufferedReader {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        self.read_until(out, None)
    }
}

impl fmt::Debug for BufferedReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("BufferedReader")
            .field("fill_mode", &self.fill_mode)
            .field("buffered", &state.buf.len())
            .field("terminated", &state.terminal.is_some())
            .finish()
    }
}
