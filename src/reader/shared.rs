//! State shared between a buffered reader and its fill worker.

use std::io::{self, Read};
use std::task::Waker;
use std::thread;

use bytes::{Buf, BytesMut};
use parking_lot::{Condvar, Mutex, MutexGuard};

use crate::error::SourceError;

/// Why the source stopped producing data. Set once, never replaced.
#[derive(Debug, Clone)]
pub(crate) enum Terminal {
    Eof,
    Failed(SourceError),
}

#[derive(Debug, Default)]
pub(crate) struct State {
    /// Bytes produced by the source and not yet read.
    pub(crate) buf: BytesMut,
    pub(crate) terminal: Option<Terminal>,
    /// Tasks parked in `poll_read`.
    wakers: Vec<Waker>,
}

impl State {
    /// Moves buffered bytes into `out`, or reports the terminal state.
    ///
    /// Returns `None` when the caller has to wait. `out` must not be empty.
    pub(crate) fn take_into(&mut self, out: &mut [u8]) -> Option<io::Result<usize>> {
        if !self.buf.is_empty() {
            let n = out.len().min(self.buf.len());
            out[..n].copy_from_slice(&self.buf[..n]);
            self.buf.advance(n);
            return Some(Ok(n));
        }

        match &self.terminal {
            Some(Terminal::Eof) => Some(Ok(0)),
            Some(Terminal::Failed(err)) => Some(Err(err.to_io_error())),
            None => None,
        }
    }

    #[cfg_attr(not(feature = "async-io"), allow(dead_code))]
    pub(crate) fn register(&mut self, waker: &Waker) {
        if !self.wakers.iter().any(|w| w.will_wake(waker)) {
            self.wakers.push(waker.clone());
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Shared {
    state: Mutex<State>,
    ready: Condvar,
}

impl Shared {
    pub(crate) fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock()
    }

    pub(crate) fn ready(&self) -> &Condvar {
        &self.ready
    }

    /// Appends a chunk and wakes every waiting reader.
    fn append(&self, chunk: &[u8]) {
        let wakers = {
            let mut state = self.state.lock();
            state.buf.extend_from_slice(chunk);
            self.ready.notify_all();
            std::mem::take(&mut state.wakers)
        };
        wakers.into_iter().for_each(Waker::wake);
    }

    /// Records the terminal state (first call wins) and wakes every reader.
    fn finish(&self, terminal: Terminal) {
        let wakers = {
            let mut state = self.state.lock();
            if state.terminal.is_none() {
                state.terminal = Some(terminal);
            }
            self.ready.notify_all();
            std::mem::take(&mut state.wakers)
        };
        wakers.into_iter().for_each(Waker::wake);
    }

    /// Pulls `source` to completion in `chunk_size` pieces.
    ///
    /// Runs exactly once per reader, either on the worker thread or on the
    /// constructing thread in eager mode.
    /// A panic in the source is recorded as a failure before it unwinds
    /// past this frame.
    pub(crate) fn fill<R: Read>(&self, mut source: R, chunk_size: usize) {
        let _guard = PanicGuard { shared: self };
        let mut chunk = vec![0u8; chunk_size];
        let mut total = 0u64;

        let terminal = loop {
            match source.read(&mut chunk) {
                Ok(0) => break Terminal::Eof,
                Ok(n) => {
                    total += n as u64;
                    self.append(&chunk[..n]);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => break Terminal::Failed(SourceError::new(e)),
            }
        };

        match &terminal {
            Terminal::Eof => tracing::debug!(bytes = total, "source exhausted"),
            Terminal::Failed(err) => {
                tracing::debug!(bytes = total, kind = ?err.kind(), "source failed")
            }
        }

        self.finish(terminal);
    }
}

/// Terminates the stream if the source panics during `fill`.
struct PanicGuard<'a> {
    shared: &'a Shared,
}

impl Drop for PanicGuard<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            tracing::debug!("source panicked");
            let err = io::Error::other("source panicked");
            self.shared.finish(Terminal::Failed(SourceError::new(err)));
        }
    }
}
