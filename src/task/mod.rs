//! Deadline and fan-in helpers for plain threads.
//!
//! - [`run_with_timeout`] - run a closure, give up waiting after a deadline
//! - [`merge`] / [`merge_with`] - forward several channels into one
//!
//! Channels are [`crossbeam_channel`] channels.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};

use crate::error::SyncError;

/// Runs `f` on a fresh thread and waits at most `timeout` for its result.
///
/// A thread cannot be cancelled, so on timeout it is left to finish in the
/// background and its result is discarded.
///
/// # Errors
///
/// - [`SyncError::Timeout`] if `f` did not finish in time
/// - [`SyncError::TaskPanicked`] if `f` panicked
/// - [`SyncError::Io`] if the thread could not be spawned
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use syncrs::task::run_with_timeout;
///
/// let sum = run_with_timeout(|| (1..=10).sum::<u32>(), Duration::from_secs(1))?;
/// assert_eq!(sum, 55);
/// # Ok::<(), syncrs::SyncError>(())
/// ```
pub fn run_with_timeout<T, F>(f: F, timeout: Duration) -> Result<T, SyncError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = crossbeam_channel::bounded(1);

    thread::Builder::new()
        .name("syncrs-task".to_string())
        .spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(f));
            // The receiver is gone if the caller already timed out.
            let _ = tx.send(outcome);
        })?;

    match rx.recv_timeout(timeout) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(_)) | Err(RecvTimeoutError::Disconnected) => Err(SyncError::TaskPanicked),
        Err(RecvTimeoutError::Timeout) => {
            tracing::debug!(?timeout, "task deadline passed, detaching");
            Err(SyncError::Timeout { elapsed: timeout })
        }
    }
}

/// Forwards every item from `inputs` into one receiver.
///
/// See [`merge_with`].
pub fn merge<T, I>(inputs: I) -> Result<Receiver<T>, SyncError>
where
    T: Send + 'static,
    I: IntoIterator<Item = Receiver<T>>,
{
    merge_with(inputs, |item| item)
}

/// Forwards every item from `inputs`, passed through `transform`, into one
/// receiver.
///
/// One forwarding thread runs per input. Items from one input keep their
/// order; items from different inputs interleave arbitrarily. The output is
/// a rendezvous channel, so forwarders only advance as fast as the consumer
/// reads. It disconnects once every input has disconnected, or stops
/// forwarding once the output receiver is dropped.
///
/// # Example
///
/// ```
/// use syncrs::task::merge_with;
///
/// let (a_tx, a_rx) = crossbeam_channel::unbounded();
/// let (b_tx, b_rx) = crossbeam_channel::unbounded();
/// a_tx.send(1).unwrap();
/// b_tx.send(2).unwrap();
/// drop((a_tx, b_tx));
///
/// let merged = merge_with([a_rx, b_rx], |n: i32| n * 10)?;
/// let mut out: Vec<_> = merged.iter().collect();
/// out.sort();
/// assert_eq!(out, vec![10, 20]);
/// # Ok::<(), syncrs::SyncError>(())
/// ```
pub fn merge_with<T, U, I, F>(inputs: I, transform: F) -> Result<Receiver<U>, SyncError>
where
    T: Send + 'static,
    U: Send + 'static,
    I: IntoIterator<Item = Receiver<T>>,
    F: Fn(T) -> U + Send + Sync + 'static,
{
    let (tx, rx) = crossbeam_channel::bounded(0);
    let transform = Arc::new(transform);

    for (index, input) in inputs.into_iter().enumerate() {
        let tx = tx.clone();
        let transform = Arc::clone(&transform);
        thread::Builder::new()
            .name(format!("syncrs-merge-{index}"))
            .spawn(move || {
                for item in input.iter() {
                    if tx.send(transform(item)).is_err() {
                        break;
                    }
                }
            })?;
    }

    Ok(rx)
}
