//! `futures-io` support for [`BufferedReader`].
//!
//! The reader's producer side stays a blocking thread; only the consumer
//! side becomes async. A pending `poll_read` registers its waker under the
//! same lock the producer appends under, so a wake-up cannot be missed.
//!
//! Works with any futures-compatible runtime. For tokio, wrap the reader
//! with `tokio_util::compat::FuturesAsyncReadCompatExt::compat`.
//!
//! This module requires the `async-io` feature to be enabled.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_io::AsyncRead;

use crate::reader::BufferedReader;

impl AsyncRead for BufferedReader {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        out: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        if out.is_empty() {
            return Poll::Ready(Ok(0));
        }

        let mut state = self.shared().lock();
        match state.take_into(out) {
            Some(result) => Poll::Ready(result),
            None => {
                state.register(cx.waker());
                Poll::Pending
            }
        }
    }
}
