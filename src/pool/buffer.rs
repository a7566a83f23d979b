//! Byte buffer pool for efficient memory reuse.

use bytes::BytesMut;

use crate::pool::{ObjectPool, PoolStats, Pooled};

/// Default initial capacity for pooled buffers.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024; // 64 KiB

/// Default number of idle buffers to keep.
pub const DEFAULT_MAX_BUFFERS: usize = 4;

/// Buffers that grew past this multiple of the initial size are not pooled.
const OVERSIZE_FACTOR: usize = 4;

/// A pool of reusable [`BytesMut`] buffers.
///
/// New buffers start with `initial_capacity` bytes reserved. Reused buffers
/// come back empty with their allocation intact. A buffer that grew far
/// beyond the initial capacity is dropped on release so one oversized
/// payload does not pin memory in the pool.
///
/// # Example
///
/// ```
/// use syncrs::BufferPool;
///
/// let pool = BufferPool::new(16, 4096);
/// let mut buf = pool.acquire();
/// buf.extend_from_slice(b"frame");
/// pool.release(buf);
///
/// let buf = pool.acquire();
/// assert!(buf.is_empty());
/// assert!(buf.capacity() >= 4096);
/// ```
#[derive(Debug, Clone)]
pub struct BufferPool {
    pool: ObjectPool<BytesMut>,
    initial_capacity: usize,
}

impl BufferPool {
    /// Creates a pool keeping at most `max_buffers` idle buffers of
    /// `initial_capacity` bytes each.
    pub fn new(max_buffers: usize, initial_capacity: usize) -> Self {
        let limit = initial_capacity.saturating_mul(OVERSIZE_FACTOR);
        let pool = ObjectPool::<BytesMut>::from_parts(
            max_buffers,
            Box::new(move || BytesMut::with_capacity(initial_capacity)),
            Some(Box::new(|buf: &mut BytesMut| buf.clear())),
            Some(Box::new(move |buf: &BytesMut| buf.capacity() <= limit)),
        );
        Self {
            pool,
            initial_capacity,
        }
    }

    /// Takes a buffer from the pool or allocates a new one.
    pub fn acquire(&self) -> BytesMut {
        self.pool.acquire()
    }

    /// Returns a buffer to the pool.
    pub fn release(&self, buf: BytesMut) {
        self.pool.release(buf);
    }

    /// Takes a buffer that returns to the pool when dropped.
    pub fn checkout(&self) -> Pooled<BytesMut> {
        self.pool.checkout()
    }

    /// Returns the capacity new buffers are created with.
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Returns the number of idle buffers.
    pub fn free_count(&self) -> usize {
        self.pool.free_count()
    }

    /// Returns a snapshot of the pool counters.
    pub fn stats(&self) -> PoolStats {
        self.pool.stats()
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BUFFERS, DEFAULT_BUFFER_SIZE)
    }
}
