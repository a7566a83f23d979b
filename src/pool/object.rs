//! Bounded free-list pool for reusable objects.
//!
//! The [`ObjectPool`] keeps at most `capacity` idle objects. It:
//!
//! 1. Hands out an idle object when one exists, running the reset function
//!    on it first.
//! 2. Falls back to the factory when the free list is empty. Acquisition
//!    never waits and never fails for lack of objects.
//! 3. Drops returned objects once the free list is full.
//!
//! # Thread Safety
//! The free list sits behind a single mutex that is held only to push or pop.
//! The factory and reset function always run with the lock released, so a
//! slow constructor never stalls other callers, and a panicking one leaves
//! the bookkeeping intact.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::pool::{PoolCounters, PoolStats, Pooled};

type Factory<T> = Box<dyn Fn() -> T + Send + Sync>;
type Reset<T> = Box<dyn Fn(&mut T) + Send + Sync>;
type Keep<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// State shared between pool handles and outstanding [`Pooled`] guards.
pub(crate) struct PoolInner<T> {
    capacity: usize,
    /// Idle objects; the last element is the head.
    free: Mutex<Vec<T>>,
    factory: Factory<T>,
    reset: Option<Reset<T>>,
    /// Extra admission rule applied on release.
    keep: Option<Keep<T>>,
    counters: PoolCounters,
}

/// A thread-safe pool of reusable objects of type `T`.
///
/// Cloning the pool is cheap and yields another handle to the same free
/// list. The pool never tracks objects it has handed out.
///
/// # Example
///
/// ```
/// use syncrs::ObjectPool;
///
/// let pool = ObjectPool::with_reset(8, Vec::<u32>::new, |v| v.clear());
///
/// let mut scratch = pool.acquire();
/// scratch.extend([1, 2, 3]);
/// pool.release(scratch);
///
/// // The same allocation comes back, already cleared.
/// let scratch = pool.acquire();
/// assert!(scratch.is_empty());
/// assert!(scratch.capacity() >= 3);
/// ```
pub struct ObjectPool<T> {
    inner: Arc<PoolInner<T>>,
}

impl<T> ObjectPool<T> {
    /// Creates a pool holding at most `capacity` idle objects.
    ///
    /// Returned objects are reused exactly as they were left.
    pub fn new<F>(capacity: usize, factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::from_parts(capacity, Box::new(factory), None, None)
    }

    /// Creates a pool that passes each reused object through `reset`
    /// before handing it out again.
    pub fn with_reset<F, R>(capacity: usize, factory: F, reset: R) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        R: Fn(&mut T) + Send + Sync + 'static,
    {
        Self::from_parts(capacity, Box::new(factory), Some(Box::new(reset)), None)
    }

    pub(crate) fn from_parts(
        capacity: usize,
        factory: Factory<T>,
        reset: Option<Reset<T>>,
        keep: Option<Keep<T>>,
    ) -> Self {
        Self {
            inner: Arc::new(PoolInner {
                capacity,
                free: Mutex::new(Vec::new()),
                factory,
                reset,
                keep,
                counters: PoolCounters::default(),
            }),
        }
    }

    /// Returns a ready-to-use object.
    ///
    /// Pops an idle object if there is one and resets it; otherwise builds
    /// a new one with the factory. A panic in either function propagates
    /// to the caller.
    pub fn acquire(&self) -> T {
        let popped = self.inner.free.lock().pop();

        match popped {
            Some(mut value) => {
                if let Some(reset) = &self.inner.reset {
                    reset(&mut value);
                }
                self.inner.counters.reused.incr();
                value
            }
            None => {
                let value = (self.inner.factory)();
                self.inner.counters.created.incr();
                value
            }
        }
    }

    /// Returns an object to the pool.
    ///
    /// If the free list is already full the object is dropped. The reset
    /// function is not run here; it runs on the next acquisition.
    pub fn release(&self, value: T) {
        self.inner.release(value);
    }

    /// Acquires an object wrapped in a guard that releases it on drop.
    ///
    /// # Example
    ///
    /// ```
    /// use syncrs::ObjectPool;
    ///
    /// let pool = ObjectPool::new(2, String::new);
    /// {
    ///     let mut s = pool.checkout();
    ///     s.push_str("scratch");
    /// }
    /// assert_eq!(pool.free_count(), 1);
    /// ```
    pub fn checkout(&self) -> Pooled<T> {
        Pooled::new(self.acquire(), Arc::clone(&self.inner))
    }

    /// Returns the maximum number of idle objects kept.
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Returns the number of idle objects currently held.
    pub fn free_count(&self) -> usize {
        self.inner.free.lock().len()
    }

    /// Returns a snapshot of the pool counters.
    pub fn stats(&self) -> PoolStats {
        self.inner.counters.snapshot()
    }

    /// Drops every idle object.
    ///
    /// Objects currently handed out are unaffected.
    pub fn clear(&self) {
        let drained = std::mem::take(&mut *self.inner.free.lock());
        drop(drained);
    }
}

impl<T> PoolInner<T> {
    /// Pushes `value` onto the free list unless it is full or rejected.
    pub(crate) fn release(&self, value: T) {
        if let Some(keep) = &self.keep {
            if !keep(&value) {
                self.discard(value);
                return;
            }
        }

        let rejected = {
            let mut free = self.free.lock();
            if free.len() < self.capacity {
                free.push(value);
                None
            } else {
                Some(value)
            }
        };

        match rejected {
            None => {
                self.counters.released.incr();
            }
            Some(value) => self.discard(value),
        }
    }

    fn discard(&self, value: T) {
        self.counters.discarded.incr();
        tracing::trace!(capacity = self.capacity, "pool full or object rejected, dropping");
        drop(value);
    }
}

impl<T> Clone for ObjectPool<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for ObjectPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectPool")
            .field("capacity", &self.capacity())
            .field("free_count", &self.free_count())
            .field("has_reset", &self.inner.reset.is_some())
            .finish()
    }
}
