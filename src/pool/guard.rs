//! RAII guard that returns an object to its pool on drop.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::pool::object::PoolInner;

/// An object checked out of an [`ObjectPool`](crate::ObjectPool).
///
/// Dereferences to the object. When the guard is dropped the object goes
/// back through the pool's normal release path. Call [`detach`](Self::detach)
/// to keep the object instead.
pub struct Pooled<T> {
    /// `None` only after `detach` or during `drop`.
    value: Option<T>,
    pool: Arc<PoolInner<T>>,
}

impl<T> Pooled<T> {
    pub(crate) fn new(value: T, pool: Arc<PoolInner<T>>) -> Self {
        Self {
            value: Some(value),
            pool,
        }
    }

    /// Takes the object out of the guard. It will not be returned to the pool.
    pub fn detach(mut self) -> T {
        self.value.take().expect("pooled value present until drop")
    }
}

impl<T> Deref for Pooled<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.value.as_ref().expect("pooled value present until drop")
    }
}

impl<T> DerefMut for Pooled<T> {
    fn deref_mut(&mut self) -> &mut T {
        self.value.as_mut().expect("pooled value present until drop")
    }
}

impl<T> Drop for Pooled<T> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            self.pool.release(value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Pooled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pooled").field(&**self).finish()
    }
}
