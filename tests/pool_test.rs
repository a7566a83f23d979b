// Integration tests for ObjectPool and BufferPool
// Tests cover: capacity bound, reuse, lazy reset, concurrency

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use syncrs::{BufferPool, ObjectPool};

/// An object that remembers its identity and how often it was reset.
#[derive(Debug)]
struct Tracked {
    id: usize,
    resets: usize,
    dirty: bool,
}

fn tracked_pool(capacity: usize) -> ObjectPool<Tracked> {
    let next_id = Arc::new(AtomicUsize::new(0));
    ObjectPool::with_reset(
        capacity,
        move || Tracked {
            id: next_id.fetch_add(1, Ordering::SeqCst),
            resets: 0,
            dirty: false,
        },
        |t: &mut Tracked| {
            t.resets += 1;
            t.dirty = false;
        },
    )
}

// ============================================================================
// Capacity and Reuse
// ============================================================================

#[test]
fn test_capacity_two_acquire_three_release_three() {
    let pool = tracked_pool(2);

    let objects: Vec<_> = (0..3).map(|_| pool.acquire()).collect();
    let ids: HashSet<_> = objects.iter().map(|t| t.id).collect();
    assert_eq!(ids.len(), 3, "Empty pool must construct distinct objects");

    for object in objects {
        pool.release(object);
        assert!(pool.free_count() <= 2, "Free list must never exceed capacity");
    }
    assert_eq!(pool.free_count(), 2);

    let again = pool.acquire();
    assert!(ids.contains(&again.id), "Must reuse a released object");
    assert_eq!(pool.stats().created, 3, "No new construction after release");
}

#[test]
fn test_acquire_never_fails_when_empty() {
    let pool = tracked_pool(1);
    let held: Vec<_> = (0..100).map(|_| pool.acquire()).collect();
    assert_eq!(held.len(), 100, "No bound on outstanding objects");
    assert_eq!(pool.stats().created, 100);
}

// ============================================================================
// Reset Semantics
// ============================================================================

#[test]
fn test_reset_exactly_once_per_reuse() {
    let pool = tracked_pool(4);

    let mut obj = pool.acquire();
    assert_eq!(obj.resets, 0, "Fresh objects are not reset");

    for round in 1..=5 {
        obj.dirty = true;
        pool.release(obj);
        obj = pool.acquire();
        assert_eq!(obj.resets, round, "One reset per release/acquire cycle");
        assert!(!obj.dirty);
    }
}

#[test]
fn test_checkout_guard_goes_through_reset() {
    let pool = tracked_pool(4);
    {
        let mut guard = pool.checkout();
        guard.dirty = true;
    }
    let obj = pool.acquire();
    assert_eq!(obj.resets, 1);
    assert!(!obj.dirty);
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_concurrent_churn_keeps_bound() {
    let pool = tracked_pool(8);

    let workers: Vec<_> = (0..8)
        .map(|_| {
            let pool = pool.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    let a = pool.acquire();
                    let b = pool.checkout();
                    assert!(pool.free_count() <= 8);
                    pool.release(a);
                    drop(b);
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    assert!(pool.free_count() <= 8);
    let stats = pool.stats();
    assert_eq!(stats.created + stats.reused, 8 * 500 * 2);
    assert_eq!(stats.released + stats.discarded, 8 * 500 * 2);
    assert!(stats.hit_ratio() > 0.0);
}

#[test]
fn test_outstanding_object_is_never_handed_out_twice() {
    let pool = tracked_pool(16);

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let pool = pool.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    let mut obj = pool.acquire();
                    assert!(!obj.dirty, "Object was in use by someone else");
                    obj.dirty = true;
                    thread::yield_now();
                    pool.release(obj);
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }
}

// ============================================================================
// Buffer Pool
// ============================================================================

#[test]
fn test_buffer_pool_reuses_allocation() {
    let pool = BufferPool::new(2, 1024);
    let mut buf = pool.acquire();
    buf.extend_from_slice(&[1u8; 100]);
    let ptr = buf.as_ptr();
    pool.release(buf);

    let buf = pool.acquire();
    assert!(buf.is_empty());
    assert_eq!(buf.as_ptr(), ptr, "Same allocation comes back");
    assert_eq!(pool.initial_capacity(), 1024);
}
