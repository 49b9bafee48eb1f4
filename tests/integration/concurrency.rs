//! Many threads acquiring and releasing against one pool.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use request_pool::config::PoolConfig;
use request_pool::core::{CancelContext, RequestContext, RequestPool};

use crate::helpers::*;

const THREADS: usize = 8;
const ROUNDS: usize = 500;

/// Every thread only ever sees its own params
#[test]
fn test_concurrent_acquire_release() {
    let pool = Arc::new(RequestPool::new(PoolConfig::default().with_max_idle(4)));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                for round in 0..ROUNDS {
                    let id = format!("{}-{}", t, round);
                    let mut ctx = pool.acquire(CancelContext::new(), get(&format!("/items/{}", id)));

                    assert!(ctx.params().is_empty());
                    ctx.add_param("id", id.as_bytes());
                    assert_eq!(ctx.param("id"), id.as_str());
                    assert_eq!(ctx.path(), format!("/items/{}", id));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }

    let stats = pool.stats();
    assert_eq!(stats.acquired, (THREADS * ROUNDS) as u64);
    assert_eq!(stats.released, stats.acquired);
    assert_eq!(stats.in_use(), 0);
    assert!(stats.idle <= 4);
    assert!(stats.allocated <= (THREADS * ROUNDS) as u64);
}

/// Contexts held at the same time are always distinct objects
#[test]
fn test_no_aliasing_between_holders() {
    let pool = Arc::new(RequestPool::default());
    let seen = Arc::new(Mutex::new(Vec::new()));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let pool = Arc::clone(&pool);
            let seen = Arc::clone(&seen);
            thread::spawn(move || {
                let ctx = pool.acquire(CancelContext::new(), get("/"));
                let addr = &*ctx as *const RequestContext as usize;
                seen.lock().push(addr);
                // Hold until every thread has recorded its context.
                while seen.lock().len() < THREADS {
                    thread::yield_now();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }

    let addrs = seen.lock();
    let unique: HashSet<_> = addrs.iter().collect();
    assert_eq!(unique.len(), THREADS);
}
