// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fixed-size worker pool with "wait until idle" semantics.
//!
//! Two pieces of state, each behind its own lock:
//!
//! - the task queue (plus the shutdown flag), which workers sleep on;
//! - the pending count, which `await_idle` sleeps on.
//!
//! Pending is bumped in `submit`, before the task is visible to any worker, and
//! dropped only after the task has finished running. A task that submits more
//! tasks therefore raises the count before its own decrement happens, so the
//! count cannot touch zero while nested work is outstanding. The crawler relies
//! on exactly this.
//!
//! A panicking task is caught, logged and forgotten. The decrement lives in a
//! drop guard, so it happens on the unwind path too.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::{Condvar, Mutex};

use crate::error::{Result, TrawlError};

type Task = Box<dyn FnOnce() + Send + 'static>;

struct QueueState {
    tasks: VecDeque<Task>,
    shutdown: bool,
}

struct Shared {
    queue: Mutex<QueueState>,
    available: Condvar,
    pending: Mutex<usize>,
    idle: Condvar,
}

impl Shared {
    fn new() -> Self {
        Self {
            queue: Mutex::new(QueueState {
                tasks: VecDeque::new(),
                shutdown: false,
            }),
            available: Condvar::new(),
            pending: Mutex::new(0),
            idle: Condvar::new(),
        }
    }

    fn finish_one(&self) {
        let mut pending = self.pending.lock();
        *pending -= 1;
        if *pending == 0 {
            self.idle.notify_all();
        }
    }
}

/// Decrements the pending count when dropped, whether the task returned or panicked.
struct PendingGuard<'a>(&'a Shared);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.finish_one();
    }
}

/// A pool of worker threads consuming a shared FIFO queue.
///
/// Share it behind an `Arc` when tasks need to submit follow-up work.
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use trawl::WorkPool;
///
/// let pool = WorkPool::new(4);
/// let hits = Arc::new(AtomicUsize::new(0));
/// for _ in 0..10 {
///     let hits = Arc::clone(&hits);
///     pool.submit(move || {
///         hits.fetch_add(1, Ordering::SeqCst);
///     })
///     .unwrap();
/// }
/// pool.await_idle();
/// assert_eq!(hits.load(Ordering::SeqCst), 10);
/// pool.join_all();
/// ```
pub struct WorkPool {
    shared: Arc<Shared>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    size: usize,
}

impl WorkPool {
    /// Start `threads` workers (at least one).
    ///
    /// If no worker thread can be spawned at all, the pool starts out shut
    /// down: `submit` fails with [`TrawlError::PoolShutdown`] instead of
    /// queueing work nobody will run.
    pub fn new(threads: usize) -> Self {
        let size = threads.max(1);
        let shared = Arc::new(Shared::new());

        let workers = (0..size)
            .map(|id| {
                let shared = Arc::clone(&shared);
                thread::Builder::new()
                    .name(format!("trawl-worker-{}", id))
                    .spawn(move || run_worker(&shared))
            })
            .filter_map(|spawned| match spawned {
                Ok(handle) => Some(handle),
                Err(e) => {
                    tracing::error!(error = %e, "failed to spawn worker thread");
                    None
                }
            })
            .collect();

        Self::with_workers(shared, workers, size)
    }

    fn with_workers(shared: Arc<Shared>, workers: Vec<JoinHandle<()>>, size: usize) -> Self {
        if workers.is_empty() {
            tracing::error!(size, "no worker threads started, pool is unusable");
            shared.queue.lock().shutdown = true;
        }
        Self {
            shared,
            workers: Mutex::new(workers),
            size,
        }
    }

    /// Number of worker threads this pool was asked to run.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Queue a task for execution by one of the workers.
    ///
    /// Fails with [`TrawlError::PoolShutdown`] once `shutdown` has been called.
    pub fn submit<F>(&self, task: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut queue = self.shared.queue.lock();
        if queue.shutdown {
            return Err(TrawlError::PoolShutdown);
        }

        // Counted before any worker can see it.
        *self.shared.pending.lock() += 1;
        queue.tasks.push_back(Box::new(task));
        drop(queue);

        self.shared.available.notify_one();
        Ok(())
    }

    /// Block until every submitted task, including tasks submitted by tasks, has finished.
    ///
    /// Must not be called from inside a pool task: that task is itself pending.
    pub fn await_idle(&self) {
        let mut pending = self.shared.pending.lock();
        while *pending > 0 {
            self.shared.idle.wait(&mut pending);
        }
    }

    /// Number of tasks submitted but not yet finished.
    pub fn pending(&self) -> usize {
        *self.shared.pending.lock()
    }

    /// Stop accepting work. Workers drain what is already queued, then exit.
    /// Running tasks are never interrupted.
    pub fn shutdown(&self) {
        self.shared.queue.lock().shutdown = true;
        self.shared.available.notify_all();
    }

    pub fn is_shutdown(&self) -> bool {
        self.shared.queue.lock().shutdown
    }

    /// `await_idle`, then `shutdown`, then wait for every worker thread to exit.
    /// The pool cannot be reused afterwards.
    pub fn join_all(&self) {
        self.await_idle();
        self.shutdown();
        self.join_workers();
    }

    fn join_workers(&self) {
        let current = thread::current().id();
        let handles: Vec<_> = self.workers.lock().drain(..).collect();
        for handle in handles {
            // The last Arc may be dropped on a worker; it cannot join itself.
            if handle.thread().id() == current {
                continue;
            }
            if handle.join().is_err() {
                tracing::warn!("worker thread exited abnormally");
            }
        }
    }
}

impl Drop for WorkPool {
    fn drop(&mut self) {
        self.shutdown();
        self.join_workers();
    }
}

impl std::fmt::Debug for WorkPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkPool")
            .field("size", &self.size)
            .field("pending", &self.pending())
            .finish()
    }
}

fn run_worker(shared: &Shared) {
    loop {
        let task = {
            let mut queue = shared.queue.lock();
            loop {
                if let Some(task) = queue.tasks.pop_front() {
                    break task;
                }
                if queue.shutdown {
                    return;
                }
                shared.available.wait(&mut queue);
            }
        };

        let _guard = PendingGuard(shared);
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(task)) {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_string());
            tracing::error!(
                worker = thread::current().name().unwrap_or("unnamed"),
                %message,
                "task panicked"
            );
        }
    }
}
