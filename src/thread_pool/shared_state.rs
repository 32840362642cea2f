use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use super::Job;
use crate::{PoolError, Result};

/// Mutable pool state. Every field is only touched with the mutex held.
pub(crate) struct PoolQueue {
    /// Jobs waiting for a worker, oldest first.
    pub(crate) jobs: VecDeque<Job>,
    /// Workers between dequeue and completion of a job.
    pub(crate) busy: usize,
    /// Set once, never cleared.
    pub(crate) shutdown: bool,
}

impl PoolQueue {
    fn is_drained(&self) -> bool {
        self.jobs.is_empty() && self.busy == 0
    }
}

/// State shared by a pool handle and all of its workers.
///
/// Lives as long as its longest holder, so detached workers can keep
/// draining after the handle is gone.
pub(crate) struct SharedPoolState {
    queue: Mutex<PoolQueue>,
    /// Signalled when a job is queued or shutdown begins.
    work_available: Condvar,
    /// Signalled when the queue is empty and no worker is busy.
    drained: Condvar,
}

impl SharedPoolState {
    pub(crate) fn new() -> Self {
        SharedPoolState {
            queue: Mutex::new(PoolQueue {
                jobs: VecDeque::new(),
                busy: 0,
                shutdown: false,
            }),
            work_available: Condvar::new(),
            drained: Condvar::new(),
        }
    }

    /// Jobs never run under the lock, so a poisoned guard still holds
    /// consistent bookkeeping and is safe to reuse.
    pub(crate) fn lock(&self) -> MutexGuard<'_, PoolQueue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends a job and wakes one idle worker.
    pub(crate) fn push(&self, job: Job) -> Result<()> {
        let mut queue = self.lock();
        if queue.shutdown {
            return Err(PoolError::ShutDown);
        }
        queue.jobs.push_back(job);
        drop(queue);
        self.work_available.notify_one();
        Ok(())
    }

    /// Blocks until a job is available and marks the caller busy.
    ///
    /// Returns `None` once shutdown is set and the queue is empty; queued
    /// work is always handed out before a worker is let go.
    pub(crate) fn next_job(&self) -> Option<Job> {
        let mut queue = self
            .work_available
            .wait_while(self.lock(), |q| !q.shutdown && q.jobs.is_empty())
            .unwrap_or_else(PoisonError::into_inner);
        let job = queue.jobs.pop_front()?;
        queue.busy += 1;
        Some(job)
    }

    /// Marks a worker idle again after its job returned or panicked.
    pub(crate) fn finish_job(&self) {
        let mut queue = self.lock();
        queue.busy -= 1;
        let drained = queue.is_drained();
        drop(queue);
        if drained {
            self.drained.notify_all();
        }
    }

    pub(crate) fn wait_drained(&self) {
        let _queue = self
            .drained
            .wait_while(self.lock(), |q| !q.is_drained())
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Sets the shutdown flag and wakes every idle worker.
    ///
    /// Returns `true` if this call performed the transition.
    pub(crate) fn shutdown(&self) -> bool {
        let mut queue = self.lock();
        let first = !queue.shutdown;
        queue.shutdown = true;
        drop(queue);
        self.work_available.notify_all();
        first
    }
}
