use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, error};

use super::shared_state::SharedPoolState;
use super::ThreadPool;
use crate::{PoolError, Result};

const DEFAULT_NAME_PREFIX: &str = "pool-worker";

/// What dropping a [`SharedQueueThreadPool`] does with its workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShutdownPolicy {
    /// Signal shutdown and return immediately.
    ///
    /// Workers keep draining already queued jobs in the background and exit
    /// on their own. Nothing guarantees they finish before the process
    /// exits; call [`ThreadPool::wait`] first if that matters.
    #[default]
    Detach,
    /// Signal shutdown, then join every worker.
    ///
    /// Drop blocks until all queued jobs have run.
    Join,
}

/// Configures and spawns a [`SharedQueueThreadPool`].
#[derive(Debug, Clone)]
pub struct Builder {
    threads: u32,
    name_prefix: String,
    shutdown_policy: ShutdownPolicy,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            threads: num_cpus::get() as u32,
            name_prefix: DEFAULT_NAME_PREFIX.to_owned(),
            shutdown_policy: ShutdownPolicy::default(),
        }
    }
}

impl Builder {
    /// Creates a builder sized to the number of logical CPUs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of worker threads. Must be at least one.
    pub fn threads(mut self, threads: u32) -> Self {
        self.threads = threads;
        self
    }

    /// Sets the worker thread name prefix; workers are named `{prefix}-{id}`.
    pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    /// Sets what happens to the workers when the pool is dropped.
    pub fn shutdown_policy(mut self, policy: ShutdownPolicy) -> Self {
        self.shutdown_policy = policy;
        self
    }

    /// Spawns the workers and returns the pool.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidWorkerCount`] for zero threads, or
    /// [`PoolError::Io`] if a worker thread cannot be spawned. In the latter
    /// case the workers spawned so far are told to shut down.
    pub fn build(self) -> Result<SharedQueueThreadPool> {
        if self.threads == 0 {
            return Err(PoolError::InvalidWorkerCount(self.threads));
        }

        let state = Arc::new(SharedPoolState::new());
        let mut workers = Vec::with_capacity(self.threads as usize);
        for id in 0..self.threads {
            let name = format!("{}-{id}", self.name_prefix);
            match spawn_worker(name, Arc::clone(&state)) {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    state.shutdown();
                    return Err(e);
                }
            }
        }
        debug!(
            "Started pool '{}' with {} workers",
            self.name_prefix, self.threads
        );

        Ok(SharedQueueThreadPool {
            state,
            workers,
            threads: self.threads,
            shutdown_policy: self.shutdown_policy,
        })
    }
}

/// A fixed-size thread pool using a shared job queue.
///
/// Workers pull jobs in submission order from a single mutex-guarded queue.
/// A panicking job is logged and contained; the worker keeps running and
/// the pool's bookkeeping stays intact, so [`ThreadPool::wait`] never hangs
/// on a failed job.
///
/// Calling [`ThreadPool::wait`] from inside a job running on the same pool
/// deadlocks, since the caller counts as busy.
pub struct SharedQueueThreadPool {
    state: Arc<SharedPoolState>,
    workers: Vec<JoinHandle<()>>,
    threads: u32,
    shutdown_policy: ShutdownPolicy,
}

impl SharedQueueThreadPool {
    /// Returns a [`Builder`] for a customized pool.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Stops accepting jobs and lets workers exit once the queue is empty.
    ///
    /// Idempotent. Jobs already queued still run.
    pub fn shutdown(&self) {
        if self.state.shutdown() {
            debug!("Pool shutting down, {} jobs queued", self.queued());
        }
    }

    /// Whether [`shutdown`](Self::shutdown) was called.
    pub fn is_shutdown(&self) -> bool {
        self.state.lock().shutdown
    }

    /// Number of worker threads.
    pub fn threads(&self) -> u32 {
        self.threads
    }

    /// Number of jobs waiting for a worker.
    pub fn queued(&self) -> usize {
        self.state.lock().jobs.len()
    }

    /// Number of workers currently running a job.
    pub fn busy(&self) -> usize {
        self.state.lock().busy
    }
}

impl ThreadPool for SharedQueueThreadPool {
    fn new(threads: u32) -> Result<Self> {
        Builder::new().threads(threads).build()
    }

    fn spawn<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.state.push(Box::new(job))
    }

    fn wait(&self) {
        self.state.wait_drained();
    }
}

/// Spawns a single worker thread that pulls jobs from the shared state
/// until shutdown.
fn spawn_worker(name: String, state: Arc<SharedPoolState>) -> Result<JoinHandle<()>> {
    let handle = thread::Builder::new().name(name.clone()).spawn(move || {
        while let Some(job) = state.next_job() {
            // Catch panics so the busy count is always released
            if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                error!("{name}: job panicked, continuing");
            }
            state.finish_job();
        }
        debug!("{name}: queue drained after shutdown, exiting");
    })?;
    Ok(handle)
}

impl Drop for SharedQueueThreadPool {
    fn drop(&mut self) {
        self.shutdown();
        if self.shutdown_policy == ShutdownPolicy::Detach {
            // Dropping the handles detaches the workers
            return;
        }

        let current = thread::current().id();
        for handle in self.workers.drain(..) {
            if handle.thread().id() == current {
                continue;
            }
            if handle.join().is_err() {
                error!("Worker thread terminated abnormally");
            }
        }
    }
}
