use crate::Result;

/// A thread pool for executing jobs concurrently.
///
/// Implementors manage a set of worker threads, distribute incoming jobs
/// across them and offer a barrier that blocks until every job handed to
/// the pool so far has finished.
pub trait ThreadPool {
    /// Creates a new thread pool with the given number of threads.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be created (e.g., invalid size).
    fn new(threads: u32) -> Result<Self>
    where
        Self: Sized;

    /// Spawns a function into the thread pool.
    ///
    /// The function will be executed exactly once by one of the threads in
    /// the pool. A panic inside the job is contained by the pool; the job is
    /// responsible for reporting its own failures.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool no longer accepts work.
    fn spawn<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static;

    /// Blocks until no job is queued and no job is running.
    ///
    /// Jobs spawned before the call are guaranteed to have finished when it
    /// returns. Jobs spawned concurrently by other threads may or may not be.
    fn wait(&self);
}

/// A unit of work owned by the pool between `spawn` and execution.
pub(crate) type Job = Box<dyn FnOnce() + Send + 'static>;

mod naive;
mod shared_queue;
mod shared_state;

pub use self::naive::NaiveThreadPool;
pub use self::shared_queue::{Builder, SharedQueueThreadPool, ShutdownPolicy};
