#![deny(missing_docs)]

//! A fixed-size worker thread pool with a drain barrier.
//!
//! Jobs are queued in submission order and executed by a fixed set of
//! worker threads. [`ThreadPool::wait`] blocks until the queue is empty and
//! no worker is busy. A batch driver on top of the pool splits a list of
//! inputs into batches and measures throughput.

mod batch;
mod error;
/// Helpers for building input lists.
pub mod inputs;
/// Thread pool implementations.
pub mod thread_pool;

pub use batch::{BatchProcessor, BatchRunner, RunReport, SimulatedProcessor};
pub use error::{PoolError, Result};
pub use thread_pool::{NaiveThreadPool, SharedQueueThreadPool, ShutdownPolicy, ThreadPool};
