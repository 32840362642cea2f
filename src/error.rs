use std::io;
use thiserror::Error;

/// Error type for pool and batch-driver operations.
#[derive(Error, Debug)]
pub enum PoolError {
    /// IO error, e.g. the OS refused to spawn a worker thread.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Serialization error while rendering a report.
    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Error while walking an input directory.
    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// A pool was configured with an unusable number of workers.
    #[error("Invalid worker count: {0}")]
    InvalidWorkerCount(u32),

    /// A batch driver was configured with a zero batch size.
    #[error("Invalid batch size: {0}")]
    InvalidBatchSize(usize),

    /// A task was submitted after the pool began shutting down.
    #[error("Thread pool is shut down")]
    ShutDown,

    /// A batch processor failed on its input.
    #[error("Batch failed: {0}")]
    Batch(String),
}

/// Result type alias for pool operations.
pub type Result<T> = std::result::Result<T, PoolError>;
