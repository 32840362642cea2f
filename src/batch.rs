use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam::channel;
use log::{debug, info, warn};
use serde::Serialize;

use crate::thread_pool::ThreadPool;
use crate::{PoolError, Result};

/// Work applied to one batch of inputs.
///
/// Processors are cloned into every pool job, so they should be cheap to
/// clone (e.g. share heavy state through an `Arc`).
pub trait BatchProcessor: Clone + Send + 'static {
    /// Processes a batch and returns how many inputs were handled.
    fn process(&self, batch: &[String]) -> Result<usize>;
}

/// A processor that only burns time, standing in for a real model.
#[derive(Debug, Clone)]
pub struct SimulatedProcessor {
    per_item: Duration,
}

impl SimulatedProcessor {
    /// Creates a processor that sleeps `per_item` for each input.
    pub fn new(per_item: Duration) -> Self {
        SimulatedProcessor { per_item }
    }
}

impl BatchProcessor for SimulatedProcessor {
    fn process(&self, batch: &[String]) -> Result<usize> {
        if let Some(pos) = batch.iter().position(|input| input.is_empty()) {
            return Err(PoolError::Batch(format!("empty input at position {pos}")));
        }
        let cost = u32::try_from(batch.len())
            .ok()
            .and_then(|n| self.per_item.checked_mul(n))
            .ok_or_else(|| {
                PoolError::Batch(format!("simulated cost overflows for {} inputs", batch.len()))
            })?;
        thread::sleep(cost);
        Ok(batch.len())
    }
}

/// Throughput figures from one [`BatchRunner::run`].
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Number of inputs handed to the runner.
    pub inputs: usize,
    /// Inputs reported as processed by successful batches.
    pub processed: usize,
    /// Number of batches submitted.
    pub batches: usize,
    /// Batches that returned an error or panicked.
    pub failed_batches: usize,
    /// Configured batch size.
    pub batch_size: usize,
    /// Wall time from first submit to drain.
    pub elapsed_secs: f64,
}

impl RunReport {
    /// Mean wall time per input in milliseconds.
    pub fn mean_ms(&self) -> f64 {
        if self.inputs == 0 {
            return 0.0;
        }
        self.elapsed_secs * 1000.0 / self.inputs as f64
    }

    /// Inputs per second.
    pub fn fps(&self) -> f64 {
        if self.inputs == 0 || self.elapsed_secs == 0.0 {
            return 0.0;
        }
        self.inputs as f64 / self.elapsed_secs
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "// processed {} inputs, took {:.2}s, mean: {:.2}ms, FPS: {:.2}, \
             batch size: {}, failed batches: {}",
            self.inputs,
            self.elapsed_secs,
            self.mean_ms(),
            self.fps(),
            self.batch_size,
            self.failed_batches
        )
    }
}

/// Splits inputs into batches and runs them on a thread pool.
///
/// Generic over the pool `P` and the processor `B`.
pub struct BatchRunner<P: ThreadPool, B: BatchProcessor> {
    pool: P,
    processor: B,
    batch_size: usize,
}

impl<P: ThreadPool, B: BatchProcessor> BatchRunner<P, B> {
    /// Creates a runner.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidBatchSize`] if `batch_size` is zero.
    pub fn new(pool: P, processor: B, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(PoolError::InvalidBatchSize(batch_size));
        }
        Ok(BatchRunner {
            pool,
            processor,
            batch_size,
        })
    }

    /// Returns the underlying pool.
    pub fn pool(&self) -> &P {
        &self.pool
    }

    /// Processes all `inputs` and blocks until every batch has finished.
    ///
    /// Batch failures are counted in the report rather than returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool rejects a batch.
    pub fn run(&self, inputs: &[String]) -> Result<RunReport> {
        let start = Instant::now();
        let (tx, rx) = channel::unbounded::<Result<usize>>();

        let mut batches = 0;
        for batch in inputs.chunks(self.batch_size) {
            let batch = batch.to_vec();
            let processor = self.processor.clone();
            let tx = tx.clone();
            self.pool.spawn(move || {
                let outcome = processor.process(&batch);
                // The receiver lives until after wait() returns
                let _ = tx.send(outcome);
            })?;
            batches += 1;
        }
        drop(tx);
        debug!("Submitted {} batches", batches);

        self.pool.wait();
        let elapsed = start.elapsed();

        let mut processed = 0;
        let mut succeeded = 0;
        for outcome in rx.try_iter() {
            match outcome {
                Ok(n) => {
                    processed += n;
                    succeeded += 1;
                }
                Err(e) => warn!("{}", e),
            }
        }

        let report = RunReport {
            inputs: inputs.len(),
            processed,
            batches,
            // Panicked batches never report back
            failed_batches: batches - succeeded,
            batch_size: self.batch_size,
            elapsed_secs: elapsed.as_secs_f64(),
        };
        info!(
            "Ran {} batches, {} failed",
            report.batches, report.failed_batches
        );
        Ok(report)
    }
}
