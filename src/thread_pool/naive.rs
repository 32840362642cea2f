use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread;

use log::error;

use super::ThreadPool;
use crate::Result;

/// Runs every job on a freshly spawned thread.
///
/// Threads are never reused. Jobs still in flight are counted so that
/// [`ThreadPool::wait`] blocks until the count drops back to zero. Serves as
/// the baseline in the spawn/wait benchmarks.
pub struct NaiveThreadPool {
    outstanding: Arc<Outstanding>,
}

/// Count of spawned jobs that have not finished yet.
#[derive(Default)]
struct Outstanding {
    count: Mutex<usize>,
    done: Condvar,
}

impl Outstanding {
    fn add(&self) {
        *self.count.lock().unwrap_or_else(PoisonError::into_inner) += 1;
    }

    fn release(&self) {
        let mut count = self.count.lock().unwrap_or_else(PoisonError::into_inner);
        *count -= 1;
        if *count == 0 {
            self.done.notify_all();
        }
    }
}

impl ThreadPool for NaiveThreadPool {
    fn new(_threads: u32) -> Result<Self> {
        Ok(NaiveThreadPool {
            outstanding: Arc::new(Outstanding::default()),
        })
    }

    fn spawn<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let outstanding = Arc::clone(&self.outstanding);
        outstanding.add();
        let spawned = thread::Builder::new().spawn({
            let outstanding = Arc::clone(&outstanding);
            move || {
                if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                    error!("Naive pool job panicked");
                }
                outstanding.release();
            }
        });
        if let Err(e) = spawned {
            outstanding.release();
            return Err(e.into());
        }
        Ok(())
    }

    fn wait(&self) {
        let _count = self
            .outstanding
            .done
            .wait_while(
                self.outstanding
                    .count
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner),
                |count| *count > 0,
            )
            .unwrap_or_else(PoisonError::into_inner);
    }
}
