#![forbid(unsafe_code)]

//! Cooperative progress/cancellation protocol shared by MetGem's long-running
//! computations (layout, scoring, I/O).
//!
//! A [`Worker`] runs on a dedicated thread, polls its [`StopFlag`] only at safe
//! resumption points, reports coarse integer progress through the
//! [`WorkerContext`], and terminates with exactly one of: a finished value, a
//! [`Outcome::Cancelled`] marker, or an error. Cancellation is a normal terminal
//! outcome, not an error.

pub mod registry;

pub use registry::{Ticket, WorkerSet};

use crossbeam_channel::{Receiver, Sender, unbounded};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

/// Shared cooperative cancellation flag.
///
/// `stop()` is a request, not a preemption: the owning worker observes it at its
/// next safe point and discards all work done in the current run.
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Terminal outcome of a worker run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Finished(T),
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    pub fn finished(self) -> Option<T> {
        match self {
            Outcome::Finished(value) => Some(value),
            Outcome::Cancelled => None,
        }
    }
}

/// Handed to [`Worker::run`]; carries the stop flag and the progress channel.
#[derive(Debug, Clone)]
pub struct WorkerContext {
    stop: StopFlag,
    progress: Sender<usize>,
}

impl WorkerContext {
    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    pub fn stop_flag(&self) -> &StopFlag {
        &self.stop
    }

    /// Emits a cumulative progress count. Dropped receivers are ignored; progress
    /// is advisory.
    pub fn report(&self, count: usize) {
        let _ = self.progress.send(count);
    }
}

pub trait Worker: Send + 'static {
    type Output: Send + 'static;
    type Error: std::error::Error + Send + 'static;

    fn run(&mut self, ctx: &WorkerContext) -> Result<Outcome<Self::Output>, Self::Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum JoinError<E: std::error::Error> {
    #[error(transparent)]
    Failed(E),

    #[error("worker thread panicked")]
    Panicked,
}

/// Handle to a spawned worker: cancellation, progress stream, terminal outcome.
#[derive(Debug)]
pub struct WorkerHandle<T, E> {
    stop: StopFlag,
    progress: Receiver<usize>,
    thread: thread::JoinHandle<Result<Outcome<T>, E>>,
}

impl<T, E: std::error::Error> WorkerHandle<T, E> {
    /// Requests cancellation; takes effect at the worker's next safe point.
    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn stop_flag(&self) -> &StopFlag {
        &self.stop
    }

    /// Cumulative progress counts, in emission order.
    pub fn progress(&self) -> &Receiver<usize> {
        &self.progress
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Blocks until the worker terminates and returns its outcome.
    pub fn join(self) -> Result<Outcome<T>, JoinError<E>> {
        match self.thread.join() {
            Ok(Ok(outcome)) => Ok(outcome),
            Ok(Err(err)) => Err(JoinError::Failed(err)),
            Err(_) => Err(JoinError::Panicked),
        }
    }
}

/// Spawns `worker` on a dedicated thread.
pub fn spawn<W: Worker>(worker: W) -> WorkerHandle<W::Output, W::Error> {
    spawn_with_ticket(worker, None)
}

/// Spawns `worker` registered in `set`; the set observes the worker for the
/// lifetime of its thread.
pub fn spawn_in<W: Worker>(set: &WorkerSet, worker: W) -> WorkerHandle<W::Output, W::Error> {
    spawn_with_ticket(worker, Some(set.ticket()))
}

fn spawn_with_ticket<W: Worker>(
    mut worker: W,
    ticket: Option<Ticket>,
) -> WorkerHandle<W::Output, W::Error> {
    let stop = StopFlag::new();
    let (progress_tx, progress_rx) = unbounded();
    let ctx = WorkerContext {
        stop: stop.clone(),
        progress: progress_tx,
    };
    let thread = thread::spawn(move || {
        // The ticket lives exactly as long as the run, so the registry's idle/busy
        // transitions track thread lifetime, not handle lifetime.
        let _ticket = ticket;
        tracing::debug!("worker started");
        let result = worker.run(&ctx);
        match &result {
            Ok(Outcome::Finished(_)) => tracing::debug!("worker finished"),
            Ok(Outcome::Cancelled) => tracing::debug!("worker cancelled"),
            Err(_) => tracing::debug!("worker failed"),
        }
        result
    });
    WorkerHandle {
        stop,
        progress: progress_rx,
        thread,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct CountTo {
        limit: usize,
    }

    impl Worker for CountTo {
        type Output = usize;
        type Error = std::convert::Infallible;

        fn run(&mut self, ctx: &WorkerContext) -> Result<Outcome<usize>, Self::Error> {
            let mut total = 0;
            for _ in 0..self.limit {
                if ctx.is_stopped() {
                    return Ok(Outcome::Cancelled);
                }
                total += 1;
                ctx.report(total);
            }
            Ok(Outcome::Finished(total))
        }
    }

    #[test]
    fn progress_is_streamed_and_outcome_returned() {
        let handle = spawn(CountTo { limit: 3 });
        let outcome = handle.join().unwrap();
        assert_eq!(outcome, Outcome::Finished(3));
    }

    #[test]
    fn stop_before_first_safe_point_cancels() {
        let handle = spawn(CountTo { limit: usize::MAX });
        handle.stop();
        let outcome = handle.join().unwrap();
        // The worker may have made some progress before observing the flag, but it
        // must terminate with Cancelled, not Finished.
        assert!(outcome.is_cancelled());
    }
}
