//! The worker loop executed on each of a pool's threads.
use super::{Dequeued, ResultCollector, WorkQueue};
use std::fmt;
use std::io::Error as SpawnError;
use std::sync::Arc;
use std::thread::{Builder as ThreadBuilder, JoinHandle};
use std::time::Duration;

/// Identity of a worker within a batch. IDs run from `1` to the number of workers and are used
/// only for reporting.
pub type WorkerId = usize;

/// The terminal state a worker reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerExit {
    /// The queue was closed and had no tasks left.
    Drained,
    /// No task arrived within the idle timeout while the queue was still open.
    TimedOut,
}

impl fmt::Display for WorkerExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drained => f.write_str("drained"),
            Self::TimedOut => f.write_str("timed out"),
        }
    }
}

/// Summary returned by a worker once it has terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerReport {
    pub worker_id: WorkerId,
    pub exit: WorkerExit,
    /// Number of tasks this worker processed.
    pub processed: usize,
}

/// A worker bound to a queue and a collector.
#[derive(Debug)]
pub struct Worker {
    id: WorkerId,
    queue: Arc<WorkQueue>,
    collector: Arc<ResultCollector>,
    idle_timeout: Duration,
}

impl Worker {
    pub fn new(
        id: WorkerId,
        queue: Arc<WorkQueue>,
        collector: Arc<ResultCollector>,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            id,
            queue,
            collector,
            idle_timeout,
        }
    }

    pub fn id(&self) -> WorkerId {
        self.id
    }

    /// Runs the worker loop on the current thread until the queue is drained or the worker has
    /// been idle for longer than its timeout.
    ///
    /// Consumes the worker so that its references to the queue and collector are released as
    /// soon as the loop exits.
    pub fn run(self) -> WorkerReport {
        let worker = self.id;
        tracing::debug!(worker, "worker started");
        let mut processed = 0;
        let exit = loop {
            match self.queue.dequeue(self.idle_timeout) {
                Dequeued::Task(task) => {
                    tracing::debug!(worker, task = task.id(), "worker picked up task");
                    let output = task.process();
                    self.collector.append(output);
                    processed += 1;
                    tracing::debug!(worker, task = task.id(), "worker finished task");
                }
                Dequeued::Closed => {
                    tracing::info!(worker, processed, "worker finished all tasks");
                    break WorkerExit::Drained;
                }
                Dequeued::TimedOut => {
                    tracing::warn!(
                        worker,
                        processed,
                        timeout = ?self.idle_timeout,
                        "worker waited too long for a task; exiting"
                    );
                    break WorkerExit::TimedOut;
                }
            }
        };
        WorkerReport {
            worker_id: worker,
            exit,
            processed,
        }
    }

    /// Spawns a new thread from `thread_builder` that runs this worker.
    pub(crate) fn spawn(
        self,
        thread_builder: ThreadBuilder,
    ) -> Result<JoinHandle<WorkerReport>, SpawnError> {
        thread_builder.spawn(move || self.run())
    }
}
