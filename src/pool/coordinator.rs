use super::{
    Config, PoolError, ResultCollector, WorkQueue, Worker, WorkerExit, WorkerId, WorkerReport,
};
use crate::panic::Panic;
use crate::task::{Task, TaskOutput};
use std::sync::Arc;
use std::thread::{Builder as ThreadBuilder, JoinHandle};
use std::time::Duration;

/// Runs batches of tasks on a fixed number of worker threads.
///
/// Each call to [`Pool::run`] is an independent batch: a new queue and collector are created,
/// `num_workers` threads are spawned, tasks `1..=num_tasks` are enqueued in order, the queue is
/// closed, and every worker is joined before the collected outputs are returned.
///
/// See the [module documentation](crate::pool) for details.
#[derive(Clone, Debug)]
pub struct Pool {
    num_workers: usize,
    num_tasks: usize,
    idle_timeout: Duration,
    task_cost: Duration,
    thread_name: Option<String>,
    thread_stack_size: Option<usize>,
}

/// The outcome of a completed batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Batch {
    /// Task outputs in the order they were collected.
    pub results: Vec<TaskOutput>,
    /// One report per worker, ordered by worker ID.
    pub reports: Vec<WorkerReport>,
}

impl Batch {
    /// Number of workers that exited because the queue was drained.
    pub fn num_drained(&self) -> usize {
        self.count_exits(WorkerExit::Drained)
    }

    /// Number of workers that exited because they were idle for too long.
    pub fn num_timed_out(&self) -> usize {
        self.count_exits(WorkerExit::TimedOut)
    }

    /// Consumes this `Batch` and returns the collected outputs.
    pub fn into_results(self) -> Vec<TaskOutput> {
        self.results
    }

    fn count_exits(&self, exit: WorkerExit) -> usize {
        self.reports
            .iter()
            .filter(|report| report.exit == exit)
            .count()
    }
}

impl Pool {
    /// Creates a new `Pool` from a fully-populated `config`. This should only be called from
    /// `Builder`; any option that is still unset falls back to a neutral value.
    pub(super) fn new(config: Config) -> Self {
        let pool = Self {
            num_workers: config.num_workers.unwrap_or(1),
            num_tasks: config.num_tasks.unwrap_or(0),
            idle_timeout: config.idle_timeout.unwrap_or(Duration::MAX),
            task_cost: config.task_cost.unwrap_or(Duration::ZERO),
            thread_name: config.thread_name,
            thread_stack_size: config.thread_stack_size,
        };
        if pool.num_workers == 0 {
            tracing::warn!(
                tasks = pool.num_tasks,
                "pool has no workers; tasks will be enqueued but never processed"
            );
        }
        if pool.idle_timeout <= pool.task_cost {
            tracing::warn!(
                idle_timeout = ?pool.idle_timeout,
                task_cost = ?pool.task_cost,
                "idle timeout does not exceed task cost; workers may exit before the queue drains"
            );
        }
        pool
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    pub fn num_tasks(&self) -> usize {
        self.num_tasks
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    pub fn task_cost(&self) -> Duration {
        self.task_cost
    }

    /// Runs a single batch and blocks until every worker has terminated.
    ///
    /// Returns an error if a worker thread could not be spawned or if a worker panicked. In both
    /// cases every worker that was started has been joined before the error is returned.
    pub fn run(&self) -> Result<Batch, PoolError> {
        let queue = Arc::new(WorkQueue::new(self.num_tasks));
        let collector = Arc::new(ResultCollector::with_capacity(self.num_tasks));
        tracing::debug!(
            workers = self.num_workers,
            tasks = self.num_tasks,
            "starting batch"
        );
        let mut handles = Vec::with_capacity(self.num_workers);
        for worker_id in 1..=self.num_workers {
            let worker = Worker::new(
                worker_id,
                Arc::clone(&queue),
                Arc::clone(&collector),
                self.idle_timeout,
            );
            match worker.spawn(self.thread_builder(worker_id)) {
                Ok(handle) => handles.push((worker_id, handle)),
                Err(source) => {
                    queue.close();
                    // the error from spawning takes precedence over any panic
                    let _ = join_all(handles);
                    return Err(PoolError::Spawn { worker_id, source });
                }
            }
        }
        let fed = self.feed(&queue);
        queue.close();
        let reports = join_all(handles);
        fed?;
        let reports = reports?;
        let results = collector.snapshot();
        tracing::info!(
            results = results.len(),
            workers = reports.len(),
            "batch complete"
        );
        Ok(Batch { results, reports })
    }

    /// Enqueues the tasks of a batch in ID order.
    fn feed(&self, queue: &WorkQueue) -> Result<(), PoolError> {
        for id in 1..=self.num_tasks {
            queue.enqueue(Task::new(id, self.task_cost))?;
        }
        Ok(())
    }

    fn thread_builder(&self, worker_id: WorkerId) -> ThreadBuilder {
        let mut builder = ThreadBuilder::new();
        if let Some(ref name) = self.thread_name {
            builder = builder.name(format!("{name}-{worker_id}"));
        }
        if let Some(stack_size) = self.thread_stack_size {
            builder = builder.stack_size(stack_size);
        }
        builder
    }
}

impl Default for Pool {
    /// Returns a `Pool` configured with the global defaults.
    fn default() -> Self {
        super::Builder::default().build()
    }
}

/// Joins every worker thread, even if an earlier one panicked. Returns the reports in worker ID
/// order, or the first panic encountered.
fn join_all(
    handles: Vec<(WorkerId, JoinHandle<WorkerReport>)>,
) -> Result<Vec<WorkerReport>, PoolError> {
    let mut reports = Vec::with_capacity(handles.len());
    let mut panic = None;
    for (worker_id, handle) in handles {
        match handle.join() {
            Ok(report) => reports.push(report),
            Err(payload) => {
                panic.get_or_insert_with(|| Panic::new(payload, Some(worker_id)));
            }
        }
    }
    match panic {
        Some(panic) => Err(panic.into()),
        None => Ok(reports),
    }
}

/// Runs a single batch of `task_count` tasks on `worker_count` workers, using the global defaults
/// for all other options, and returns the collected outputs.
pub fn run(worker_count: usize, task_count: usize) -> Result<Vec<TaskOutput>, PoolError> {
    super::Builder::default()
        .num_workers(worker_count)
        .num_tasks(task_count)
        .build()
        .run()
        .map(Batch::into_results)
}
