//! A fixed-batch worker pool.
//!
//! A [`Pool`] runs a batch of uniform-cost [`Task`](crate::task::Task)s on a fixed number of
//! worker threads. Each batch proceeds as follows:
//!
//! 1. An empty [`WorkQueue`] with room for the whole batch and an empty [`ResultCollector`] are
//!    created.
//! 2. `num_workers` worker threads are spawned, each holding a handle to the queue and to the
//!    collector and identified by a [`WorkerId`] in `1..=num_workers`.
//! 3. Tasks `1..=num_tasks` are enqueued in order. Because the queue can hold the whole batch,
//!    enqueueing never blocks.
//! 4. The queue is closed.
//! 5. Every worker thread is joined.
//! 6. The collector's outputs are returned in the order in which they were appended.
//!
//! Each worker repeatedly takes a task from the queue, processes it, and appends the output to
//! the collector. A worker exits in exactly one of two ways (see [`WorkerExit`]): when the queue
//! is closed and empty (`Drained`), or when it has waited longer than the idle timeout without
//! receiving a task (`TimedOut`). The idle timeout is a safety net against starvation: because
//! the queue is closed right after the batch is enqueued, workers normally drain it.
//!
//! # Creating a `Pool`
//!
//! Use [`Builder::new()`] to create an unconfigured `Builder`, or [`Builder::default()`] to create
//! a `Builder` configured with the global defaults. Options that are not set on the `Builder` are
//! taken from the global defaults when it is built.
//!
//! ```
//! use std::time::Duration;
//! use taskhive::pool::Builder;
//!
//! let pool = Builder::new()
//!     .num_workers(4)
//!     .num_tasks(10)
//!     .task_cost(Duration::from_millis(5))
//!     .idle_timeout(Duration::from_millis(500))
//!     .build();
//!
//! let batch = pool.run().unwrap();
//! assert_eq!(batch.results.len(), 10);
//! assert_eq!(batch.num_drained(), 4);
//! ```
//!
//! ## Global defaults
//!
//! The global defaults are 4 workers, 10 tasks, a 2 second idle timeout, a 1 second task cost,
//! and worker threads named `taskhive-worker-<id>`. They can be changed with the `set_*_default`
//! functions and restored with [`reset_defaults`].
mod builder;
mod collector;
mod config;
mod coordinator;
mod error;
mod queue;
mod worker;

pub use self::builder::Builder;
pub use self::collector::ResultCollector;
pub use self::config::{
    reset_defaults, set_idle_timeout_default, set_num_tasks_default, set_num_workers_default,
    set_num_workers_default_all, set_task_cost_default, Config,
};
pub use self::coordinator::{run, Batch, Pool};
pub use self::error::PoolError;
pub use self::queue::{Dequeued, QueueError, WorkQueue};
pub use self::worker::{Worker, WorkerExit, WorkerId, WorkerReport};

pub mod prelude {
    pub use super::{Batch, Builder, Pool, PoolError, WorkerExit, WorkerReport};
}
