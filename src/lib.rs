//! A [`Pool`] distributes a fixed batch of uniform-cost [`Task`]s across a fixed number of worker
//! threads, collects each task's output in a shared, lock-guarded [`ResultCollector`], and
//! returns the collected outputs once every worker has stopped.
//!
//! Workers pull tasks from a bounded, closable [`WorkQueue`]. A worker exits when the queue has
//! been closed and drained, or when it has waited longer than its idle timeout without receiving
//! a task. Either way, the pool joins every worker before the outputs are read, so the outputs of
//! all completed tasks are visible to the caller.
//!
//! There is one optional feature:
//! * `flume`: use `flume`'s channels rather than `crossbeam-channel` for the work queue.
//!
//! # Examples
//!
//! Run a batch of eight tasks on four workers and write the outputs, one per line, to a sink:
//!
//! ```
//! use std::time::Duration;
//! use taskhive::pool::Builder;
//! use taskhive::sink::LineSink;
//!
//! let pool = Builder::new()
//!     .num_workers(4)
//!     .num_tasks(8)
//!     .task_cost(Duration::from_millis(10))
//!     .idle_timeout(Duration::from_millis(500))
//!     .build();
//! let batch = pool.run().unwrap();
//! assert_eq!(batch.results.len(), 8);
//!
//! let mut sink = LineSink::new(Vec::new());
//! let report = sink.write_lines(&batch.results).unwrap();
//! assert_eq!(report.written, 8);
//! let text = String::from_utf8(sink.into_inner()).unwrap();
//! assert!(text.lines().all(|line| line.starts_with("Processed Task ")));
//! ```
//!
//! The outputs are in completion order, which varies from run to run. With the global defaults
//! for the other options, [`pool::run`] runs a single batch and returns just the outputs:
//!
//! ```no_run
//! let results = taskhive::pool::run(4, 10).unwrap();
//! assert_eq!(results.len(), 10);
//! ```
//!
//! [`Pool`]: pool::Pool
//! [`ResultCollector`]: pool::ResultCollector
//! [`WorkQueue`]: pool::WorkQueue
//! [`Task`]: task::Task

pub mod channel;
mod panic;
pub mod pool;
pub mod sink;
pub mod task;

pub use panic::Panic;
