use super::{Config, Pool};
use std::time::Duration;

/// A `Builder` for a [`Pool`].
///
/// The configuration options available:
/// * `num_workers`: number of worker threads spawned for each batch.
/// * `num_tasks`: number of tasks in each batch; task IDs run from `1` to `num_tasks`.
/// * `idle_timeout`: maximum time a worker waits for a task before giving up. Should be longer
///   than `task_cost`.
/// * `task_cost`: simulated processing time of each task.
/// * `thread_name`: prefix of the name of each worker thread; the worker ID is appended.
/// * `thread_stack_size`: stack size (in bytes) of each worker thread.
///
/// Calling `Builder::new()` creates an unconfigured `Builder`, while calling `Builder::default()`
/// creates a `Builder` with every option set to the global default values, which can be changed
/// using the `taskhive::pool::set_*_default` functions. Options left unset when `build` is called
/// are taken from the global defaults.
///
/// # Examples
///
/// Build a [`Pool`] that runs batches of 20 tasks on eight workers:
///
/// ```
/// use std::time::Duration;
///
/// let pool = taskhive::pool::Builder::new()
///     .num_workers(8)
///     .num_tasks(20)
///     .task_cost(Duration::from_millis(1))
///     .idle_timeout(Duration::from_millis(500))
///     .build();
/// assert_eq!(pool.num_workers(), 8);
/// ```
#[derive(Clone, Debug)]
pub struct Builder(Config);

impl Builder {
    /// Returns a new `Builder` with no options configured.
    pub fn new() -> Self {
        Self(Config::empty())
    }

    /// Sets the number of worker threads spawned for each batch.
    pub fn num_workers(mut self, num: usize) -> Self {
        self.0.num_workers = Some(num);
        self
    }

    /// Specifies that the built [`Pool`] will spawn one worker per available CPU core.
    pub fn with_worker_per_core(mut self) -> Self {
        self.0.num_workers = Some(num_cpus::get());
        self
    }

    /// Sets the number of tasks in each batch.
    pub fn num_tasks(mut self, num: usize) -> Self {
        self.0.num_tasks = Some(num);
        self
    }

    /// Sets how long a worker waits for a task before exiting.
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.0.idle_timeout = Some(timeout);
        self
    }

    /// Sets the simulated processing time of each task.
    pub fn task_cost(mut self, cost: Duration) -> Self {
        self.0.task_cost = Some(cost);
        self
    }

    /// Sets the name prefix of the threads spawned by the built [`Pool`]. Each thread is named
    /// `<name>-<worker_id>`.
    pub fn thread_name<T: Into<String>>(mut self, name: T) -> Self {
        self.0.thread_name = Some(name.into());
        self
    }

    /// Sets the stack size (in bytes) for each of the threads spawned by the built [`Pool`].
    /// If not specified, threads have the stack size [specified in the `std::thread`
    /// documentation][thread].
    ///
    /// [thread]: https://doc.rust-lang.org/nightly/std/thread/index.html#stack-size
    pub fn thread_stack_size(mut self, size: usize) -> Self {
        self.0.thread_stack_size = Some(size);
        self
    }

    /// Consumes this `Builder` and returns a new [`Pool`].
    pub fn build(self) -> Pool {
        Pool::new(self.0.or_defaults())
    }
}

impl Default for Builder {
    /// Returns a new `Builder` with the global defaults configured.
    fn default() -> Self {
        Self(Config::with_defaults())
    }
}

impl From<Config> for Builder {
    fn from(config: Config) -> Self {
        Self(config)
    }
}
