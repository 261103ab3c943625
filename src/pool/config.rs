use parking_lot::Mutex;
use std::sync::LazyLock;
use std::time::Duration;

const DEFAULT_NUM_WORKERS: usize = 4;
const DEFAULT_NUM_TASKS: usize = 10;
const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(2);
const DEFAULT_TASK_COST: Duration = Duration::from_secs(1);
const DEFAULT_THREAD_NAME: &str = "taskhive-worker";

static DEFAULTS: LazyLock<Mutex<Config>> = LazyLock::new(|| {
    let mut config = Config::default();
    reset_config_defaults(&mut config);
    Mutex::new(config)
});

/// Configuration of a `Pool`. Options that are `None` fall back to the global defaults when the
/// `Pool` is built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub num_workers: Option<usize>,
    pub num_tasks: Option<usize>,
    pub idle_timeout: Option<Duration>,
    pub task_cost: Option<Duration>,
    pub thread_name: Option<String>,
    pub thread_stack_size: Option<usize>,
}

/// Sets the number of workers a `Builder` is configured with when using `Builder::default()`.
pub fn set_num_workers_default(num_workers: usize) {
    DEFAULTS.lock().num_workers = Some(num_workers);
}

/// Sets the number of workers a `Builder` is configured with when using `Builder::default()` to
/// the number of available CPU cores.
pub fn set_num_workers_default_all() {
    set_num_workers_default(num_cpus::get());
}

/// Sets the number of tasks per batch a `Builder` is configured with when using
/// `Builder::default()`.
pub fn set_num_tasks_default(num_tasks: usize) {
    DEFAULTS.lock().num_tasks = Some(num_tasks);
}

/// Sets the idle timeout a `Builder` is configured with when using `Builder::default()`.
pub fn set_idle_timeout_default(idle_timeout: Duration) {
    DEFAULTS.lock().idle_timeout = Some(idle_timeout);
}

/// Sets the simulated per-task cost a `Builder` is configured with when using
/// `Builder::default()`.
pub fn set_task_cost_default(task_cost: Duration) {
    DEFAULTS.lock().task_cost = Some(task_cost);
}

/// Resets all builder defaults to their original values.
pub fn reset_defaults() {
    let mut config = DEFAULTS.lock();
    reset_config_defaults(&mut config);
}

fn reset_config_defaults(config: &mut Config) {
    config.num_workers = Some(DEFAULT_NUM_WORKERS);
    config.num_tasks = Some(DEFAULT_NUM_TASKS);
    config.idle_timeout = Some(DEFAULT_IDLE_TIMEOUT);
    config.task_cost = Some(DEFAULT_TASK_COST);
    config.thread_name = Some(DEFAULT_THREAD_NAME.to_owned());
    config.thread_stack_size = None;
}

impl Config {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        DEFAULTS.lock().clone()
    }

    /// Returns a copy of this `Config` in which every unset option is taken from `other`.
    pub fn or(self, other: Config) -> Self {
        Self {
            num_workers: self.num_workers.or(other.num_workers),
            num_tasks: self.num_tasks.or(other.num_tasks),
            idle_timeout: self.idle_timeout.or(other.idle_timeout),
            task_cost: self.task_cost.or(other.task_cost),
            thread_name: self.thread_name.or(other.thread_name),
            thread_stack_size: self.thread_stack_size.or(other.thread_stack_size),
        }
    }

    /// Returns a copy of this `Config` in which every unset option is taken from the global
    /// defaults.
    pub fn or_defaults(self) -> Self {
        self.or(Self::with_defaults())
    }
}
