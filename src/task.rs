//! The unit of work processed by a pool.
use std::fmt;
use std::thread;
use std::time::Duration;

/// Identifier of a `Task` within a batch. IDs start at `1`.
pub type TaskId = usize;

/// The string produced by processing a `Task`.
pub type TaskOutput = String;

/// An immutable unit of work. Processing a `Task` always succeeds and takes `cost` to complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Task {
    id: TaskId,
    cost: Duration,
}

impl Task {
    /// Creates a new `Task` with the given `id` whose processing takes `cost`.
    pub fn new(id: TaskId, cost: Duration) -> Self {
        Self { id, cost }
    }

    /// The ID of this task within its batch.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// The simulated processing time of this task.
    pub fn cost(&self) -> Duration {
        self.cost
    }

    /// Processes this task: blocks the calling thread for the task's `cost` and then returns the
    /// output derived from the task ID. There is no early return, so the call is atomic from the
    /// point of view of the pool.
    pub fn process(&self) -> TaskOutput {
        if !self.cost.is_zero() {
            thread::sleep(self.cost);
        }
        output_for(self.id)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Task {}", self.id)
    }
}

/// Returns the output that processing the task with `id` produces.
pub fn output_for(id: TaskId) -> TaskOutput {
    format!("Processed Task {id}")
}
