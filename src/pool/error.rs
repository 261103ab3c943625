use super::{QueueError, WorkerId};
use crate::panic::Panic;
use std::io::Error as SpawnError;

/// The errors that can prevent a batch from completing.
#[derive(thiserror::Error, Debug)]
pub enum PoolError {
    #[error("Failed to spawn thread for worker {worker_id}")]
    Spawn {
        worker_id: WorkerId,
        #[source]
        source: SpawnError,
    },
    #[error("Task was rejected by the work queue")]
    Enqueue(#[from] QueueError),
    /// Holds the original panic so the caller can inspect its payload or `resume` it.
    #[error(
        "Worker {} panicked: {}",
        .0.detail().copied().unwrap_or_default(),
        .0.message().unwrap_or("unknown cause")
    )]
    WorkerPanicked(Panic<WorkerId>),
}

impl From<Panic<WorkerId>> for PoolError {
    fn from(panic: Panic<WorkerId>) -> Self {
        Self::WorkerPanicked(panic)
    }
}
