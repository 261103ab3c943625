//! The bounded, closable FIFO queue shared by a pool's workers.
use crate::channel::{self, Message, Receiver, ReceiverExt, Sender, TrySendError};
use crate::task::Task;
use parking_lot::Mutex;
use std::time::Duration;

/// Errors that may occur when trying to add a task to a `WorkQueue`. The rejected task is
/// returned to the caller.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum QueueError {
    #[error("Work queue is closed; {0} was not admitted")]
    Closed(Task),
    #[error("Work queue is full; {0} was not admitted")]
    Full(Task),
}

impl QueueError {
    /// Consumes this error and returns the task that was not admitted.
    pub fn into_task(self) -> Task {
        match self {
            Self::Closed(task) | Self::Full(task) => task,
        }
    }
}

/// The result of a call to `WorkQueue::dequeue`.
#[derive(Debug, PartialEq, Eq)]
pub enum Dequeued {
    /// The next task in FIFO order.
    Task(Task),
    /// The queue is closed and all tasks have been taken.
    Closed,
    /// No task arrived within the timeout and the queue is still open.
    TimedOut,
}

/// A bounded FIFO of `Task`s with a one-way close transition.
///
/// Closing drops the only `Sender`, so once the remaining tasks have been taken every consumer
/// observes the channel as disconnected.
#[derive(Debug)]
pub struct WorkQueue {
    tx: Mutex<Option<Sender<Task>>>,
    rx: Receiver<Task>,
    capacity: usize,
}

impl WorkQueue {
    /// Creates an open, empty queue that holds up to `capacity` tasks.
    pub fn new(capacity: usize) -> Self {
        // a zero-capacity channel is a rendezvous channel, which would make `enqueue` depend on
        // whether a consumer happens to be waiting
        let capacity = capacity.max(1);
        let (tx, rx) = channel::bounded(capacity);
        Self {
            tx: Mutex::new(Some(tx)),
            rx,
            capacity,
        }
    }

    /// Adds `task` to the back of the queue without blocking.
    ///
    /// Returns the task in an error if the queue has been closed or is at capacity.
    pub fn enqueue(&self, task: Task) -> Result<(), QueueError> {
        let tx = self.tx.lock();
        let Some(tx) = tx.as_ref() else {
            return Err(QueueError::Closed(task));
        };
        tx.try_send(task).map_err(|err| match err {
            TrySendError::Full(task) => QueueError::Full(task),
            TrySendError::Disconnected(task) => QueueError::Closed(task),
        })
    }

    /// Closes the queue so no more tasks are admitted. Tasks already in the queue remain
    /// available to consumers.
    ///
    /// Returns `true` if this call closed the queue, or `false` if it was already closed.
    pub fn close(&self) -> bool {
        self.tx.lock().take().is_some()
    }

    /// Returns `true` if the queue has been closed.
    pub fn is_closed(&self) -> bool {
        self.tx.lock().is_none()
    }

    /// Takes the next task from the front of the queue, waiting at most `timeout` for one to
    /// become available.
    ///
    /// If the queue is closed and empty, returns `Dequeued::Closed` immediately.
    pub fn dequeue(&self, timeout: Duration) -> Dequeued {
        match self.rx.recv_msg_timeout(timeout) {
            Message::Received(task) => Dequeued::Task(task),
            Message::Disconnected => Dequeued::Closed,
            Message::TimedOut => Dequeued::TimedOut,
        }
    }

    /// The number of tasks currently waiting in the queue.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Returns `true` if no tasks are waiting in the queue.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// The maximum number of tasks the queue can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::{Dequeued, QueueError, WorkQueue};
    use crate::task::Task;
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    const SHORT: Duration = Duration::from_millis(50);
    const LONG: Duration = Duration::from_secs(5);

    fn task(id: usize) -> Task {
        Task::new(id, Duration::ZERO)
    }

    #[test]
    fn test_fifo() {
        let queue = WorkQueue::new(3);
        for id in 1..=3 {
            queue.enqueue(task(id)).unwrap();
        }
        assert_eq!(queue.len(), 3);
        for id in 1..=3 {
            assert_eq!(queue.dequeue(SHORT), Dequeued::Task(task(id)));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_full() {
        let queue = WorkQueue::new(1);
        queue.enqueue(task(1)).unwrap();
        assert_eq!(queue.enqueue(task(2)), Err(QueueError::Full(task(2))));
    }

    #[test]
    fn test_zero_capacity() {
        let queue = WorkQueue::new(0);
        assert_eq!(queue.capacity(), 1);
        queue.enqueue(task(1)).unwrap();
    }

    #[test]
    fn test_enqueue_after_close() {
        let queue = WorkQueue::new(2);
        assert!(queue.close());
        assert!(queue.is_closed());
        let err = queue.enqueue(task(1)).unwrap_err();
        assert_eq!(err, QueueError::Closed(task(1)));
        assert_eq!(err.into_task(), task(1));
    }

    #[test]
    fn test_close_twice() {
        let queue = WorkQueue::new(1);
        assert!(queue.close());
        assert!(!queue.close());
        assert!(queue.is_closed());
    }

    #[test]
    fn test_drain_after_close() {
        let queue = WorkQueue::new(2);
        queue.enqueue(task(1)).unwrap();
        queue.enqueue(task(2)).unwrap();
        queue.close();
        assert_eq!(queue.dequeue(SHORT), Dequeued::Task(task(1)));
        assert_eq!(queue.dequeue(SHORT), Dequeued::Task(task(2)));
        // closed and drained: must not wait for the timeout
        let start = Instant::now();
        assert_eq!(queue.dequeue(LONG), Dequeued::Closed);
        assert_eq!(queue.dequeue(LONG), Dequeued::Closed);
        assert!(start.elapsed() < LONG);
    }

    #[test]
    fn test_timed_out_while_open() {
        let queue = WorkQueue::new(1);
        let start = Instant::now();
        assert_eq!(queue.dequeue(SHORT), Dequeued::TimedOut);
        assert!(start.elapsed() >= SHORT);
        assert!(!queue.is_closed());
    }

    #[test]
    fn test_close_wakes_waiting_consumer() {
        let queue = Arc::new(WorkQueue::new(1));
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                let start = Instant::now();
                (queue.dequeue(LONG), start.elapsed())
            })
        };
        thread::sleep(SHORT);
        queue.close();
        let (dequeued, elapsed) = consumer.join().unwrap();
        assert_eq!(dequeued, Dequeued::Closed);
        assert!(elapsed < LONG);
    }

    #[test]
    fn test_each_task_taken_once() {
        let n_tasks = 100;
        let queue = Arc::new(WorkQueue::new(n_tasks));
        for id in 1..=n_tasks {
            queue.enqueue(task(id)).unwrap();
        }
        queue.close();
        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    let mut ids = Vec::new();
                    while let Dequeued::Task(task) = queue.dequeue(LONG) {
                        ids.push(task.id());
                    }
                    ids
                })
            })
            .collect();
        let mut ids: Vec<_> = consumers
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=n_tasks).collect::<Vec<_>>());
    }
}
