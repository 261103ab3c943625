use crate::task::TaskOutput;
use parking_lot::Mutex;
use std::sync::Arc;

/// Append-only sequence of task outputs shared by all workers of a batch.
///
/// Outputs are stored in the order in which they are appended, i.e. completion order across
/// workers rather than task ID order.
#[derive(Debug, Default)]
pub struct ResultCollector {
    outputs: Mutex<Vec<TaskOutput>>,
}

impl ResultCollector {
    /// Creates an empty collector with room for `capacity` outputs.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            outputs: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    /// Appends `output` to the end of the sequence. The lock is held only for the push.
    pub fn append(&self, output: TaskOutput) {
        self.outputs.lock().push(output);
    }

    /// The number of outputs collected so far.
    pub fn len(&self) -> usize {
        self.outputs.lock().len()
    }

    /// Returns `true` if no outputs have been collected.
    pub fn is_empty(&self) -> bool {
        self.outputs.lock().is_empty()
    }

    /// Consumes the shared handle and returns the collected outputs.
    ///
    /// This should only be called once every worker holding a reference has been joined, in which
    /// case the outputs are moved out without copying. If other references are still alive, a
    /// copy of the outputs appended so far is returned instead.
    pub fn snapshot(self: Arc<Self>) -> Vec<TaskOutput> {
        match Arc::try_unwrap(self) {
            Ok(collector) => collector.outputs.into_inner(),
            Err(shared) => shared.outputs.lock().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ResultCollector;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_append_order() {
        let collector = Arc::new(ResultCollector::default());
        assert!(collector.is_empty());
        collector.append("a".into());
        collector.append("b".into());
        assert_eq!(collector.len(), 2);
        assert_eq!(collector.snapshot(), vec!["a", "b"]);
    }

    #[test]
    fn test_concurrent_appends() {
        let n_threads = 8;
        let n_appends = 1_000;
        let collector = Arc::new(ResultCollector::with_capacity(n_threads * n_appends));
        let handles: Vec<_> = (0..n_threads)
            .map(|t| {
                let collector = Arc::clone(&collector);
                thread::spawn(move || {
                    for i in 0..n_appends {
                        collector.append(format!("{t}-{i}"));
                    }
                })
            })
            .collect();
        handles.into_iter().for_each(|h| h.join().unwrap());
        let outputs = collector.snapshot();
        assert_eq!(outputs.len(), n_threads * n_appends);
        let distinct: HashSet<_> = outputs.iter().collect();
        assert_eq!(distinct.len(), outputs.len());
    }

    #[test]
    fn test_snapshot_while_shared() {
        let collector = Arc::new(ResultCollector::default());
        let other = Arc::clone(&collector);
        other.append("x".into());
        assert_eq!(collector.snapshot(), vec!["x"]);
        assert_eq!(other.len(), 1);
    }
}
