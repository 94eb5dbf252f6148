//! Task ownership utilities
//!
//! Screens spawn their intents on the tokio runtime and must be able to stop
//! all of them when the user navigates away. `TaskScope` keeps the handles.

use std::future::Future;

use tokio::task::JoinHandle;

/// Tasks spawned on behalf of one owner.
///
/// Every task still running when the scope is dropped is aborted.
#[derive(Default)]
pub struct TaskScope {
    handles: Vec<JoinHandle<()>>,
}

impl TaskScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a task owned by this scope
    pub fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.reap();
        self.handles.push(tokio::spawn(task));
    }

    /// Forget tasks that already finished
    pub fn reap(&mut self) {
        self.handles.retain(|handle| !handle.is_finished());
    }

    /// Number of tasks still running
    pub fn in_flight(&mut self) -> usize {
        self.reap();
        self.handles.len()
    }

    pub fn abort_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        self.abort_all();
    }
}
