//! Lifetime of one on-screen controller.

use std::future::Future;
use std::sync::Arc;

use futures::StreamExt;

use crate::task::TaskScope;

use super::StateReader;

/// A controller whose streams can be shut down
pub trait Controller: Send + Sync + 'static {
    /// Close every stream the controller owns
    fn close(&self);
}

/// A controller plus the tasks running its intents.
///
/// Dropping the screen closes the controller's streams and aborts every
/// task still in flight, so nothing is published for a view that is gone.
pub struct Screen<C: Controller> {
    controller: Arc<C>,
    tasks: TaskScope,
    watchers: TaskScope,
}

impl<C: Controller> Screen<C> {
    pub fn new(controller: C) -> Self {
        Self {
            controller: Arc::new(controller),
            tasks: TaskScope::new(),
            watchers: TaskScope::new(),
        }
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Run an intent in the background
    pub fn spawn<F, Fut>(&mut self, intent: F)
    where
        F: FnOnce(Arc<C>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.tasks.spawn(intent(Arc::clone(&self.controller)));
    }

    /// Call `notify` after every change to `reader`'s stream
    pub fn notify_on_change<T, N>(&mut self, reader: StateReader<T>, notify: N)
    where
        T: Clone + Send + 'static,
        N: Fn() + Send + 'static,
    {
        let changes = reader.subscribe();
        self.watchers.spawn(changes.for_each(move |_| {
            notify();
            futures::future::ready(())
        }));
    }

    /// Whether any intent is still running
    pub fn is_busy(&mut self) -> bool {
        self.tasks.in_flight() > 0
    }
}

impl<C: Controller> Drop for Screen<C> {
    fn drop(&mut self) {
        self.controller.close();
        self.tasks.abort_all();
        self.watchers.abort_all();
    }
}
