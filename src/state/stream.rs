//! Single-writer, multi-reader streams of view states.
//!
//! A controller owns the `ViewStateStream` and is the only party that
//! publishes to it. Presentation code gets a [`StateReader`], which can read
//! the latest value or subscribe to every change in publish order.
//!
//! Loads that may overlap take a [`Ticket`] before they start. Only the most
//! recently issued ticket may publish, so a slow, older request can never
//! overwrite the result of a newer one.

use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;

use super::ViewState;

/// Permission to publish the outcome of one load
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

struct StreamInner<T> {
    current: ViewState<T>,
    subscribers: Vec<mpsc::UnboundedSender<ViewState<T>>>,
    issued: u64,
    closed: bool,
}

impl<T: Clone> StreamInner<T> {
    fn publish(&mut self, state: ViewState<T>) {
        self.subscribers.retain(|tx| tx.send(state.clone()).is_ok());
        self.current = state;
    }
}

/// Writable end of a view-state stream
pub struct ViewStateStream<T> {
    name: &'static str,
    inner: Arc<Mutex<StreamInner<T>>>,
}

impl<T> Clone for ViewStateStream<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + 'static> ViewStateStream<T> {
    pub fn new(name: &'static str, initial: ViewState<T>) -> Self {
        Self {
            name,
            inner: Arc::new(Mutex::new(StreamInner {
                current: initial,
                subscribers: Vec::new(),
                issued: 0,
                closed: false,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StreamInner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Latest published value
    pub fn current(&self) -> ViewState<T> {
        self.lock().current.clone()
    }

    /// Receive the current value now and every later publish
    pub fn subscribe(&self) -> Subscription<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.lock();
        if !inner.closed && tx.send(inner.current.clone()).is_ok() {
            inner.subscribers.push(tx);
        }
        Subscription { rx }
    }

    /// Read-only handle for presentation code
    pub fn reader(&self) -> StateReader<T> {
        StateReader {
            stream: self.clone(),
        }
    }

    /// Publish unconditionally. Ignored once the stream is closed.
    pub fn publish(&self, state: ViewState<T>) {
        let mut inner = self.lock();
        if inner.closed {
            tracing::trace!("{}: dropped {} after close", self.name, state.label());
            return;
        }
        tracing::trace!("{}: {}", self.name, state.label());
        inner.publish(state);
    }

    /// Derive the next value from the current one and publish it atomically.
    ///
    /// Returning `None` leaves the stream untouched.
    pub fn update(&self, f: impl FnOnce(&ViewState<T>) -> Option<ViewState<T>>) -> bool {
        let mut inner = self.lock();
        if inner.closed {
            return false;
        }
        match f(&inner.current) {
            Some(next) => {
                tracing::trace!("{}: {}", self.name, next.label());
                inner.publish(next);
                true
            }
            None => false,
        }
    }

    /// Start a load. Every earlier ticket becomes stale.
    pub fn begin(&self) -> Ticket {
        let mut inner = self.lock();
        inner.issued += 1;
        Ticket(inner.issued)
    }

    /// Publish if `ticket` is still the newest one issued
    pub fn publish_for(&self, ticket: Ticket, state: ViewState<T>) -> bool {
        let mut inner = self.lock();
        if inner.closed {
            return false;
        }
        if ticket.0 != inner.issued {
            tracing::debug!(
                "{}: dropped stale {} (request {}, latest {})",
                self.name,
                state.label(),
                ticket.0,
                inner.issued
            );
            return false;
        }
        tracing::trace!("{}: {}", self.name, state.label());
        inner.publish(state);
        true
    }

    /// Publish `state` and invalidate every load still in flight
    pub fn reset(&self, state: ViewState<T>) {
        self.begin();
        self.publish(state);
    }

    /// Stop accepting publishes and end every subscription
    pub fn close(&self) {
        let mut inner = self.lock();
        inner.closed = true;
        inner.subscribers.clear();
    }

    #[cfg(test)]
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }
}

/// Read-only view of a stream
pub struct StateReader<T> {
    stream: ViewStateStream<T>,
}

impl<T> Clone for StateReader<T> {
    fn clone(&self) -> Self {
        Self {
            stream: self.stream.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> StateReader<T> {
    pub fn current(&self) -> ViewState<T> {
        self.stream.current()
    }

    pub fn subscribe(&self) -> Subscription<T> {
        self.stream.subscribe()
    }
}

/// Values published to a stream, starting with the value at subscribe time.
///
/// Dropping the subscription unsubscribes. The subscription ends when the
/// stream is closed.
pub struct Subscription<T> {
    rx: mpsc::UnboundedReceiver<ViewState<T>>,
}

#[cfg(test)]
impl<T> Subscription<T> {
    /// Wait for the next value
    pub async fn next(&mut self) -> Option<ViewState<T>> {
        self.rx.recv().await
    }

    /// Take the next value if one is already queued
    pub fn try_next(&mut self) -> Option<ViewState<T>> {
        self.rx.try_recv().ok()
    }

    /// Drain everything queued so far
    pub fn drain(&mut self) -> Vec<ViewState<T>> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}

impl<T> Stream for Subscription<T> {
    type Item = ViewState<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream() -> ViewStateStream<Vec<u32>> {
        ViewStateStream::new("numbers", ViewState::Loading)
    }

    #[test]
    fn test_subscriber_sees_current_then_every_publish() {
        let stream = stream();
        stream.publish(ViewState::Empty);

        let mut sub = stream.reader().subscribe();
        stream.publish(ViewState::Loading);
        stream.publish(ViewState::Success(vec![1]));
        stream.publish(ViewState::Success(vec![1, 2]));

        assert_eq!(
            sub.drain(),
            vec![
                ViewState::Empty,
                ViewState::Loading,
                ViewState::Success(vec![1]),
                ViewState::Success(vec![1, 2]),
            ]
        );
        assert_eq!(stream.current(), ViewState::Success(vec![1, 2]));
    }

    #[test]
    fn test_dropped_subscription_is_removed() {
        let stream = stream();
        let sub = stream.subscribe();
        drop(sub);
        stream.publish(ViewState::Empty);
        assert!(stream.lock().subscribers.is_empty());
    }

    #[test]
    fn test_stale_ticket_cannot_publish() {
        let stream = stream();
        let first = stream.begin();
        let second = stream.begin();

        assert!(stream.publish_for(second, ViewState::Success(vec![2])));
        assert!(!stream.publish_for(first, ViewState::Success(vec![1])));
        assert_eq!(stream.current(), ViewState::Success(vec![2]));
    }

    #[test]
    fn test_update_applies_only_when_asked() {
        let stream = stream();
        assert!(!stream.update(|current| current.data().map(|d| ViewState::Success(d.clone()))));
        assert_eq!(stream.current(), ViewState::Loading);

        stream.publish(ViewState::Success(vec![1]));
        assert!(stream.update(|current| {
            let mut items = current.data()?.clone();
            items.push(2);
            Some(ViewState::Success(items))
        }));
        assert_eq!(stream.current(), ViewState::Success(vec![1, 2]));
    }

    #[tokio::test]
    async fn test_close_ends_subscriptions_and_ignores_publishes() {
        let stream = stream();
        let mut sub = stream.subscribe();
        assert_eq!(sub.next().await, Some(ViewState::Loading));

        let ticket = stream.begin();
        stream.close();
        stream.publish(ViewState::Empty);
        assert!(!stream.publish_for(ticket, ViewState::Empty));
        assert!(!stream.update(|_| Some(ViewState::Empty)));

        assert_eq!(sub.next().await, None);
        assert_eq!(stream.current(), ViewState::Loading);
        assert!(stream.is_closed());
    }
}
