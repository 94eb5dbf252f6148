//! Transition rules shared by every controller.

use std::future::Future;

use crate::api::ApiError;

use super::{Payload, ViewState, ViewStateStream};

/// Message shown for a failure, or `fallback` if the error renders empty
pub fn error_message(err: &ApiError, fallback: &str) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

/// Run one load against `stream`.
///
/// Publishes `Loading`, then `Empty`, `Success` or `Error` for the outcome.
/// Both publishes are dropped if a newer load started in the meantime.
pub async fn load_into<T, F>(stream: &ViewStateStream<T>, fetch: F, fallback: &str)
where
    T: Payload + Clone + Send + 'static,
    F: Future<Output = Result<T, ApiError>>,
{
    let ticket = stream.begin();
    stream.publish_for(ticket, ViewState::Loading);

    let outcome = match fetch.await {
        Ok(data) => ViewState::loaded(data),
        Err(err) => {
            tracing::warn!("{}: {}", stream.name(), err);
            ViewState::Error(error_message(&err, fallback))
        }
    };
    stream.publish_for(ticket, outcome);
}

/// Append a created item to a populated list.
///
/// Any state other than `Success` is left alone; the next load picks the
/// item up.
pub fn append<T>(stream: &ViewStateStream<Vec<T>>, item: T) -> bool
where
    T: Clone + Send + 'static,
{
    let appended = stream.update(|current| {
        let mut items = current.data()?.clone();
        items.push(item);
        Some(ViewState::Success(items))
    });
    if !appended {
        tracing::debug!("{}: not showing data, created item not appended", stream.name());
    }
    appended
}

/// Surface a failed mutation on the stream it targeted.
///
/// Loads still in flight are invalidated so they cannot replace the error.
pub fn fail(stream: &ViewStateStream<impl Clone + Send + 'static>, err: &ApiError, fallback: &str) {
    tracing::warn!("{}: {}", stream.name(), err);
    stream.reset(ViewState::Error(error_message(err, fallback)));
}
