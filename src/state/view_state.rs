//! The four states a screen concern can be in.

use std::collections::BTreeMap;

/// What a screen shows for one concern
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    /// A request is in flight
    Loading,
    /// The request succeeded but returned nothing
    Empty,
    /// The request succeeded with data
    Success(T),
    /// The request failed; the message is shown to the user
    Error(String),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ViewState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            ViewState::Loading => "loading",
            ViewState::Empty => "empty",
            ViewState::Success(_) => "success",
            ViewState::Error(_) => "error",
        }
    }
}

impl<T: Payload> ViewState<T> {
    /// Map a finished fetch onto `Empty` or `Success`
    pub fn loaded(data: T) -> Self {
        if data.is_blank() {
            ViewState::Empty
        } else {
            ViewState::Success(data)
        }
    }
}

/// Fetched data that can come back with nothing in it
pub trait Payload {
    fn is_blank(&self) -> bool;
}

impl<T> Payload for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Payload for BTreeMap<K, V> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Payload> Payload for Option<T> {
    fn is_blank(&self) -> bool {
        self.as_ref().is_none_or(Payload::is_blank)
    }
}
