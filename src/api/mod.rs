//! Remote access to the grading service.
//!
//! This module provides:
//!
//! - `RemotePort`: the typed async operations every screen ultimately depends on
//! - `ApiClient`: the HTTP implementation of the port, built on reqwest
//! - `ImageUpload`: a validated form image ready to be posted
//! - `ApiError` and `ErrorPolicy`: failure classification and per-collection reporting
//!
//! Each entity collection follows the same REST layout (`<collection>/` for
//! list/create, `<collection>/<id>/` for read/update/delete). The two upload
//! endpoints take a single multipart image and answer with a message.

mod client;
mod error;
mod upload;

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::model::{EntityId, ProcessResponse};

pub use client::ApiClient;
pub use error::{ApiError, ErrorPolicy};
#[cfg(test)]
pub(crate) use error::UNKNOWN_ERROR;
pub use upload::ImageUpload;

#[cfg(test)]
pub(crate) use upload::fixtures as upload_fixtures;

/// Entity collections exposed by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Courses,
    AnswerKeys,
    Students,
    StudentAnswers,
    ColumnMappings,
}

impl Collection {
    /// Path of the collection relative to the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            Collection::Courses => "courses/",
            Collection::AnswerKeys => "answerkeys/",
            Collection::Students => "students/",
            Collection::StudentAnswers => "studentanswers/",
            Collection::ColumnMappings => "columnmappings/",
        }
    }

    /// Path of a single item
    pub fn item_path(&self, id: EntityId) -> String {
        format!("{}{}/", self.path(), id)
    }
}

/// Server-side image processing endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadEndpoint {
    /// Grade a filled-in student form
    ProcessForm,
    /// Read an answer key sheet
    ExtractAnswerKey,
}

impl UploadEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            UploadEndpoint::ProcessForm => "process/",
            UploadEndpoint::ExtractAnswerKey => "extract-answer-key/",
        }
    }
}

/// Typed network operations, one request each.
///
/// Implementations hold no per-screen state and are cheap to clone, so a
/// single instance is created at startup and handed to every store.
pub trait RemotePort: Clone + Send + Sync + 'static {
    /// `GET <collection>/`
    fn list<T>(&self, collection: Collection) -> impl Future<Output = Result<Vec<T>, ApiError>> + Send
    where
        T: DeserializeOwned + Send;

    /// `GET <collection>/<id>/`
    fn get<T>(&self, collection: Collection, id: EntityId) -> impl Future<Output = Result<T, ApiError>> + Send
    where
        T: DeserializeOwned + Send;

    /// `POST <collection>/`
    fn create<B, T>(&self, collection: Collection, body: &B) -> impl Future<Output = Result<T, ApiError>> + Send
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send;

    /// `PUT <collection>/<id>/`
    fn update<B, T>(
        &self,
        collection: Collection,
        id: EntityId,
        body: &B,
    ) -> impl Future<Output = Result<T, ApiError>> + Send
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send;

    /// `DELETE <collection>/<id>/`
    fn delete(&self, collection: Collection, id: EntityId) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `POST` a single multipart image
    fn upload(
        &self,
        endpoint: UploadEndpoint,
        image: ImageUpload,
    ) -> impl Future<Output = Result<ProcessResponse, ApiError>> + Send;
}
