//! Entity stores: per-collection wrappers around the remote port.
//!
//! A store turns the port's generic operations into typed calls for one
//! entity and applies that entity's error policy. Stores hold nothing but a
//! port handle, so clones can be shared freely between screens.

mod derived;
mod upload;

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{ApiError, Collection, ErrorPolicy, RemotePort};
use crate::model::{
    AnswerKey, AnswerKeyDraft, ColumnMapping, ColumnMappingDraft, Course, EntityId, Student,
    StudentAnswer,
};

pub use upload::UploadStore;

/// A record type served from one collection
pub trait Entity: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Shape sent on create/update
    type Draft: Serialize + Send + Sync;

    const COLLECTION: Collection;

    /// How failures are reported to callers
    const ERROR_POLICY: ErrorPolicy = ErrorPolicy::Passthrough;

    fn id(&self) -> Option<EntityId>;
}

impl Entity for Course {
    type Draft = Course;
    const COLLECTION: Collection = Collection::Courses;
    const ERROR_POLICY: ErrorPolicy = ErrorPolicy::Normalize;

    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

impl Entity for AnswerKey {
    type Draft = AnswerKeyDraft;
    const COLLECTION: Collection = Collection::AnswerKeys;

    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

impl Entity for Student {
    type Draft = Student;
    const COLLECTION: Collection = Collection::Students;

    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

impl Entity for StudentAnswer {
    type Draft = StudentAnswer;
    const COLLECTION: Collection = Collection::StudentAnswers;

    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

impl Entity for ColumnMapping {
    type Draft = ColumnMappingDraft;
    const COLLECTION: Collection = Collection::ColumnMappings;

    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

/// CRUD access to one entity collection
pub struct EntityStore<P, E> {
    port: P,
    _entity: PhantomData<fn() -> E>,
}

pub type CoursesStore<P> = EntityStore<P, Course>;
pub type AnswerKeysStore<P> = EntityStore<P, AnswerKey>;
pub type StudentsStore<P> = EntityStore<P, Student>;
pub type StudentAnswersStore<P> = EntityStore<P, StudentAnswer>;
pub type ColumnMappingsStore<P> = EntityStore<P, ColumnMapping>;

impl<P: Clone, E> Clone for EntityStore<P, E> {
    fn clone(&self) -> Self {
        Self {
            port: self.port.clone(),
            _entity: PhantomData,
        }
    }
}

impl<P: RemotePort, E: Entity> EntityStore<P, E> {
    pub fn new(port: P) -> Self {
        Self {
            port,
            _entity: PhantomData,
        }
    }

    fn report(err: ApiError) -> ApiError {
        E::ERROR_POLICY.apply(err)
    }

    /// Fetch the whole collection
    pub async fn list(&self) -> Result<Vec<E>, ApiError> {
        self.port.list(E::COLLECTION).await.map_err(Self::report)
    }

    /// Fetch a single record
    pub async fn get(&self, id: EntityId) -> Result<E, ApiError> {
        self.port.get(E::COLLECTION, id).await.map_err(Self::report)
    }

    /// Create a record and return the server's copy
    pub async fn create(&self, draft: &E::Draft) -> Result<E, ApiError> {
        let created: E = self
            .port
            .create(E::COLLECTION, draft)
            .await
            .map_err(Self::report)?;
        tracing::info!("Created {:?} record {:?}", E::COLLECTION, created.id());
        Ok(created)
    }

    /// Replace a record and return the server's copy
    pub async fn update(&self, id: EntityId, draft: &E::Draft) -> Result<E, ApiError> {
        self.port
            .update(E::COLLECTION, id, draft)
            .await
            .map_err(Self::report)
    }

    /// Delete a record
    pub async fn delete(&self, id: EntityId) -> Result<(), ApiError> {
        self.port
            .delete(E::COLLECTION, id)
            .await
            .map_err(Self::report)?;
        tracing::info!("Deleted {:?} record {}", E::COLLECTION, id);
        Ok(())
    }
}
