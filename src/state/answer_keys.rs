//! Answer keys screen state.
//!
//! Created keys are appended to the list as returned by the server; a delete
//! resynchronizes the whole list. The screen also needs the course list to
//! fill its course picker, kept on a separate stream.

use crate::api::RemotePort;
use crate::model::{AnswerKey, AnswerKeyDraft, Course, EntityId};
use crate::store::{AnswerKeysStore, CoursesStore};

use super::sync::{append, fail, load_into};
use super::{Controller, StateReader, ViewState, ViewStateStream};

const LOAD_FAILED: &str = "Failed to load answer keys.";
const COURSES_FAILED: &str = "Failed to load courses.";
const CREATE_FAILED: &str = "Failed to add answer key.";
const DELETE_FAILED: &str = "Failed to delete answer key.";

pub struct AnswerKeysController<P> {
    answer_keys_store: AnswerKeysStore<P>,
    courses_store: CoursesStore<P>,
    answer_keys: ViewStateStream<Vec<AnswerKey>>,
    courses: ViewStateStream<Vec<Course>>,
}

impl<P: RemotePort> AnswerKeysController<P> {
    pub fn new(answer_keys_store: AnswerKeysStore<P>, courses_store: CoursesStore<P>) -> Self {
        Self {
            answer_keys_store,
            courses_store,
            answer_keys: ViewStateStream::new("answer_keys", ViewState::Loading),
            courses: ViewStateStream::new("answer_key_courses", ViewState::Loading),
        }
    }

    pub fn answer_keys(&self) -> StateReader<Vec<AnswerKey>> {
        self.answer_keys.reader()
    }

    pub fn courses(&self) -> StateReader<Vec<Course>> {
        self.courses.reader()
    }

    pub async fn load_answer_keys(&self) {
        load_into(&self.answer_keys, self.answer_keys_store.list(), LOAD_FAILED).await;
    }

    pub async fn load_courses(&self) {
        load_into(&self.courses, self.courses_store.list(), COURSES_FAILED).await;
    }

    pub async fn create_answer_key(&self, draft: AnswerKeyDraft) {
        match self.answer_keys_store.create(&draft).await {
            Ok(created) => {
                append(&self.answer_keys, created);
            }
            Err(err) => fail(&self.answer_keys, &err, CREATE_FAILED),
        }
    }

    pub async fn delete_answer_key(&self, id: EntityId) {
        match self.answer_keys_store.delete(id).await {
            Ok(()) => self.load_answer_keys().await,
            Err(err) => fail(&self.answer_keys, &err, DELETE_FAILED),
        }
    }
}

impl<P: RemotePort> Controller for AnswerKeysController<P> {
    fn close(&self) {
        self.answer_keys.close();
        self.courses.close();
    }
}
