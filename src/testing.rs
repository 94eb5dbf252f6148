//! In-memory remote port and record builders for tests.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::api::{ApiError, Collection, ImageUpload, RemotePort, UploadEndpoint};
use crate::model::{
    AnswerKey, AnswerKeyDraft, Course, CourseResult, EntityId, Overall, ProcessResponse, Student,
    StudentAnswer,
};

/// Releases a response held by [`FakePort::hold_next`]
pub struct Gate(oneshot::Sender<()>);

impl Gate {
    pub fn release(self) {
        let _ = self.0.send(());
    }
}

#[derive(Default)]
struct FakeState {
    tables: HashMap<Collection, Vec<Value>>,
    next_id: EntityId,
    failures: HashMap<Collection, VecDeque<ApiError>>,
    holds: HashMap<Collection, VecDeque<oneshot::Receiver<()>>>,
    created_replies: HashMap<Collection, VecDeque<Value>>,
    list_calls: HashMap<Collection, usize>,
    upload_message: Option<String>,
    upload_failures: VecDeque<ApiError>,
    upload_holds: VecDeque<oneshot::Receiver<()>>,
    uploads: Vec<(UploadEndpoint, String)>,
}

impl FakeState {
    fn table(&mut self, collection: Collection) -> &mut Vec<Value> {
        self.tables.entry(collection).or_default()
    }

    fn take_failure(&mut self, collection: Collection) -> Option<ApiError> {
        self.failures.get_mut(&collection)?.pop_front()
    }

    fn take_hold(&mut self, collection: Collection) -> Option<oneshot::Receiver<()>> {
        self.holds.get_mut(&collection)?.pop_front()
    }

    fn allocate_id(&mut self) -> EntityId {
        self.next_id += 1;
        self.next_id
    }

    fn position(&mut self, collection: Collection, id: EntityId) -> Result<usize, ApiError> {
        self.table(collection)
            .iter()
            .position(|row| row_id(row) == Some(id))
            .ok_or_else(|| ApiError::status(404, r#"{"detail": "Not found."}"#))
    }
}

fn row_id(row: &Value) -> Option<EntityId> {
    row.get("id").and_then(Value::as_i64)
}

fn with_id(mut value: Value, id: EntityId) -> Value {
    if let Value::Object(map) = &mut value {
        map.insert("id".to_string(), Value::from(id));
    }
    value
}

async fn wait(hold: Option<oneshot::Receiver<()>>) {
    if let Some(hold) = hold {
        // A dropped gate counts as released
        let _ = hold.await;
    }
}

/// Table-backed stand-in for the grading service.
///
/// Responses are computed when a call starts; a held call then waits for
/// its gate before returning, which lets tests resolve calls out of order.
#[derive(Clone, Default)]
pub struct FakePort {
    state: Arc<Mutex<FakeState>>,
}

impl FakePort {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    /// Replace a collection's contents
    pub fn seed<E: Serialize>(&self, collection: Collection, items: &[E]) {
        let rows: Vec<Value> = items
            .iter()
            .map(|item| serde_json::to_value(item).unwrap())
            .collect();
        let mut state = self.lock();
        let highest = rows.iter().filter_map(row_id).max().unwrap_or(0);
        state.next_id = state.next_id.max(highest);
        state.tables.insert(collection, rows);
    }

    /// Fail the next call on a collection
    pub fn fail_next(&self, collection: Collection, err: ApiError) {
        self.lock().failures.entry(collection).or_default().push_back(err);
    }

    /// Hold the next call on a collection until the gate is released
    pub fn hold_next(&self, collection: Collection) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.lock().holds.entry(collection).or_default().push_back(rx);
        Gate(tx)
    }

    /// Answer the next create on a collection with this record instead of echoing the draft
    pub fn reply_to_create<R: Serialize>(&self, collection: Collection, reply: &R) {
        let value = serde_json::to_value(reply).unwrap();
        self.lock()
            .created_replies
            .entry(collection)
            .or_default()
            .push_back(value);
    }

    /// Number of list requests made against a collection
    pub fn list_calls(&self, collection: Collection) -> usize {
        self.lock().list_calls.get(&collection).copied().unwrap_or(0)
    }

    /// Number of stored rows in a collection
    pub fn rows(&self, collection: Collection) -> usize {
        self.lock().tables.get(&collection).map_or(0, Vec::len)
    }

    pub fn set_upload_message(&self, message: &str) {
        self.lock().upload_message = Some(message.to_string());
    }

    pub fn fail_next_upload(&self, err: ApiError) {
        self.lock().upload_failures.push_back(err);
    }

    pub fn hold_next_upload(&self) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.lock().upload_holds.push_back(rx);
        Gate(tx)
    }

    /// Uploads received so far, as (endpoint, file name)
    pub fn uploads(&self) -> Vec<(UploadEndpoint, String)> {
        self.lock().uploads.clone()
    }
}

impl RemotePort for FakePort {
    async fn list<T>(&self, collection: Collection) -> Result<Vec<T>, ApiError>
    where
        T: DeserializeOwned + Send,
    {
        let (outcome, hold) = {
            let mut state = self.lock();
            *state.list_calls.entry(collection).or_default() += 1;
            let hold = state.take_hold(collection);
            let outcome = match state.take_failure(collection) {
                Some(err) => Err(err),
                None => Ok(state.table(collection).clone()),
            };
            (outcome, hold)
        };

        wait(hold).await;
        Ok(serde_json::from_value(Value::Array(outcome?))?)
    }

    async fn get<T>(&self, collection: Collection, id: EntityId) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send,
    {
        let (outcome, hold) = {
            let mut state = self.lock();
            let hold = state.take_hold(collection);
            let outcome = match state.take_failure(collection) {
                Some(err) => Err(err),
                None => state
                    .position(collection, id)
                    .map(|index| state.table(collection)[index].clone()),
            };
            (outcome, hold)
        };

        wait(hold).await;
        Ok(serde_json::from_value(outcome?)?)
    }

    async fn create<B, T>(&self, collection: Collection, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let draft = serde_json::to_value(body)?;
        let (outcome, hold) = {
            let mut state = self.lock();
            let hold = state.take_hold(collection);
            let outcome = match state.take_failure(collection) {
                Some(err) => Err(err),
                None => {
                    let reply = state
                        .created_replies
                        .get_mut(&collection)
                        .and_then(VecDeque::pop_front)
                        .unwrap_or(draft);
                    let id = match row_id(&reply) {
                        Some(id) => id,
                        None => state.allocate_id(),
                    };
                    let row = with_id(reply, id);
                    state.table(collection).push(row.clone());
                    Ok(row)
                }
            };
            (outcome, hold)
        };

        wait(hold).await;
        Ok(serde_json::from_value(outcome?)?)
    }

    async fn update<B, T>(&self, collection: Collection, id: EntityId, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let draft = serde_json::to_value(body)?;
        let (outcome, hold) = {
            let mut state = self.lock();
            let hold = state.take_hold(collection);
            let outcome = match state.take_failure(collection) {
                Some(err) => Err(err),
                None => state.position(collection, id).map(|index| {
                    let row = with_id(draft, id);
                    state.table(collection)[index] = row.clone();
                    row
                }),
            };
            (outcome, hold)
        };

        wait(hold).await;
        Ok(serde_json::from_value(outcome?)?)
    }

    async fn delete(&self, collection: Collection, id: EntityId) -> Result<(), ApiError> {
        let (outcome, hold) = {
            let mut state = self.lock();
            let hold = state.take_hold(collection);
            let outcome = match state.take_failure(collection) {
                Some(err) => Err(err),
                None => state.position(collection, id).map(|index| {
                    state.table(collection).remove(index);
                }),
            };
            (outcome, hold)
        };

        wait(hold).await;
        outcome
    }

    async fn upload(&self, endpoint: UploadEndpoint, image: ImageUpload) -> Result<ProcessResponse, ApiError> {
        let (outcome, hold) = {
            let mut state = self.lock();
            state.uploads.push((endpoint, image.file_name().to_string()));
            let hold = state.upload_holds.pop_front();
            let outcome = match state.upload_failures.pop_front() {
                Some(err) => Err(err),
                None => Ok(ProcessResponse {
                    message: state
                        .upload_message
                        .clone()
                        .unwrap_or_else(|| "Processing complete.".to_string()),
                }),
            };
            (outcome, hold)
        };

        wait(hold).await;
        outcome
    }
}

pub fn decode_error() -> ApiError {
    ApiError::Decode(serde_json::from_str::<u32>("<html>").unwrap_err())
}

pub fn course_draft(code: &str) -> Course {
    Course {
        id: None,
        name: format!("{} course", code),
        code: code.to_string(),
        description: None,
        column_number: Some(1),
        test_group: Some(1),
    }
}

pub fn course(id: EntityId, code: &str) -> Course {
    Course {
        id: Some(id),
        test_group: None,
        ..course_draft(code)
    }
}

pub fn answer_key_draft(question_id: u32, letter: &str) -> AnswerKeyDraft {
    AnswerKeyDraft {
        question_id,
        correct_answer: letter.to_string(),
        test_group: 1,
        course: 1,
    }
}

pub fn answer_key(id: EntityId, question_id: u32) -> AnswerKey {
    AnswerKey {
        id: Some(id),
        question_id,
        correct_answer: "A".to_string(),
        course_name: "Mathematics".to_string(),
        test_group_name: "A".to_string(),
    }
}

pub fn student(id: EntityId, number: &str) -> Student {
    Student {
        id: Some(id),
        ..Student::draft(number)
    }
}

pub fn graded_student(id: EntityId, number: &str) -> Student {
    let overall = |score, correct, incorrect| CourseResult {
        overall: Overall {
            score,
            correct,
            incorrect,
        },
    };
    let results: BTreeMap<String, CourseResult> = [
        ("MAT101".to_string(), overall(50.0, 5, 5)),
        ("TR101".to_string(), overall(60.0, 6, 4)),
    ]
    .into_iter()
    .collect();

    Student {
        results: Some(results),
        ..student(id, number)
    }
}

pub fn answer(id: EntityId, question_id: u32, student_number: &str) -> StudentAnswer {
    StudentAnswer {
        id: Some(id),
        question_id,
        selected_answer: Some("A".to_string()),
        is_correct: Some(question_id % 2 == 1),
        created_at: None,
        updated_at: None,
        student: student_number.to_string(),
        test_group: Some("A".to_string()),
        course: Some("Mathematics".to_string()),
    }
}
