//! Students screen state.
//!
//! The student list uses optimistic append on create. Selecting a student
//! fills two detail streams, grades and answers, from two separate requests
//! that never wait on or publish to each other.

use crate::api::RemotePort;
use crate::model::{EntityId, Grades, Student, StudentAnswer};
use crate::store::{StudentAnswersStore, StudentsStore};

use super::sync::{append, fail, load_into};
use super::{Controller, StateReader, ViewState, ViewStateStream};

const LOAD_FAILED: &str = "Failed to load students.";
const CREATE_FAILED: &str = "Failed to add student.";
const GRADES_FAILED: &str = "Failed to load grades.";
const ANSWERS_FAILED: &str = "Failed to load answers.";

pub struct StudentsController<P> {
    students_store: StudentsStore<P>,
    answers_store: StudentAnswersStore<P>,
    students: ViewStateStream<Vec<Student>>,
    grades: ViewStateStream<Option<Grades>>,
    answers: ViewStateStream<Vec<StudentAnswer>>,
}

impl<P: RemotePort> StudentsController<P> {
    pub fn new(students_store: StudentsStore<P>, answers_store: StudentAnswersStore<P>) -> Self {
        Self {
            students_store,
            answers_store,
            students: ViewStateStream::new("students", ViewState::Loading),
            grades: ViewStateStream::new("grades", ViewState::Empty),
            answers: ViewStateStream::new("answers", ViewState::Empty),
        }
    }

    pub fn students(&self) -> StateReader<Vec<Student>> {
        self.students.reader()
    }

    /// Grades of the selected student; `Success` always holds `Some`
    pub fn grades(&self) -> StateReader<Option<Grades>> {
        self.grades.reader()
    }

    pub fn answers(&self) -> StateReader<Vec<StudentAnswer>> {
        self.answers.reader()
    }

    pub async fn load_students(&self) {
        load_into(&self.students, self.students_store.list(), LOAD_FAILED).await;
    }

    pub async fn add_student(&self, draft: Student) {
        match self.students_store.create(&draft).await {
            Ok(created) => {
                append(&self.students, created);
            }
            Err(err) => fail(&self.students, &err, CREATE_FAILED),
        }
    }

    pub async fn load_grades(&self, id: EntityId) {
        load_into(&self.grades, self.students_store.grades_for_student(id), GRADES_FAILED).await;
    }

    pub async fn load_answers(&self, student_number: &str) {
        load_into(
            &self.answers,
            self.answers_store.answers_for_student(student_number),
            ANSWERS_FAILED,
        )
        .await;
    }

    /// Load both detail streams for one student concurrently
    pub async fn select_student(&self, student: &Student) {
        match student.id {
            Some(id) => {
                tokio::join!(self.load_grades(id), self.load_answers(&student.student_number));
            }
            // Not created on the server yet, so there is nothing to grade
            None => {
                self.grades.reset(ViewState::Empty);
                self.load_answers(&student.student_number).await;
            }
        }
    }

    /// Reset the detail streams when the selection is cleared
    pub fn clear_selection(&self) {
        self.grades.reset(ViewState::Empty);
        self.answers.reset(ViewState::Empty);
    }
}

impl<P: RemotePort> Controller for StudentsController<P> {
    fn close(&self) {
        self.students.close();
        self.grades.close();
        self.answers.close();
    }
}
