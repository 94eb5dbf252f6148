//! Derived queries over fetched records.

use std::collections::BTreeMap;

use crate::api::{ApiError, RemotePort};
use crate::model::{CourseResult, EntityId, Grades, Student, StudentAnswer};

use super::{StudentAnswersStore, StudentsStore};

/// Reduce a student's per-course results to their scores.
///
/// Returns `None` when the student has not been graded yet.
pub fn project_grades(student: &Student) -> Option<Grades> {
    let results = student.results.as_ref()?;
    Some(
        results
            .iter()
            .map(|(course, result)| (course.clone(), result.overall.score))
            .collect(),
    )
}

/// Keep the answers recorded for one student number, preserving order
pub fn filter_by_student(answers: Vec<StudentAnswer>, student_number: &str) -> Vec<StudentAnswer> {
    answers
        .into_iter()
        .filter(|answer| answer.student == student_number)
        .collect()
}

impl<P: RemotePort> StudentsStore<P> {
    /// Full per-course results for a student
    pub async fn results_for_student(
        &self,
        id: EntityId,
    ) -> Result<Option<BTreeMap<String, CourseResult>>, ApiError> {
        Ok(self.get(id).await?.results)
    }

    /// Course label → score for a student, `None` if ungraded
    pub async fn grades_for_student(&self, id: EntityId) -> Result<Option<Grades>, ApiError> {
        let student = self.get(id).await?;
        Ok(project_grades(&student))
    }
}

impl<P: RemotePort> StudentAnswersStore<P> {
    /// Answers for one student.
    ///
    /// The service has no per-student filter, so the whole collection is
    /// fetched and narrowed here.
    pub async fn answers_for_student(&self, student_number: &str) -> Result<Vec<StudentAnswer>, ApiError> {
        let all = self.list().await?;
        let total = all.len();
        let answers = filter_by_student(all, student_number);
        tracing::debug!(
            "{} of {} answers belong to student {}",
            answers.len(),
            total,
            student_number
        );
        Ok(answers)
    }
}
