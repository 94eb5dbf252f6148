//! Records exchanged with the grading service.
//!
//! Fetched records always carry their server-assigned `id`; drafts built
//! locally leave it empty and skip it when serialized.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Server-assigned identifier
pub type EntityId = i64;

/// Course label → score, as shown on the student detail view
pub type Grades = BTreeMap<String, f64>;

/// Optical form test groups (booklet types) and their server ids
pub const TEST_GROUPS: [(EntityId, &str); 4] = [(1, "A"), (2, "B"), (3, "C"), (4, "D")];

/// Answer letters printed on the forms
pub const ANSWER_LETTERS: [&str; 5] = ["A", "B", "C", "D", "E"];

/// Look up a test group id by its letter
pub fn test_group_id(name: &str) -> Option<EntityId> {
    let name = name.trim();
    TEST_GROUPS
        .iter()
        .find(|(_, group)| group.eq_ignore_ascii_case(name))
        .map(|(id, _)| *id)
}

/// A course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Form column the course is read from; null when no mapping exists yet
    #[serde(default)]
    pub column_number: Option<u32>,
    /// Test group id, only sent on write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_group: Option<EntityId>,
}

/// Answer key entry as sent on create/update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerKeyDraft {
    pub question_id: u32,
    pub correct_answer: String,
    pub test_group: EntityId,
    pub course: EntityId,
}

/// Answer key entry as returned by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerKey {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub question_id: u32,
    pub correct_answer: String,
    pub course_name: String,
    pub test_group_name: String,
}

/// Overall result of one course
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Overall {
    pub score: f64,
    pub correct: u32,
    pub incorrect: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourseResult {
    pub overall: Overall,
}

/// A student and, once graded, their per-course results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub student_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<BTreeMap<String, CourseResult>>,
}

impl Student {
    /// A new, not yet created student
    pub fn draft(student_number: impl Into<String>) -> Self {
        Self {
            id: None,
            student_number: student_number.into(),
            results: None,
        }
    }
}

/// One answer read from a student's form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentAnswer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub question_id: u32,
    #[serde(default)]
    pub selected_answer: Option<String>,
    #[serde(default)]
    pub is_correct: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Student number the answer belongs to
    pub student: String,
    #[serde(default)]
    pub test_group: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
}

impl StudentAnswer {
    /// When the answer was recorded, if the server sent a parseable timestamp
    pub fn recorded_at(&self) -> Option<DateTime<FixedOffset>> {
        let raw = self.updated_at.as_deref().or(self.created_at.as_deref())?;
        DateTime::parse_from_rfc3339(raw).ok()
    }
}

/// Column mapping as returned by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub column_number: u32,
    pub test_group: String,
    #[serde(default)]
    pub course: Option<String>,
}

/// Column mapping as sent on create/update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMappingDraft {
    pub column_number: u32,
    pub test_group: EntityId,
    pub course: EntityId,
}

/// Reply of the upload endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResponse {
    #[serde(alias = "mesaj")]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_draft_skips_id() {
        let course = Course {
            id: None,
            name: "Mathematics".to_string(),
            code: "MAT101".to_string(),
            description: None,
            column_number: Some(1),
            test_group: Some(2),
        };
        let json = serde_json::to_value(&course).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["test_group"], 2);
        assert_eq!(json["column_number"], 1);
    }

    #[test]
    fn test_course_from_server_without_mapping() {
        let course: Course = serde_json::from_str(
            r#"{"id": 3, "name": "Physics", "code": "FIZ101", "description": null,
                "column_number": null, "total_questions": 20}"#,
        )
        .unwrap();
        assert_eq!(course.id, Some(3));
        assert_eq!(course.column_number, None);
        assert_eq!(course.test_group, None);
    }

    #[test]
    fn test_student_results_decode() {
        let student: Student = serde_json::from_str(
            r#"{"id": 1, "student_number": "2021001",
                "results": {"MAT101": {"overall": {"score": 50.0, "correct": 5, "incorrect": 5}}}}"#,
        )
        .unwrap();
        let results = student.results.unwrap();
        assert_eq!(results["MAT101"].overall.correct, 5);

        let bare: Student = serde_json::from_str(r#"{"id": 2, "student_number": "2021002"}"#).unwrap();
        assert!(bare.results.is_none());
    }

    #[test]
    fn test_process_response_accepts_legacy_key() {
        let legacy: ProcessResponse = serde_json::from_str(r#"{"mesaj": "done"}"#).unwrap();
        let current: ProcessResponse = serde_json::from_str(r#"{"message": "done"}"#).unwrap();
        assert_eq!(legacy, current);
    }

    #[test]
    fn test_recorded_at_prefers_update_time() {
        let answer = StudentAnswer {
            id: Some(1),
            question_id: 4,
            selected_answer: Some("B".to_string()),
            is_correct: Some(false),
            created_at: Some("2024-05-01T09:00:00Z".to_string()),
            updated_at: Some("2024-05-02T10:30:00+03:00".to_string()),
            student: "2021001".to_string(),
            test_group: Some("A".to_string()),
            course: Some("Mathematics".to_string()),
        };
        let at = answer.recorded_at().unwrap();
        assert_eq!(at.to_rfc3339(), "2024-05-02T10:30:00+03:00");

        let unparsable = StudentAnswer {
            updated_at: Some("yesterday".to_string()),
            ..answer
        };
        assert!(unparsable.recorded_at().is_none());
    }

    #[test]
    fn test_test_group_lookup() {
        assert_eq!(test_group_id("a"), Some(1));
        assert_eq!(test_group_id(" D "), Some(4));
        assert_eq!(test_group_id("E"), None);
    }
}
