//! Input forms and their validation.
//!
//! The GUI edits these as raw text; the CLI fills them from arguments. Both
//! go through `validate`, so nothing malformed reaches the server.

use crate::model::{
    test_group_id, AnswerKeyDraft, ColumnMappingDraft, Course, EntityId, Student, ANSWER_LETTERS,
};

/// Longest course code the server accepts
pub const MAX_CODE_LEN: usize = 10;

/// New course input
#[derive(Debug, Clone, Default)]
pub struct CourseForm {
    pub name: String,
    pub code: String,
    pub description: String,
    pub column_number: String,
    pub test_group: String,
}

impl CourseForm {
    pub fn validate(&self) -> Result<Course, String> {
        let name = self.name.trim();
        let code = self.code.trim();
        let column = self.column_number.trim();

        if code.chars().count() > MAX_CODE_LEN {
            return Err(format!("Course code can be at most {} characters", MAX_CODE_LEN));
        }
        if name.is_empty() || code.is_empty() || column.is_empty() {
            return Err("Please fill in name, code and column number".to_string());
        }

        let column_number = match column.parse::<u32>() {
            Ok(n) if n >= 1 => n,
            _ => return Err("Enter a valid column number".to_string()),
        };

        let test_group = test_group_id(&self.test_group)
            .ok_or_else(|| "Select a valid test group (A-D)".to_string())?;

        let description = self.description.trim();
        Ok(Course {
            id: None,
            name: name.to_string(),
            code: code.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            column_number: Some(column_number),
            test_group: Some(test_group),
        })
    }
}

/// New answer key entry input
#[derive(Debug, Clone, Default)]
pub struct AnswerKeyForm {
    pub question_id: String,
    pub correct_answer: String,
    pub test_group: Option<EntityId>,
    pub course: Option<EntityId>,
}

impl AnswerKeyForm {
    pub fn validate(&self) -> Result<AnswerKeyDraft, String> {
        let question_id = self
            .question_id
            .trim()
            .parse::<u32>()
            .map_err(|_| "Question number must be a whole number".to_string())?;

        let correct_answer = self.correct_answer.trim().to_uppercase();
        if !ANSWER_LETTERS.contains(&correct_answer.as_str()) {
            return Err(format!("Answer must be one of {}", ANSWER_LETTERS.join(", ")));
        }

        let test_group = self.test_group.ok_or_else(|| "Select a test group".to_string())?;
        let course = self.course.ok_or_else(|| "Select a course".to_string())?;

        Ok(AnswerKeyDraft {
            question_id,
            correct_answer,
            test_group,
            course,
        })
    }
}

/// New student input
#[derive(Debug, Clone, Default)]
pub struct StudentForm {
    pub student_number: String,
}

impl StudentForm {
    pub fn validate(&self) -> Result<Student, String> {
        let number = self.student_number.trim();
        if number.is_empty() {
            return Err("Student number cannot be empty".to_string());
        }
        Ok(Student::draft(number))
    }
}

/// Check a column mapping before it is sent
pub fn validate_mapping(column_number: u32, test_group: &str, course: EntityId) -> Result<ColumnMappingDraft, String> {
    if column_number < 1 {
        return Err("Column number must be at least 1".to_string());
    }
    let test_group =
        test_group_id(test_group).ok_or_else(|| format!("Unknown test group: {}", test_group))?;
    Ok(ColumnMappingDraft {
        column_number,
        test_group,
        course,
    })
}
