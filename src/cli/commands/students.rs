//! Student commands

use std::collections::BTreeMap;

use anyhow::{anyhow, Result};
use clap::Subcommand;

use crate::api::ApiClient;
use crate::cli::output::{format_table, or_dash, print_formatted, print_result, OutputFormat};
use crate::forms::StudentForm;
use crate::model::{CourseResult, EntityId, Student, StudentAnswer};
use crate::store::{StudentAnswersStore, StudentsStore};

#[derive(Subcommand, Debug)]
pub enum StudentCommands {
    /// List students
    List,

    /// Add a student
    Add {
        student_number: String,
    },

    /// Show a student's per-course results
    Grades {
        id: EntityId,
    },

    /// Show the answers recorded for a student number
    Answers {
        student_number: String,
    },
}

pub async fn run(command: StudentCommands, client: ApiClient, format: OutputFormat, quiet: bool) -> Result<()> {
    match command {
        StudentCommands::List => {
            let students = StudentsStore::new(client).list().await?;
            print_formatted(students.as_slice(), format, format_students);
        }
        StudentCommands::Add { student_number } => {
            let draft = StudentForm { student_number }.validate().map_err(|e| anyhow!(e))?;
            let created = StudentsStore::new(client).create(&draft).await?;
            print_result(
                &created,
                format,
                &format!("Added student {}", created.student_number),
                quiet,
            );
        }
        StudentCommands::Grades { id } => {
            let results = StudentsStore::new(client).results_for_student(id).await?;
            print_formatted(&results, format, |r| format_results(r.as_ref()));
        }
        StudentCommands::Answers { student_number } => {
            let answers = StudentAnswersStore::new(client)
                .answers_for_student(&student_number)
                .await?;
            print_formatted(answers.as_slice(), format, |a| format_answers(&student_number, a));
        }
    }

    Ok(())
}

fn format_students(students: &[Student]) -> String {
    if students.is_empty() {
        return "No students yet.".to_string();
    }

    let rows: Vec<Vec<String>> = students
        .iter()
        .map(|s| {
            let graded = s.results.as_ref().map_or(0, |r| r.len());
            vec![
                s.id.map(|id| id.to_string()).unwrap_or_default(),
                s.student_number.clone(),
                graded.to_string(),
            ]
        })
        .collect();

    format_table(&["ID", "NUMBER", "COURSES"], &rows)
}

fn format_results(results: Option<&BTreeMap<String, CourseResult>>) -> String {
    let Some(results) = results.filter(|r| !r.is_empty()) else {
        return "Not graded yet.".to_string();
    };

    let rows: Vec<Vec<String>> = results
        .iter()
        .map(|(course, result)| {
            let overall = result.overall;
            vec![
                course.clone(),
                format!("{:.1}", overall.score),
                overall.correct.to_string(),
                overall.incorrect.to_string(),
            ]
        })
        .collect();

    format_table(&["COURSE", "SCORE", "CORRECT", "WRONG"], &rows)
}

fn format_answers(student_number: &str, answers: &[StudentAnswer]) -> String {
    if answers.is_empty() {
        return format!("No answers recorded for {}.", student_number);
    }

    let rows: Vec<Vec<String>> = answers
        .iter()
        .map(|a| {
            let verdict = match a.is_correct {
                Some(true) => "correct",
                Some(false) => "wrong",
                None => "-",
            };
            vec![
                or_dash(a.course.as_deref()),
                or_dash(a.test_group.as_deref()),
                a.question_id.to_string(),
                or_dash(a.selected_answer.as_deref()),
                verdict.to_string(),
                a.recorded_at()
                    .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();

    format_table(&["COURSE", "GROUP", "QUESTION", "ANSWER", "RESULT", "RECORDED"], &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn test_format_results() {
        let student = testing::graded_student(1, "2021001");
        let text = format_results(student.results.as_ref());
        assert!(text.contains("MAT101  50.0   5        5"));
        assert!(text.contains("TR101   60.0   6        4"));

        assert_eq!(format_results(None), "Not graded yet.");
        assert_eq!(format_results(Some(&BTreeMap::new())), "Not graded yet.");
    }

    #[test]
    fn test_format_answers() {
        let text = format_answers("2021001", &[testing::answer(1, 1, "2021001")]);
        assert!(text.contains("correct"));
        assert_eq!(format_answers("2021009", &[]), "No answers recorded for 2021009.");
    }

    #[test]
    fn test_format_students_counts_graded_courses() {
        let text = format_students(&[testing::graded_student(1, "2021001"), testing::student(2, "2021002")]);
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[2].ends_with('2'));
        assert!(lines[3].ends_with('0'));
    }
}
