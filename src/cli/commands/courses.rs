//! Course management commands

use anyhow::{bail, Result};
use clap::Subcommand;

use crate::api::ApiClient;
use crate::cli::output::{format_table, or_dash, print_formatted, print_result, print_success, OutputFormat};
use crate::forms::CourseForm;
use crate::model::{Course, EntityId};
use crate::store::CoursesStore;

#[derive(Subcommand, Debug)]
pub enum CourseCommands {
    /// List all courses
    List,

    /// Show one course
    Show {
        id: EntityId,
    },

    /// Add a course
    Add {
        /// Course name
        #[arg(long)]
        name: String,

        /// Course code (at most 10 characters)
        #[arg(long)]
        code: String,

        /// Form column the course is read from
        #[arg(long)]
        column: String,

        /// Test group letter (A-D)
        #[arg(long, default_value = "A")]
        group: String,

        #[arg(long)]
        description: Option<String>,
    },

    /// Replace a course
    Update {
        id: EntityId,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        code: Option<String>,

        #[arg(long)]
        column: Option<String>,

        /// Test group letter (A-D)
        #[arg(long, default_value = "A")]
        group: String,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a course
    Delete {
        id: EntityId,
    },
}

pub async fn run(command: CourseCommands, client: ApiClient, format: OutputFormat, quiet: bool) -> Result<()> {
    let store = CoursesStore::new(client);

    match command {
        CourseCommands::List => {
            let courses = store.list().await?;
            print_formatted(courses.as_slice(), format, format_course_list);
        }
        CourseCommands::Show { id } => {
            let course = store.get(id).await?;
            print_formatted(&course, format, format_course);
        }
        CourseCommands::Add {
            name,
            code,
            column,
            group,
            description,
        } => {
            let form = CourseForm {
                name,
                code,
                description: description.unwrap_or_default(),
                column_number: column,
                test_group: group,
            };
            let draft = validated(form)?;
            let created = store.create(&draft).await?;
            let message = format!("Added course {} ({})", created.code, or_id(created.id));
            print_result(&created, format, &message, quiet);
        }
        CourseCommands::Update {
            id,
            name,
            code,
            column,
            group,
            description,
        } => {
            let current = store.get(id).await?;
            let form = CourseForm {
                name: name.unwrap_or(current.name),
                code: code.unwrap_or(current.code),
                description: description.or(current.description).unwrap_or_default(),
                column_number: column
                    .or_else(|| current.column_number.map(|n| n.to_string()))
                    .unwrap_or_default(),
                test_group: group,
            };
            let draft = validated(form)?;
            let updated = store.update(id, &draft).await?;
            print_result(&updated, format, &format!("Updated course {}", updated.code), quiet);
        }
        CourseCommands::Delete { id } => {
            store.delete(id).await?;
            print_success(&format!("Deleted course {}", id), quiet);
        }
    }

    Ok(())
}

fn validated(form: CourseForm) -> Result<Course> {
    match form.validate() {
        Ok(draft) => Ok(draft),
        Err(message) => bail!(message),
    }
}

fn or_id(id: Option<EntityId>) -> String {
    id.map_or("no id".to_string(), |id| format!("id {}", id))
}

fn format_course_list(courses: &[Course]) -> String {
    if courses.is_empty() {
        return "No courses found.".to_string();
    }

    let rows: Vec<Vec<String>> = courses
        .iter()
        .map(|c| {
            vec![
                c.id.map(|id| id.to_string()).unwrap_or_default(),
                c.code.clone(),
                c.name.clone(),
                c.column_number.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();

    format!(
        "Courses ({} total):\n\n{}",
        courses.len(),
        format_table(&["ID", "CODE", "NAME", "COLUMN"], &rows)
    )
}

fn format_course(course: &Course) -> String {
    [
        format!("{} - {}", course.code, course.name),
        format!("  ID:          {}", or_dash(course.id.map(|id| id.to_string()).as_deref())),
        format!(
            "  Column:      {}",
            or_dash(course.column_number.map(|n| n.to_string()).as_deref())
        ),
        format!("  Description: {}", or_dash(course.description.as_deref())),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn test_format_course_list() {
        let text = format_course_list(&[testing::course(1, "MAT101"), testing::course(2, "TR101")]);
        assert!(text.starts_with("Courses (2 total):"));
        assert!(text.contains("MAT101"));
        assert!(text.contains("TR101 course"));
        assert_eq!(format_course_list(&[]), "No courses found.");
    }

    #[test]
    fn test_validated_reports_form_error() {
        let form = CourseForm {
            name: "Mathematics".to_string(),
            code: "MAT101".to_string(),
            column_number: "0".to_string(),
            test_group: "A".to_string(),
            ..CourseForm::default()
        };
        assert_eq!(validated(form).unwrap_err().to_string(), "Enter a valid column number");
    }
}
