//! Answer key commands

use anyhow::{anyhow, Result};
use clap::Subcommand;

use crate::api::ApiClient;
use crate::cli::output::{format_table, print_formatted, print_result, print_success, OutputFormat};
use crate::forms::AnswerKeyForm;
use crate::model::{test_group_id, AnswerKey, EntityId};
use crate::store::AnswerKeysStore;

#[derive(Subcommand, Debug)]
pub enum AnswerKeyCommands {
    /// List answer key entries
    List {
        /// Only entries of this course name
        #[arg(long)]
        course: Option<String>,
    },

    /// Add one entry
    Add {
        /// Question number
        question: String,

        /// Correct answer letter (A-E)
        answer: String,

        /// Course id
        #[arg(long)]
        course: EntityId,

        /// Test group letter (A-D)
        #[arg(long, default_value = "A")]
        group: String,
    },

    /// Delete one entry
    Delete {
        id: EntityId,
    },
}

pub async fn run(command: AnswerKeyCommands, client: ApiClient, format: OutputFormat, quiet: bool) -> Result<()> {
    let store = AnswerKeysStore::new(client);

    match command {
        AnswerKeyCommands::List { course } => {
            let mut keys = store.list().await?;
            if let Some(course) = course {
                keys.retain(|k| k.course_name.eq_ignore_ascii_case(&course));
            }
            keys.sort_by_key(|k| (k.course_name.clone(), k.test_group_name.clone(), k.question_id));
            print_formatted(keys.as_slice(), format, format_answer_keys);
        }
        AnswerKeyCommands::Add {
            question,
            answer,
            course,
            group,
        } => {
            let form = AnswerKeyForm {
                question_id: question,
                correct_answer: answer,
                test_group: test_group_id(&group),
                course: Some(course),
            };
            let draft = form.validate().map_err(|e| anyhow!(e))?;
            let created = store.create(&draft).await?;
            let message = format!(
                "Question {} of {} ({}): {}",
                created.question_id, created.course_name, created.test_group_name, created.correct_answer
            );
            print_result(&created, format, &message, quiet);
        }
        AnswerKeyCommands::Delete { id } => {
            store.delete(id).await?;
            print_success(&format!("Deleted answer key entry {}", id), quiet);
        }
    }

    Ok(())
}

fn format_answer_keys(keys: &[AnswerKey]) -> String {
    if keys.is_empty() {
        return "No answer key entries.".to_string();
    }

    let rows: Vec<Vec<String>> = keys
        .iter()
        .map(|k| {
            vec![
                k.id.map(|id| id.to_string()).unwrap_or_default(),
                k.course_name.clone(),
                k.test_group_name.clone(),
                k.question_id.to_string(),
                k.correct_answer.clone(),
            ]
        })
        .collect();

    format_table(&["ID", "COURSE", "GROUP", "QUESTION", "ANSWER"], &rows)
}
