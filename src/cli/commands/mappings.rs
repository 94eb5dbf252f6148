//! Column mapping commands
//!
//! A mapping tells the form reader which course a printed column belongs to
//! for a given test group.

use anyhow::{anyhow, Result};
use clap::Subcommand;

use crate::api::ApiClient;
use crate::cli::output::{format_table, or_dash, print_formatted, print_result, print_success, OutputFormat};
use crate::forms::validate_mapping;
use crate::model::{ColumnMapping, EntityId};
use crate::store::ColumnMappingsStore;

#[derive(Subcommand, Debug)]
pub enum MappingCommands {
    /// List column mappings
    List,

    /// Map a form column to a course
    Add {
        /// Column number on the form
        #[arg(long)]
        column: u32,

        /// Test group letter (A-D)
        #[arg(long)]
        group: String,

        /// Course id
        #[arg(long)]
        course: EntityId,
    },

    /// Remove a mapping
    Delete {
        id: EntityId,
    },
}

pub async fn run(command: MappingCommands, client: ApiClient, format: OutputFormat, quiet: bool) -> Result<()> {
    let store = ColumnMappingsStore::new(client);

    match command {
        MappingCommands::List => {
            let mut mappings = store.list().await?;
            mappings.sort_by(|a, b| {
                a.test_group
                    .cmp(&b.test_group)
                    .then(a.column_number.cmp(&b.column_number))
            });
            print_formatted(mappings.as_slice(), format, format_mappings);
        }
        MappingCommands::Add { column, group, course } => {
            let draft = validate_mapping(column, &group, course).map_err(|e| anyhow!(e))?;
            let created = store.create(&draft).await?;
            let message = format!(
                "Column {} of group {} now reads {}",
                created.column_number,
                created.test_group,
                or_dash(created.course.as_deref())
            );
            print_result(&created, format, &message, quiet);
        }
        MappingCommands::Delete { id } => {
            store.delete(id).await?;
            print_success(&format!("Deleted mapping {}", id), quiet);
        }
    }

    Ok(())
}

fn format_mappings(mappings: &[ColumnMapping]) -> String {
    if mappings.is_empty() {
        return "No column mappings.".to_string();
    }

    let rows: Vec<Vec<String>> = mappings
        .iter()
        .map(|m| {
            vec![
                m.id.map(|id| id.to_string()).unwrap_or_default(),
                m.test_group.clone(),
                m.column_number.to_string(),
                or_dash(m.course.as_deref()),
            ]
        })
        .collect();

    format_table(&["ID", "GROUP", "COLUMN", "COURSE"], &rows)
}
