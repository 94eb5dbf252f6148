//! CLI module for Optik
//!
//! Every screen of the GUI has a scriptable counterpart here. Commands talk
//! to the entity stores directly and print either text or JSON.

mod commands;
mod output;

use clap::{Parser, Subcommand};

use crate::api::{ApiClient, UploadEndpoint};
use crate::config::Config;

pub use output::{print_error, OutputFormat};

/// Optik - optical form grading client
#[derive(Parser, Debug)]
#[command(name = "optik")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    /// Server API address, overriding the configured one
    #[arg(long, global = true, value_name = "URL")]
    pub server: Option<String>,

    /// Launches the GUI when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Course management
    Courses {
        #[command(subcommand)]
        command: commands::courses::CourseCommands,
    },

    /// Answer key management
    #[command(name = "answer-keys")]
    AnswerKeys {
        #[command(subcommand)]
        command: commands::answer_keys::AnswerKeyCommands,
    },

    /// Students, grades and recorded answers
    Students {
        #[command(subcommand)]
        command: commands::students::StudentCommands,
    },

    /// Form column to course mappings
    Mappings {
        #[command(subcommand)]
        command: commands::mappings::MappingCommands,
    },

    /// Grade a scanned student form
    Process {
        /// PNG or JPEG image of the form
        image: std::path::PathBuf,
    },

    /// Read an answer key sheet into the answer key
    #[command(name = "extract-key")]
    ExtractKey {
        /// PNG or JPEG image of the answer key sheet
        image: std::path::PathBuf,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

fn connect(config: &Config) -> anyhow::Result<ApiClient> {
    Ok(ApiClient::new(&config.server)?)
}

/// Run a CLI command
pub async fn run(command: Commands, config: &Config, output: &OutputOptions) -> anyhow::Result<()> {
    let format = output.format();
    let quiet = output.quiet;

    match command {
        Commands::Courses { command } => commands::courses::run(command, connect(config)?, format, quiet).await,
        Commands::AnswerKeys { command } => {
            commands::answer_keys::run(command, connect(config)?, format, quiet).await
        }
        Commands::Students { command } => commands::students::run(command, connect(config)?, format, quiet).await,
        Commands::Mappings { command } => commands::mappings::run(command, connect(config)?, format, quiet).await,
        Commands::Process { image } => {
            commands::process::run(UploadEndpoint::ProcessForm, &image, connect(config)?, format).await
        }
        Commands::ExtractKey { image } => {
            commands::process::run(UploadEndpoint::ExtractAnswerKey, &image, connect(config)?, format).await
        }
        Commands::Config { command } => commands::config::run(command, format, quiet).await,
    }
}
