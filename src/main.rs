// Hide console window in release builds (Windows GUI app)
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod api;
mod app;
mod cli;
mod config;
mod forms;
mod model;
mod state;
mod store;
mod task;
#[cfg(test)]
mod testing;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::ApiClient;
use crate::cli::Cli;
use crate::config::{Config, ServerConfig};

/// Install the log subscriber.
///
/// `RUST_LOG` wins when set. Logs go to stderr so CLI output stays parseable.
fn init_logging(default_filter: &str) {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(server_override: Option<String>) -> Config {
    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });
    if let Some(base_url) = server_override {
        config.server.base_url = base_url;
    }
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        init_logging(if cli.output.verbose { "optik=debug" } else { "optik=warn" });
        let config = load_config(cli.server);

        if let Err(e) = cli::run(command, &config, &cli.output).await {
            cli::print_error(&format!("{:#}", e));
            std::process::exit(1);
        }
        return Ok(());
    }

    init_logging("optik=debug,info");
    tracing::info!("Starting Optik");

    let config = load_config(cli.server);
    let client = match ApiClient::new(&config.server) {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!("Invalid server settings ({}), falling back to defaults", e);
            ApiClient::new(&ServerConfig::default())?
        }
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Optik - Optical Form Grading"),
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native(
        "Optik",
        native_options,
        Box::new(|cc| Ok(Box::new(app::OptikApp::new(cc, config, client)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    Ok(())
}
