//! Process tab UI rendering

use std::path::PathBuf;

use eframe::egui::{self, RichText};

use crate::api::{ApiClient, UploadEndpoint};
use crate::state::{ProcessController, Screen};
use crate::store::UploadStore;
use crate::ui::components::{render_view_state, section};
use crate::ui::theme::Theme;

pub struct ProcessTab {
    screen: Screen<ProcessController<ApiClient>>,
    last_file: Option<PathBuf>,
}

impl ProcessTab {
    pub fn open(client: &ApiClient, ctx: &egui::Context) -> Self {
        let mut screen = Screen::new(ProcessController::new(UploadStore::new(client.clone())));
        let repaint = ctx.clone();
        screen.notify_on_change(screen.controller().status(), move || repaint.request_repaint());

        Self {
            screen,
            last_file: None,
        }
    }

    fn pick_and_submit(&mut self, endpoint: UploadEndpoint) {
        let title = match endpoint {
            UploadEndpoint::ProcessForm => "Select a filled-in form",
            UploadEndpoint::ExtractAnswerKey => "Select an answer key sheet",
        };
        let Some(path) = rfd::FileDialog::new()
            .set_title(title)
            .add_filter("Images", &["png", "jpg", "jpeg"])
            .pick_file()
        else {
            return;
        };

        tracing::info!("Submitting {} to {:?}", path.display(), endpoint);
        self.last_file = Some(path.clone());
        self.screen
            .spawn(move |c| async move { c.submit_file(endpoint, &path).await });
    }
}

/// Render the process tab
pub fn render_process_tab(tab: &mut ProcessTab, ui: &mut egui::Ui, theme: &Theme) {
    ui.label(RichText::new("Process").color(theme.text_primary).size(20.0).strong());
    ui.add_space(12.0);

    section(ui, theme, "Upload", |ui| {
        ui.label(
            RichText::new("Scanned forms are graded on the server. Answer key sheets fill in the answer key.")
                .color(theme.text_secondary),
        );
        ui.add_space(8.0);

        let busy = tab.screen.is_busy();
        if busy {
            // Re-check once the submission task has wound down
            ui.ctx().request_repaint_after(std::time::Duration::from_millis(200));
        }
        ui.add_enabled_ui(!busy, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Process student form...").clicked() {
                    tab.pick_and_submit(UploadEndpoint::ProcessForm);
                }
                if ui.button("Extract answer key...").clicked() {
                    tab.pick_and_submit(UploadEndpoint::ExtractAnswerKey);
                }
            });
        });

        if let Some(path) = &tab.last_file {
            ui.add_space(4.0);
            ui.label(RichText::new(path.display().to_string()).color(theme.text_muted).size(12.0));
        }
    });
    ui.add_space(12.0);

    let status = tab.screen.controller().status().current();
    section(ui, theme, "Result", |ui| {
        render_view_state(ui, theme, &status, "Nothing submitted yet.", |ui, message| {
            ui.label(RichText::new(message).color(theme.success));
        });
        if status.data().is_some() || status.error().is_some() {
            ui.add_space(6.0);
            if ui.small_button("Clear").clicked() {
                tab.screen.controller().clear();
            }
        }
    });
}
