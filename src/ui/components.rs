//! Shared UI components

use eframe::egui::{self, Color32, CornerRadius, RichText, Vec2};

use crate::app::OptikApp;
use crate::state::{Tab, ViewState};
use crate::ui::theme::Theme;

/// Render a tab button
pub fn render_tab(app: &mut OptikApp, ui: &mut egui::Ui, tab: Tab) {
    let theme = &app.ui.current_theme;
    let is_active = app.ui.active_tab == tab;

    let (bg, text_color) = if is_active {
        (theme.bg_medium, theme.accent)
    } else {
        (Color32::TRANSPARENT, theme.text_secondary)
    };

    let button = egui::Button::new(RichText::new(tab.label()).color(text_color))
        .fill(bg)
        .corner_radius(CornerRadius {
            nw: 6,
            ne: 6,
            sw: 0,
            se: 0,
        })
        .min_size(Vec2::new(90.0, 32.0));

    if ui.add(button).clicked() && !is_active {
        app.switch_tab(tab, ui.ctx());
    }
}

/// Framed section with a heading, as used on every tab
pub fn section<R>(
    ui: &mut egui::Ui,
    theme: &Theme,
    title: &str,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    egui::Frame::new()
        .fill(theme.bg_medium)
        .corner_radius(CornerRadius::same(8))
        .inner_margin(egui::Margin::same(14))
        .stroke(egui::Stroke::new(1.0, theme.border))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).color(theme.accent).size(13.0).strong());
            ui.add_space(8.0);
            add_contents(ui)
        })
        .inner
}

/// Render one view state: spinner, empty note, error, or the data itself
pub fn render_view_state<T>(
    ui: &mut egui::Ui,
    theme: &Theme,
    state: &ViewState<T>,
    empty_text: &str,
    render_data: impl FnOnce(&mut egui::Ui, &T),
) {
    match state {
        ViewState::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new("Loading...").color(theme.text_muted));
            });
        }
        ViewState::Empty => {
            ui.label(RichText::new(empty_text).color(theme.text_muted).italics());
        }
        ViewState::Error(message) => {
            ui.label(RichText::new(format!("Error: {}", message)).color(theme.error));
        }
        ViewState::Success(data) => render_data(ui, data),
    }
}

/// Inline validation message under a form
pub fn render_form_error(ui: &mut egui::Ui, theme: &Theme, error: &Option<String>) {
    if let Some(error) = error {
        ui.label(RichText::new(error).color(theme.warning).size(12.0));
    }
}

/// Yes/No confirmation window. Returns `Some(true)` on confirm, `Some(false)` on cancel.
pub fn confirm_dialog(ctx: &egui::Context, title: &str, message: &str) -> Option<bool> {
    let mut answer = None;
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(message);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Delete").clicked() {
                    answer = Some(true);
                }
                if ui.button("Cancel").clicked() {
                    answer = Some(false);
                }
            });
        });
    answer
}

/// Render the About dialog
pub fn render_about_dialog(app: &mut OptikApp, ctx: &egui::Context) {
    if !app.ui.show_about_dialog {
        return;
    }

    let theme = app.ui.current_theme.clone();
    let dashboard_url = app.config.server.dashboard_url();

    egui::Window::new("About Optik")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 220.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                ui.label(RichText::new("Optik").size(24.0).strong().color(theme.accent));
                ui.add_space(4.0);
                ui.label(
                    RichText::new("Optical form grading client")
                        .size(14.0)
                        .color(theme.text_secondary),
                );
                ui.add_space(12.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme.text_muted),
                );
                ui.add_space(12.0);

                if ui.link("Open server dashboard").clicked() {
                    open_in_browser(&dashboard_url);
                }

                ui.add_space(12.0);
                if ui.button("Close").clicked() {
                    app.ui.show_about_dialog = false;
                }
                ui.add_space(8.0);
            });
        });
}

pub fn open_in_browser(url: &str) {
    if let Err(e) = open::that(url) {
        tracing::warn!("Failed to open {}: {}", url, e);
    }
}
