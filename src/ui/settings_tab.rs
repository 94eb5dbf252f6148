//! Settings tab UI rendering

use eframe::egui::{self, RichText};

use crate::app::OptikApp;
use crate::ui::components::section;
use crate::ui::theme::ThemePreset;

/// Render the settings tab
pub fn render_settings_tab(app: &mut OptikApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();

    egui::ScrollArea::vertical()
        .id_salt("settings_scroll")
        .show(ui, |ui| {
            ui.label(RichText::new("Settings").color(theme.text_primary).size(20.0).strong());
            ui.add_space(16.0);

            section(ui, &theme, "Server", |ui| {
                egui::Grid::new("server_settings")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("API address").color(theme.text_muted));
                        ui.add(egui::TextEdit::singleline(&mut app.settings.base_url).desired_width(320.0));
                        ui.end_row();

                        ui.label(RichText::new("Connect timeout (s)").color(theme.text_muted));
                        ui.add(egui::DragValue::new(&mut app.settings.connect_timeout_secs).range(1..=300));
                        ui.end_row();

                        ui.label(RichText::new("Request timeout (s)").color(theme.text_muted));
                        ui.add(egui::DragValue::new(&mut app.settings.request_timeout_secs).range(1..=600));
                        ui.end_row();
                    });

                ui.add_space(8.0);
                if ui.button("Save and reconnect").clicked() {
                    app.apply_server_settings(ui.ctx());
                }
                if let Some(error) = &app.settings_error {
                    ui.label(RichText::new(error).color(theme.error).size(12.0));
                }
            });

            ui.add_space(12.0);

            section(ui, &theme, "Appearance", |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Theme:").color(theme.text_muted));

                    egui::ComboBox::from_id_salt("theme_select")
                        .selected_text(app.config.ui.theme.name())
                        .show_ui(ui, |ui| {
                            for preset in ThemePreset::all() {
                                if ui
                                    .selectable_label(app.config.ui.theme == *preset, preset.name())
                                    .clicked()
                                {
                                    app.config.ui.theme = *preset;
                                    app.ui.current_theme = preset.theme();
                                    app.ui.theme_dirty = true;
                                    app.save_config();
                                }
                            }
                        });
                });

                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Preview:").color(theme.text_muted));
                    ui.add_space(8.0);

                    let swatches = [
                        ("Background", theme.bg_dark),
                        ("Accent", theme.accent),
                        ("Correct", theme.success),
                        ("Warning", theme.warning),
                        ("Wrong", theme.error),
                    ];
                    for (label, color) in swatches {
                        let (rect, response) =
                            ui.allocate_exact_size(egui::vec2(24.0, 24.0), egui::Sense::hover());
                        ui.painter().rect_filled(rect, 4.0, color);
                        response.on_hover_text(label);
                        ui.add_space(4.0);
                    }
                });
            });
        });
}
