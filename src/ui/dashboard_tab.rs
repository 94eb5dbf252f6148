//! Dashboard tab UI rendering

use eframe::egui::{self, CornerRadius, RichText, Sense, Vec2};

use crate::app::OptikApp;
use crate::state::Tab;
use crate::ui::components::open_in_browser;

const CARDS: [(Tab, &str); 4] = [
    (Tab::Courses, "Courses and the form column each one is read from"),
    (Tab::AnswerKeys, "Correct answers per course and test group"),
    (Tab::Students, "Students, their grades and recorded answers"),
    (Tab::Process, "Upload scanned forms and answer key sheets"),
];

/// Render the dashboard tab
pub fn render_dashboard_tab(app: &mut OptikApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();

    ui.label(RichText::new("Dashboard").color(theme.text_primary).size(20.0).strong());
    ui.add_space(4.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new("Server:").color(theme.text_muted));
        ui.label(RichText::new(&app.config.server.base_url).color(theme.text_secondary));
        if ui.link("Open web dashboard").clicked() {
            open_in_browser(&app.config.server.dashboard_url());
        }
    });
    ui.add_space(16.0);

    let card_size = Vec2::new((ui.available_width() - 12.0) / 2.0, 90.0);
    let mut target = None;

    for row in CARDS.chunks(2) {
        ui.horizontal(|ui| {
            for (tab, description) in row {
                let (rect, response) = ui.allocate_exact_size(card_size, Sense::click());
                let fill = if response.hovered() { theme.bg_light } else { theme.bg_medium };
                ui.painter().rect_filled(rect, CornerRadius::same(8), fill);

                let inner = rect.shrink(14.0);
                ui.painter().text(
                    inner.left_top(),
                    egui::Align2::LEFT_TOP,
                    tab.label(),
                    egui::FontId::proportional(17.0),
                    theme.accent,
                );
                ui.painter().text(
                    inner.left_bottom(),
                    egui::Align2::LEFT_BOTTOM,
                    *description,
                    egui::FontId::proportional(12.0),
                    theme.text_secondary,
                );

                if response.on_hover_cursor(egui::CursorIcon::PointingHand).clicked() {
                    target = Some(*tab);
                }
            }
        });
        ui.add_space(12.0);
    }

    if let Some(tab) = target {
        app.switch_tab(tab, ui.ctx());
    }
}
