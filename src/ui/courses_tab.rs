//! Courses tab UI rendering

use eframe::egui::{self, RichText};

use crate::api::ApiClient;
use crate::forms::CourseForm;
use crate::model::{Course, EntityId, TEST_GROUPS};
use crate::state::{CoursesController, Screen};
use crate::store::CoursesStore;
use crate::ui::components::{confirm_dialog, render_form_error, render_view_state, section};
use crate::ui::theme::Theme;

/// Courses screen and its form inputs
pub struct CoursesTab {
    screen: Screen<CoursesController<ApiClient>>,
    form: CourseForm,
    form_error: Option<String>,
    pending_delete: Option<(EntityId, String)>,
}

impl CoursesTab {
    pub fn open(client: &ApiClient, ctx: &egui::Context) -> Self {
        let mut screen = Screen::new(CoursesController::new(CoursesStore::new(client.clone())));
        let repaint = ctx.clone();
        screen.notify_on_change(screen.controller().courses(), move || repaint.request_repaint());
        screen.spawn(|c| async move { c.load().await });

        Self {
            screen,
            form: CourseForm {
                test_group: "A".to_string(),
                ..CourseForm::default()
            },
            form_error: None,
            pending_delete: None,
        }
    }
}

/// Render the courses tab
pub fn render_courses_tab(tab: &mut CoursesTab, ui: &mut egui::Ui, theme: &Theme) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("Courses").color(theme.text_primary).size(20.0).strong());
        if ui.button("Refresh").clicked() {
            tab.screen.spawn(|c| async move { c.load().await });
        }
    });
    ui.add_space(12.0);

    section(ui, theme, "Add course", |ui| render_add_form(tab, ui, theme));
    ui.add_space(12.0);

    let courses = tab.screen.controller().courses().current();
    section(ui, theme, "All courses", |ui| {
        render_view_state(ui, theme, &courses, "No courses yet.", |ui, courses| {
            render_course_list(tab, ui, theme, courses);
        });
    });

    if let Some((id, label)) = tab.pending_delete.clone() {
        match confirm_dialog(ui.ctx(), "Delete course", &format!("Delete {}?", label)) {
            Some(true) => {
                tab.pending_delete = None;
                tab.screen.spawn(move |c| async move { c.delete(id).await });
            }
            Some(false) => tab.pending_delete = None,
            None => {}
        }
    }
}

fn render_add_form(tab: &mut CoursesTab, ui: &mut egui::Ui, theme: &Theme) {
    egui::Grid::new("course_form")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            ui.label(RichText::new("Name").color(theme.text_muted));
            ui.text_edit_singleline(&mut tab.form.name);
            ui.end_row();

            ui.label(RichText::new("Code").color(theme.text_muted));
            ui.text_edit_singleline(&mut tab.form.code);
            ui.end_row();

            ui.label(RichText::new("Description").color(theme.text_muted));
            ui.text_edit_singleline(&mut tab.form.description);
            ui.end_row();

            ui.label(RichText::new("Column").color(theme.text_muted));
            ui.add(egui::TextEdit::singleline(&mut tab.form.column_number).desired_width(60.0));
            ui.end_row();

            ui.label(RichText::new("Test group").color(theme.text_muted));
            egui::ComboBox::from_id_salt("course_test_group")
                .selected_text(tab.form.test_group.as_str())
                .show_ui(ui, |ui| {
                    for (_, group) in TEST_GROUPS {
                        ui.selectable_value(&mut tab.form.test_group, group.to_string(), group);
                    }
                });
            ui.end_row();
        });

    ui.add_space(6.0);
    if ui.button("Add course").clicked() {
        match tab.form.validate() {
            Ok(draft) => {
                tab.form_error = None;
                tab.form = CourseForm {
                    test_group: tab.form.test_group.clone(),
                    ..CourseForm::default()
                };
                tab.screen.spawn(move |c| async move { c.create(draft).await });
            }
            Err(message) => tab.form_error = Some(message),
        }
    }
    render_form_error(ui, theme, &tab.form_error);
}

fn render_course_list(tab: &mut CoursesTab, ui: &mut egui::Ui, theme: &Theme, courses: &[Course]) {
    egui::Grid::new("course_list")
        .num_columns(5)
        .striped(true)
        .spacing([16.0, 6.0])
        .show(ui, |ui| {
            for header in ["Code", "Name", "Column", "Description", ""] {
                ui.label(RichText::new(header).color(theme.text_muted).strong());
            }
            ui.end_row();

            for course in courses {
                ui.label(RichText::new(&course.code).color(theme.accent));
                ui.label(&course.name);
                ui.label(course.column_number.map_or("-".to_string(), |n| n.to_string()));
                ui.label(course.description.as_deref().unwrap_or(""));
                match course.id {
                    Some(id) => {
                        if ui.small_button("Delete").clicked() {
                            tab.pending_delete = Some((id, course.code.clone()));
                        }
                    }
                    None => {
                        ui.label("");
                    }
                }
                ui.end_row();
            }
        });
}
