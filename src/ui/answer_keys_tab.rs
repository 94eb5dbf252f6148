//! Answer keys tab UI rendering

use eframe::egui::{self, RichText};

use crate::api::ApiClient;
use crate::forms::AnswerKeyForm;
use crate::model::{AnswerKey, Course, EntityId, ANSWER_LETTERS, TEST_GROUPS};
use crate::state::{AnswerKeysController, Screen, ViewState};
use crate::store::{AnswerKeysStore, CoursesStore};
use crate::ui::components::{confirm_dialog, render_form_error, render_view_state, section};
use crate::ui::theme::Theme;

pub struct AnswerKeysTab {
    screen: Screen<AnswerKeysController<ApiClient>>,
    form: AnswerKeyForm,
    form_error: Option<String>,
    pending_delete: Option<(EntityId, u32)>,
}

impl AnswerKeysTab {
    pub fn open(client: &ApiClient, ctx: &egui::Context) -> Self {
        let controller = AnswerKeysController::new(
            AnswerKeysStore::new(client.clone()),
            CoursesStore::new(client.clone()),
        );
        let mut screen = Screen::new(controller);

        let repaint = ctx.clone();
        screen.notify_on_change(screen.controller().answer_keys(), move || repaint.request_repaint());
        let repaint = ctx.clone();
        screen.notify_on_change(screen.controller().courses(), move || repaint.request_repaint());

        screen.spawn(|c| async move { c.load_answer_keys().await });
        screen.spawn(|c| async move { c.load_courses().await });

        Self {
            screen,
            form: AnswerKeyForm {
                correct_answer: "A".to_string(),
                test_group: Some(1),
                ..AnswerKeyForm::default()
            },
            form_error: None,
            pending_delete: None,
        }
    }
}

/// Render the answer keys tab
pub fn render_answer_keys_tab(tab: &mut AnswerKeysTab, ui: &mut egui::Ui, theme: &Theme) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("Answer Keys").color(theme.text_primary).size(20.0).strong());
        if ui.button("Refresh").clicked() {
            tab.screen.spawn(|c| async move { c.load_answer_keys().await });
            tab.screen.spawn(|c| async move { c.load_courses().await });
        }
    });
    ui.add_space(12.0);

    let courses = tab.screen.controller().courses().current();
    section(ui, theme, "Add answer", |ui| render_add_form(tab, ui, theme, &courses));
    ui.add_space(12.0);

    let keys = tab.screen.controller().answer_keys().current();
    section(ui, theme, "Answer key", |ui| {
        render_view_state(ui, theme, &keys, "No answer key entries yet.", |ui, keys| {
            render_key_list(tab, ui, theme, keys);
        });
    });

    if let Some((id, question)) = tab.pending_delete {
        let message = format!("Delete the answer for question {}?", question);
        match confirm_dialog(ui.ctx(), "Delete answer", &message) {
            Some(true) => {
                tab.pending_delete = None;
                tab.screen.spawn(move |c| async move { c.delete_answer_key(id).await });
            }
            Some(false) => tab.pending_delete = None,
            None => {}
        }
    }
}

fn render_add_form(tab: &mut AnswerKeysTab, ui: &mut egui::Ui, theme: &Theme, courses: &ViewState<Vec<Course>>) {
    egui::Grid::new("answer_key_form")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            ui.label(RichText::new("Course").color(theme.text_muted));
            match courses {
                ViewState::Success(courses) => {
                    let selected = courses
                        .iter()
                        .find(|c| c.id.is_some() && c.id == tab.form.course)
                        .map_or("Select...".to_string(), |c| format!("{} {}", c.code, c.name));
                    egui::ComboBox::from_id_salt("answer_key_course")
                        .selected_text(selected)
                        .show_ui(ui, |ui| {
                            for course in courses.iter().filter(|c| c.id.is_some()) {
                                ui.selectable_value(
                                    &mut tab.form.course,
                                    course.id,
                                    format!("{} {}", course.code, course.name),
                                );
                            }
                        });
                }
                ViewState::Loading => {
                    ui.spinner();
                }
                ViewState::Empty => {
                    ui.label(RichText::new("Add a course first").color(theme.warning));
                }
                ViewState::Error(message) => {
                    ui.label(RichText::new(format!("Courses unavailable: {}", message)).color(theme.error));
                }
            }
            ui.end_row();

            ui.label(RichText::new("Test group").color(theme.text_muted));
            ui.horizontal(|ui| {
                for (id, group) in TEST_GROUPS {
                    ui.radio_value(&mut tab.form.test_group, Some(id), group);
                }
            });
            ui.end_row();

            ui.label(RichText::new("Question").color(theme.text_muted));
            ui.add(egui::TextEdit::singleline(&mut tab.form.question_id).desired_width(60.0));
            ui.end_row();

            ui.label(RichText::new("Answer").color(theme.text_muted));
            ui.horizontal(|ui| {
                for letter in ANSWER_LETTERS {
                    ui.radio_value(&mut tab.form.correct_answer, letter.to_string(), letter);
                }
            });
            ui.end_row();
        });

    ui.add_space(6.0);
    if ui.button("Add answer").clicked() {
        match tab.form.validate() {
            Ok(draft) => {
                tab.form_error = None;
                tab.form.question_id = next_question(&tab.form.question_id);
                tab.screen.spawn(move |c| async move { c.create_answer_key(draft).await });
            }
            Err(message) => tab.form_error = Some(message),
        }
    }
    render_form_error(ui, theme, &tab.form_error);
}

/// Keys are usually entered in order, so advance the question number
fn next_question(current: &str) -> String {
    current
        .trim()
        .parse::<u32>()
        .map(|n| (n + 1).to_string())
        .unwrap_or_default()
}

fn render_key_list(tab: &mut AnswerKeysTab, ui: &mut egui::Ui, theme: &Theme, keys: &[AnswerKey]) {
    egui::Grid::new("answer_key_list")
        .num_columns(5)
        .striped(true)
        .spacing([16.0, 6.0])
        .show(ui, |ui| {
            for header in ["Course", "Group", "Question", "Answer", ""] {
                ui.label(RichText::new(header).color(theme.text_muted).strong());
            }
            ui.end_row();

            for key in keys {
                ui.label(&key.course_name);
                ui.label(&key.test_group_name);
                ui.label(key.question_id.to_string());
                ui.label(RichText::new(&key.correct_answer).color(theme.accent).strong());
                match key.id {
                    Some(id) => {
                        if ui.small_button("Delete").clicked() {
                            tab.pending_delete = Some((id, key.question_id));
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
