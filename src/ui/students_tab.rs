//! Students tab UI rendering

use eframe::egui::{self, RichText};

use crate::api::ApiClient;
use crate::forms::StudentForm;
use crate::model::{Grades, Student, StudentAnswer};
use crate::state::{Screen, StudentsController};
use crate::store::{StudentAnswersStore, StudentsStore};
use crate::ui::components::{render_form_error, render_view_state, section};
use crate::ui::theme::Theme;

pub struct StudentsTab {
    screen: Screen<StudentsController<ApiClient>>,
    form: StudentForm,
    form_error: Option<String>,
    filter: String,
    selected: Option<Student>,
}

impl StudentsTab {
    pub fn open(client: &ApiClient, ctx: &egui::Context) -> Self {
        let controller = StudentsController::new(
            StudentsStore::new(client.clone()),
            StudentAnswersStore::new(client.clone()),
        );
        let mut screen = Screen::new(controller);

        let repaint = ctx.clone();
        screen.notify_on_change(screen.controller().students(), move || repaint.request_repaint());
        let repaint = ctx.clone();
        screen.notify_on_change(screen.controller().grades(), move || repaint.request_repaint());
        let repaint = ctx.clone();
        screen.notify_on_change(screen.controller().answers(), move || repaint.request_repaint());

        screen.spawn(|c| async move { c.load_students().await });

        Self {
            screen,
            form: StudentForm::default(),
            form_error: None,
            filter: String::new(),
            selected: None,
        }
    }

    fn select(&mut self, student: Student) {
        let target = student.clone();
        self.selected = Some(student);
        self.screen.spawn(move |c| async move { c.select_student(&target).await });
    }

    fn close_detail(&mut self) {
        self.selected = None;
        self.screen.controller().clear_selection();
    }
}

/// Render the students tab
pub fn render_students_tab(tab: &mut StudentsTab, ui: &mut egui::Ui, theme: &Theme) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("Students").color(theme.text_primary).size(20.0).strong());
        if ui.button("Refresh").clicked() {
            tab.screen.spawn(|c| async move { c.load_students().await });
        }
    });
    ui.add_space(12.0);

    section(ui, theme, "Add student", |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Student number").color(theme.text_muted));
            ui.text_edit_singleline(&mut tab.form.student_number);
            if ui.button("Add").clicked() {
                match tab.form.validate() {
                    Ok(draft) => {
                        tab.form_error = None;
                        tab.form = StudentForm::default();
                        tab.screen.spawn(move |c| async move { c.add_student(draft).await });
                    }
                    Err(message) => tab.form_error = Some(message),
                }
            }
        });
        render_form_error(ui, theme, &tab.form_error);
    });
    ui.add_space(12.0);

    let students = tab.screen.controller().students().current();
    section(ui, theme, "All students", |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Filter").color(theme.text_muted));
            ui.text_edit_singleline(&mut tab.filter);
        });
        ui.add_space(6.0);

        render_view_state(ui, theme, &students, "No students yet.", |ui, students| {
            let mut clicked = None;
            egui::ScrollArea::vertical()
                .id_salt("student_list")
                .max_height(320.0)
                .show(ui, |ui| {
                    let filter = tab.filter.trim();
                    for student in students.iter().filter(|s| s.student_number.contains(filter)) {
                        let is_selected = tab
                            .selected
                            .as_ref()
                            .is_some_and(|s| s.id == student.id && s.student_number == student.student_number);
                        let label = match &student.results {
                            Some(results) => format!("{}  ({} courses graded)", student.student_number, results.len()),
                            None => student.student_number.clone(),
                        };
                        if ui.selectable_label(is_selected, label).clicked() {
                            clicked = Some(student.clone());
                        }
                    }
                });
            if let Some(student) = clicked {
                tab.select(student);
            }
        });
    });

    render_detail_window(tab, ui.ctx(), theme);
}

fn render_detail_window(tab: &mut StudentsTab, ctx: &egui::Context, theme: &Theme) {
    let Some(student) = tab.selected.clone() else {
        return;
    };

    let grades = tab.screen.controller().grades().current();
    let answers = tab.screen.controller().answers().current();
    let mut open = true;

    egui::Window::new(format!("Student {}", student.student_number))
        .open(&mut open)
        .default_width(420.0)
        .show(ctx, |ui| {
            ui.label(RichText::new("Grades").color(theme.accent).strong());
            render_view_state(ui, theme, &grades, "No grades recorded.", |ui, grades| {
                if let Some(grades) = grades {
                    render_grades(ui, theme, grades);
                }
            });

            ui.add_space(12.0);
            ui.label(RichText::new("Answers").color(theme.accent).strong());
            render_view_state(ui, theme, &answers, "No answers recorded.", |ui, answers| {
                render_answers(ui, theme, answers);
            });
        });

    if !open {
        tab.close_detail();
    }
}

fn render_grades(ui: &mut egui::Ui, theme: &Theme, grades: &Grades) {
    egui::Grid::new("grades").num_columns(2).striped(true).show(ui, |ui| {
        for (course, score) in grades {
            ui.label(course);
            ui.label(RichText::new(format!("{:.1}", score)).color(theme.text_primary).strong());
            ui.end_row();
        }
    });
}

fn render_answers(ui: &mut egui::Ui, theme: &Theme, answers: &[StudentAnswer]) {
    egui::ScrollArea::vertical()
        .id_salt("answer_list")
        .max_height(260.0)
        .show(ui, |ui| {
            egui::Grid::new("answers").num_columns(5).striped(true).show(ui, |ui| {
                for header in ["Course", "Group", "Question", "Answer", "Recorded"] {
                    ui.label(RichText::new(header).color(theme.text_muted).strong());
                }
                ui.end_row();

                for answer in answers {
                    ui.label(answer.course.as_deref().unwrap_or("-"));
                    ui.label(answer.test_group.as_deref().unwrap_or("-"));
                    ui.label(answer.question_id.to_string());

                    let selected = answer.selected_answer.as_deref().unwrap_or("-");
                    let color = match answer.is_correct {
                        Some(true) => theme.success,
                        Some(false) => theme.error,
                        None => theme.text_secondary,
                    };
                    ui.label(RichText::new(selected).color(color).strong());

                    let recorded = answer
                        .recorded_at()
                        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_default();
                    ui.label(RichText::new(recorded).color(theme.text_muted));
                    ui.end_row();
                }
            });
        });
}
