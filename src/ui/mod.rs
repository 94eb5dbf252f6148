//! UI modules
//!
//! This module contains the UI rendering code, organized by tab.

mod answer_keys_tab;
pub mod components;
mod courses_tab;
mod dashboard_tab;
mod process_tab;
mod settings_tab;
mod students_tab;
pub mod theme;

pub use answer_keys_tab::{render_answer_keys_tab, AnswerKeysTab};
pub use courses_tab::{render_courses_tab, CoursesTab};
pub use dashboard_tab::render_dashboard_tab;
pub use process_tab::{render_process_tab, ProcessTab};
pub use settings_tab::render_settings_tab;
pub use students_tab::{render_students_tab, StudentsTab};
