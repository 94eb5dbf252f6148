//! UI-related application state

use crate::ui::theme::Theme;

/// Application tabs representing the main navigation sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Dashboard: counts of courses, answer keys and students
    #[default]
    Dashboard,
    /// Courses: list, add and delete courses
    Courses,
    /// Answer keys: list, add and delete answer key entries
    AnswerKeys,
    /// Students: list, add, and inspect grades and answers
    Students,
    /// Process: upload scanned forms and answer key sheets
    Process,
    /// Settings: server address and theme
    Settings,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[
            Tab::Dashboard,
            Tab::Courses,
            Tab::AnswerKeys,
            Tab::Students,
            Tab::Process,
            Tab::Settings,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Courses => "Courses",
            Tab::AnswerKeys => "Answer Keys",
            Tab::Students => "Students",
            Tab::Process => "Process",
            Tab::Settings => "Settings",
        }
    }
}

/// UI-related state
pub struct UiState {
    /// Current theme
    pub current_theme: Theme,
    /// Currently selected tab
    pub active_tab: Tab,
    /// Whether theme needs to be applied
    pub theme_dirty: bool,
    /// Whether to show the About dialog
    pub show_about_dialog: bool,
    /// Status bar text
    pub status_message: String,
}

impl UiState {
    /// Create a new UiState with the given theme
    pub fn new(theme: Theme) -> Self {
        Self {
            current_theme: theme,
            active_tab: Tab::default(),
            theme_dirty: true, // Apply theme on first frame
            show_about_dialog: false,
            status_message: "Ready".to_string(),
        }
    }
}
