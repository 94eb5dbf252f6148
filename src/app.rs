use eframe::egui;

use crate::api::ApiClient;
use crate::config::{Config, ServerConfig};
use crate::state::{Tab, UiState};
use crate::ui::{
    self, components, AnswerKeysTab, CoursesTab, ProcessTab, StudentsTab,
};

/// The screen currently on display.
///
/// Only one data screen is alive at a time; replacing it drops the old one,
/// which closes its streams and cancels its requests.
enum ActiveScreen {
    None,
    Courses(CoursesTab),
    AnswerKeys(AnswerKeysTab),
    Students(StudentsTab),
    Process(ProcessTab),
}

/// Editable copy of the server settings
pub struct ServerSettingsForm {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl From<&ServerConfig> for ServerSettingsForm {
    fn from(server: &ServerConfig) -> Self {
        Self {
            base_url: server.base_url.clone(),
            connect_timeout_secs: server.connect_timeout_secs,
            request_timeout_secs: server.request_timeout_secs,
        }
    }
}

/// Main application state
pub struct OptikApp {
    /// Application configuration
    pub config: Config,
    /// UI-related state
    pub ui: UiState,
    /// Server settings being edited
    pub settings: ServerSettingsForm,
    /// Why the edited settings were rejected
    pub settings_error: Option<String>,
    client: ApiClient,
    screen: ActiveScreen,
}

impl OptikApp {
    /// Create a new application instance
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config, client: ApiClient) -> Self {
        let theme = config.ui.theme.theme();
        let settings = ServerSettingsForm::from(&config.server);

        Self {
            config,
            ui: UiState::new(theme),
            settings,
            settings_error: None,
            client,
            screen: ActiveScreen::None,
        }
    }

    /// Show another tab, tearing down the current screen first
    pub fn switch_tab(&mut self, tab: Tab, ctx: &egui::Context) {
        tracing::debug!("Switching to {:?}", tab);
        self.ui.active_tab = tab;
        self.screen = ActiveScreen::None;
        self.screen = self.open_screen(tab, ctx);
    }

    fn open_screen(&self, tab: Tab, ctx: &egui::Context) -> ActiveScreen {
        match tab {
            Tab::Dashboard | Tab::Settings => ActiveScreen::None,
            Tab::Courses => ActiveScreen::Courses(CoursesTab::open(&self.client, ctx)),
            Tab::AnswerKeys => ActiveScreen::AnswerKeys(AnswerKeysTab::open(&self.client, ctx)),
            Tab::Students => ActiveScreen::Students(StudentsTab::open(&self.client, ctx)),
            Tab::Process => ActiveScreen::Process(ProcessTab::open(&self.client, ctx)),
        }
    }

    /// Validate the edited server settings, rebuild the client and save
    pub fn apply_server_settings(&mut self, ctx: &egui::Context) {
        let server = ServerConfig {
            base_url: self.settings.base_url.trim().to_string(),
            connect_timeout_secs: self.settings.connect_timeout_secs,
            request_timeout_secs: self.settings.request_timeout_secs,
        };

        match ApiClient::new(&server) {
            Ok(client) => {
                self.client = client;
                self.config.server = server;
                self.settings_error = None;
                self.ui.status_message = format!("Connected to {}", self.config.server.base_url);
                self.save_config();
                // Screens hold the old client
                let tab = self.ui.active_tab;
                self.switch_tab(tab, ctx);
            }
            Err(e) => {
                tracing::warn!("Rejected server settings: {}", e);
                self.settings_error = Some(e.to_string());
            }
        }
    }

    /// Save configuration to disk
    pub fn save_config(&self) {
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save config: {}", e);
        }
    }
}

impl eframe::App for OptikApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.ui.theme_dirty {
            self.ui.current_theme.apply(ctx);
            self.ui.theme_dirty = false;
        }

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("Open server dashboard").clicked() {
                        components::open_in_browser(&self.config.server.dashboard_url());
                    }
                    if ui.button("About").clicked() {
                        self.ui.show_about_dialog = true;
                    }
                });
            });
        });

        egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for tab in Tab::all() {
                    components::render_tab(self, ui, *tab);
                }
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(&self.ui.status_message)
                        .color(self.ui.current_theme.text_muted)
                        .size(12.0),
                );
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let theme = self.ui.current_theme.clone();
            match &mut self.screen {
                ActiveScreen::Courses(tab) => {
                    egui::ScrollArea::vertical().show(ui, |ui| ui::render_courses_tab(tab, ui, &theme));
                }
                ActiveScreen::AnswerKeys(tab) => {
                    egui::ScrollArea::vertical().show(ui, |ui| ui::render_answer_keys_tab(tab, ui, &theme));
                }
                ActiveScreen::Students(tab) => {
                    egui::ScrollArea::vertical().show(ui, |ui| ui::render_students_tab(tab, ui, &theme));
                }
                ActiveScreen::Process(tab) => ui::render_process_tab(tab, ui, &theme),
                ActiveScreen::None => match self.ui.active_tab {
                    Tab::Settings => ui::render_settings_tab(self, ui),
                    _ => ui::render_dashboard_tab(self, ui),
                },
            }
        });

        components::render_about_dialog(self, ctx);
    }
}
