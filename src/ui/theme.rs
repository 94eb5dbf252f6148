use eframe::egui::{self, Color32, Stroke, Visuals};
use serde::{Deserialize, Serialize};

/// Available theme presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    #[default]
    Slate,
    Indigo,
    Paper,
}

impl ThemePreset {
    pub fn all() -> &'static [ThemePreset] {
        &[ThemePreset::Slate, ThemePreset::Indigo, ThemePreset::Paper]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemePreset::Slate => "Slate",
            ThemePreset::Indigo => "Indigo",
            ThemePreset::Paper => "Paper (light)",
        }
    }

    /// Parse a preset from its config name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "slate" => Some(ThemePreset::Slate),
            "indigo" => Some(ThemePreset::Indigo),
            "paper" => Some(ThemePreset::Paper),
            _ => None,
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemePreset::Slate => Theme::slate(),
            ThemePreset::Indigo => Theme::indigo(),
            ThemePreset::Paper => Theme::paper(),
        }
    }
}

/// Theme color definitions
#[derive(Debug, Clone)]
pub struct Theme {
    pub dark: bool,

    pub bg_darkest: Color32,
    pub bg_dark: Color32,
    pub bg_medium: Color32,
    pub bg_light: Color32,

    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    pub accent: Color32,
    pub accent_muted: Color32,

    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,

    pub border: Color32,
}

impl Theme {
    /// Neutral dark grey with a sky-blue accent
    pub fn slate() -> Self {
        Self {
            dark: true,
            bg_darkest: Color32::from_rgb(15, 18, 24),
            bg_dark: Color32::from_rgb(22, 26, 33),
            bg_medium: Color32::from_rgb(31, 36, 45),
            bg_light: Color32::from_rgb(45, 52, 64),

            text_primary: Color32::from_rgb(241, 245, 249),
            text_secondary: Color32::from_rgb(203, 213, 225),
            text_muted: Color32::from_rgb(148, 163, 184),

            accent: Color32::from_rgb(56, 189, 248),
            accent_muted: Color32::from_rgb(3, 105, 161),

            success: Color32::from_rgb(74, 222, 128),
            warning: Color32::from_rgb(250, 204, 21),
            error: Color32::from_rgb(248, 113, 113),

            border: Color32::from_rgb(51, 65, 85),
        }
    }

    pub fn indigo() -> Self {
        Self {
            dark: true,
            bg_darkest: Color32::from_rgb(17, 16, 36),
            bg_dark: Color32::from_rgb(26, 24, 52),
            bg_medium: Color32::from_rgb(36, 33, 70),
            bg_light: Color32::from_rgb(52, 48, 96),

            text_primary: Color32::from_rgb(238, 242, 255),
            text_secondary: Color32::from_rgb(199, 210, 254),
            text_muted: Color32::from_rgb(140, 140, 190),

            accent: Color32::from_rgb(129, 140, 248),
            accent_muted: Color32::from_rgb(67, 56, 202),

            success: Color32::from_rgb(52, 211, 153),
            warning: Color32::from_rgb(251, 191, 36),
            error: Color32::from_rgb(251, 113, 133),

            border: Color32::from_rgb(70, 66, 120),
        }
    }

    /// Light theme for printing-room screens
    pub fn paper() -> Self {
        Self {
            dark: false,
            bg_darkest: Color32::from_rgb(255, 255, 255),
            bg_dark: Color32::from_rgb(248, 248, 245),
            bg_medium: Color32::from_rgb(238, 237, 232),
            bg_light: Color32::from_rgb(225, 223, 216),

            text_primary: Color32::from_rgb(28, 25, 23),
            text_secondary: Color32::from_rgb(68, 64, 60),
            text_muted: Color32::from_rgb(120, 113, 108),

            accent: Color32::from_rgb(37, 99, 235),
            accent_muted: Color32::from_rgb(147, 180, 250),

            success: Color32::from_rgb(22, 163, 74),
            warning: Color32::from_rgb(202, 138, 4),
            error: Color32::from_rgb(220, 38, 38),

            border: Color32::from_rgb(214, 211, 209),
        }
    }

    /// Apply this theme to egui's visuals
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = if self.dark { Visuals::dark() } else { Visuals::light() };

        visuals.window_fill = self.bg_dark;
        visuals.panel_fill = self.bg_dark;
        visuals.faint_bg_color = self.bg_medium;
        visuals.extreme_bg_color = self.bg_darkest;

        let widgets = [
            (&mut visuals.widgets.noninteractive, self.bg_medium, self.border, self.text_secondary),
            (&mut visuals.widgets.inactive, self.bg_medium, self.border, self.text_primary),
            (&mut visuals.widgets.hovered, self.bg_light, self.accent, self.text_primary),
            (&mut visuals.widgets.active, self.accent_muted, self.accent, self.text_primary),
            (&mut visuals.widgets.open, self.bg_light, self.accent, self.text_primary),
        ];
        for (widget, fill, stroke, text) in widgets {
            widget.bg_fill = fill;
            widget.weak_bg_fill = fill;
            widget.bg_stroke = Stroke::new(1.0, stroke);
            widget.fg_stroke = Stroke::new(1.0, text);
        }

        visuals.selection.bg_fill = self.accent.gamma_multiply(0.3);
        visuals.selection.stroke = Stroke::new(1.0, self.accent);
        visuals.hyperlink_color = self.accent;

        visuals.window_stroke = Stroke::new(1.0, self.border);
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        ctx.set_visuals(visuals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names_round_trip() {
        for preset in ThemePreset::all() {
            let key = format!("{:?}", preset).to_lowercase();
            assert_eq!(ThemePreset::from_name(&key), Some(*preset));
        }
        assert_eq!(ThemePreset::from_name("amber"), None);
        assert!(!ThemePreset::Paper.theme().dark);
    }
}
