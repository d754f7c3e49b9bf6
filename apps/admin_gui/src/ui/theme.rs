//! GymPoint palette and the persisted appearance settings.

use eframe::egui;
use serde::{Deserialize, Serialize};

pub const SETTINGS_STORAGE_KEY: &str = "gympoint_admin_settings";

pub const BRAND: egui::Color32 = egui::Color32::from_rgb(238, 77, 100);
pub const PAGE_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(245, 245, 245);
pub const CARD_BACKGROUND: egui::Color32 = egui::Color32::WHITE;
pub const TEXT: egui::Color32 = egui::Color32::from_rgb(68, 68, 68);
pub const MUTED_TEXT: egui::Color32 = egui::Color32::from_rgb(153, 153, 153);
pub const EDIT_ACTION: egui::Color32 = egui::Color32::from_rgb(77, 133, 238);
pub const DELETE_ACTION: egui::Color32 = egui::Color32::from_rgb(222, 59, 59);
pub const SECONDARY_BUTTON: egui::Color32 = egui::Color32::from_rgb(204, 204, 204);
pub const ANSWERED_BADGE: egui::Color32 = egui::Color32::from_rgb(66, 203, 89);
pub const DISABLED_BADGE: egui::Color32 = egui::Color32::from_rgb(189, 189, 189);
pub const ERROR_BANNER: egui::Color32 = egui::Color32::from_rgb(111, 53, 53);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemePreset {
    #[default]
    GymPointLight,
    Dark,
}

impl ThemePreset {
    pub fn label(self) -> &'static str {
        match self {
            ThemePreset::GymPointLight => "Claro",
            ThemePreset::Dark => "Escuro",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThemeSettings {
    pub preset: ThemePreset,
    pub text_scale: f32,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            preset: ThemePreset::GymPointLight,
            text_scale: 1.0,
        }
    }
}

impl ThemeSettings {
    pub fn page_background(self) -> egui::Color32 {
        match self.preset {
            ThemePreset::GymPointLight => PAGE_BACKGROUND,
            ThemePreset::Dark => egui::Color32::from_rgb(32, 33, 36),
        }
    }

    pub fn card_background(self) -> egui::Color32 {
        match self.preset {
            ThemePreset::GymPointLight => CARD_BACKGROUND,
            ThemePreset::Dark => egui::Color32::from_rgb(44, 45, 49),
        }
    }

    pub fn text(self) -> egui::Color32 {
        match self.preset {
            ThemePreset::GymPointLight => TEXT,
            ThemePreset::Dark => egui::Color32::from_rgb(230, 230, 230),
        }
    }
}

pub fn visuals_for_theme(theme: ThemeSettings) -> egui::Visuals {
    let mut visuals = match theme.preset {
        ThemePreset::GymPointLight => egui::Visuals::light(),
        ThemePreset::Dark => egui::Visuals::dark(),
    };
    visuals.override_text_color = Some(theme.text());
    visuals.panel_fill = theme.page_background();
    visuals.window_fill = theme.card_background();
    visuals.selection.bg_fill = BRAND;
    visuals.hyperlink_color = EDIT_ACTION;
    visuals
}

pub fn apply_theme(ctx: &egui::Context, theme: ThemeSettings) {
    let mut style = (*ctx.style()).clone();
    style.visuals = visuals_for_theme(theme);
    for font in style.text_styles.values_mut() {
        font.size = (font.size * theme.text_scale.clamp(0.8, 1.6)).round();
    }
    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    ctx.set_style(style);
}
