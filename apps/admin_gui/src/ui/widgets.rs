//! Presentation primitives shared by every screen.

use client_core::pages::{
    help_orders::HelpOrderBadge, ConfirmDialog, Pagination, ToastLevel, Toasts,
};
use eframe::egui;

use crate::ui::theme::{
    ThemeSettings, ANSWERED_BADGE, BRAND, DELETE_ACTION, DISABLED_BADGE, EDIT_ACTION,
    ERROR_BANNER, MUTED_TEXT, SECONDARY_BUTTON,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogChoice {
    Confirm,
    Cancel,
}

pub fn primary_button(label: &str) -> egui::Button<'static> {
    egui::Button::new(
        egui::RichText::new(label.to_string())
            .strong()
            .color(egui::Color32::WHITE),
    )
    .fill(BRAND)
    .min_size(egui::vec2(142.0, 36.0))
}

pub fn secondary_button(label: &str) -> egui::Button<'static> {
    egui::Button::new(
        egui::RichText::new(label.to_string())
            .strong()
            .color(egui::Color32::WHITE),
    )
    .fill(SECONDARY_BUTTON)
    .min_size(egui::vec2(112.0, 36.0))
}

pub fn edit_link(ui: &mut egui::Ui) -> egui::Response {
    row_link(ui, "editar", EDIT_ACTION)
}

pub fn edit_link_labeled(ui: &mut egui::Ui, label: &str) -> egui::Response {
    row_link(ui, label, EDIT_ACTION)
}

pub fn delete_link(ui: &mut egui::Ui) -> egui::Response {
    row_link(ui, "apagar", DELETE_ACTION)
}

fn row_link(ui: &mut egui::Ui, label: &str, color: egui::Color32) -> egui::Response {
    ui.add(
        egui::Button::new(egui::RichText::new(label).color(color))
            .frame(false),
    )
}

/// White content card used for tables and forms.
pub fn card<R>(
    ui: &mut egui::Ui,
    theme: ThemeSettings,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    egui::Frame::new()
        .fill(theme.card_background())
        .corner_radius(egui::CornerRadius::same(4))
        .inner_margin(egui::Margin::symmetric(30, 20))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        })
        .inner
}

/// Page title on the left, controls on the right.
pub fn content_header(ui: &mut egui::Ui, title: &str, add_controls: impl FnOnce(&mut egui::Ui)) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(title).size(24.0).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), add_controls);
    });
    ui.add_space(12.0);
}

/// Filter box that reports `true` when the user presses Enter in it.
pub fn filter_input(ui: &mut egui::Ui, id_salt: &str, draft: &mut String, placeholder: &str) -> bool {
    let response = ui.add(
        egui::TextEdit::singleline(draft)
            .id_salt(id_salt)
            .hint_text(format!("🔍 {placeholder}"))
            .desired_width(220.0),
    );
    response.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter))
}

pub fn empty_state(ui: &mut egui::Ui, text: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.label(egui::RichText::new(text).color(MUTED_TEXT).size(16.0));
        ui.add_space(24.0);
    });
}

pub fn loading_state(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.spinner();
        ui.add_space(24.0);
    });
}

/// Failure placeholder; returns `true` when the retry button was clicked.
pub fn error_state(ui: &mut egui::Ui, message: &str) -> bool {
    let mut retry = false;
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.label(egui::RichText::new("Não foi possível carregar a lista").color(DELETE_ACTION));
        ui.label(egui::RichText::new(message).color(MUTED_TEXT).small());
        ui.add_space(8.0);
        retry = ui.add(secondary_button("TENTAR NOVAMENTE")).clicked();
        ui.add_space(24.0);
    });
    retry
}

pub fn badge(ui: &mut egui::Ui, badge: HelpOrderBadge) {
    let fill = if badge.disabled {
        DISABLED_BADGE
    } else {
        ANSWERED_BADGE
    };
    egui::Frame::new()
        .fill(fill)
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(badge.label)
                    .small()
                    .strong()
                    .color(egui::Color32::WHITE),
            );
        });
}

pub fn field_error(ui: &mut egui::Ui, message: Option<&str>) {
    if let Some(message) = message {
        ui.label(egui::RichText::new(message).small().color(DELETE_ACTION));
    }
}

pub fn field_label(ui: &mut egui::Ui, label: &str) {
    ui.label(egui::RichText::new(label).strong().size(14.0));
}

/// Previous / label / next. Returns the page the user asked for.
pub fn pagination_bar(ui: &mut egui::Ui, pagination: Pagination) -> Option<u32> {
    let mut selected = None;
    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if ui
            .add_enabled(pagination.has_previous(), egui::Button::new("◀"))
            .clicked()
        {
            selected = pagination.previous();
        }
        ui.label(pagination.label());
        if ui
            .add_enabled(pagination.has_next(), egui::Button::new("▶"))
            .clicked()
        {
            selected = pagination.next();
        }
    });
    selected
}

/// Modal confirmation window bound to `dialog`. Renders nothing while closed.
pub fn confirm_dialog<P>(ctx: &egui::Context, id_salt: &str, dialog: &ConfirmDialog<P>) -> Option<DialogChoice> {
    if !dialog.is_open() {
        return None;
    }
    let mut choice = None;
    egui::Window::new(dialog.title())
        .id(egui::Id::new(id_salt))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(dialog.description());
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui.add(secondary_button("CANCELAR")).clicked() {
                    choice = Some(DialogChoice::Cancel);
                }
                if ui.add(primary_button("CONFIRMAR")).clicked() {
                    choice = Some(DialogChoice::Confirm);
                }
            });
        });
    if ctx.input(|input| input.key_pressed(egui::Key::Escape)) {
        choice = Some(DialogChoice::Cancel);
    }
    choice
}

/// Stacks toasts in the top right corner. Returns the index the user dismissed.
pub fn toasts(ctx: &egui::Context, toasts: &Toasts) -> Option<usize> {
    let mut dismissed = None;
    egui::Area::new(egui::Id::new("gympoint_toasts"))
        .anchor(egui::Align2::RIGHT_TOP, [-16.0, 64.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for (index, toast) in toasts.entries().iter().enumerate() {
                let fill = match toast.level {
                    ToastLevel::Success => ANSWERED_BADGE,
                    ToastLevel::Error => DELETE_ACTION,
                };
                egui::Frame::new()
                    .fill(fill)
                    .corner_radius(egui::CornerRadius::same(4))
                    .inner_margin(egui::Margin::symmetric(14, 10))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(&toast.message).color(egui::Color32::WHITE),
                            );
                            if ui
                                .add(
                                    egui::Button::new(
                                        egui::RichText::new("✕").color(egui::Color32::WHITE),
                                    )
                                    .frame(false),
                                )
                                .clicked()
                            {
                                dismissed = Some(index);
                            }
                        });
                    });
                ui.add_space(6.0);
            }
        });
    dismissed
}

pub fn status_banner(ui: &mut egui::Ui, message: &str) -> bool {
    let mut dismissed = false;
    egui::Frame::new()
        .fill(ERROR_BANNER)
        .stroke(egui::Stroke::new(1.0, DELETE_ACTION))
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Fechar").clicked() {
                        dismissed = true;
                    }
                });
            });
        });
    dismissed
}
