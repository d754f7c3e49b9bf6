use client_core::pages::{
    help_orders::{self, help_order_cards},
    ListBody, ListResource,
};
use eframe::egui;
use shared::domain::HelpOrder;

use crate::backend_bridge::commands::ListKind;
use crate::controller::reducer::{AppState, UiAction};
use crate::ui::{
    theme::{ThemeSettings, MUTED_TEXT},
    widgets,
};

const ANSWER_LINK: &str = "responder";
const ANSWER_BUTTON: &str = "RESPONDER ALUNO";

pub fn show(ui: &mut egui::Ui, state: &mut AppState, theme: ThemeSettings, actions: &mut Vec<UiAction>) {
    let screen = &mut state.help_orders;

    widgets::content_header(ui, help_orders::ADMIN_TITLE, |_| {});

    widgets::card(ui, theme, |ui| match screen.list.body() {
        ListBody::Loading => widgets::loading_state(ui),
        ListBody::Failed(message) => {
            if widgets::error_state(ui, message) {
                actions.push(UiAction::Retry(ListKind::HelpOrders));
            }
        }
        ListBody::Empty => widgets::empty_state(ui, HelpOrder::EMPTY_PLACEHOLDER),
        ListBody::Rows(orders) => queue(ui, orders, actions),
    });

    if screen.list.shows_pagination() {
        if let Some(page) = widgets::pagination_bar(ui, screen.list.pagination()) {
            actions.push(UiAction::SelectPage(ListKind::HelpOrders, page));
        }
    }
}

fn queue(ui: &mut egui::Ui, orders: &[HelpOrder], actions: &mut Vec<UiAction>) {
    ui.label(egui::RichText::new("ALUNO").strong());
    ui.separator();
    for (order, card) in orders.iter().zip(help_order_cards(orders)) {
        ui.horizontal(|ui| {
            widgets::badge(ui, card.badge);
            match order.student_id {
                Some(student_id) => ui.label(format!("Aluno #{student_id}")),
                None => ui.label("Aluno"),
            };
            ui.label(egui::RichText::new(card.time.as_str()).color(MUTED_TEXT).small());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if widgets::edit_link_labeled(ui, ANSWER_LINK).clicked() {
                    actions.push(UiAction::OpenAnswer(card.id));
                }
            });
        });
        ui.label(card.question.as_str());
        ui.separator();
    }
}

/// The answer window opened from the queue.
pub fn dialogs(ctx: &egui::Context, state: &mut AppState, actions: &mut Vec<UiAction>) {
    let screen = &mut state.help_orders;
    let Some(order) = screen.answering.as_ref() else {
        return;
    };
    let question = order.question.clone();
    let sending = screen.sending;

    let mut open = true;
    egui::Window::new(help_orders::ANSWER_DIALOG_TITLE)
        .id(egui::Id::new("help_order_answer_dialog"))
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.set_width(420.0);
            ui.label(question.as_str());
            ui.add_space(12.0);
            widgets::field_label(ui, "SUA RESPOSTA");
            ui.add(
                egui::TextEdit::multiline(&mut screen.answer.answer)
                    .id_salt("help_order_answer")
                    .desired_rows(5)
                    .desired_width(f32::INFINITY),
            );
            widgets::field_error(ui, screen.errors.get("answer"));
            ui.add_space(12.0);
            ui.vertical_centered_justified(|ui| {
                if ui
                    .add_enabled(!sending, widgets::primary_button(ANSWER_BUTTON))
                    .clicked()
                {
                    actions.push(UiAction::SubmitAnswer);
                }
            });
        });

    if !open {
        actions.push(UiAction::CancelAnswer);
    }
}
