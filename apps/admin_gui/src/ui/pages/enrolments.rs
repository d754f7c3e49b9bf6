use client_core::pages::{
    enrolments::{self, enrolment_rows},
    ListBody, ListResource,
};
use eframe::egui;
use shared::domain::Enrolment;

use crate::backend_bridge::commands::ListKind;
use crate::controller::reducer::{AppState, Route, UiAction};
use crate::ui::{
    theme::{ThemeSettings, ANSWERED_BADGE, DISABLED_BADGE},
    widgets::{self, DialogChoice},
};

pub fn show(ui: &mut egui::Ui, state: &mut AppState, theme: ThemeSettings, actions: &mut Vec<UiAction>) {
    let screen = &mut state.enrolments;

    widgets::content_header(ui, enrolments::TITLE, |ui| {
        if widgets::filter_input(
            ui,
            "enrolments_filter",
            &mut screen.filter_draft,
            enrolments::FILTER_PLACEHOLDER,
        ) {
            actions.push(UiAction::SubmitFilter(ListKind::Enrolments));
        }
        let add = format!("+ {}", enrolments::ADD_LABEL);
        if ui.add(widgets::primary_button(&add)).clicked() {
            actions.push(UiAction::Navigate(Route::EnrolmentForm(None)));
        }
    });

    widgets::card(ui, theme, |ui| match screen.list.body() {
        ListBody::Loading => widgets::loading_state(ui),
        ListBody::Failed(message) => {
            if widgets::error_state(ui, message) {
                actions.push(UiAction::Retry(ListKind::Enrolments));
            }
        }
        ListBody::Empty => widgets::empty_state(ui, Enrolment::EMPTY_PLACEHOLDER),
        ListBody::Rows(rows) => table(ui, rows, actions),
    });

    if screen.list.shows_pagination() {
        if let Some(page) = widgets::pagination_bar(ui, screen.list.pagination()) {
            actions.push(UiAction::SelectPage(ListKind::Enrolments, page));
        }
    }
}

fn table(ui: &mut egui::Ui, rows: &[Enrolment], actions: &mut Vec<UiAction>) {
    egui::Grid::new("enrolments_table")
        .num_columns(enrolments::COLUMNS.len() + 1)
        .striped(true)
        .min_col_width(90.0)
        .spacing([28.0, 14.0])
        .show(ui, |ui| {
            for column in enrolments::COLUMNS {
                ui.label(egui::RichText::new(column).strong());
            }
            ui.label("");
            ui.end_row();

            for row in enrolment_rows(rows) {
                ui.label(row.student.as_str());
                ui.label(row.plan.as_str());
                ui.label(row.start.as_str());
                ui.label(row.end.as_str());
                let active = if row.active {
                    egui::RichText::new("●").color(ANSWERED_BADGE)
                } else {
                    egui::RichText::new("●").color(DISABLED_BADGE)
                };
                ui.label(active);
                ui.horizontal(|ui| {
                    if widgets::edit_link(ui).clicked() {
                        actions.push(UiAction::Navigate(Route::EnrolmentForm(Some(row.id))));
                    }
                    if widgets::delete_link(ui).clicked() {
                        actions.push(UiAction::RequestEnrolmentDelete(row.id));
                    }
                });
                ui.end_row();
            }
        });
}

pub fn dialogs(ctx: &egui::Context, state: &AppState, actions: &mut Vec<UiAction>) {
    match widgets::confirm_dialog(ctx, "enrolments_delete_dialog", &state.enrolments.dialog) {
        Some(DialogChoice::Confirm) => actions.push(UiAction::ConfirmDelete(ListKind::Enrolments)),
        Some(DialogChoice::Cancel) => actions.push(UiAction::CancelDelete(ListKind::Enrolments)),
        None => {}
    }
}
