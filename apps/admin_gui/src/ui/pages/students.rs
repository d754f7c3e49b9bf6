use client_core::pages::{
    students::{self, student_rows},
    ListBody, ListResource,
};
use eframe::egui;
use shared::domain::Student;

use crate::backend_bridge::commands::ListKind;
use crate::controller::reducer::{AppState, Route, UiAction};
use crate::ui::{
    theme::ThemeSettings,
    widgets::{self, DialogChoice},
};

pub fn show(ui: &mut egui::Ui, state: &mut AppState, theme: ThemeSettings, actions: &mut Vec<UiAction>) {
    let screen = &mut state.students;

    widgets::content_header(ui, students::TITLE, |ui| {
        if widgets::filter_input(
            ui,
            "students_filter",
            &mut screen.filter_draft,
            students::FILTER_PLACEHOLDER,
        ) {
            actions.push(UiAction::SubmitFilter(ListKind::Students));
        }
        let add = format!("+ {}", students::ADD_LABEL);
        if ui.add(widgets::primary_button(&add)).clicked() {
            actions.push(UiAction::Navigate(Route::StudentForm(None)));
        }
    });

    widgets::card(ui, theme, |ui| match screen.list.body() {
        ListBody::Loading => widgets::loading_state(ui),
        ListBody::Failed(message) => {
            if widgets::error_state(ui, message) {
                actions.push(UiAction::Retry(ListKind::Students));
            }
        }
        ListBody::Empty => widgets::empty_state(ui, Student::EMPTY_PLACEHOLDER),
        ListBody::Rows(rows) => table(ui, rows, actions),
    });

    if screen.list.shows_pagination() {
        if let Some(page) = widgets::pagination_bar(ui, screen.list.pagination()) {
            actions.push(UiAction::SelectPage(ListKind::Students, page));
        }
    }
}

fn table(ui: &mut egui::Ui, students: &[Student], actions: &mut Vec<UiAction>) {
    egui::Grid::new("students_table")
        .num_columns(students::COLUMNS.len() + 1)
        .striped(true)
        .min_col_width(120.0)
        .spacing([32.0, 14.0])
        .show(ui, |ui| {
            for column in students::COLUMNS {
                ui.label(egui::RichText::new(column).strong());
            }
            ui.label("");
            ui.end_row();

            for row in student_rows(students) {
                ui.label(row.name.as_str());
                ui.label(row.email.as_str());
                ui.label(row.age.as_str());
                ui.horizontal(|ui| {
                    if widgets::edit_link(ui).clicked() {
                        actions.push(UiAction::Navigate(Route::StudentForm(Some(row.id))));
                    }
                    if widgets::delete_link(ui).clicked() {
                        actions.push(UiAction::RequestStudentDelete(row.id));
                    }
                });
                ui.end_row();
            }
        });
}

pub fn dialogs(ctx: &egui::Context, state: &AppState, actions: &mut Vec<UiAction>) {
    match widgets::confirm_dialog(ctx, "students_delete_dialog", &state.students.dialog) {
        Some(DialogChoice::Confirm) => actions.push(UiAction::ConfirmDelete(ListKind::Students)),
        Some(DialogChoice::Cancel) => actions.push(UiAction::CancelDelete(ListKind::Students)),
        None => {}
    }
}
