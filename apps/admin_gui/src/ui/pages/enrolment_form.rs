use client_core::pages::enrolments::{format_date, format_price};
use eframe::egui;

use crate::controller::reducer::{AppState, Route, UiAction};
use crate::ui::{
    theme::{ThemeSettings, MUTED_TEXT},
    widgets,
};

pub fn show(ui: &mut egui::Ui, state: &mut AppState, theme: ThemeSettings, actions: &mut Vec<UiAction>) {
    let screen = &mut state.enrolment_form;
    let title = if screen.editing.is_some() {
        "Edição de matrícula"
    } else {
        "Cadastro de matrícula"
    };
    let busy = screen.loading || screen.saving;

    widgets::content_header(ui, title, |ui| {
        if ui
            .add_enabled(!busy, widgets::primary_button("SALVAR"))
            .clicked()
        {
            actions.push(UiAction::SaveEnrolment);
        }
        if ui.add(widgets::secondary_button("VOLTAR")).clicked() {
            actions.push(UiAction::Navigate(Route::Enrolments));
        }
    });

    widgets::card(ui, theme, |ui| {
        if screen.loading {
            widgets::loading_state(ui);
            return;
        }

        widgets::field_label(ui, "ALUNO");
        ui.horizontal(|ui| {
            if widgets::filter_input(
                ui,
                "enrolment_student_search",
                &mut screen.student_search,
                "Buscar aluno",
            ) {
                actions.push(UiAction::SearchEnrolmentStudents);
            }
            if screen.pending_search.is_some() {
                ui.spinner();
            }
            let selected = screen
                .selected_student_label()
                .unwrap_or_else(|| "Selecione o aluno".to_string());
            let choices: Vec<_> = screen
                .student_choices()
                .into_iter()
                .map(|student| (student.id, student.name.clone()))
                .collect();
            egui::ComboBox::from_id_salt("enrolment_student")
                .selected_text(selected)
                .width(320.0)
                .show_ui(ui, |ui| {
                    for (id, name) in choices {
                        ui.selectable_value(&mut screen.form.student_id, Some(id), name);
                    }
                });
        });
        widgets::field_error(ui, screen.errors.get("student_id"));
        ui.add_space(10.0);

        ui.horizontal_top(|ui| {
            ui.vertical(|ui| {
                widgets::field_label(ui, "PLANO");
                let selected = screen
                    .form
                    .selected_plan(&screen.options.plans)
                    .map(|plan| plan.title.clone())
                    .unwrap_or_else(|| "Selecione o plano".to_string());
                egui::ComboBox::from_id_salt("enrolment_plan")
                    .selected_text(selected)
                    .width(180.0)
                    .show_ui(ui, |ui| {
                        for plan in &screen.options.plans {
                            ui.selectable_value(
                                &mut screen.form.plan_id,
                                Some(plan.id),
                                plan.title.as_str(),
                            );
                        }
                    });
                widgets::field_error(ui, screen.errors.get("plan_id"));
            });

            ui.vertical(|ui| {
                widgets::field_label(ui, "DATA DE INÍCIO");
                ui.add(
                    egui::TextEdit::singleline(&mut screen.form.start_date)
                        .id_salt("enrolment_start_date")
                        .hint_text("dd/mm/aaaa")
                        .desired_width(140.0),
                );
                widgets::field_error(ui, screen.errors.get("start_date"));
            });

            let quote = screen.form.quote(&screen.options.plans);
            ui.vertical(|ui| {
                widgets::field_label(ui, "DATA DE TÉRMINO");
                read_only(ui, quote.map(|quote| format_date(quote.end_date)));
            });
            ui.vertical(|ui| {
                widgets::field_label(ui, "VALOR FINAL");
                read_only(ui, quote.map(|quote| format_price(quote.total_price)));
            });
        });

        if screen.saving {
            ui.add_space(10.0);
            ui.spinner();
        }
    });
}

fn read_only(ui: &mut egui::Ui, value: Option<String>) {
    match value {
        Some(value) => ui.label(value),
        None => ui.label(egui::RichText::new("—").color(MUTED_TEXT)),
    };
}
