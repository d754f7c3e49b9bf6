use eframe::egui;

use crate::controller::reducer::{AppState, Route, UiAction};
use crate::ui::{theme::ThemeSettings, widgets};

pub fn show(ui: &mut egui::Ui, state: &mut AppState, theme: ThemeSettings, actions: &mut Vec<UiAction>) {
    let screen = &mut state.student_form;
    let title = if screen.editing.is_some() {
        "Edição de aluno"
    } else {
        "Cadastro de aluno"
    };
    let busy = screen.loading || screen.saving;

    widgets::content_header(ui, title, |ui| {
        if ui
            .add_enabled(!busy, widgets::primary_button("SALVAR"))
            .clicked()
        {
            actions.push(UiAction::SaveStudent);
        }
        if ui.add(widgets::secondary_button("VOLTAR")).clicked() {
            actions.push(UiAction::Navigate(Route::Students));
        }
    });

    widgets::card(ui, theme, |ui| {
        if screen.loading {
            widgets::loading_state(ui);
            return;
        }

        widgets::field_label(ui, "NOME COMPLETO");
        ui.add(
            egui::TextEdit::singleline(&mut screen.form.name)
                .id_salt("student_name")
                .hint_text("John Doe")
                .desired_width(f32::INFINITY),
        );
        widgets::field_error(ui, screen.errors.get("name"));
        ui.add_space(10.0);

        widgets::field_label(ui, "ENDEREÇO DE E-MAIL");
        ui.add(
            egui::TextEdit::singleline(&mut screen.form.email)
                .id_salt("student_email")
                .hint_text("exemplo@email.com")
                .desired_width(f32::INFINITY),
        );
        widgets::field_error(ui, screen.errors.get("email"));
        ui.add_space(10.0);

        widgets::field_label(ui, "IDADE");
        ui.add(
            egui::TextEdit::singleline(&mut screen.form.age)
                .id_salt("student_age")
                .desired_width(120.0),
        );
        widgets::field_error(ui, screen.errors.get("age"));

        if screen.saving {
            ui.add_space(10.0);
            ui.spinner();
        }
    });
}
