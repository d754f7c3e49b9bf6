use std::time::{Duration, Instant};

use client_core::ClientSettings;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::{BackendCommand, ListKind};
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{apply_action, apply_event, AppState, Route, UiAction};
use crate::ui::{
    pages,
    theme::{self, ThemePreset, ThemeSettings, BRAND, SETTINGS_STORAGE_KEY},
    widgets,
};

const NAV_ENTRIES: [(&str, Route); 3] = [
    ("ALUNOS", Route::Students),
    ("MATRÍCULAS", Route::Enrolments),
    ("PEDIDOS DE AUXÍLIO", Route::HelpOrders),
];

pub struct AdminApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: AppState,
    api_url: String,
    theme: ThemeSettings,
    applied_theme: Option<ThemeSettings>,
}

impl AdminApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: &ClientSettings,
        persisted_theme: Option<ThemeSettings>,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            state: AppState::new(settings),
            api_url: settings.api_url.clone(),
            theme: persisted_theme.unwrap_or_default(),
            applied_theme: None,
        };
        app.dispatch(UiAction::Navigate(Route::Students));
        app
    }

    fn dispatch(&mut self, action: UiAction) {
        for cmd in apply_action(&mut self.state, action) {
            dispatch_backend_command(&self.cmd_tx, cmd, &mut self.state.status);
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            for cmd in apply_event(&mut self.state, event) {
                dispatch_backend_command(&self.cmd_tx, cmd, &mut self.state.status);
            }
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_theme == Some(self.theme) {
            return;
        }
        theme::apply_theme(ctx, self.theme);
        self.applied_theme = Some(self.theme);
    }

    fn show_header(&mut self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        egui::TopBottomPanel::top("gympoint_header")
            .frame(
                egui::Frame::new()
                    .fill(self.theme.card_background())
                    .inner_margin(egui::Margin::symmetric(30, 12)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("GYMPOINT")
                            .size(18.0)
                            .strong()
                            .color(BRAND),
                    );
                    ui.separator();
                    let section = self.state.route.section();
                    for (label, route) in NAV_ENTRIES {
                        let selected = route.section() == section;
                        if ui.selectable_label(selected, label).clicked() {
                            actions.push(UiAction::Navigate(route));
                        }
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        egui::ComboBox::from_id_salt("theme_preset")
                            .selected_text(self.theme.preset.label())
                            .show_ui(ui, |ui| {
                                for preset in [ThemePreset::GymPointLight, ThemePreset::Dark] {
                                    ui.selectable_value(
                                        &mut self.theme.preset,
                                        preset,
                                        preset.label(),
                                    );
                                }
                            });
                        ui.label(
                            egui::RichText::new(self.api_url.as_str())
                                .small()
                                .color(theme::MUTED_TEXT),
                        );
                    });
                });
            });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("gympoint_status").show(ctx, |ui| {
            ui.label(egui::RichText::new(self.state.status.as_str()).small());
        });
    }

    fn show_route(&mut self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        let theme = self.theme;
        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme.page_background())
                    .inner_margin(egui::Margin::symmetric(40, 24)),
            )
            .show(ctx, |ui| {
                if let Some(banner) = self.state.banner.as_ref() {
                    if widgets::status_banner(ui, &banner.status_line()) {
                        actions.push(UiAction::DismissBanner);
                    }
                    ui.add_space(12.0);
                }

                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        ui.set_max_width(1200.0);
                        let route = self.state.route;
                        let state = &mut self.state;
                        match route {
                            Route::Students => pages::students::show(ui, state, theme, actions),
                            Route::StudentForm(_) => pages::student_form::show(ui, state, theme, actions),
                            Route::Enrolments => pages::enrolments::show(ui, state, theme, actions),
                            Route::EnrolmentForm(_) => {
                                pages::enrolment_form::show(ui, state, theme, actions)
                            }
                            Route::HelpOrders => pages::help_orders::show(ui, state, theme, actions),
                        }
                    });
            });

        match self.state.route.section() {
            ListKind::Students => pages::students::dialogs(ctx, &self.state, actions),
            ListKind::Enrolments => pages::enrolments::dialogs(ctx, &self.state, actions),
            ListKind::HelpOrders => pages::help_orders::dialogs(ctx, &mut self.state, actions),
        }

        if let Some(index) = widgets::toasts(ctx, &self.state.toasts) {
            actions.push(UiAction::DismissToast(index));
        }
    }
}

impl eframe::App for AdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.state.toasts.prune(Instant::now());
        self.apply_theme_if_needed(ctx);

        let mut actions = Vec::new();
        self.show_header(ctx, &mut actions);
        self.show_status_bar(ctx);
        self.show_route(ctx, &mut actions);
        for action in actions {
            self.dispatch(action);
        }

        ctx.request_repaint_after(Duration::from_millis(100));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(serialized) = serde_json::to_string(&self.theme) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}
