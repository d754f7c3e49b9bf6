mod backend_bridge;
mod controller;
mod ui;

use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context};
use clap::Parser;
use client_core::{config::load_settings_from, load_settings, GymApi, GymClient};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{theme::ThemeSettings, theme::SETTINGS_STORAGE_KEY, AdminApp};

#[derive(Parser, Debug)]
#[command(about = "GymPoint staff dashboard")]
struct Args {
    /// Backend base URL; overrides the settings file and environment.
    #[arg(long)]
    api_url: Option<String>,
    /// Settings file to read instead of ./gympoint.toml.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => load_settings_from(path),
        None => load_settings(),
    }
    .with_api_url(args.api_url);

    let client = GymClient::from_settings(&settings).context("failed to build api client")?;
    tracing::info!(api_url = client.base_url(), "starting admin dashboard");
    let api: Arc<dyn GymApi> = Arc::new(client);

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::launch(api, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("GymPoint")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([960.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "GymPoint",
        options,
        Box::new(move |cc| {
            let persisted_theme = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| serde_json::from_str::<ThemeSettings>(&text).ok())
            });
            Ok(Box::new(AdminApp::new(
                cmd_tx,
                ui_rx,
                &settings,
                persisted_theme,
            )))
        }),
    )
    .map_err(|err| anyhow!("admin dashboard exited with an error: {err}"))
}
