mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::ModelsBaseApp;

#[derive(Debug, Parser)]
#[command(name = "modelsbase", about = "Browse and curate the AI model catalog")]
struct Args {
    #[arg(
        long,
        env = "MODELSBASE_SERVER_URL",
        default_value = "http://127.0.0.1:8080"
    )]
    server_url: String,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    tracing::info!(server_url = %args.server_url, "starting desktop gui");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::launch(args.server_url, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("ModelsBase")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "ModelsBase",
        options,
        Box::new(|_cc| Ok(Box::new(ModelsBaseApp::new(cmd_tx, ui_rx)))),
    )
}
