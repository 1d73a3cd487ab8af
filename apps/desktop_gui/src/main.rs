mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;

use backend_bridge::commands::BackendCommand;
use backend_bridge::runtime::{spawn_backend_thread, RuntimeConfig};
use controller::events::UiEvent;
use ui::app::DesktopGuiApp;

/// Desktop client for the VeriRag verified-retrieval backend.
#[derive(Debug, Parser)]
#[command(name = "verirag-desktop")]
struct Args {
    /// Base endpoint of the verification backend.
    #[arg(long, env = "VERIRAG_SERVER_URL", default_value = "http://127.0.0.1:8000/api")]
    server_url: String,

    /// Field name carrying the message inside backend error bodies. Only the
    /// upload path is confirmed to use `error`; override if the deployment
    /// differs.
    #[arg(long, env = "VERIRAG_ERROR_FIELD", default_value = "error")]
    error_field: String,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    spawn_backend_thread(
        RuntimeConfig {
            server_url: args.server_url,
            error_field: args.error_field,
        },
        cmd_rx,
        ui_tx,
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("VeriRag Desktop")
            .with_inner_size([1024.0, 720.0])
            .with_min_inner_size([720.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "VeriRag Desktop",
        options,
        Box::new(|_cc| Ok(Box::new(DesktopGuiApp::new(cmd_tx, ui_rx)))),
    )
}
