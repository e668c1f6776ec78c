//! Edit a transit map interactively using egui (requires `--features egui`).
//!
//! Usage:
//!   cargo run --features egui --example egui_editor -- [map.json]

#[cfg(feature = "egui")]
use anyhow::{Context, Result};
#[cfg(feature = "egui")]
use camino::Utf8PathBuf;
#[cfg(feature = "egui")]
use clap::Parser;
#[cfg(feature = "egui")]
use eframe::egui;
#[cfg(feature = "egui")]
use metromap::{
    egui_app::EditorApp,
    generator::json,
    session::{Session, SessionConfig},
};

#[cfg(feature = "egui")]
#[derive(Parser, Debug)]
#[command(author, version, about = "Edit a transit map using egui", long_about = None)]
struct Args {
    /// Map file to open initially
    #[arg(value_name = "MAP_JSON")]
    file: Option<Utf8PathBuf>,
}

#[cfg(feature = "egui")]
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("metromap=info")),
        )
        .init();
    let args = Args::parse();

    let session = match &args.file {
        Some(path) => {
            let (scene, viewport) =
                json::load_map(path).with_context(|| format!("Failed to load {}", path))?;
            println!(
                "Opened {}: {} lines, {} stations",
                path,
                scene.line_count(),
                scene.station_count()
            );
            Session::with_scene(scene, viewport, SessionConfig::default())
        }
        None => Session::default(),
    };
    let mut app = EditorApp::new(session);
    if let Some(path) = &args.file {
        app.json_path = path.to_string();
    }

    println!("Mouse:");
    println!("  Left click   add a station to the selected line (Add mode)");
    println!("  Left drag    move a station (Move mode)");
    println!("  Right click  edit the station under the pointer");
    println!("  Middle drag  pan");
    println!("  Wheel        zoom");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        "metromap editor",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(())
}

#[cfg(not(feature = "egui"))]
fn main() {
    eprintln!("This example requires the 'egui' feature. Try: cargo run --features egui --example egui_editor -- map.json");
}
