//! Build a small map in code, then write it as JSON, SVG and (with `raster`) PNG.
//!
//! Usage:
//!   cargo run --example render_map -- [out_dir]

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use metromap::generator::{json, svg};
use metromap::render::ExportOptions;
use metromap::{Point, Scene, Smoothing, StationStyle, Viewport};

fn build_scene() -> Result<Scene> {
    let mut scene = Scene::new();

    let red = scene.add_line("#d62828", 8, Smoothing::Metro)?;
    scene.rename_line(red, "Red")?;
    let hub = scene.add_station(red, Point::new(100.0, 100.0), StationStyle::Circle)?;
    scene.rename_station(hub, "Central")?;
    for (name, x, y, style) in [
        ("Harbour", 260.0, 180.0, StationStyle::Square),
        ("Market", 420.0, 180.0, StationStyle::HorizontalRect),
        ("Airport", 520.0, 360.0, StationStyle::Triangle),
    ] {
        let id = scene.add_station(red, Point::new(x, y), style)?;
        scene.rename_station(id, name)?;
    }

    let blue = scene.add_line("navy", 5, Smoothing::Smooth)?;
    scene.rename_line(blue, "Blue")?;
    scene.link_station(blue, hub)?;
    for (name, x, y) in [("University", 140.0, 300.0), ("Stadium", 320.0, 380.0)] {
        let id = scene.add_station(blue, Point::new(x, y), StationStyle::VerticalRect)?;
        scene.rename_station(id, name)?;
    }
    Ok(scene)
}

fn main() -> Result<()> {
    let out_dir = Utf8PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| ".".to_string()));
    std::fs::create_dir_all(&out_dir).with_context(|| format!("Create {}", out_dir))?;

    let scene = build_scene()?;
    let options = ExportOptions::default();

    let json_path = out_dir.join("demo_map.json");
    json::save_map(&json_path, &scene, &Viewport::default())?;
    println!("Wrote {}", json_path);

    let svg_path = out_dir.join("demo_map.svg");
    let frame = svg::export_svg(&svg_path, &scene, &options)?;
    println!("Wrote {} ({}x{})", svg_path, frame.width, frame.height);

    #[cfg(feature = "raster")]
    {
        let png_path = out_dir.join("demo_map.png");
        let frame = metromap::generator::png::export_png(&png_path, &scene, &options)?;
        println!("Wrote {} ({}x{})", png_path, frame.width, frame.height);
    }
    Ok(())
}
