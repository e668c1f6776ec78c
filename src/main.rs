use anyhow::{Context, Result, bail};
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use metromap::generator::json;
use metromap::path::build_path;
use metromap::render::ExportOptions;
use metromap::{LineId, Scene, Viewport};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render and inspect schematic transit map files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a summary of the lines and stations in a map file
    Info {
        #[arg(value_name = "MAP_JSON")]
        map: Utf8PathBuf,
    },
    /// Render a map file to PNG
    Png(ExportArgs),
    /// Render a map file to SVG
    Svg(ExportArgs),
    /// Print the routed path of one line as JSON
    Path {
        #[arg(value_name = "MAP_JSON")]
        map: Utf8PathBuf,
        /// Line id
        #[arg(short, long)]
        line: u64,
    },
    /// Load a map file and write it back in canonical form
    Normalize {
        #[arg(value_name = "MAP_JSON")]
        map: Utf8PathBuf,
        #[arg(short, long, value_name = "OUT_JSON")]
        output: Utf8PathBuf,
    },
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[arg(value_name = "MAP_JSON")]
    map: Utf8PathBuf,
    #[arg(short, long, value_name = "OUT")]
    output: Utf8PathBuf,
    /// Model-to-pixel scale of the exported image
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
    /// Margin around the station bounding box, in pixels
    #[arg(long, default_value_t = 40.0)]
    padding: f64,
}

impl ExportArgs {
    fn options(&self) -> ExportOptions {
        ExportOptions {
            scale: self.scale,
            padding: self.padding,
            ..ExportOptions::default()
        }
    }
}

fn load(path: &Utf8PathBuf) -> Result<(Scene, Viewport)> {
    json::load_map(path).with_context(|| format!("Failed to load {}", path))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("metromap=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Info { map } => {
            let (scene, viewport) = load(&map)?;
            println!(
                "{}: {} lines, {} stations, view scale {} offset ({}, {})",
                map,
                scene.line_count(),
                scene.station_count(),
                viewport.scale,
                viewport.offset_x,
                viewport.offset_y
            );
            for line in scene.lines() {
                println!(
                    "  line {} {:?}: color {}, width {}, {}, {} stations",
                    line.id,
                    line.name,
                    line.color,
                    line.width,
                    line.smoothing,
                    line.stations.len()
                );
            }
            for station in scene.stations() {
                println!(
                    "  station {} {:?}: ({}, {}) {}, marker width {}",
                    station.id,
                    station.name,
                    station.x,
                    station.y,
                    station.style,
                    scene.marker_width(station.id)
                );
            }
        }
        Command::Png(args) => export_png(&args)?,
        Command::Svg(args) => {
            let (scene, _) = load(&args.map)?;
            let frame = metromap::generator::svg::export_svg(&args.output, &scene, &args.options())
                .with_context(|| format!("Failed to export {}", args.output))?;
            println!("Wrote {} ({}x{})", args.output, frame.width, frame.height);
        }
        Command::Path { map, line } => {
            let (scene, _) = load(&map)?;
            let Some(line) = scene.line(LineId(line)) else {
                bail!("{} has no line {}", map, line);
            };
            let path = build_path(&scene.line_points(line), line.smoothing);
            println!("{}", serde_json::to_string_pretty(&path)?);
        }
        Command::Normalize { map, output } => {
            let (scene, viewport) = load(&map)?;
            json::save_map(&output, &scene, &viewport)
                .with_context(|| format!("Failed to write {}", output))?;
            println!("Wrote {}", output);
        }
    }
    Ok(())
}

#[cfg(feature = "raster")]
fn export_png(args: &ExportArgs) -> Result<()> {
    let (scene, _) = load(&args.map)?;
    let frame = metromap::generator::png::export_png(&args.output, &scene, &args.options())
        .with_context(|| format!("Failed to export {}", args.output))?;
    println!("Wrote {} ({}x{})", args.output, frame.width, frame.height);
    Ok(())
}

#[cfg(not(feature = "raster"))]
fn export_png(_args: &ExportArgs) -> Result<()> {
    bail!("PNG export requires the 'raster' feature")
}
