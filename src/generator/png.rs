//! Raster export.
//!
//! The export rendering is written as SVG first and rasterized with resvg, so
//! PNG and SVG output share one set of draw ops.

use camino::Utf8Path;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;
use tracing::{info, warn};

use crate::error::{MapError, Result};
use crate::generator::svg::generate_export_svg;
use crate::render::{ExportFrame, ExportOptions, render_export};
use crate::scene::Scene;

/// Largest raster, in pixels, an export may allocate (4 bytes each).
pub const MAX_RASTER_PIXELS: u64 = 100_000_000;

/// Rasterize the scene and return the encoded PNG plus the frame it covers.
pub fn render_png(scene: &Scene, options: &ExportOptions) -> Result<(Vec<u8>, ExportFrame)> {
    let (list, frame) = render_export(scene, options)?;
    if frame.pixel_count() > MAX_RASTER_PIXELS {
        return Err(MapError::Raster(format!(
            "export too large: {}x{}",
            frame.width, frame.height
        )));
    }
    let svg = generate_export_svg(&list, &frame, options.background);

    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(&svg, &opt)
        .map_err(|err| MapError::Raster(format!("failed to parse generated SVG: {err}")))?;

    let mut pixmap = Pixmap::new(frame.width, frame.height).ok_or_else(|| {
        MapError::Raster(format!(
            "failed to allocate {}x{} surface",
            frame.width, frame.height
        ))
    })?;
    resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());

    let png = pixmap
        .encode_png()
        .map_err(|err| MapError::Raster(format!("failed to encode PNG: {err}")))?;
    Ok((png, frame))
}

/// Export the scene as a PNG file at `path`.
///
/// An empty scene is reported as [`MapError::NoStations`] and no file is written.
pub fn export_png(path: &Utf8Path, scene: &Scene, options: &ExportOptions) -> Result<ExportFrame> {
    let (png, frame) = render_png(scene, options).inspect_err(|err| {
        warn!(%path, %err, "PNG export failed");
    })?;
    std::fs::write(path, png).map_err(|source| MapError::Export {
        path: path.to_path_buf(),
        source,
    })?;
    info!(%path, width = frame.width, height = frame.height, "exported PNG");
    Ok(frame)
}
