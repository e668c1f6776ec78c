//! Scene -> display list.
//!
//! Both the interactive canvas and the exporters go through [`render_scene`]:
//! station positions are mapped into the target space first, then the path
//! builder and the marker renderer run on the mapped points. Lines come
//! before stations, each in insertion order.

use tracing::{debug, warn};

use crate::color::{Rgb, parse_color};
use crate::error::{MapError, Result};
use crate::geometry::{Bounds, Point};
use crate::marker::{DrawOp, marker_ops};
use crate::model::{LineId, Smoothing, StationId};
use crate::path::build_path;
use crate::scene::Scene;
use crate::transform::Viewport;

/// One stroked line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStroke {
    pub line: LineId,
    pub color: Rgb,
    pub width: u32,
    pub smoothing: Smoothing,
    /// Output of the path builder, in target space.
    pub points: Vec<Point>,
}

impl LineStroke {
    /// Straight and metro lines get rounded joins and caps; smooth lines are
    /// dense enough not to need them.
    pub fn round_joins(&self) -> bool {
        !matches!(self.smoothing, Smoothing::Smooth)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationMarker {
    pub station: StationId,
    pub ops: Vec<DrawOp>,
}

/// Everything needed to paint a map, in paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    pub strokes: Vec<LineStroke>,
    pub markers: Vec<StationMarker>,
}

/// Resolve a line color string, falling back to black for unknown values.
pub fn resolve_color(color: &str) -> Rgb {
    parse_color(color).unwrap_or_else(|| {
        warn!(color, "unrecognized line color, drawing in black");
        Rgb::BLACK
    })
}

/// Render `scene` with every station position passed through `map` first.
pub fn render_scene<F>(scene: &Scene, map: F) -> DisplayList
where
    F: Fn(Point) -> Point,
{
    let mut list = DisplayList::default();

    for line in scene.lines() {
        if line.stations.len() < 2 {
            continue;
        }
        let points: Vec<Point> = scene.line_points(line).into_iter().map(&map).collect();
        list.strokes.push(LineStroke {
            line: line.id,
            color: resolve_color(&line.color),
            width: line.width,
            smoothing: line.smoothing,
            points: build_path(&points, line.smoothing),
        });
    }

    for station in scene.stations() {
        let center = map(station.position());
        let width = scene.marker_width(station.id);
        list.markers.push(StationMarker {
            station: station.id,
            ops: marker_ops(station.style, &station.name, center, width),
        });
    }

    debug!(
        strokes = list.strokes.len(),
        markers = list.markers.len(),
        "rendered scene"
    );
    list
}

/// Render for the interactive canvas (view space).
pub fn render_view(scene: &Scene, viewport: &Viewport) -> DisplayList {
    render_scene(scene, |p| viewport.to_view(p))
}

// ────────────────────────────────────────────────────────────────────────────
// Export framing
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    /// Output pixels per model unit. 1.0 exports at normalized scale,
    /// independent of the interactive zoom.
    pub scale: f64,
    /// Margin around the station bounding box, in output pixels.
    pub padding: f64,
    pub background: Rgb,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            padding: 40.0,
            background: Rgb::WHITE,
        }
    }
}

/// Output canvas of an export: its origin in scaled model units and its size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportFrame {
    pub min_x: f64,
    pub min_y: f64,
    pub width: u32,
    pub height: u32,
    pub scale: f64,
}

impl ExportFrame {
    /// Frame around every station of `scene`, padded on each side.
    pub fn for_scene(scene: &Scene, options: &ExportOptions) -> Result<Self> {
        if !options.scale.is_finite() || options.scale <= 0.0 {
            return Err(MapError::InvalidExportScale(options.scale));
        }
        let scale = options.scale;
        let snapped = scene
            .stations()
            .map(|s| Point::new((s.x * scale).floor(), (s.y * scale).floor()));
        let bounds = Bounds::from_points(snapped).ok_or(MapError::NoStations)?;
        let padded = bounds.expand(options.padding);
        let (width, height) = (padded.width().max(1.0), padded.height().max(1.0));
        let (Some(w), Some(h)) = (pixel_extent(width), pixel_extent(height)) else {
            return Err(MapError::ExportTooLarge { width, height });
        };
        Ok(Self {
            min_x: padded.min.x,
            min_y: padded.min.y,
            width: w,
            height: h,
            scale,
        })
    }

    /// Number of pixels covered by the frame.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Model space -> output pixels.
    pub fn map(&self, p: Point) -> Point {
        Point::new(
            (p.x * self.scale).floor() - self.min_x,
            (p.y * self.scale).floor() - self.min_y,
        )
    }

    /// The frame in scaled model units.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_min_max(
            Point::new(self.min_x, self.min_y),
            Point::new(self.min_x + f64::from(self.width), self.min_y + f64::from(self.height)),
        )
    }
}

/// Truncate a frame extent to whole pixels, `None` if it does not fit a `u32`.
fn pixel_extent(extent: f64) -> Option<u32> {
    (extent.is_finite() && extent <= f64::from(u32::MAX)).then(|| extent as u32)
}

/// Render for export. Fails with [`MapError::NoStations`] on an empty scene.
pub fn render_export(scene: &Scene, options: &ExportOptions) -> Result<(DisplayList, ExportFrame)> {
    let frame = ExportFrame::for_scene(scene, options)?;
    let list = render_scene(scene, |p| frame.map(p));
    Ok((list, frame))
}
