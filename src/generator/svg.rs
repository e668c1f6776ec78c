//! Generate SVG text from a [`DisplayList`].
//!
//! The output is a flat document: an optional background rectangle, one
//! `<polyline>` per line stroke, then the marker primitives in paint order.
//! The PNG exporter rasterizes exactly this text.

use std::fmt::Write as _;

use camino::Utf8Path;
use tracing::info;

use crate::color::Rgb;
use crate::error::{MapError, Result};
use crate::geometry::Point;
use crate::marker::{DrawOp, TextAnchor};
use crate::render::{DisplayList, ExportFrame, ExportOptions, LineStroke, render_export};
use crate::scene::Scene;

/// Font family requested for station labels.
pub const LABEL_FONT_FAMILY: &str = "sans-serif";

/// SVG document of `list` on a `width` x `height` canvas.
pub fn generate_svg(list: &DisplayList, width: u32, height: u32, background: Option<Rgb>) -> String {
    let mut out = String::with_capacity(4096);
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = width,
        h = height
    );
    if let Some(bg) = background {
        let _ = writeln!(out, "  <rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"{bg}\"/>");
    }
    for stroke in &list.strokes {
        write_stroke(&mut out, stroke);
    }
    for marker in &list.markers {
        for op in &marker.ops {
            write_op(&mut out, op);
        }
    }
    out.push_str("</svg>\n");
    out
}

/// SVG document of an export rendering, sized to its frame.
pub fn generate_export_svg(list: &DisplayList, frame: &ExportFrame, background: Rgb) -> String {
    generate_svg(list, frame.width, frame.height, Some(background))
}

/// Export the scene as an SVG file at `path`, framed like the PNG export.
pub fn export_svg(path: &Utf8Path, scene: &Scene, options: &ExportOptions) -> Result<ExportFrame> {
    let (list, frame) = render_export(scene, options)?;
    std::fs::write(path, generate_export_svg(&list, &frame, options.background)).map_err(|source| {
        MapError::Export {
            path: path.to_path_buf(),
            source,
        }
    })?;
    info!(%path, width = frame.width, height = frame.height, "exported SVG");
    Ok(frame)
}

/// Escape text content and attribute values.
fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_stroke(out: &mut String, stroke: &LineStroke) {
    if stroke.points.len() < 2 {
        return;
    }
    let _ = write!(
        out,
        "  <polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"",
        points_attr(&stroke.points),
        stroke.color,
        stroke.width
    );
    if stroke.round_joins() {
        out.push_str(" stroke-linejoin=\"round\" stroke-linecap=\"round\"");
    }
    out.push_str("/>\n");
}

fn write_op(out: &mut String, op: &DrawOp) {
    match op {
        DrawOp::Disc {
            center,
            radius,
            fill,
            stroke,
        } => {
            let _ = writeln!(
                out,
                "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{fill}\" stroke=\"{stroke}\"/>",
                center.x, center.y, radius
            );
        }
        DrawOp::Rect {
            min,
            max,
            fill,
            stroke,
        } => {
            let _ = writeln!(
                out,
                "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{fill}\" stroke=\"{stroke}\"/>",
                min.x,
                min.y,
                max.x - min.x,
                max.y - min.y
            );
        }
        DrawOp::Polygon {
            points,
            fill,
            stroke,
        } => {
            let _ = writeln!(
                out,
                "  <polygon points=\"{}\" fill=\"{fill}\" stroke=\"{stroke}\"/>",
                points_attr(points)
            );
        }
        DrawOp::Text {
            anchor,
            align,
            text,
            size,
            color,
        } => {
            let (text_anchor, baseline) = match align {
                TextAnchor::TopCenter => ("middle", "hanging"),
            };
            let _ = writeln!(
                out,
                "  <text x=\"{}\" y=\"{}\" font-family=\"{LABEL_FONT_FAMILY}\" font-size=\"{size}\" text-anchor=\"{text_anchor}\" dominant-baseline=\"{baseline}\" fill=\"{color}\">{}</text>",
                anchor.x,
                anchor.y,
                xml_escape(text)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_in_names() {
        assert_eq!(xml_escape("A & <B>"), "A &amp; &lt;B&gt;");
    }

    #[test]
    fn single_point_stroke_is_skipped() {
        let mut out = String::new();
        write_stroke(
            &mut out,
            &LineStroke {
                line: crate::model::LineId(1),
                color: Rgb::BLACK,
                width: 3,
                smoothing: crate::model::Smoothing::Straight,
                points: vec![Point::new(1.0, 1.0)],
            },
        );
        assert!(out.is_empty());
    }
}
