//! Station marker rendering.
//!
//! A marker is a list of [`DrawOp`]s: at most one shape, then the station name
//! drawn five times (four black copies shifted by one unit in each cardinal
//! direction, then a white copy on top). The same ops feed the interactive
//! canvas and the exporters, so both targets look identical.
//!
//! Marker geometry does not depend on the zoom factor; only the station
//! position is mapped.

use crate::color::Rgb;
use crate::geometry::Point;
use crate::model::StationStyle;

/// Width used for stations that no line references.
pub const DEFAULT_MARKER_WIDTH: u32 = 2;
/// Font size of station labels.
pub const LABEL_FONT_SIZE: f64 = 10.0;
/// Outline copies of the label, drawn in this order before the white text.
pub const LABEL_OUTLINE_OFFSETS: [(f64, f64); 4] = [(0.0, 1.0), (1.0, 0.0), (0.0, -1.0), (-1.0, 0.0)];

/// How the text anchor relates to the text box.
///
/// Labels are always horizontally centered and hang from the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopCenter,
}

/// Primitive draw instruction for a station marker.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Disc {
        center: Point,
        radius: f64,
        fill: Rgb,
        stroke: Rgb,
    },
    Rect {
        min: Point,
        max: Point,
        fill: Rgb,
        stroke: Rgb,
    },
    Polygon {
        points: Vec<Point>,
        fill: Rgb,
        stroke: Rgb,
    },
    Text {
        anchor: Point,
        align: TextAnchor,
        text: String,
        size: f64,
        color: Rgb,
    },
}

/// Marker scale factor for a station whose thickest line is `width` wide.
pub fn size_multiplier(width: u32) -> f64 {
    (f64::from(width) / 8.0 + 0.5).max(1.4)
}

/// Shape primitive for `style` centered on `center`, if the style has one.
pub fn shape_op(style: StationStyle, center: Point, size_mult: f64) -> Option<DrawOp> {
    let s = size_mult;
    let (fill, stroke) = (Rgb::WHITE, Rgb::BLACK);
    let rect = |left: f64, top: f64, right: f64, bottom: f64| DrawOp::Rect {
        min: center.offset(-left * s, -top * s),
        max: center.offset(right * s, bottom * s),
        fill,
        stroke,
    };
    match style {
        StationStyle::Circle => Some(DrawOp::Disc {
            center,
            radius: 5.0 * s,
            fill,
            stroke,
        }),
        StationStyle::Square => Some(rect(5.0, 5.0, 5.0, 5.0)),
        StationStyle::HorizontalRect => Some(rect(15.0, 5.0, 5.0, 5.0)),
        StationStyle::VerticalRect => Some(rect(5.0, 15.0, 5.0, 5.0)),
        StationStyle::Triangle => Some(DrawOp::Polygon {
            points: vec![
                center.offset(0.0, -6.0 * s),
                center.offset(-6.0 * s, 6.0 * s),
                center.offset(6.0 * s, 6.0 * s),
            ],
            fill,
            stroke,
        }),
        StationStyle::Label | StationStyle::Empty => None,
    }
}

/// Where the label of a station with `style` hangs from, `None` for `Empty`.
pub fn label_anchor(style: StationStyle, center: Point, size_mult: f64) -> Option<Point> {
    match style {
        StationStyle::Empty => None,
        StationStyle::Label => Some(center),
        StationStyle::HorizontalRect => {
            let shifted = center.offset(-(6.0 * size_mult).trunc(), 0.0);
            Some(shifted.offset(0.0, label_drop(size_mult)))
        }
        _ => Some(center.offset(0.0, label_drop(size_mult))),
    }
}

/// Vertical distance between a shaped marker's center and its label.
fn label_drop(size_mult: f64) -> f64 {
    14.0 * ((size_mult - 0.4) / 2.0)
}

/// Outline-then-fill text ops for `text` hanging from `anchor`.
pub fn label_ops(text: &str, anchor: Point) -> Vec<DrawOp> {
    let text_op = |at: Point, color: Rgb| DrawOp::Text {
        anchor: at,
        align: TextAnchor::TopCenter,
        text: text.to_string(),
        size: LABEL_FONT_SIZE,
        color,
    };
    let mut ops: Vec<DrawOp> = LABEL_OUTLINE_OFFSETS
        .iter()
        .map(|&(dx, dy)| text_op(anchor.offset(dx, dy), Rgb::BLACK))
        .collect();
    ops.push(text_op(anchor, Rgb::WHITE));
    ops
}

/// Every draw op of one station marker: shape first, then its label.
///
/// `center` is the already mapped position, `width` the thickest width among
/// the lines through the station.
pub fn marker_ops(style: StationStyle, name: &str, center: Point, width: u32) -> Vec<DrawOp> {
    let size_mult = size_multiplier(width);
    let mut ops = Vec::with_capacity(6);
    ops.extend(shape_op(style, center, size_mult));
    if let Some(anchor) = label_anchor(style, center, size_mult) {
        ops.extend(label_ops(name, anchor));
    }
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_drop_at_minimum_multiplier() {
        assert!((label_drop(1.4) - 7.0).abs() < 1e-12);
    }
}
