#![cfg(feature = "egui")]

use eframe::egui::{self, Align2, Color32, Pos2, Rect, Shape, Stroke, Vec2};

use crate::color::Rgb;
use crate::geometry::Point;
use crate::marker::{DrawOp, TextAnchor};
use crate::render::DisplayList;

pub fn rgb_to_color32(c: Rgb) -> Color32 {
    Color32::from_rgb(c.0, c.1, c.2)
}

fn to_pos(origin: Pos2, p: Point) -> Pos2 {
    origin + Vec2::new(p.x as f32, p.y as f32)
}

/// Paint a view-space display list with its origin at `origin` (the canvas' top-left corner).
pub fn paint_display_list(painter: &egui::Painter, origin: Pos2, list: &DisplayList) {
    for stroke in &list.strokes {
        if stroke.points.len() < 2 {
            continue;
        }
        let points: Vec<Pos2> = stroke.points.iter().map(|p| to_pos(origin, *p)).collect();
        let width = stroke.width as f32;
        let color = rgb_to_color32(stroke.color);
        painter.add(Shape::line(points.clone(), Stroke::new(width, color)));
        if stroke.round_joins() {
            // egui has no join styles; round the corners and ends with discs.
            for p in points {
                painter.circle_filled(p, width / 2.0, color);
            }
        }
    }
    for marker in &list.markers {
        for op in &marker.ops {
            paint_op(painter, origin, op);
        }
    }
}

fn paint_op(painter: &egui::Painter, origin: Pos2, op: &DrawOp) {
    match op {
        DrawOp::Disc {
            center,
            radius,
            fill,
            stroke,
        } => {
            painter.circle(
                to_pos(origin, *center),
                *radius as f32,
                rgb_to_color32(*fill),
                Stroke::new(1.0, rgb_to_color32(*stroke)),
            );
        }
        DrawOp::Rect {
            min,
            max,
            fill,
            stroke,
        } => {
            let rect = Rect::from_min_max(to_pos(origin, *min), to_pos(origin, *max));
            painter.rect(
                rect,
                0.0,
                rgb_to_color32(*fill),
                Stroke::new(1.0, rgb_to_color32(*stroke)),
                egui::StrokeKind::Middle,
            );
        }
        DrawOp::Polygon {
            points,
            fill,
            stroke,
        } => {
            let pts = points.iter().map(|p| to_pos(origin, *p)).collect();
            painter.add(Shape::convex_polygon(
                pts,
                rgb_to_color32(*fill),
                Stroke::new(1.0, rgb_to_color32(*stroke)),
            ));
        }
        DrawOp::Text {
            anchor,
            align,
            text,
            size,
            color,
        } => {
            let align = match align {
                TextAnchor::TopCenter => Align2::CENTER_TOP,
            };
            painter.text(
                to_pos(origin, *anchor),
                align,
                text,
                egui::FontId::proportional(*size as f32),
                rgb_to_color32(*color),
            );
        }
    }
}
