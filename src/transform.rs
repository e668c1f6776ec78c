//! Model space <-> view space mapping.
//!
//! A [`Viewport`] holds the zoom factor and the pan offset of the interactive
//! canvas. Mapping is `view = model * scale + offset`, and its exact inverse.

use crate::geometry::Point;

/// Lower bound for the interactive zoom factor.
pub const MIN_SCALE: f64 = 0.025;
/// Upper bound for the interactive zoom factor.
pub const MAX_SCALE: f64 = 6.0;

/// Map a model-space point into view space.
pub fn to_view(p: Point, scale: f64, offset: Point) -> Point {
    Point::new(p.x * scale + offset.x, p.y * scale + offset.y)
}

/// Map a view-space point back into model space.
///
/// `scale` must be non-zero; the caller validates it.
pub fn to_model(p: Point, scale: f64, offset: Point) -> Point {
    Point::new((p.x - offset.x) / scale, (p.y - offset.y) / scale)
}

/// Clamp a zoom factor into `[MIN_SCALE, MAX_SCALE]`.
pub fn clamp_scale(scale: f64) -> f64 {
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl Viewport {
    /// Build a viewport, clamping `scale` into the allowed range.
    pub fn new(scale: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            scale: clamp_scale(scale),
            offset_x,
            offset_y,
        }
    }

    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }

    pub fn to_view(&self, p: Point) -> Point {
        to_view(p, self.scale, self.offset())
    }

    pub fn to_model(&self, p: Point) -> Point {
        to_model(p, self.scale, self.offset())
    }

    /// Set the zoom factor directly (slider), clamped.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = clamp_scale(scale);
    }

    /// Multiply the zoom factor by `factor` and clamp. The pan offset is left alone,
    /// so zooming happens around the view origin.
    pub fn zoom_by(&mut self, factor: f64) {
        self.set_scale(self.scale * factor);
    }

    /// Zoom by `factor` while keeping the model point under `anchor` (view space) fixed.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        let world = self.to_model(anchor);
        self.zoom_by(factor);
        self.offset_x = anchor.x - world.x * self.scale;
        self.offset_y = anchor.y - world.y * self.scale;
    }

    /// Shift the pan offset by a view-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Back to scale 1 with no pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
