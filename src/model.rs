use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::Point;

// ────────────────────────────────────────────────────────────────────────────
// Identifiers
// ────────────────────────────────────────────────────────────────────────────

/// Identifier of a [`Station`]. Assigned sequentially and never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub u64);

/// Identifier of a [`Line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub u64);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Station
// ────────────────────────────────────────────────────────────────────────────

/// Marker shape of a station.
///
/// File tags are the historical ones (`"horizontal rect"` with a space); the
/// snake_case spellings are accepted when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StationStyle {
    #[default]
    #[serde(rename = "circle")]
    Circle,
    #[serde(rename = "square")]
    Square,
    #[serde(rename = "horizontal rect", alias = "horizontal_rect")]
    HorizontalRect,
    #[serde(rename = "vertical rect", alias = "vertical_rect")]
    VerticalRect,
    #[serde(rename = "triangle")]
    Triangle,
    /// Text only, centered on the station point.
    #[serde(rename = "label")]
    Label,
    /// Nothing is drawn at all.
    #[serde(rename = "empty")]
    Empty,
}

impl StationStyle {
    pub const ALL: [StationStyle; 7] = [
        StationStyle::Circle,
        StationStyle::Square,
        StationStyle::HorizontalRect,
        StationStyle::VerticalRect,
        StationStyle::Triangle,
        StationStyle::Label,
        StationStyle::Empty,
    ];

    /// Tag as written to files.
    pub fn as_str(self) -> &'static str {
        match self {
            StationStyle::Circle => "circle",
            StationStyle::Square => "square",
            StationStyle::HorizontalRect => "horizontal rect",
            StationStyle::VerticalRect => "vertical rect",
            StationStyle::Triangle => "triangle",
            StationStyle::Label => "label",
            StationStyle::Empty => "empty",
        }
    }
}

impl fmt::Display for StationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    /// Model-space position.
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub style: StationStyle,
}

impl Station {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Line
// ────────────────────────────────────────────────────────────────────────────

/// How a line is routed through its stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Smoothing {
    /// Polyline through every station.
    #[default]
    Straight,
    /// Sampled cubic Bezier curves.
    Smooth,
    /// Horizontal, vertical and 45° segments only.
    Metro,
}

impl Smoothing {
    pub const ALL: [Smoothing; 3] = [Smoothing::Straight, Smoothing::Smooth, Smoothing::Metro];

    pub fn as_str(self) -> &'static str {
        match self {
            Smoothing::Straight => "straight",
            Smoothing::Smooth => "smooth",
            Smoothing::Metro => "metro",
        }
    }
}

impl fmt::Display for Smoothing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A colored line running through an ordered list of stations.
///
/// `stations` holds ids only; the scene owns the stations themselves. The same
/// id may appear more than once (loops).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub id: LineId,
    pub name: String,
    pub color: String,
    pub width: u32,
    #[serde(default)]
    pub smoothing: Smoothing,
    #[serde(default)]
    pub stations: Vec<StationId>,
}

impl Line {
    pub fn contains(&self, id: StationId) -> bool {
        self.stations.contains(&id)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// MapDocument – flat structured dump
// ────────────────────────────────────────────────────────────────────────────

/// On-disk shape of a map: every line and station plus the view state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    #[serde(default)]
    pub lines: Vec<Line>,
    #[serde(default)]
    pub stations: Vec<Station>,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub offset_x: f64,
    #[serde(default)]
    pub offset_y: f64,
}

fn default_scale() -> f64 {
    1.0
}

impl Default for MapDocument {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            stations: Vec::new(),
            scale: default_scale(),
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}
