//! Editing session state.
//!
//! [`Session`] is everything an interactive front-end needs besides pixels:
//! the scene, the viewport, the current mode, selection and drag state, and
//! the values of the line/station forms. Front-ends translate raw input into
//! the pointer/form methods below and paint [`Session::display_list`].
//!
//! Failures are returned as [`MapError`] and also queued as user-facing
//! [`Notification`]s; the scene is never left half-edited.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut session = Session::new(SessionConfig::default());
//! let line = session.add_line("#d62828")?;
//! session.pointer_pressed(Point::new(100.0, 80.0)); // places "Station 1" on `line`
//! let list = session.display_list();
//! ```

use camino::Utf8Path;
use tracing::{debug, info, warn};

use crate::error::{MapError, Result};
use crate::generator::json;
use crate::geometry::Point;
use crate::model::{Line, LineId, Smoothing, Station, StationId, StationStyle};
use crate::render::{DisplayList, ExportFrame, ExportOptions, render_view};
use crate::scene::Scene;
use crate::transform::Viewport;

// ────────────────────────────────────────────────────────────────────────────
// Configuration and small state types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Pick radius around a station, in view pixels.
    pub hit_radius: f64,
    pub default_line_width: u32,
    pub default_smoothing: Smoothing,
    pub default_station_style: StationStyle,
    /// Scale factor applied per wheel notch towards the viewer.
    pub wheel_zoom_in: f64,
    /// Scale factor applied per wheel notch away from the viewer.
    pub wheel_zoom_out: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            hit_radius: 10.0,
            default_line_width: 6,
            default_smoothing: Smoothing::Straight,
            default_station_style: StationStyle::Circle,
            wheel_zoom_in: 1.1,
            wheel_zoom_out: 0.9,
        }
    }
}

/// What a primary click does on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Place a new station on the selected line.
    #[default]
    Add,
    /// Pick and drag existing stations.
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Line settings form. Applied to the selected line on demand and used for new lines.
#[derive(Debug, Clone, PartialEq)]
pub struct LineForm {
    pub width: u32,
    pub smoothing: Smoothing,
}

/// Station settings form. Coordinates are raw text as typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct StationForm {
    pub style: StationStyle,
    pub x: String,
    pub y: String,
}

/// Values of the per-station edit dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct StationEdit {
    pub name: String,
    pub style: StationStyle,
    pub x: String,
    pub y: String,
}

impl StationEdit {
    /// Dialog values pre-filled from `station`.
    pub fn from_station(station: &Station) -> Self {
        Self {
            name: station.name.clone(),
            style: station.style,
            x: station.x.to_string(),
            y: station.y.to_string(),
        }
    }
}

/// Result of a primary press on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// A new station was placed.
    Placed(StationId),
    /// An existing station was grabbed for dragging.
    Grabbed(StationId),
    Nothing,
}

/// What [`Session::delete_selected`] removed.
#[derive(Debug, Clone, PartialEq)]
pub enum Deleted {
    Station(Station),
    Line { line: Line, stations: Vec<Station> },
    Nothing,
}

/// Parse one coordinate field.
pub fn parse_coordinate(field: &'static str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| MapError::InvalidCoordinate {
            field,
            value: value.to_string(),
        })
}

// ────────────────────────────────────────────────────────────────────────────
// Session
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Session {
    pub scene: Scene,
    pub viewport: Viewport,
    pub mode: EditMode,
    pub config: SessionConfig,
    pub line_form: LineForm,
    pub station_form: StationForm,
    selected_line: Option<LineId>,
    /// Index into the selected line's membership list.
    selected_station: Option<usize>,
    dragging: Option<StationId>,
    pan_anchor: Option<Point>,
    notifications: Vec<Notification>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_scene(Scene::new(), Viewport::default(), config)
    }

    pub fn with_scene(scene: Scene, viewport: Viewport, config: SessionConfig) -> Self {
        Self {
            scene,
            viewport,
            mode: EditMode::Add,
            line_form: LineForm {
                width: config.default_line_width,
                smoothing: config.default_smoothing,
            },
            station_form: StationForm {
                style: config.default_station_style,
                x: String::new(),
                y: String::new(),
            },
            config,
            selected_line: None,
            selected_station: None,
            dragging: None,
            pan_anchor: None,
            notifications: Vec::new(),
        }
    }

    // ── notifications ──────────────────────────────────────────────────────

    fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.notifications.push(Notification {
            kind,
            message: message.into(),
        });
    }

    /// Report `err` to the user and hand it back.
    fn fail(&mut self, err: MapError) -> MapError {
        warn!(%err, "edit rejected");
        self.notify(NotificationKind::Error, err.to_string());
        err
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Drain pending notifications (the front-end shows them once).
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // ── selection ──────────────────────────────────────────────────────────

    pub fn selected_line(&self) -> Option<LineId> {
        self.selected_line
    }

    pub fn selected_station_index(&self) -> Option<usize> {
        self.selected_station
    }

    /// Id of the station selected in the station list, if any.
    pub fn selected_station(&self) -> Option<StationId> {
        let line = self.scene.line(self.selected_line?)?;
        line.stations.get(self.selected_station?).copied()
    }

    pub fn dragging(&self) -> Option<StationId> {
        self.dragging
    }

    /// Select a line (or none) and load its settings into the line form.
    pub fn select_line(&mut self, id: Option<LineId>) {
        self.selected_station = None;
        self.selected_line = id.filter(|id| self.scene.line(*id).is_some());
        if let Some(line) = self.selected_line.and_then(|id| self.scene.line(id)) {
            self.line_form = LineForm {
                width: line.width,
                smoothing: line.smoothing,
            };
        }
    }

    /// Select the `index`-th station of the selected line and load it into the station form.
    pub fn select_station(&mut self, index: Option<usize>) {
        self.selected_station = None;
        let Some(index) = index else { return };
        let Some(id) = self
            .selected_line
            .and_then(|l| self.scene.line(l))
            .and_then(|l| l.stations.get(index).copied())
        else {
            return;
        };
        if let Some(station) = self.scene.station(id) {
            self.station_form.style = station.style;
            self.station_form.x = station.x.to_string();
            self.station_form.y = station.y.to_string();
            self.selected_station = Some(index);
        }
    }

    /// Stations of the selected line in membership order.
    pub fn station_list(&self) -> Vec<&Station> {
        self.selected_line
            .and_then(|id| self.scene.line(id))
            .map(|line| line.stations.iter().filter_map(|id| self.scene.station(*id)).collect())
            .unwrap_or_default()
    }

    fn clear_selection(&mut self) {
        self.selected_line = None;
        self.selected_station = None;
        self.dragging = None;
    }

    // ── line operations ────────────────────────────────────────────────────

    /// Create a line with the line form's width and smoothing and select it.
    pub fn add_line(&mut self, color: &str) -> Result<LineId> {
        let id = self
            .scene
            .add_line(color, self.line_form.width, self.line_form.smoothing)
            .map_err(|e| self.fail(e))?;
        self.select_line(Some(id));
        Ok(id)
    }

    /// Write the line form into the selected line.
    pub fn apply_line_settings(&mut self) -> Result<()> {
        let id = self.selected_line.ok_or(MapError::NoActiveLine).map_err(|e| self.fail(e))?;
        let LineForm { width, smoothing } = self.line_form.clone();
        self.scene.set_line_width(id, width).map_err(|e| self.fail(e))?;
        self.scene.set_line_smoothing(id, smoothing).map_err(|e| self.fail(e))?;
        Ok(())
    }

    pub fn change_line_color(&mut self, color: &str) -> Result<()> {
        let id = self.selected_line.ok_or(MapError::NoActiveLine).map_err(|e| self.fail(e))?;
        self.scene.set_line_color(id, color).map_err(|e| self.fail(e))
    }

    // ── station operations ─────────────────────────────────────────────────

    /// Write the station form into the station selected in the list.
    ///
    /// Both coordinates are parsed before anything is touched; a bad value
    /// discards the whole edit.
    pub fn apply_station_settings(&mut self) -> Result<()> {
        let Some(id) = self.selected_station() else {
            return Ok(());
        };
        let x = parse_coordinate("x", &self.station_form.x).map_err(|e| self.fail(e))?;
        let y = parse_coordinate("y", &self.station_form.y).map_err(|e| self.fail(e))?;
        self.scene.set_station_style(id, self.station_form.style)?;
        self.scene.move_station(id, Point::new(x, y))?;
        Ok(())
    }

    /// Save the edit dialog of station `id`. Nothing changes if a coordinate does not parse.
    pub fn save_station_edit(&mut self, id: StationId, edit: &StationEdit) -> Result<()> {
        if self.scene.station(id).is_none() {
            return Err(self.fail(MapError::UnknownStation(id)));
        }
        let x = parse_coordinate("x", &edit.x).map_err(|e| self.fail(e))?;
        let y = parse_coordinate("y", &edit.y).map_err(|e| self.fail(e))?;
        self.scene.rename_station(id, edit.name.clone())?;
        self.scene.set_station_style(id, edit.style)?;
        self.scene.move_station(id, Point::new(x, y))?;
        Ok(())
    }

    /// Delete the selected station, or the selected line when no station is selected.
    pub fn delete_selected(&mut self) -> Result<Deleted> {
        if let Some(id) = self.selected_station() {
            let station = self.scene.delete_station(id)?;
            self.selected_station = None;
            self.dragging = None;
            return Ok(Deleted::Station(station));
        }
        if let Some(id) = self.selected_line {
            let (line, stations) = self.scene.delete_line(id)?;
            self.clear_selection();
            return Ok(Deleted::Line { line, stations });
        }
        Ok(Deleted::Nothing)
    }

    // ── pointer input ──────────────────────────────────────────────────────

    /// First station (in drawing order) strictly within the hit radius of `view_pos`.
    pub fn station_at(&self, view_pos: Point) -> Option<StationId> {
        self.scene
            .stations()
            .find(|s| self.viewport.to_view(s.position()).distance(view_pos) < self.config.hit_radius)
            .map(|s| s.id)
    }

    /// Primary button pressed at `view_pos`.
    pub fn pointer_pressed(&mut self, view_pos: Point) -> PressOutcome {
        match self.mode {
            EditMode::Add => {
                let Some(line) = self.selected_line else {
                    return PressOutcome::Nothing;
                };
                let at = self.viewport.to_model(view_pos);
                match self.scene.add_station(line, at, self.station_form.style) {
                    Ok(id) => PressOutcome::Placed(id),
                    Err(e) => {
                        self.fail(e);
                        PressOutcome::Nothing
                    }
                }
            }
            EditMode::Edit => match self.station_at(view_pos) {
                Some(id) => {
                    debug!(station = %id, "drag started");
                    self.dragging = Some(id);
                    PressOutcome::Grabbed(id)
                }
                None => PressOutcome::Nothing,
            },
        }
    }

    /// Primary button dragged to `view_pos`. Moves the grabbed station, if any.
    pub fn pointer_dragged(&mut self, view_pos: Point) -> bool {
        let Some(id) = self.dragging else {
            return false;
        };
        let at = self.viewport.to_model(view_pos);
        if self.scene.move_station(id, at).is_err() {
            self.dragging = None;
            return false;
        }
        // The form belongs to the listed station; only mirror the drag into it.
        if self.selected_station() == Some(id) {
            self.station_form.x = at.x.to_string();
            self.station_form.y = at.y.to_string();
        }
        true
    }

    pub fn pointer_released(&mut self) {
        self.dragging = None;
    }

    /// Secondary click: the station whose edit dialog should open, pre-filled.
    pub fn secondary_click(&self, view_pos: Point) -> Option<(StationId, StationEdit)> {
        let id = self.station_at(view_pos)?;
        let station = self.scene.station(id)?;
        Some((id, StationEdit::from_station(station)))
    }

    // ── view ───────────────────────────────────────────────────────────────

    /// One wheel notch; positive `delta` zooms in.
    pub fn wheel(&mut self, delta: f64) {
        if delta == 0.0 {
            return;
        }
        let factor = if delta > 0.0 {
            self.config.wheel_zoom_in
        } else {
            self.config.wheel_zoom_out
        };
        self.viewport.zoom_by(factor);
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.viewport.set_scale(scale);
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    pub fn pan_start(&mut self, view_pos: Point) {
        self.pan_anchor = Some(view_pos);
    }

    pub fn pan_move(&mut self, view_pos: Point) {
        if let Some(anchor) = self.pan_anchor {
            self.viewport.pan_by(view_pos.x - anchor.x, view_pos.y - anchor.y);
            self.pan_anchor = Some(view_pos);
        }
    }

    pub fn pan_end(&mut self) {
        self.pan_anchor = None;
    }

    /// Display list of the current scene in view space.
    pub fn display_list(&self) -> DisplayList {
        render_view(&self.scene, &self.viewport)
    }

    // ── files ──────────────────────────────────────────────────────────────

    /// Replace the scene and view with the map at `path`.
    ///
    /// On failure the current scene, view and selection stay untouched.
    pub fn import_json(&mut self, path: &Utf8Path) -> Result<()> {
        let (scene, viewport) = json::load_map(path).map_err(|e| self.fail(e))?;
        self.scene = scene;
        self.viewport = viewport;
        self.clear_selection();
        self.pan_anchor = None;
        info!(%path, "map imported into session");
        self.notify(NotificationKind::Info, format!("Loaded {path}"));
        Ok(())
    }

    pub fn export_json(&mut self, path: &Utf8Path) -> Result<()> {
        json::save_map(path, &self.scene, &self.viewport).map_err(|e| self.fail(e))?;
        self.notify(NotificationKind::Info, format!("Saved {path}"));
        Ok(())
    }

    pub fn export_svg(&mut self, path: &Utf8Path, options: &ExportOptions) -> Result<ExportFrame> {
        let frame = crate::generator::svg::export_svg(path, &self.scene, options).map_err(|e| self.fail(e))?;
        self.notify(NotificationKind::Info, format!("Exported {path}"));
        Ok(frame)
    }

    #[cfg(feature = "raster")]
    pub fn export_png(&mut self, path: &Utf8Path, options: &ExportOptions) -> Result<ExportFrame> {
        let frame = crate::generator::png::export_png(path, &self.scene, options).map_err(|e| self.fail(e))?;
        info!(%path, "PNG written");
        self.notify(NotificationKind::Info, format!("Exported {path}"));
        Ok(frame)
    }
}
