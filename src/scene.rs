//! The mutable collection of lines and stations.
//!
//! [`Scene`] owns every [`Station`] and [`Line`], indexed by id and kept in
//! insertion order (which is also the drawing order). Lines refer to stations
//! by id only. Every operation keeps the two sides consistent: no line ever
//! lists a station id that is not in the scene.

use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::debug;

use crate::error::{MapError, Result};
use crate::geometry::Point;
use crate::marker::DEFAULT_MARKER_WIDTH;
use crate::model::{Line, LineId, MapDocument, Smoothing, Station, StationId, StationStyle};
use crate::transform::Viewport;

#[derive(Debug, Clone)]
pub struct Scene {
    stations: IndexMap<StationId, Station>,
    lines: IndexMap<LineId, Line>,
    next_station_id: u64,
    next_line_id: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            stations: IndexMap::new(),
            lines: IndexMap::new(),
            next_station_id: 1,
            next_line_id: 1,
        }
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    // ── queries ────────────────────────────────────────────────────────────

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(&id)
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(&id)
    }

    /// Stations in insertion order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty() && self.lines.is_empty()
    }

    /// Line at position `index` in drawing order.
    pub fn line_at(&self, index: usize) -> Option<&Line> {
        self.lines.get_index(index).map(|(_, l)| l)
    }

    /// Lines whose membership list mentions `id`.
    pub fn lines_through(&self, id: StationId) -> impl Iterator<Item = &Line> {
        self.lines.values().filter(move |l| l.contains(id))
    }

    /// Width that sizes the marker of station `id`: the widest line through
    /// it, or [`DEFAULT_MARKER_WIDTH`] when no line references it.
    pub fn marker_width(&self, id: StationId) -> u32 {
        self.lines_through(id)
            .map(|l| l.width)
            .max()
            .unwrap_or(DEFAULT_MARKER_WIDTH)
    }

    /// Model-space positions of the stations of `line`, in membership order.
    pub fn line_points(&self, line: &Line) -> Vec<Point> {
        line.stations
            .iter()
            .filter_map(|id| self.stations.get(id).map(Station::position))
            .collect()
    }

    // ── lines ──────────────────────────────────────────────────────────────

    /// Create an empty line named "Line {id}".
    pub fn add_line(&mut self, color: impl Into<String>, width: u32, smoothing: Smoothing) -> Result<LineId> {
        if width == 0 {
            return Err(MapError::InvalidWidth);
        }
        let id = LineId(self.next_line_id);
        self.next_line_id += 1;
        let line = Line {
            id,
            name: format!("Line {id}"),
            color: color.into(),
            width,
            smoothing,
            stations: Vec::new(),
        };
        debug!(line = %id, "added line");
        self.lines.insert(id, line);
        Ok(id)
    }

    fn line_mut(&mut self, id: LineId) -> Result<&mut Line> {
        self.lines.get_mut(&id).ok_or(MapError::UnknownLine(id))
    }

    pub fn rename_line(&mut self, id: LineId, name: impl Into<String>) -> Result<()> {
        self.line_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn set_line_color(&mut self, id: LineId, color: impl Into<String>) -> Result<()> {
        self.line_mut(id)?.color = color.into();
        Ok(())
    }

    pub fn set_line_width(&mut self, id: LineId, width: u32) -> Result<()> {
        if width == 0 {
            return Err(MapError::InvalidWidth);
        }
        self.line_mut(id)?.width = width;
        Ok(())
    }

    pub fn set_line_smoothing(&mut self, id: LineId, smoothing: Smoothing) -> Result<()> {
        self.line_mut(id)?.smoothing = smoothing;
        Ok(())
    }

    /// Remove a line together with every station it lists.
    ///
    /// Stations are removed even when another line also runs through them;
    /// their ids are then scrubbed from those other lines as well.
    pub fn delete_line(&mut self, id: LineId) -> Result<(Line, Vec<Station>)> {
        let line = self.lines.shift_remove(&id).ok_or(MapError::UnknownLine(id))?;
        let doomed: HashSet<StationId> = line.stations.iter().copied().collect();
        let removed: Vec<Station> = line
            .stations
            .iter()
            .filter_map(|sid| self.stations.shift_remove(sid))
            .collect();
        for other in self.lines.values_mut() {
            other.stations.retain(|sid| !doomed.contains(sid));
        }
        debug!(line = %id, stations = removed.len(), "deleted line");
        Ok((line, removed))
    }

    // ── stations ───────────────────────────────────────────────────────────

    /// Create a station named "Station {id}" at `position` and append it to `line`.
    pub fn add_station(&mut self, line: LineId, position: Point, style: StationStyle) -> Result<StationId> {
        if !self.lines.contains_key(&line) {
            return Err(MapError::UnknownLine(line));
        }
        let id = StationId(self.next_station_id);
        self.next_station_id += 1;
        self.stations.insert(
            id,
            Station {
                id,
                name: format!("Station {id}"),
                x: position.x,
                y: position.y,
                style,
            },
        );
        self.line_mut(line)?.stations.push(id);
        debug!(station = %id, line = %line, x = position.x, y = position.y, "added station");
        Ok(id)
    }

    /// Append an existing station to another line (interchanges, loops).
    pub fn link_station(&mut self, line: LineId, station: StationId) -> Result<()> {
        if !self.stations.contains_key(&station) {
            return Err(MapError::UnknownStation(station));
        }
        self.line_mut(line)?.stations.push(station);
        Ok(())
    }

    fn station_mut(&mut self, id: StationId) -> Result<&mut Station> {
        self.stations.get_mut(&id).ok_or(MapError::UnknownStation(id))
    }

    pub fn move_station(&mut self, id: StationId, position: Point) -> Result<()> {
        let station = self.station_mut(id)?;
        station.x = position.x;
        station.y = position.y;
        Ok(())
    }

    pub fn rename_station(&mut self, id: StationId, name: impl Into<String>) -> Result<()> {
        self.station_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn set_station_style(&mut self, id: StationId, style: StationStyle) -> Result<()> {
        self.station_mut(id)?.style = style;
        Ok(())
    }

    /// Remove a station from the scene and from every line that lists it.
    pub fn delete_station(&mut self, id: StationId) -> Result<Station> {
        let station = self.stations.shift_remove(&id).ok_or(MapError::UnknownStation(id))?;
        for line in self.lines.values_mut() {
            line.stations.retain(|sid| *sid != id);
        }
        debug!(station = %id, "deleted station");
        Ok(station)
    }

    // ── documents ──────────────────────────────────────────────────────────

    /// Flat dump of the scene plus the view state.
    pub fn to_document(&self, viewport: &Viewport) -> MapDocument {
        MapDocument {
            lines: self.lines.values().cloned().collect(),
            stations: self.stations.values().cloned().collect(),
            scale: viewport.scale,
            offset_x: viewport.offset_x,
            offset_y: viewport.offset_y,
        }
    }

    /// Build a scene from a parsed document, checking it for consistency.
    ///
    /// Rejects duplicate ids, zero widths and lines referencing stations the
    /// document does not contain. Id assignment continues after the largest
    /// id found.
    pub fn from_document(doc: MapDocument) -> Result<(Scene, Viewport)> {
        let mut scene = Scene::new();
        for station in doc.stations {
            let id = station.id;
            if scene.stations.insert(id, station).is_some() {
                return Err(MapError::InvalidDocument(format!("duplicate station id {id}")));
            }
        }
        for line in doc.lines {
            let id = line.id;
            if line.width == 0 {
                return Err(MapError::InvalidDocument(format!("line {id} has width 0")));
            }
            if let Some(missing) = line.stations.iter().find(|sid| !scene.stations.contains_key(*sid)) {
                return Err(MapError::InvalidDocument(format!(
                    "line {id} references missing station {missing}"
                )));
            }
            if scene.lines.insert(id, line).is_some() {
                return Err(MapError::InvalidDocument(format!("duplicate line id {id}")));
            }
        }
        scene.next_station_id = scene.stations.keys().map(|k| k.0).max().unwrap_or(0) + 1;
        scene.next_line_id = scene.lines.keys().map(|k| k.0).max().unwrap_or(0) + 1;
        if !doc.scale.is_finite() || doc.scale == 0.0 {
            return Err(MapError::InvalidDocument(format!("invalid scale {}", doc.scale)));
        }
        let viewport = Viewport::new(doc.scale, doc.offset_x, doc.offset_y);
        Ok((scene, viewport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut scene = Scene::new();
        let line = scene.add_line("#ff0000", 6, Smoothing::Straight).unwrap();
        let a = scene.add_station(line, Point::new(0.0, 0.0), StationStyle::Circle).unwrap();
        scene.delete_station(a).unwrap();
        let b = scene.add_station(line, Point::new(1.0, 1.0), StationStyle::Circle).unwrap();
        assert_ne!(a, b);
        assert_eq!(scene.station(b).unwrap().name, "Station 2");
    }
}
