//! Error type shared by the scene, the session and the exporters.
//!
//! None of these are fatal: every operation that returns one leaves the scene
//! exactly as it was before the call.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::model::{LineId, StationId};

#[derive(Debug, Error)]
pub enum MapError {
    /// A coordinate typed into a form was not a number.
    #[error("coordinates must be numbers (got {field} = {value:?})")]
    InvalidCoordinate { field: &'static str, value: String },

    #[error("failed to load {path}: {source}")]
    Import {
        path: Utf8PathBuf,
        #[source]
        source: Box<MapError>,
    },

    #[error("malformed map file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Well-formed JSON that violates the model's invariants.
    #[error("invalid map: {0}")]
    InvalidDocument(String),

    #[error("no stations to export")]
    NoStations,

    #[error("export scale must be a positive number (got {0})")]
    InvalidExportScale(f64),

    #[error("export too large: {width}x{height}")]
    ExportTooLarge { width: f64, height: f64 },

    /// Writing an output file failed.
    #[error("failed to write {path}: {source}")]
    Export {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown station id {0}")]
    UnknownStation(StationId),

    #[error("unknown line id {0}")]
    UnknownLine(LineId),

    #[error("no line selected")]
    NoActiveLine,

    #[error("line width must be at least 1")]
    InvalidWidth,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("raster export failed: {0}")]
    Raster(String),
}

pub type Result<T, E = MapError> = std::result::Result<T, E>;
