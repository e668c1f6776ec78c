//! Schematic transit map builder.
//!
//! Stations are placed in model space and grouped into colored lines. Each
//! line is routed through its stations in one of three styles (straight
//! polyline, smoothed Bezier, or metro routing with 45°/90° turns only), and
//! every station gets a marker shape plus an outlined label.
//!
//! The crate is split leaf-first:
//! - [`transform`]: model <-> view mapping.
//! - [`path`]: the path builder (straight / smooth / metro).
//! - [`marker`]: station marker draw ops.
//! - [`scene`]: lines, stations and their consistency rules.
//! - [`render`]: scene -> display list, for the canvas or for export.
//! - [`session`]: interactive editing state driven by pointer and form events.
//! - [`generator`]: JSON, SVG and PNG output.
//!
//! The binary `metromap` renders and inspects map files from the command line.

pub mod color;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod marker;
pub mod model;
pub mod path;
pub mod render;
pub mod scene;
pub mod session;
pub mod transform;

// Optional GUI/egui functionality lives behind the `egui` feature flag.
// It paints the session's display list and forwards pointer input to it;
// see demos/egui_editor.rs.
#[cfg(feature = "egui")]
pub mod egui_app;

pub use error::{MapError, Result};
pub use geometry::Point;
pub use model::{Line, LineId, MapDocument, Smoothing, Station, StationId, StationStyle};
pub use scene::Scene;
pub use session::Session;
pub use transform::Viewport;
