//! Structured map files.
//!
//! The file is a single JSON object:
//!
//! ```json
//! { "lines": [...], "stations": [...], "scale": 1.0, "offset_x": 0, "offset_y": 0 }
//! ```
//!
//! Missing `lines`/`stations` read as empty, missing `scale` as 1.0 and missing
//! offsets as 0. Loading either yields a complete, validated scene or an error;
//! nothing is ever half-applied.

use camino::Utf8Path;
use tracing::info;

use crate::error::{MapError, Result};
use crate::model::MapDocument;
use crate::scene::Scene;
use crate::transform::Viewport;

/// Pretty-printed JSON text of the scene and view state.
pub fn to_json_string(scene: &Scene, viewport: &Viewport) -> Result<String> {
    Ok(serde_json::to_string_pretty(&scene.to_document(viewport))?)
}

/// Parse and validate map JSON.
pub fn from_json_str(text: &str) -> Result<(Scene, Viewport)> {
    let doc: MapDocument = serde_json::from_str(text)?;
    Scene::from_document(doc)
}

/// Write the map file at `path` (UTF-8, two-space indentation).
pub fn save_map(path: &Utf8Path, scene: &Scene, viewport: &Viewport) -> Result<()> {
    let text = to_json_string(scene, viewport)?;
    std::fs::write(path, text).map_err(|source| MapError::Export {
        path: path.to_path_buf(),
        source,
    })?;
    info!(%path, stations = scene.station_count(), lines = scene.line_count(), "saved map");
    Ok(())
}

/// Read the map file at `path`.
///
/// Errors are wrapped in [`MapError::Import`] carrying the path.
pub fn load_map(path: &Utf8Path) -> Result<(Scene, Viewport)> {
    let wrap = |source: MapError| MapError::Import {
        path: path.to_path_buf(),
        source: Box::new(source),
    };
    let text = std::fs::read_to_string(path).map_err(|e| wrap(e.into()))?;
    let (scene, viewport) = from_json_str(&text).map_err(wrap)?;
    info!(%path, stations = scene.station_count(), lines = scene.line_count(), "loaded map");
    Ok((scene, viewport))
}
