//! Map output adapters.
//!
//! This module provides:
//! - [`json`] – Read and write the flat structured map file.
//! - [`svg`] – Generate SVG text from a [`DisplayList`](crate::render::DisplayList).
//! - [`png`] – Rasterize the export rendering to PNG (feature `raster`).

pub mod json;
#[cfg(feature = "raster")]
pub mod png;
pub mod svg;
