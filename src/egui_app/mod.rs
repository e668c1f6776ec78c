//! Egui-based interactive map editor (feature = "egui").
//!
//! The editor owns a [`Session`](crate::session::Session) and does nothing
//! but translate egui input into session calls and paint the session's
//! display list.

#![cfg(feature = "egui")]

mod render;
mod state;
mod ui;

pub use render::{paint_display_list, rgb_to_color32};
pub use state::{EditorApp, StationDialog};
