#![cfg(feature = "egui")]

use eframe::egui;

use crate::color::Rgb;
use crate::model::StationId;
use crate::render::ExportOptions;
use crate::session::{Notification, Session, StationEdit};

/// Open per-station edit dialog.
#[derive(Clone)]
pub struct StationDialog {
    pub station: StationId,
    pub edit: StationEdit,
    pub open: bool,
}

/// Interactive editor application state.
pub struct EditorApp {
    pub session: Session,
    /// Color picker value used by "Add line" and "Change color".
    pub color: [u8; 3],
    pub json_path: String,
    pub png_path: String,
    pub export: ExportOptions,
    pub dialog: Option<StationDialog>,
    /// Most recent notification, shown in the status bar.
    pub status: Option<Notification>,
}

impl EditorApp {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            color: [0xd6, 0x28, 0x28],
            json_path: "map.json".to_string(),
            png_path: "map.png".to_string(),
            export: ExportOptions::default(),
            dialog: None,
            status: None,
        }
    }

    /// Color picker value as a `#rrggbb` string.
    pub fn color_hex(&self) -> String {
        Rgb(self.color[0], self.color[1], self.color[2]).to_hex()
    }

    pub(super) fn open_station_dialog(&mut self, station: StationId, edit: StationEdit) {
        self.dialog = Some(StationDialog {
            station,
            edit,
            open: true,
        });
    }

    /// Move queued session notifications into the status bar.
    pub(super) fn pump_notifications(&mut self) {
        if let Some(last) = self.session.take_notifications().pop() {
            self.status = Some(last);
        }
    }
}

impl Default for EditorApp {
    fn default() -> Self {
        Self::new(Session::default())
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        super::ui::update(self, ctx, _frame);
    }
}
