#![cfg(feature = "egui")]

use camino::Utf8PathBuf;
use eframe::egui::{self, Color32, PointerButton, Pos2, RichText, Sense};

use crate::geometry::Point;
use crate::model::{LineId, Smoothing, StationStyle};
use crate::session::{EditMode, NotificationKind};
use crate::transform::{MAX_SCALE, MIN_SCALE};

use super::render::{paint_display_list, rgb_to_color32};
use super::state::EditorApp;

const CANVAS_BACKGROUND: Color32 = Color32::WHITE;

pub fn update(app: &mut EditorApp, ctx: &egui::Context, _frame: &mut eframe::Frame) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| toolbar(app, ui));
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| status_bar(app, ui));
    egui::SidePanel::left("controls")
        .resizable(true)
        .default_width(240.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                line_controls(app, ui);
                ui.separator();
                station_controls(app, ui);
            });
        });
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(CANVAS_BACKGROUND))
        .show(ctx, |ui| canvas(app, ui));
    station_dialog(app, ctx);
    app.pump_notifications();
}

fn to_point(origin: Pos2, pos: Pos2) -> Point {
    Point::new((pos.x - origin.x) as f64, (pos.y - origin.y) as f64)
}

fn toolbar(app: &mut EditorApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("Mode:").strong());
        ui.radio_value(&mut app.session.mode, EditMode::Add, "Add stations");
        ui.radio_value(&mut app.session.mode, EditMode::Edit, "Move stations");
        ui.separator();

        let mut scale = app.session.viewport.scale;
        let slider = egui::Slider::new(&mut scale, MIN_SCALE..=MAX_SCALE)
            .logarithmic(true)
            .text("Scale");
        if ui.add(slider).changed() {
            app.session.set_scale(scale);
        }
        if ui.button("Reset view").clicked() {
            app.session.reset_view();
        }
        ui.separator();

        ui.label("JSON:");
        ui.add(egui::TextEdit::singleline(&mut app.json_path).desired_width(140.0));
        if ui.button("Import").clicked() {
            let path = Utf8PathBuf::from(app.json_path.trim());
            let _ = app.session.import_json(&path);
        }
        if ui.button("Save").clicked() {
            let path = Utf8PathBuf::from(app.json_path.trim());
            let _ = app.session.export_json(&path);
        }
        ui.separator();

        ui.label("PNG:");
        ui.add(egui::TextEdit::singleline(&mut app.png_path).desired_width(140.0));
        ui.add(
            egui::DragValue::new(&mut app.export.scale)
                .range(0.1..=8.0)
                .speed(0.05)
                .prefix("x"),
        );
        if ui.button("Export").clicked() {
            let path = Utf8PathBuf::from(app.png_path.trim());
            let _ = app.session.export_png(&path, &app.export);
        }
    });
}

fn status_bar(app: &EditorApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.label(format!(
            "{} lines, {} stations, scale {:.3}",
            app.session.scene.line_count(),
            app.session.scene.station_count(),
            app.session.viewport.scale
        ));
        if let Some(note) = &app.status {
            ui.separator();
            let color = match note.kind {
                NotificationKind::Info => ui.visuals().text_color(),
                NotificationKind::Error => Color32::from_rgb(200, 40, 40),
            };
            ui.label(RichText::new(&note.message).color(color));
        }
    });
}

fn smoothing_combo(ui: &mut egui::Ui, id: &str, value: &mut Smoothing) {
    egui::ComboBox::from_id_salt(id)
        .selected_text(value.as_str())
        .show_ui(ui, |ui| {
            for s in Smoothing::ALL {
                ui.selectable_value(value, s, s.as_str());
            }
        });
}

fn style_combo(ui: &mut egui::Ui, id: &str, value: &mut StationStyle) {
    egui::ComboBox::from_id_salt(id)
        .selected_text(value.as_str())
        .show_ui(ui, |ui| {
            for s in StationStyle::ALL {
                ui.selectable_value(value, s, s.as_str());
            }
        });
}

fn line_controls(app: &mut EditorApp, ui: &mut egui::Ui) {
    ui.heading("Lines");
    ui.horizontal(|ui| {
        ui.color_edit_button_srgb(&mut app.color);
        if ui.button("Add line").clicked() {
            let color = app.color_hex();
            let _ = app.session.add_line(&color);
        }
        if ui.button("Change color").clicked() {
            let color = app.color_hex();
            let _ = app.session.change_line_color(&color);
        }
    });
    ui.horizontal(|ui| {
        ui.label("Width");
        ui.add(egui::DragValue::new(&mut app.session.line_form.width).range(1..=40));
        smoothing_combo(ui, "line_smoothing", &mut app.session.line_form.smoothing);
    });
    if ui
        .add_enabled(app.session.selected_line().is_some(), egui::Button::new("Apply to line"))
        .clicked()
    {
        let _ = app.session.apply_line_settings();
    }

    let lines: Vec<(LineId, String, String)> = app
        .session
        .scene
        .lines()
        .map(|l| (l.id, l.name.clone(), l.color.clone()))
        .collect();
    let mut selected = app.session.selected_line();
    for (id, name, color) in &lines {
        ui.horizontal(|ui| {
            let swatch = rgb_to_color32(crate::render::resolve_color(color));
            let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), Sense::hover());
            ui.painter().rect_filled(rect, 2.0, swatch);
            ui.selectable_value(&mut selected, Some(*id), name.as_str());
        });
    }
    if selected != app.session.selected_line() {
        app.session.select_line(selected);
    }
}

fn station_controls(app: &mut EditorApp, ui: &mut egui::Ui) {
    ui.heading("Stations");
    let names: Vec<String> = app.session.station_list().iter().map(|s| s.name.clone()).collect();
    if app.session.selected_line().is_none() {
        ui.label("Select a line to list its stations.");
    }
    let mut selected = app.session.selected_station_index();
    for (index, name) in names.iter().enumerate() {
        ui.selectable_value(&mut selected, Some(index), name.as_str());
    }
    if selected != app.session.selected_station_index() {
        app.session.select_station(selected);
    }

    ui.horizontal(|ui| {
        ui.label("Style");
        style_combo(ui, "station_style", &mut app.session.station_form.style);
    });
    ui.horizontal(|ui| {
        ui.label("X");
        ui.add(egui::TextEdit::singleline(&mut app.session.station_form.x).desired_width(70.0));
        ui.label("Y");
        ui.add(egui::TextEdit::singleline(&mut app.session.station_form.y).desired_width(70.0));
    });
    ui.horizontal(|ui| {
        if ui
            .add_enabled(app.session.selected_station().is_some(), egui::Button::new("Apply to station"))
            .clicked()
        {
            let _ = app.session.apply_station_settings();
        }
        if ui.button("Delete selected").clicked() {
            let _ = app.session.delete_selected();
        }
    });
}

fn canvas(app: &mut EditorApp, ui: &mut egui::Ui) {
    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
    let origin = response.rect.min;

    let (pointer, primary_pressed, primary_down, primary_released) = ui.input(|i| {
        (
            i.pointer.interact_pos(),
            i.pointer.primary_pressed(),
            i.pointer.primary_down(),
            i.pointer.primary_released(),
        )
    });
    let (middle_pressed, middle_down, middle_released, scroll) = ui.input(|i| {
        (
            i.pointer.button_pressed(PointerButton::Middle),
            i.pointer.button_down(PointerButton::Middle),
            i.pointer.button_released(PointerButton::Middle),
            i.raw_scroll_delta.y,
        )
    });

    if let Some(pos) = pointer {
        let view_pos = to_point(origin, pos);
        if response.hovered() {
            if primary_pressed {
                app.session.pointer_pressed(view_pos);
            }
            if middle_pressed {
                app.session.pan_start(view_pos);
            }
            if scroll != 0.0 {
                app.session.wheel(scroll as f64);
            }
        }
        if primary_down && app.session.dragging().is_some() {
            app.session.pointer_dragged(view_pos);
        }
        if middle_down {
            app.session.pan_move(view_pos);
        }
    }
    if primary_released {
        app.session.pointer_released();
    }
    if middle_released {
        app.session.pan_end();
    }

    if response.secondary_clicked()
        && let Some(pos) = response.interact_pointer_pos()
        && let Some((station, edit)) = app.session.secondary_click(to_point(origin, pos))
    {
        app.open_station_dialog(station, edit);
    }

    paint_display_list(&painter, origin, &app.session.display_list());
}

fn station_dialog(app: &mut EditorApp, ctx: &egui::Context) {
    let Some(dialog) = app.dialog.as_mut() else {
        return;
    };
    let mut open = dialog.open;
    let mut save = false;
    egui::Window::new(format!("Edit station {}", dialog.station))
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .show(ctx, |ui| {
            egui::Grid::new("station_edit").num_columns(2).show(ui, |ui| {
                ui.label("Name");
                ui.text_edit_singleline(&mut dialog.edit.name);
                ui.end_row();
                ui.label("Style");
                style_combo(ui, "dialog_style", &mut dialog.edit.style);
                ui.end_row();
                ui.label("X");
                ui.text_edit_singleline(&mut dialog.edit.x);
                ui.end_row();
                ui.label("Y");
                ui.text_edit_singleline(&mut dialog.edit.y);
                ui.end_row();
            });
            save = ui.button("Save").clicked();
        });
    dialog.open = open;

    if save {
        let (station, edit) = (dialog.station, dialog.edit.clone());
        // A rejected edit keeps the dialog open so the value can be fixed.
        if app.session.save_station_edit(station, &edit).is_ok() {
            app.dialog = None;
        }
    } else if !open {
        app.dialog = None;
    }
}
