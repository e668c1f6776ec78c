use camino::Utf8PathBuf;
use metromap::error::MapError;
use metromap::generator::svg::{export_svg, generate_export_svg};
use metromap::geometry::Point;
use metromap::model::{Smoothing, StationStyle};
use metromap::render::{ExportFrame, ExportOptions, render_export, render_view};
use metromap::{Scene, Viewport};

fn sample_scene() -> Scene {
    let mut scene = Scene::new();
    let line = scene.add_line("#d62828", 8, Smoothing::Metro).unwrap();
    scene.add_station(line, Point::new(100.0, 60.0), StationStyle::Circle).unwrap();
    scene.add_station(line, Point::new(300.0, 140.0), StationStyle::Square).unwrap();
    scene.add_station(line, Point::new(180.0, 220.0), StationStyle::Triangle).unwrap();
    scene
}

#[test]
fn empty_scene_export_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("empty.svg")).unwrap();
    let scene = Scene::new();
    let err = export_svg(&path, &scene, &ExportOptions::default()).unwrap_err();
    assert!(matches!(err, MapError::NoStations));
    assert_eq!(err.to_string(), "no stations to export");
    assert!(!path.exists());
}

#[test]
fn frame_is_station_bounds_plus_padding() {
    let frame = ExportFrame::for_scene(&sample_scene(), &ExportOptions::default()).unwrap();
    assert_eq!((frame.min_x, frame.min_y), (60.0, 20.0));
    assert_eq!((frame.width, frame.height), (280, 240));
    let bounds = frame.bounds();
    assert_eq!(bounds.max, Point::new(340.0, 260.0));
    assert_eq!(frame.map(Point::new(100.0, 60.0)), Point::new(40.0, 40.0));
}

#[test]
fn export_ignores_interactive_zoom() {
    let scene = sample_scene();
    let (export, _) = render_export(&scene, &ExportOptions::default()).unwrap();
    // The export equals the canvas at scale 1, shifted by the frame origin.
    let view = render_view(&scene, &Viewport::new(1.0, -60.0, -20.0));
    assert_eq!(export, view);
    let zoomed = render_view(&scene, &Viewport::new(3.0, 0.0, 0.0));
    assert_ne!(export, zoomed);
}

#[test]
fn export_scale_is_validated() {
    let opts = ExportOptions {
        scale: 0.0,
        ..ExportOptions::default()
    };
    assert!(matches!(
        render_export(&sample_scene(), &opts),
        Err(MapError::InvalidExportScale(_))
    ));
}

#[test]
fn single_station_line_is_not_stroked() {
    let mut scene = Scene::new();
    let line = scene.add_line("blue", 4, Smoothing::Straight).unwrap();
    scene.add_station(line, Point::new(0.0, 0.0), StationStyle::Circle).unwrap();
    let (list, frame) = render_export(&scene, &ExportOptions::default()).unwrap();
    assert!(list.strokes.is_empty());
    assert_eq!(list.markers.len(), 1);
    assert_eq!((frame.width, frame.height), (80, 80));
}

#[test]
fn svg_export_contains_strokes_and_labels() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("map.svg")).unwrap();
    let mut scene = sample_scene();
    let first = scene.stations().next().unwrap().id;
    scene.rename_station(first, "Bank & Monument").unwrap();

    let frame = export_svg(&path, &scene, &ExportOptions::default()).unwrap();
    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(&format!("width=\"{}\" height=\"{}\"", frame.width, frame.height)));
    assert!(svg.contains("<polyline"));
    assert!(svg.contains("stroke=\"#d62828\""));
    assert!(svg.contains("Bank &amp; Monument"));
    assert_eq!(svg.matches("<text").count(), 15);

    let (list, frame) = render_export(&scene, &ExportOptions::default()).unwrap();
    assert_eq!(generate_export_svg(&list, &frame, metromap::color::Rgb::WHITE), svg);
}

#[test]
fn frame_wider_than_u32_is_rejected() {
    let mut scene = Scene::new();
    let line = scene.add_line("red", 4, Smoothing::Straight).unwrap();
    scene.add_station(line, Point::new(0.0, 0.0), StationStyle::Circle).unwrap();
    scene.add_station(line, Point::new(1e10, 0.0), StationStyle::Circle).unwrap();
    let err = ExportFrame::for_scene(&scene, &ExportOptions::default()).unwrap_err();
    assert!(matches!(err, MapError::ExportTooLarge { .. }));
    assert!(err.to_string().starts_with("export too large"));
}

#[test]
fn write_errors_name_the_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("no_such_dir").join("map.svg")).unwrap();
    let err = export_svg(&path, &sample_scene(), &ExportOptions::default()).unwrap_err();
    match &err {
        MapError::Export { path: p, .. } => assert_eq!(p, &path),
        other => panic!("expected a write error, got {other:?}"),
    }
    assert!(err.to_string().contains(path.as_str()));
}
