#![cfg(feature = "raster")]

use camino::Utf8PathBuf;
use metromap::error::MapError;
use metromap::generator::png::{MAX_RASTER_PIXELS, export_png, render_png};
use metromap::geometry::Point;
use metromap::model::{Smoothing, StationStyle};
use metromap::render::ExportOptions;
use metromap::Scene;
use resvg::tiny_skia::Pixmap;

fn straight_scene() -> Scene {
    let mut scene = Scene::new();
    let line = scene.add_line("#ff0000", 8, Smoothing::Straight).unwrap();
    scene.add_station(line, Point::new(100.0, 60.0), StationStyle::Circle).unwrap();
    scene.add_station(line, Point::new(300.0, 60.0), StationStyle::Label).unwrap();
    scene
}

#[test]
fn png_has_frame_dimensions() {
    let (bytes, frame) = render_png(&straight_scene(), &ExportOptions::default()).unwrap();
    let pixmap = Pixmap::decode_png(&bytes).unwrap();
    assert_eq!((pixmap.width(), pixmap.height()), (frame.width, frame.height));
    assert_eq!((frame.width, frame.height), (280, 80));

    let corner = pixmap.pixel(0, 0).unwrap();
    assert_eq!((corner.red(), corner.green(), corner.blue()), (255, 255, 255));

    // Halfway along the line, well clear of both markers.
    let mid = pixmap.pixel(140, 40).unwrap();
    assert!(mid.red() > 200 && mid.green() < 60 && mid.blue() < 60, "{mid:?}");
}

#[test]
fn export_scale_multiplies_the_frame() {
    let opts = ExportOptions {
        scale: 2.0,
        ..ExportOptions::default()
    };
    let (bytes, frame) = render_png(&straight_scene(), &opts).unwrap();
    let pixmap = Pixmap::decode_png(&bytes).unwrap();
    assert_eq!((pixmap.width(), pixmap.height()), (480, 80));
    assert_eq!(frame.min_x, 160.0);
}

#[test]
fn png_file_is_written_only_for_non_empty_scenes() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("map.png")).unwrap();

    let err = export_png(&path, &Scene::new(), &ExportOptions::default()).unwrap_err();
    assert!(matches!(err, MapError::NoStations));
    assert!(!path.exists());

    export_png(&path, &straight_scene(), &ExportOptions::default()).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn oversized_raster_is_an_error_not_an_abort() {
    let mut scene = Scene::new();
    let line = scene.add_line("red", 4, Smoothing::Straight).unwrap();
    scene.add_station(line, Point::new(0.0, 0.0), StationStyle::Circle).unwrap();
    scene.add_station(line, Point::new(2e6, 2e6), StationStyle::Circle).unwrap();

    let err = render_png(&scene, &ExportOptions::default()).unwrap_err();
    match &err {
        MapError::Raster(msg) => assert_eq!(msg, "export too large: 2000080x2000080"),
        other => panic!("expected a raster error, got {other:?}"),
    }

    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("huge.png")).unwrap();
    assert!(export_png(&path, &scene, &ExportOptions::default()).is_err());
    assert!(!path.exists());
}

#[test]
fn default_export_fits_the_pixel_budget() {
    let (_, frame) = render_png(&straight_scene(), &ExportOptions::default()).unwrap();
    assert!(frame.pixel_count() <= MAX_RASTER_PIXELS);
}
