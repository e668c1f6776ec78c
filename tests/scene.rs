use metromap::error::MapError;
use metromap::geometry::Point;
use metromap::model::{LineId, MapDocument, Smoothing, Station, StationId, StationStyle};
use metromap::Scene;

fn two_lines() -> (Scene, LineId, LineId, Vec<StationId>) {
    let mut scene = Scene::new();
    let red = scene.add_line("red", 6, Smoothing::Straight).unwrap();
    let blue = scene.add_line("blue", 10, Smoothing::Metro).unwrap();
    let a = scene.add_station(red, Point::new(0.0, 0.0), StationStyle::Circle).unwrap();
    let b = scene.add_station(red, Point::new(50.0, 0.0), StationStyle::Square).unwrap();
    let c = scene.add_station(blue, Point::new(50.0, 50.0), StationStyle::Triangle).unwrap();
    scene.link_station(blue, b).unwrap();
    (scene, red, blue, vec![a, b, c])
}

#[test]
fn ids_and_default_names_are_sequential() {
    let (scene, red, blue, stations) = two_lines();
    assert_eq!((red, blue), (LineId(1), LineId(2)));
    assert_eq!(stations, vec![StationId(1), StationId(2), StationId(3)]);
    assert_eq!(scene.line(blue).unwrap().name, "Line 2");
    assert_eq!(scene.station(StationId(3)).unwrap().name, "Station 3");
    assert_eq!(scene.line(blue).unwrap().stations, vec![StationId(3), StationId(2)]);
}

#[test]
fn delete_station_removes_it_from_every_line() {
    let (mut scene, red, blue, stations) = two_lines();
    let shared = stations[1];
    let removed = scene.delete_station(shared).unwrap();
    assert_eq!(removed.id, shared);
    assert!(scene.station(shared).is_none());
    assert!(!scene.line(red).unwrap().contains(shared));
    assert!(!scene.line(blue).unwrap().contains(shared));
    assert!(matches!(
        scene.delete_station(shared),
        Err(MapError::UnknownStation(id)) if id == shared
    ));
    assert!(scene.move_station(shared, Point::new(1.0, 1.0)).is_err());
}

#[test]
fn delete_line_removes_all_listed_stations_even_shared_ones() {
    let (mut scene, red, blue, stations) = two_lines();
    let (line, removed) = scene.delete_line(red).unwrap();
    assert_eq!(line.id, red);
    let removed_ids: Vec<StationId> = removed.iter().map(|s| s.id).collect();
    assert_eq!(removed_ids, vec![stations[0], stations[1]]);
    assert!(scene.line(red).is_none());
    assert_eq!(scene.station_count(), 1);
    // The shared station is gone from the other line too; nothing dangles.
    assert_eq!(scene.line(blue).unwrap().stations, vec![stations[2]]);
    for line in scene.lines() {
        for id in &line.stations {
            assert!(scene.station(*id).is_some());
        }
    }
}

#[test]
fn marker_width_is_the_widest_line() {
    let (mut scene, red, _blue, stations) = two_lines();
    assert_eq!(scene.marker_width(stations[0]), 6);
    assert_eq!(scene.marker_width(stations[1]), 10);
    scene.set_line_width(red, 14).unwrap();
    assert_eq!(scene.marker_width(stations[1]), 14);
}

#[test]
fn unreferenced_station_uses_default_marker_width() {
    let doc = MapDocument {
        stations: vec![Station {
            id: StationId(4),
            name: "Depot".into(),
            x: 1.0,
            y: 2.0,
            style: StationStyle::Circle,
        }],
        ..MapDocument::default()
    };
    let (mut scene, _) = Scene::from_document(doc).unwrap();
    assert_eq!(scene.marker_width(StationId(4)), 2);
    // New ids continue after the largest imported one.
    let line = scene.add_line("red", 6, Smoothing::Straight).unwrap();
    assert_eq!(line, LineId(1));
    let s = scene.add_station(line, Point::new(0.0, 0.0), StationStyle::Circle).unwrap();
    assert_eq!(s, StationId(5));
}

#[test]
fn edits_do_not_change_ids() {
    let (mut scene, red, _blue, stations) = two_lines();
    scene.rename_station(stations[0], "Harbour").unwrap();
    scene.set_station_style(stations[0], StationStyle::Label).unwrap();
    scene.move_station(stations[0], Point::new(-5.0, 7.5)).unwrap();
    scene.set_line_color(red, "#00ff00").unwrap();
    scene.set_line_smoothing(red, Smoothing::Smooth).unwrap();
    let s = scene.station(stations[0]).unwrap();
    assert_eq!((s.name.as_str(), s.style, s.x, s.y), ("Harbour", StationStyle::Label, -5.0, 7.5));
    let l = scene.line(red).unwrap();
    assert_eq!((l.color.as_str(), l.smoothing), ("#00ff00", Smoothing::Smooth));
    assert_eq!(scene.station_count(), 3);
}

#[test]
fn rejects_zero_width_and_unknown_ids() {
    let mut scene = Scene::new();
    assert!(matches!(scene.add_line("red", 0, Smoothing::Straight), Err(MapError::InvalidWidth)));
    assert!(matches!(
        scene.add_station(LineId(7), Point::new(0.0, 0.0), StationStyle::Circle),
        Err(MapError::UnknownLine(LineId(7)))
    ));
    assert!(scene.is_empty());
    let line = scene.add_line("red", 4, Smoothing::Straight).unwrap();
    assert!(matches!(scene.set_line_width(line, 0), Err(MapError::InvalidWidth)));
    assert_eq!(scene.line(line).unwrap().width, 4);
}
