use std::fs;

use courier_lib::{load_delivery_list, load_street_map, Error};
use tempfile::tempdir;

const MAP: &str = "\
Main Street
2
34.0000000 -118.0020000 34.0000000 -118.0010000
34.0000000 -118.0010000 34.0000000 -118.0000000
Side Street
1
34.0000000 -118.0010000 34.0010000 -118.0010000
";

#[test]
fn loads_map_file_into_graph() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("mapdata.txt");
    fs::write(&path, MAP).expect("write map");

    let graph = load_street_map(&path).expect("map loads");
    assert_eq!(graph.coordinate_count(), 4);
    assert_eq!(graph.segment_count(), 6);

    let junction = "34.0000000 -118.0010000".parse().unwrap();
    assert_eq!(graph.outgoing(&junction).len(), 3);
}

#[test]
fn missing_map_file_is_io_error() {
    let dir = tempdir().expect("create temp dir");
    let err = load_street_map(&dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn malformed_coordinate_fails_load() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("broken.txt");
    fs::write(
        &path,
        "Main Street\n1\n34.0000000 -118.0020000 north -118.0010000\n",
    )
    .expect("write map");

    let err = load_street_map(&path).unwrap_err();
    assert!(matches!(err, Error::MalformedStreet { .. }), "got {err:?}");
}

#[test]
fn loads_delivery_list_file() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("deliveries.txt");
    fs::write(
        &path,
        "34.0000000 -118.0020000\n34.0010000 -118.0010000:Sandwiches\n",
    )
    .expect("write deliveries");

    let manifest = load_delivery_list(&path).expect("deliveries load");
    assert_eq!(manifest.depot.to_string(), "34.0000000 -118.0020000");
    assert_eq!(manifest.requests.len(), 1);
    assert_eq!(manifest.requests[0].item, "Sandwiches");
}
