#![allow(dead_code)]

use courier_lib::{Coordinate, DeliveryRequest, GeoGraph, RawSegment, StreetRecord};

/// Spacing between grid intersections in degrees.
pub const GRID_STEP: f64 = 0.001;
const ORIGIN_LAT: f64 = 34.0;
const ORIGIN_LON: f64 = -118.0;

fn text(value: f64) -> String {
    format!("{value:.7}")
}

fn grid_text(row: usize, col: usize) -> (String, String) {
    (
        text(ORIGIN_LAT + row as f64 * GRID_STEP),
        text(ORIGIN_LON + col as f64 * GRID_STEP),
    )
}

/// Intersection `(row, col)` of the fixture grid. Rows run north, columns east.
pub fn grid_coord(row: usize, col: usize) -> Coordinate {
    let (lat, lon) = grid_text(row, col);
    Coordinate::parse(&lat, &lon).expect("grid coordinate is valid")
}

pub fn raw(from: (usize, usize), to: (usize, usize)) -> RawSegment {
    let (start_lat, start_lon) = grid_text(from.0, from.1);
    let (end_lat, end_lon) = grid_text(to.0, to.1);
    RawSegment::new(start_lat, start_lon, end_lat, end_lon)
}

/// One east-west street per row and one north-south avenue per column.
pub fn grid_records(rows: usize, cols: usize) -> Vec<StreetRecord> {
    let mut records = Vec::new();
    for row in 0..rows {
        let segments = (0..cols.saturating_sub(1))
            .map(|col| raw((row, col), (row, col + 1)))
            .collect();
        records.push(StreetRecord::new(format!("Row {row} Street"), segments));
    }
    for col in 0..cols {
        let segments = (0..rows.saturating_sub(1))
            .map(|row| raw((row, col), (row + 1, col)))
            .collect();
        records.push(StreetRecord::new(format!("Column {col} Avenue"), segments));
    }
    records
}

pub fn grid_graph(rows: usize, cols: usize) -> GeoGraph {
    GeoGraph::load(&grid_records(rows, cols)).expect("grid loads")
}

/// Every edge of a `rows x cols` grid, in a stable order.
pub fn grid_edges(rows: usize, cols: usize) -> Vec<((usize, usize), (usize, usize))> {
    let mut edges = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            if col + 1 < cols {
                edges.push(((row, col), (row, col + 1)));
            }
            if row + 1 < rows {
                edges.push(((row, col), (row + 1, col)));
            }
        }
    }
    edges
}

/// A grid keeping only the edges whose mask bit is set, each as its own street.
pub fn masked_grid_graph(rows: usize, cols: usize, mask: &[bool]) -> GeoGraph {
    let records: Vec<StreetRecord> = grid_edges(rows, cols)
        .into_iter()
        .zip(mask)
        .filter(|(_, keep)| **keep)
        .enumerate()
        .map(|(index, ((from, to), _))| StreetRecord::new(format!("Lane {index}"), vec![raw(from, to)]))
        .collect();
    GeoGraph::load(&records).expect("masked grid loads")
}

/// A street along row 0 from column 0 to `len - 1`.
pub fn straight_street(name: &str, len: usize) -> StreetRecord {
    let segments = (0..len.saturating_sub(1))
        .map(|col| raw((0, col), (0, col + 1)))
        .collect();
    StreetRecord::new(name, segments)
}

/// A short street far away from the fixture grid.
pub fn island_record() -> StreetRecord {
    StreetRecord::new(
        "Island Road",
        vec![RawSegment::new(
            "35.0000000",
            "-117.0000000",
            "35.0000000",
            "-117.0010000",
        )],
    )
}

pub fn island_coord() -> Coordinate {
    Coordinate::parse("35.0000000", "-117.0000000").expect("island coordinate is valid")
}

pub fn request(item: &str, location: Coordinate) -> DeliveryRequest {
    DeliveryRequest::new(item, location)
}
