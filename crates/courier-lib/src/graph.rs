use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::geo::{bearing, crow_distance, Coordinate};

/// Directed street edge between two coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Segment {
    pub start: Coordinate,
    pub end: Coordinate,
    pub street: String,
}

impl Segment {
    pub fn new(start: Coordinate, end: Coordinate, street: impl Into<String>) -> Self {
        Self {
            start,
            end,
            street: street.into(),
        }
    }

    /// Crow distance between the endpoints in miles.
    pub fn length(&self) -> f64 {
        crow_distance(&self.start, &self.end)
    }

    /// Direction of travel in degrees counter-clockwise from east.
    pub fn bearing(&self) -> f64 {
        bearing(&self.start, &self.end)
    }

    /// The same street edge travelled the other way.
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end.clone(),
            end: self.start.clone(),
            street: self.street.clone(),
        }
    }
}

/// One line of a street polyline, as decimal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSegment {
    pub start_latitude: String,
    pub start_longitude: String,
    pub end_latitude: String,
    pub end_longitude: String,
}

impl RawSegment {
    pub fn new(
        start_latitude: impl Into<String>,
        start_longitude: impl Into<String>,
        end_latitude: impl Into<String>,
        end_longitude: impl Into<String>,
    ) -> Self {
        Self {
            start_latitude: start_latitude.into(),
            start_longitude: start_longitude.into(),
            end_latitude: end_latitude.into(),
            end_longitude: end_longitude.into(),
        }
    }
}

/// Street record as produced by the map-data parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreetRecord {
    pub name: String,
    /// Segment count declared by the source; must match `segments.len()`.
    pub segment_count: usize,
    pub segments: Vec<RawSegment>,
}

impl StreetRecord {
    /// Build a record whose declared count matches its segments.
    pub fn new(name: impl Into<String>, segments: Vec<RawSegment>) -> Self {
        Self {
            name: name.into(),
            segment_count: segments.len(),
            segments,
        }
    }
}

/// Directed street network keyed by coordinate.
///
/// Built once from street records and read-only afterwards. Clones share the
/// adjacency table.
#[derive(Debug, Clone, Default)]
pub struct GeoGraph {
    adjacency: Arc<HashMap<Coordinate, Vec<Segment>>>,
    segment_count: usize,
}

impl GeoGraph {
    /// Build a graph from street records.
    ///
    /// Every consecutive coordinate pair yields a forward and a backward
    /// segment. Any malformed record fails the whole load.
    pub fn load(records: &[StreetRecord]) -> Result<Self> {
        let mut adjacency: HashMap<Coordinate, Vec<Segment>> = HashMap::new();
        let mut segment_count = 0;

        for record in records {
            for segment in validate_record(record)? {
                let backward = segment.reversed();
                adjacency
                    .entry(segment.start.clone())
                    .or_default()
                    .push(segment);
                adjacency
                    .entry(backward.start.clone())
                    .or_default()
                    .push(backward);
                segment_count += 2;
            }
            debug!(street = %record.name, segments = record.segment_count, "loaded street");
        }

        info!(
            streets = records.len(),
            coordinates = adjacency.len(),
            segments = segment_count,
            "street graph built"
        );

        Ok(Self {
            adjacency: Arc::new(adjacency),
            segment_count,
        })
    }

    /// Segments leaving `coordinate`, or `None` when the coordinate is unknown.
    pub fn segments_from(&self, coordinate: &Coordinate) -> Option<&[Segment]> {
        self.adjacency.get(coordinate).map(Vec::as_slice)
    }

    /// Segments leaving `coordinate`; empty when there are none or the
    /// coordinate is unknown.
    pub fn outgoing(&self, coordinate: &Coordinate) -> &[Segment] {
        self.segments_from(coordinate).unwrap_or(&[])
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.adjacency.contains_key(coordinate)
    }

    pub fn coordinate_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    pub fn coordinates(&self) -> impl Iterator<Item = &Coordinate> {
        self.adjacency.keys()
    }
}

fn validate_record(record: &StreetRecord) -> Result<Vec<Segment>> {
    let malformed = |reason: String| Error::MalformedStreet {
        street: record.name.clone(),
        reason,
    };

    if record.name.trim().is_empty() {
        return Err(malformed("street name is empty".to_string()));
    }
    if record.segment_count != record.segments.len() {
        return Err(malformed(format!(
            "declared {} segments but found {}",
            record.segment_count,
            record.segments.len()
        )));
    }

    record
        .segments
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let start = Coordinate::parse(&raw.start_latitude, &raw.start_longitude)
                .map_err(|err| malformed(format!("segment {}: {err}", index + 1)))?;
            let end = Coordinate::parse(&raw.end_latitude, &raw.end_longitude)
                .map_err(|err| malformed(format!("segment {}: {err}", index + 1)))?;
            Ok(Segment::new(start, end, record.name.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: &str, lon: &str) -> Coordinate {
        Coordinate::parse(lat, lon).unwrap()
    }

    #[test]
    fn load_inserts_both_directions() {
        let record = StreetRecord::new(
            "Main St",
            vec![RawSegment::new(
                "34.0000000",
                "-118.0000000",
                "34.0000000",
                "-118.0010000",
            )],
        );
        let graph = GeoGraph::load(&[record]).unwrap();

        let a = c("34.0000000", "-118.0000000");
        let b = c("34.0000000", "-118.0010000");
        assert_eq!(graph.outgoing(&a), &[Segment::new(a.clone(), b.clone(), "Main St")]);
        assert_eq!(graph.outgoing(&b), &[Segment::new(b.clone(), a.clone(), "Main St")]);
        assert_eq!(graph.segment_count(), 2);
        assert_eq!(graph.coordinate_count(), 2);
    }

    #[test]
    fn unknown_coordinate_is_distinguishable() {
        let graph = GeoGraph::default();
        let a = c("1.0000000", "1.0000000");
        assert!(graph.segments_from(&a).is_none());
        assert!(graph.outgoing(&a).is_empty());
        assert!(!graph.contains(&a));
    }

    #[test]
    fn count_mismatch_fails_whole_load() {
        let good = StreetRecord::new(
            "Good Ave",
            vec![RawSegment::new("1.0000000", "1.0000000", "1.0000000", "1.0010000")],
        );
        let mut bad = StreetRecord::new(
            "Bad Ave",
            vec![RawSegment::new("2.0000000", "2.0000000", "2.0000000", "2.0010000")],
        );
        bad.segment_count = 3;

        let err = GeoGraph::load(&[good, bad]).unwrap_err();
        assert!(matches!(err, Error::MalformedStreet { ref street, .. } if street == "Bad Ave"));
    }

    #[test]
    fn bad_coordinate_text_fails_load() {
        let record = StreetRecord::new(
            "Broken Rd",
            vec![RawSegment::new("1.0000000", "x", "1.0000000", "1.0010000")],
        );
        let err = GeoGraph::load(&[record]).unwrap_err();
        assert!(err.to_string().contains("segment 1"));
    }
}
