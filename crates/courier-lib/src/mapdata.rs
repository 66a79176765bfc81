//! Street map text format.
//!
//! A map file is a sequence of street blocks:
//!
//! ```text
//! Westwood Boulevard
//! 2
//! 34.0547000 -118.4794734 34.0544590 -118.4801137
//! 34.0544590 -118.4801137 34.0542962 -118.4804907
//! ```
//!
//! The first line names the street, the second gives the segment count `k`,
//! and each of the next `k` lines holds one segment's start and end
//! coordinates. Coordinate text is preserved exactly.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::graph::{GeoGraph, RawSegment, StreetRecord};

/// Split map text into street records.
pub fn parse_street_records(text: &str) -> Result<Vec<StreetRecord>> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let mut records = Vec::new();
    while let Some((_, name)) = lines.next() {
        let Some((count_line, count_text)) = lines.next() else {
            return Err(Error::MapSyntax {
                line: text.lines().count(),
                reason: format!("street '{name}' is missing its segment count"),
            });
        };
        let segment_count: usize = count_text.parse().map_err(|_| Error::MapSyntax {
            line: count_line,
            reason: format!("expected a segment count, found '{count_text}'"),
        })?;

        let mut segments = Vec::with_capacity(segment_count);
        for _ in 0..segment_count {
            let Some((line, content)) = lines.next() else {
                return Err(Error::MapSyntax {
                    line: text.lines().count(),
                    reason: format!(
                        "street '{name}' declares {segment_count} segments but the data ends after {}",
                        segments.len()
                    ),
                });
            };
            segments.push(parse_segment_line(line, content)?);
        }

        records.push(StreetRecord {
            name: name.to_string(),
            segment_count,
            segments,
        });
    }

    Ok(records)
}

fn parse_segment_line(line: usize, content: &str) -> Result<RawSegment> {
    let parts: Vec<&str> = content
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    match parts.as_slice() {
        [start_lat, start_lon, end_lat, end_lon] => {
            Ok(RawSegment::new(*start_lat, *start_lon, *end_lat, *end_lon))
        }
        _ => Err(Error::MapSyntax {
            line,
            reason: format!(
                "expected 4 coordinate components, found {}",
                parts.len()
            ),
        }),
    }
}

/// Read a map file and build the street graph from it.
pub fn load_street_map(path: &Path) -> Result<GeoGraph> {
    let text = fs::read_to_string(path)?;
    let records = parse_street_records(&text)?;
    let graph = GeoGraph::load(&records)?;
    info!(path = %path.display(), "loaded street map");
    Ok(graph)
}
