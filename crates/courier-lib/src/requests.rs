//! Delivery requests and the delivery list text format.
//!
//! A delivery list starts with the depot coordinate on its own line, followed
//! by one `<lat> <lon>:<item>` line per delivery:
//!
//! ```text
//! 34.0625329 -118.4470263
//! 34.0712323 -118.4505969:Chicken tenders (Sproul Landing)
//! 34.0687443 -118.4449195:B-Plate salmon (Eng IV)
//! ```

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::geo::Coordinate;

/// An item to hand over at a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryRequest {
    pub item: String,
    pub location: Coordinate,
}

impl DeliveryRequest {
    pub fn new(item: impl Into<String>, location: Coordinate) -> Self {
        Self {
            item: item.into(),
            location,
        }
    }
}

/// A depot and the deliveries to make from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryManifest {
    pub depot: Coordinate,
    pub requests: Vec<DeliveryRequest>,
}

/// Parse a delivery list.
pub fn parse_delivery_list(text: &str) -> Result<DeliveryManifest> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let Some((depot_line, depot_text)) = lines.next() else {
        return Err(Error::DeliverySyntax {
            line: 1,
            reason: "missing depot coordinate".to_string(),
        });
    };
    let depot = depot_text
        .parse::<Coordinate>()
        .map_err(|err| syntax(depot_line, err.to_string()))?;

    let mut requests = Vec::new();
    for (line, content) in lines {
        let Some((location, item)) = content.split_once(':') else {
            return Err(syntax(line, "expected '<lat> <lon>:<item>'".to_string()));
        };
        let item = item.trim();
        if item.is_empty() {
            return Err(syntax(line, "delivery item is empty".to_string()));
        }
        let location = location
            .parse::<Coordinate>()
            .map_err(|err| syntax(line, err.to_string()))?;
        requests.push(DeliveryRequest::new(item, location));
    }

    Ok(DeliveryManifest { depot, requests })
}

/// Read and parse a delivery list file.
pub fn load_delivery_list(path: &Path) -> Result<DeliveryManifest> {
    let text = fs::read_to_string(path)?;
    parse_delivery_list(&text)
}

fn syntax(line: usize, reason: String) -> Error {
    Error::DeliverySyntax { line, reason }
}
