use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use serde::Serialize;
use tracing::trace;

use crate::error::{Error, Result};
use crate::geo::{crow_distance, Coordinate};
use crate::graph::{GeoGraph, Segment};

/// Contiguous sequence of segments and its length in miles.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Route {
    pub segments: Vec<Segment>,
    pub distance: f64,
}

impl Route {
    /// Build a route from segments, summing their lengths.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        let distance = segments.iter().map(Segment::length).sum();
        Self { segments, distance }
    }

    /// Join legs end to end. The distance is the sum of the leg distances.
    pub fn concat(legs: impl IntoIterator<Item = Route>) -> Self {
        let mut route = Route::default();
        for leg in legs {
            route.segments.extend(leg.segments);
            route.distance += leg.distance;
        }
        route
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn start(&self) -> Option<&Coordinate> {
        self.segments.first().map(|segment| &segment.start)
    }

    pub fn end(&self) -> Option<&Coordinate> {
        self.segments.last().map(|segment| &segment.end)
    }

    /// Whether every segment ends where the next one starts.
    pub fn is_contiguous(&self) -> bool {
        self.segments
            .windows(2)
            .all(|pair| pair[0].end == pair[1].start)
    }
}

/// How a visited coordinate was reached. `None` in the map marks the start.
#[derive(Debug, Clone)]
struct Predecessor {
    coordinate: Coordinate,
    street: String,
}

/// Run A* search from `start` to `goal`, using the crow distance to `goal` as
/// the heuristic.
///
/// The crow distance never exceeds the road distance, so the first time the
/// goal leaves the frontier its path is a shortest one.
pub fn find_route_a_star(graph: &GeoGraph, start: &Coordinate, goal: &Coordinate) -> Result<Route> {
    search(graph, start, goal, |coordinate| crow_distance(coordinate, goal))
}

/// Run Dijkstra's algorithm from `start` to `goal`.
pub fn find_route_dijkstra(
    graph: &GeoGraph,
    start: &Coordinate,
    goal: &Coordinate,
) -> Result<Route> {
    search(graph, start, goal, |_| 0.0)
}

fn search<H>(graph: &GeoGraph, start: &Coordinate, goal: &Coordinate, heuristic: H) -> Result<Route>
where
    H: Fn(&Coordinate) -> f64,
{
    for endpoint in [start, goal] {
        if !graph.contains(endpoint) {
            return Err(Error::BadCoordinate {
                coordinate: endpoint.to_string(),
            });
        }
    }

    let mut best_cost: HashMap<Coordinate, f64> = HashMap::new();
    let mut parents: HashMap<Coordinate, Option<Predecessor>> = HashMap::new();
    let mut frontier = BinaryHeap::new();
    let mut expanded = 0usize;

    best_cost.insert(start.clone(), 0.0);
    parents.insert(start.clone(), None);
    frontier.push(FrontierEntry::new(start.clone(), 0.0, heuristic(start)));

    while let Some(entry) = frontier.pop() {
        let current_cost = match best_cost.get(&entry.node) {
            Some(cost) if *cost < entry.cost.0 => continue,
            Some(cost) => *cost,
            None => continue,
        };

        if entry.node == *goal {
            trace!(expanded, "search reached goal");
            return Ok(reconstruct_route(&parents, goal));
        }
        expanded += 1;

        for segment in graph.outgoing(&entry.node) {
            let tentative = current_cost + segment.length();
            let improves = best_cost
                .get(&segment.end)
                .map_or(true, |known| tentative < *known);
            if improves {
                best_cost.insert(segment.end.clone(), tentative);
                parents.insert(
                    segment.end.clone(),
                    Some(Predecessor {
                        coordinate: entry.node.clone(),
                        street: segment.street.clone(),
                    }),
                );
                let estimate = heuristic(&segment.end);
                frontier.push(FrontierEntry::new(segment.end.clone(), tentative, estimate));
            }
        }
    }

    trace!(expanded, "search exhausted frontier");
    Err(Error::NoRoute {
        start: start.to_string(),
        end: goal.to_string(),
    })
}

fn reconstruct_route(parents: &HashMap<Coordinate, Option<Predecessor>>, goal: &Coordinate) -> Route {
    let mut segments = Vec::new();
    let mut current = goal.clone();
    while let Some(Some(predecessor)) = parents.get(&current) {
        segments.push(Segment::new(
            predecessor.coordinate.clone(),
            current.clone(),
            predecessor.street.clone(),
        ));
        current = predecessor.coordinate.clone();
    }
    segments.reverse();
    Route::from_segments(segments)
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct FrontierEntry {
    node: Coordinate,
    cost: FloatOrd,
    estimate: FloatOrd,
}

impl FrontierEntry {
    fn new(node: Coordinate, cost: f64, heuristic: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by estimate.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
