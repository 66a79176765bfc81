use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::Coordinate;
use crate::graph::GeoGraph;
use crate::path::{find_route_a_star, find_route_dijkstra, Route};

/// Supported point-to-point search algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// A* search guided by crow distance to the goal.
    #[default]
    #[serde(rename = "a-star")]
    AStar,
    /// Dijkstra's algorithm (uninformed baseline).
    Dijkstra,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::AStar => "a-star",
            RouteAlgorithm::Dijkstra => "dijkstra",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "a-star" | "astar" | "a_star" => Ok(RouteAlgorithm::AStar),
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            other => Err(format!("unknown route algorithm '{other}'")),
        }
    }
}

/// Finds minimum-distance paths between two coordinates of a street graph.
#[derive(Debug, Clone, Copy)]
pub struct PointToPointRouter<'a> {
    graph: &'a GeoGraph,
    algorithm: RouteAlgorithm,
}

impl<'a> PointToPointRouter<'a> {
    pub fn new(graph: &'a GeoGraph) -> Self {
        Self {
            graph,
            algorithm: RouteAlgorithm::default(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn algorithm(&self) -> RouteAlgorithm {
        self.algorithm
    }

    pub fn graph(&self) -> &'a GeoGraph {
        self.graph
    }

    /// Compute a route from `start` to `end`.
    ///
    /// Fails with [`Error::BadCoordinate`] when either endpoint is unknown to
    /// the graph and with [`Error::NoRoute`] when `end` is unreachable.
    pub fn route(&self, start: &Coordinate, end: &Coordinate) -> Result<Route> {
        let result = match self.algorithm {
            RouteAlgorithm::AStar => find_route_a_star(self.graph, start, end),
            RouteAlgorithm::Dijkstra => find_route_dijkstra(self.graph, start, end),
        };

        match &result {
            Ok(route) => debug!(
                %start,
                %end,
                algorithm = %self.algorithm,
                segments = route.len(),
                miles = route.distance,
                "routed leg"
            ),
            Err(Error::NoRoute { .. }) => debug!(%start, %end, "no route between coordinates"),
            Err(_) => {}
        }

        result
    }
}
