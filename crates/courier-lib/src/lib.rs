//! Courier library entry points.
//!
//! This crate builds a directed street graph from map data, routes between
//! coordinates with A* search, orders delivery stops with simulated
//! annealing, and narrates the resulting run as turn-by-turn commands.
//! Higher-level consumers (the CLI) should only depend on the items exported
//! here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod command;
pub mod error;
pub mod geo;
pub mod graph;
pub mod mapdata;
pub mod optimizer;
pub mod output;
pub mod path;
pub mod planner;
pub mod requests;
pub mod routing;

pub use command::{CompassDirection, DeliveryCommand, Manoeuvre, TurnDirection};
pub use error::{Error, Result};
pub use geo::{bearing, crow_distance, turn_angle, Coordinate};
pub use graph::{GeoGraph, RawSegment, Segment, StreetRecord};
pub use mapdata::{load_street_map, parse_street_records};
pub use optimizer::{AcceptedMove, AnnealingConfig, MoveKind, TourOptimization, TourOptimizer};
pub use output::{PlanSummary, RenderMode, RouteStep, RouteSummary};
pub use path::{find_route_a_star, find_route_dijkstra, Route};
pub use planner::{synthesize_commands, DeliveryPlan, DeliveryPlanner};
pub use requests::{load_delivery_list, parse_delivery_list, DeliveryManifest, DeliveryRequest};
pub use routing::{PointToPointRouter, RouteAlgorithm};
