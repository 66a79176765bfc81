//! Multi-stop delivery planning.
//!
//! The planner orders the stops, routes every leg of
//! `depot, stop_1 .. stop_N, depot`, joins the legs into one path and then
//! narrates that path as [`DeliveryCommand`]s.

use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};

use crate::command::{CompassDirection, DeliveryCommand, Manoeuvre};
use crate::error::{Error, Result};
use crate::geo::{turn_angle, Coordinate};
use crate::graph::{GeoGraph, Segment};
use crate::optimizer::{AnnealingConfig, TourOptimization, TourOptimizer};
use crate::path::Route;
use crate::requests::DeliveryRequest;
use crate::routing::{PointToPointRouter, RouteAlgorithm};

/// Result of planning a delivery run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryPlan {
    pub depot: Coordinate,
    pub commands: Vec<DeliveryCommand>,
    /// Road miles over every leg.
    pub total_distance: f64,
    /// Stops in the order they are visited.
    pub stop_order: Vec<DeliveryRequest>,
    /// All legs joined into one path.
    pub route: Route,
    pub leg_distances: Vec<f64>,
    pub optimization: TourOptimization,
}

/// Plans delivery runs over a street graph.
#[derive(Debug, Clone, Copy)]
pub struct DeliveryPlanner<'a> {
    router: PointToPointRouter<'a>,
    optimizer: TourOptimizer,
}

impl<'a> DeliveryPlanner<'a> {
    pub fn new(graph: &'a GeoGraph) -> Self {
        Self {
            router: PointToPointRouter::new(graph),
            optimizer: TourOptimizer::default(),
        }
    }

    pub fn with_annealing(mut self, config: AnnealingConfig) -> Self {
        self.optimizer = TourOptimizer::new(config);
        self
    }

    pub fn with_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        self.router = self.router.with_algorithm(algorithm);
        self
    }

    /// Plan a run from `depot` through every stop and back.
    ///
    /// The first leg that cannot be routed aborts the plan with its error.
    pub fn plan<R>(
        &self,
        depot: &Coordinate,
        stops: &[DeliveryRequest],
        rng: &mut R,
    ) -> Result<DeliveryPlan>
    where
        R: Rng + ?Sized,
    {
        if !self.router.graph().contains(depot) {
            return Err(Error::BadCoordinate {
                coordinate: depot.to_string(),
            });
        }

        let optimization = self.optimizer.optimize(depot, stops, rng);
        let stop_order = optimization.stops.clone();

        let legs = if stop_order.is_empty() {
            Vec::new()
        } else {
            let waypoints: Vec<&Coordinate> = std::iter::once(depot)
                .chain(stop_order.iter().map(|stop| &stop.location))
                .chain(std::iter::once(depot))
                .collect();
            waypoints
                .windows(2)
                .map(|pair| self.router.route(pair[0], pair[1]))
                .collect::<Result<Vec<_>>>()?
        };

        let leg_distances: Vec<f64> = legs.iter().map(|leg| leg.distance).collect();
        let route = Route::concat(legs);
        let commands = synthesize_commands(depot, &route.segments, &stop_order);

        info!(
            stops = stop_order.len(),
            legs = leg_distances.len(),
            commands = commands.len(),
            miles = route.distance,
            "delivery plan ready"
        );

        Ok(DeliveryPlan {
            depot: depot.clone(),
            commands,
            total_distance: route.distance,
            stop_order,
            route,
            leg_distances,
            optimization,
        })
    }
}

/// Narrate a path as driving commands, delivering `stops` in order whenever
/// the path reaches the next stop's location.
pub fn synthesize_commands(
    depot: &Coordinate,
    segments: &[Segment],
    stops: &[DeliveryRequest],
) -> Vec<DeliveryCommand> {
    let mut narrator = Narrator::new(stops);
    narrator.deliver_at(depot);

    // `None` right after departure or a delivery: the next segment starts a
    // fresh Proceed instead of being compared with the previous one.
    let mut previous: Option<&Segment> = None;
    for segment in segments {
        match previous {
            None => narrator.open(segment),
            Some(prev) => {
                let angle = turn_angle(prev.bearing(), segment.bearing());
                match Manoeuvre::from_turn_angle(angle) {
                    Manoeuvre::Turn(direction) if segment.street != prev.street => {
                        narrator.close();
                        narrator
                            .commands
                            .push(DeliveryCommand::turn(direction, segment.street.clone()));
                        narrator.open(segment);
                    }
                    Manoeuvre::Turn(_) | Manoeuvre::Continue => narrator.continue_on(segment),
                }
            }
        }

        previous = if narrator.deliver_at(&segment.end) {
            None
        } else {
            Some(segment)
        };
    }
    narrator.close();

    if narrator.next_stop < stops.len() {
        warn!(
            undelivered = stops.len() - narrator.next_stop,
            "path ended before every stop was reached"
        );
    }

    narrator.commands
}

struct OpenProceed {
    direction: CompassDirection,
    street: String,
    distance: f64,
}

struct Narrator<'s> {
    stops: &'s [DeliveryRequest],
    next_stop: usize,
    open: Option<OpenProceed>,
    commands: Vec<DeliveryCommand>,
}

impl<'s> Narrator<'s> {
    fn new(stops: &'s [DeliveryRequest]) -> Self {
        Self {
            stops,
            next_stop: 0,
            open: None,
            commands: Vec::new(),
        }
    }

    /// Emit a Deliver for every pending stop at `coordinate`, in order.
    fn deliver_at(&mut self, coordinate: &Coordinate) -> bool {
        let mut delivered = false;
        while let Some(stop) = self.stops.get(self.next_stop) {
            if stop.location != *coordinate {
                break;
            }
            self.close();
            self.commands.push(DeliveryCommand::deliver(stop.item.clone()));
            self.next_stop += 1;
            delivered = true;
        }
        delivered
    }

    fn open(&mut self, segment: &Segment) {
        self.close();
        self.open = Some(OpenProceed {
            direction: CompassDirection::from_bearing(segment.bearing()),
            street: segment.street.clone(),
            distance: segment.length(),
        });
    }

    fn continue_on(&mut self, segment: &Segment) {
        match self.open.as_mut() {
            Some(proceed) if proceed.street == segment.street => {
                proceed.distance += segment.length();
            }
            _ => self.open(segment),
        }
    }

    fn close(&mut self) {
        if let Some(proceed) = self.open.take() {
            self.commands.push(DeliveryCommand::proceed(
                proceed.direction,
                proceed.street,
                proceed.distance,
            ));
        }
    }
}
