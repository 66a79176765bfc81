//! Delivery order optimisation by simulated annealing.
//!
//! The tour is the closed sequence `depot, stop_1 .. stop_N, depot` and its
//! cost is the sum of crow distances between consecutive entries, standing in
//! for road distance when comparing orderings.
//!
//! Each epoch proposes up to `epochs * (N + 2)` moves at a fixed temperature,
//! stopping early once as many moves have been accepted. A move picks a span
//! of interior stops and either reverses it in place (2-opt) or cuts it out
//! and reinserts it elsewhere as a block (or-opt). Improving moves are always
//! taken; worsening moves pass the Metropolis test `u < exp(-delta / T)`.
//! The temperature is multiplied by the cooling rate after every epoch.

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::geo::{crow_distance, Coordinate};
use crate::requests::DeliveryRequest;

/// Share of tour positions a proposed span must leave untouched.
const MIN_EXCLUDED_SHARE: f64 = 0.2;

/// Annealing schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnealingConfig {
    /// Number of temperature levels. Zero keeps the input order.
    pub epochs: usize,
    pub initial_temperature: f64,
    /// Factor applied to the temperature after each epoch.
    pub cooling_rate: f64,
    /// Whether worsening moves may be accepted at all. Disabling this turns
    /// the search into a randomised descent.
    pub accept_worse: bool,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            epochs: 100,
            initial_temperature: 0.5,
            cooling_rate: 0.9,
            accept_worse: true,
        }
    }
}

/// How a proposal rearranged the tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    Reverse,
    Relocate,
}

/// Notification sent to observers for every accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AcceptedMove {
    pub epoch: usize,
    pub kind: MoveKind,
    /// Tour length after the move.
    pub tour_distance: f64,
    /// Whether the move made the tour longer.
    pub uphill: bool,
}

/// Reordered stops and the crow-distance tour lengths before and after.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TourOptimization {
    pub stops: Vec<DeliveryRequest>,
    pub initial_distance: f64,
    pub final_distance: f64,
    pub accepted_moves: usize,
}

/// Orders delivery stops to shorten the straight-line tour from and back to
/// the depot.
#[derive(Debug, Clone, Copy, Default)]
pub struct TourOptimizer {
    config: AnnealingConfig,
}

impl TourOptimizer {
    pub fn new(config: AnnealingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnnealingConfig {
        &self.config
    }

    /// Reorder `stops` starting and ending at `depot`.
    ///
    /// With fewer than two stops the input order is returned unchanged.
    pub fn optimize<R>(
        &self,
        depot: &Coordinate,
        stops: &[DeliveryRequest],
        rng: &mut R,
    ) -> TourOptimization
    where
        R: Rng + ?Sized,
    {
        self.optimize_observed(depot, stops, rng, |_| {})
    }

    /// Like [`TourOptimizer::optimize`], calling `observer` after every
    /// accepted move.
    pub fn optimize_observed<R, F>(
        &self,
        depot: &Coordinate,
        stops: &[DeliveryRequest],
        rng: &mut R,
        mut observer: F,
    ) -> TourOptimization
    where
        R: Rng + ?Sized,
        F: FnMut(&AcceptedMove),
    {
        let matrix = CrowMatrix::new(depot, stops);
        let n = stops.len();
        // Positions 0 and n + 1 are the depot (matrix index 0).
        let mut tour: Vec<usize> = std::iter::once(0)
            .chain(1..=n)
            .chain(std::iter::once(0))
            .collect();
        let initial_distance = matrix.tour_length(&tour);
        let mut accepted_moves = 0;

        if n > 1 {
            let num_stops = n + 2;
            let max_attempts = self.config.epochs * num_stops;
            let max_accepted = max_attempts;
            let mut current_distance = initial_distance;
            let mut temperature = self.config.initial_temperature;

            for epoch in 0..self.config.epochs {
                let mut accepted = 0;
                for _ in 0..max_attempts {
                    let (start, end) = choose_span(n, rng);
                    let kind = if rng.gen_bool(0.5) {
                        MoveKind::Reverse
                    } else {
                        MoveKind::Relocate
                    };
                    let candidate = match kind {
                        MoveKind::Reverse => reverse_span(&tour, start, end),
                        MoveKind::Relocate => relocate_span(&tour, start, end, rng),
                    };

                    let candidate_distance = matrix.tour_length(&candidate);
                    let delta = candidate_distance - current_distance;
                    let take = if delta < 0.0 {
                        true
                    } else if delta > 0.0 && self.config.accept_worse {
                        rng.gen::<f64>() < (-delta / temperature).exp()
                    } else {
                        false
                    };

                    if take {
                        tour = candidate;
                        current_distance = candidate_distance;
                        accepted += 1;
                        observer(&AcceptedMove {
                            epoch,
                            kind,
                            tour_distance: current_distance,
                            uphill: delta > 0.0,
                        });
                        if accepted >= max_accepted {
                            break;
                        }
                    }
                }
                accepted_moves += accepted;
                temperature *= self.config.cooling_rate;
            }
        }

        let final_distance = matrix.tour_length(&tour);
        let ordered = tour[1..=n]
            .iter()
            .map(|&index| stops[index - 1].clone())
            .collect();

        debug!(
            stops = n,
            initial_miles = initial_distance,
            final_miles = final_distance,
            accepted_moves,
            "optimized delivery order"
        );

        TourOptimization {
            stops: ordered,
            initial_distance,
            final_distance,
            accepted_moves,
        }
    }
}

/// Pick tour positions `start < end` within the interior `1..=n` such that
/// the span leaves at least a fifth of all positions outside it.
fn choose_span<R>(n: usize, rng: &mut R) -> (usize, usize)
where
    R: Rng + ?Sized,
{
    let num_stops = n + 2;
    loop {
        let mut start = rng.gen_range(1..=n);
        let mut end = rng.gen_range(1..=n);
        if start > end {
            std::mem::swap(&mut start, &mut end);
        }
        let excluded = num_stops - (end - start) - 1;
        if start != end && excluded as f64 >= MIN_EXCLUDED_SHARE * num_stops as f64 {
            return (start, end);
        }
    }
}

fn reverse_span(tour: &[usize], start: usize, end: usize) -> Vec<usize> {
    let mut candidate = tour.to_vec();
    candidate[start..=end].reverse();
    candidate
}

/// Cut `start..=end` out and reinsert it, in order, before a random interior
/// position of the shortened tour.
fn relocate_span<R>(tour: &[usize], start: usize, end: usize, rng: &mut R) -> Vec<usize>
where
    R: Rng + ?Sized,
{
    let mut candidate = tour.to_vec();
    let block: Vec<usize> = candidate.drain(start..=end).collect();
    // Any slot from just after the leading depot up to the closing depot.
    let position = rng.gen_range(1..candidate.len());
    candidate.splice(position..position, block);
    candidate
}

/// Crow distances between the depot (index 0) and every stop.
#[derive(Debug, Clone)]
struct CrowMatrix {
    data: Vec<f64>,
    size: usize,
}

impl CrowMatrix {
    fn new(depot: &Coordinate, stops: &[DeliveryRequest]) -> Self {
        let locations: Vec<&Coordinate> = std::iter::once(depot)
            .chain(stops.iter().map(|stop| &stop.location))
            .collect();
        let size = locations.len();
        let mut data = vec![0.0; size * size];
        for i in 0..size {
            for j in (i + 1)..size {
                let d = crow_distance(locations[i], locations[j]);
                data[i * size + j] = d;
                data[j * size + i] = d;
            }
        }
        Self { data, size }
    }

    fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    fn tour_length(&self, tour: &[usize]) -> f64 {
        tour.windows(2).map(|pair| self.get(pair[0], pair[1])).sum()
    }
}
