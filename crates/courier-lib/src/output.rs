use std::fmt::Write;

use serde::Serialize;

use crate::command::DeliveryCommand;
use crate::geo::Coordinate;
use crate::path::Route;
use crate::planner::DeliveryPlan;
use crate::requests::DeliveryRequest;
use crate::routing::RouteAlgorithm;

/// Presentation style for turning a summary into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    PlainText,
    RichText,
}

/// Serialisable view of a [`DeliveryPlan`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlanSummary {
    pub depot: Coordinate,
    pub deliveries: Vec<DeliveryRequest>,
    pub commands: Vec<DeliveryCommand>,
    pub total_miles: f64,
    pub crow_miles_before: f64,
    pub crow_miles_after: f64,
}

impl PlanSummary {
    pub fn from_plan(plan: &DeliveryPlan) -> Self {
        Self {
            depot: plan.depot.clone(),
            deliveries: plan.stop_order.clone(),
            commands: plan.commands.clone(),
            total_miles: plan.total_distance,
            crow_miles_before: plan.optimization.initial_distance,
            crow_miles_after: plan.optimization.final_distance,
        }
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RenderMode) -> String {
        match mode {
            RenderMode::PlainText => self.render_plain(),
            RenderMode::RichText => self.render_rich(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "Starting at the depot...");
        for command in &self.commands {
            let _ = writeln!(buffer, "{command}");
        }
        let _ = writeln!(
            buffer,
            "You are back at the depot and your deliveries are done!"
        );
        let _ = writeln!(
            buffer,
            "{:.2} miles travelled for all deliveries.",
            self.total_miles
        );
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Delivery plan** from `{}` ({} stops, {:.2} miles)",
            self.depot,
            self.deliveries.len(),
            self.total_miles
        );
        for (index, command) in self.commands.iter().enumerate() {
            let _ = writeln!(buffer, "{:>3}. {command}", index + 1);
        }
        let _ = writeln!(
            buffer,
            "_Crow distance {:.2} → {:.2} miles after reordering._",
            self.crow_miles_before, self.crow_miles_after
        );
        buffer
    }
}

/// Segment of a point-to-point route as shown to users.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub street: String,
    pub from: Coordinate,
    pub to: Coordinate,
    pub miles: f64,
}

/// Serialisable view of a single [`Route`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub algorithm: RouteAlgorithm,
    pub start: Coordinate,
    pub end: Coordinate,
    pub steps: Vec<RouteStep>,
    pub total_miles: f64,
}

impl RouteSummary {
    pub fn from_route(
        algorithm: RouteAlgorithm,
        start: &Coordinate,
        end: &Coordinate,
        route: &Route,
    ) -> Self {
        let steps = route
            .segments
            .iter()
            .enumerate()
            .map(|(index, segment)| RouteStep {
                index: index + 1,
                street: segment.street.clone(),
                from: segment.start.clone(),
                to: segment.end.clone(),
                miles: segment.length(),
            })
            .collect();

        Self {
            algorithm,
            start: start.clone(),
            end: end.clone(),
            steps,
            total_miles: route.distance,
        }
    }

    pub fn render(&self, mode: RenderMode) -> String {
        let mut buffer = String::new();
        match mode {
            RenderMode::PlainText => {
                let _ = writeln!(
                    buffer,
                    "Route from {} to {} ({} segments; algorithm: {}):",
                    self.start,
                    self.end,
                    self.steps.len(),
                    self.algorithm
                );
                for step in &self.steps {
                    let _ = writeln!(
                        buffer,
                        "{:>3}: {} ({} -> {}, {:.3} miles)",
                        step.index, step.street, step.from, step.to, step.miles
                    );
                }
            }
            RenderMode::RichText => {
                let _ = writeln!(
                    buffer,
                    "**Route** `{}` → `{}` (algorithm: `{}`)",
                    self.start, self.end, self.algorithm
                );
                for step in &self.steps {
                    let _ = writeln!(
                        buffer,
                        "* {:>2}. **{}** ({:.3} miles)",
                        step.index, step.street, step.miles
                    );
                }
            }
        }
        let _ = writeln!(buffer, "Total distance: {:.2} miles", self.total_miles);
        buffer
    }
}
