//! Route command handler for a single point-to-point route.

use std::io;

use anyhow::{Context, Result};
use courier_lib::{Coordinate, PointToPointRouter, RouteAlgorithm, RouteSummary};

use crate::output::write_route;
use crate::GlobalOptions;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    pub from: Coordinate,
    pub to: Coordinate,
    pub algorithm: RouteAlgorithm,
}

pub fn handle_route(options: &GlobalOptions, args: &RouteCommandArgs) -> Result<()> {
    let graph = options.load_graph()?;
    let router = PointToPointRouter::new(&graph).with_algorithm(args.algorithm);
    let route = router
        .route(&args.from, &args.to)
        .with_context(|| format!("failed to route from {} to {}", args.from, args.to))?;

    let summary = RouteSummary::from_route(args.algorithm, &args.from, &args.to, &route);
    let mut stdout = io::stdout().lock();
    write_route(&mut stdout, &summary, options.format).context("failed to write route")?;
    Ok(())
}
