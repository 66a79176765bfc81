//! Plan command handler: order deliveries and narrate the run.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use courier_lib::{
    load_delivery_list, AnnealingConfig, DeliveryPlanner, PlanSummary, RouteAlgorithm,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::output::write_plan;
use crate::GlobalOptions;

/// Arguments for the plan command.
#[derive(Debug, Clone)]
pub struct PlanCommandArgs {
    /// Delivery list file.
    pub deliveries: PathBuf,
    /// Seed for the optimizer; entropy when absent.
    pub seed: Option<u64>,
    pub epochs: usize,
    pub temperature: f64,
    pub cooling_rate: f64,
    pub algorithm: RouteAlgorithm,
}

impl PlanCommandArgs {
    pub fn annealing(&self) -> AnnealingConfig {
        AnnealingConfig {
            epochs: self.epochs,
            initial_temperature: self.temperature,
            cooling_rate: self.cooling_rate,
            ..AnnealingConfig::default()
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

pub fn handle_plan(options: &GlobalOptions, args: &PlanCommandArgs) -> Result<()> {
    let graph = options.load_graph()?;
    let manifest = load_delivery_list(&args.deliveries).with_context(|| {
        format!(
            "failed to load delivery list from {}",
            args.deliveries.display()
        )
    })?;
    info!(
        deliveries = manifest.requests.len(),
        depot = %manifest.depot,
        "planning deliveries"
    );

    let planner = DeliveryPlanner::new(&graph)
        .with_annealing(args.annealing())
        .with_algorithm(args.algorithm);
    let plan = planner
        .plan(&manifest.depot, &manifest.requests, &mut args.rng())
        .context("failed to plan deliveries")?;

    let summary = PlanSummary::from_plan(&plan);
    let mut stdout = io::stdout().lock();
    write_plan(&mut stdout, &summary, options.format).context("failed to write plan")?;
    Ok(())
}
