use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use courier_cli::commands::plan::{handle_plan, PlanCommandArgs};
use courier_cli::commands::route::{handle_route, RouteCommandArgs};
use courier_cli::output::OutputFormat;
use courier_cli::GlobalOptions;
use courier_lib::{Coordinate, RouteAlgorithm};

#[derive(Parser, Debug)]
#[command(author, version, about = "Street routing and delivery planning")]
struct Cli {
    /// Street map file. Falls back to the COURIER_MAP environment variable.
    #[arg(long, global = true)]
    map: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Order a delivery list and print turn-by-turn commands.
    Plan {
        /// Delivery list: depot line, then one `lat lon:item` line per delivery.
        #[arg(long)]
        deliveries: PathBuf,
        /// Seed for reproducible ordering.
        #[arg(long)]
        seed: Option<u64>,
        /// Annealing epochs; 0 keeps the list order.
        #[arg(long, default_value_t = 100)]
        epochs: usize,
        /// Initial annealing temperature.
        #[arg(long, default_value_t = 0.5)]
        temperature: f64,
        /// Temperature multiplier applied after each epoch.
        #[arg(long, default_value_t = 0.9)]
        cooling_rate: f64,
        /// Street routing algorithm.
        #[arg(long, default_value = "a-star")]
        algorithm: RouteAlgorithm,
    },
    /// Compute a route between two coordinates.
    Route {
        /// Start coordinate, "lat lon".
        #[arg(long = "from", allow_hyphen_values = true)]
        from: Coordinate,
        /// Destination coordinate, "lat lon".
        #[arg(long = "to", allow_hyphen_values = true)]
        to: Coordinate,
        /// Street routing algorithm.
        #[arg(long, default_value = "a-star")]
        algorithm: RouteAlgorithm,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let options = GlobalOptions {
        map: cli.map,
        format: cli.format,
    };

    match cli.command {
        Command::Plan {
            deliveries,
            seed,
            epochs,
            temperature,
            cooling_rate,
            algorithm,
        } => handle_plan(
            &options,
            &PlanCommandArgs {
                deliveries,
                seed,
                epochs,
                temperature,
                cooling_rate,
                algorithm,
            },
        ),
        Command::Route {
            from,
            to,
            algorithm,
        } => handle_route(&options, &RouteCommandArgs { from, to, algorithm }),
    }
}

/// Logs go to stderr so stdout stays parseable.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
