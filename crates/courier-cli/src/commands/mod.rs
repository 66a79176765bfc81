// Each module handles one CLI subcommand; main.rs dispatches to these.

pub mod plan;
pub mod route;
