//! Courier CLI library.
//!
//! Command handlers and output formatting for the `courier` binary. The
//! binary only parses arguments and dispatches here.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use courier_lib::{load_street_map, GeoGraph};
use tracing::info;

pub mod commands;
pub mod output;

use output::OutputFormat;

/// Environment variable consulted when `--map` is not given.
pub const MAP_ENV_VAR: &str = "COURIER_MAP";

/// Options shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub map: Option<PathBuf>,
    pub format: OutputFormat,
}

impl GlobalOptions {
    /// Resolve the map path from the command line or the environment.
    pub fn map_path(&self) -> Result<PathBuf> {
        resolve_map_path(self.map.as_deref(), std::env::var_os(MAP_ENV_VAR))
    }

    /// Resolve and load the street map.
    pub fn load_graph(&self) -> Result<GeoGraph> {
        let path = self.map_path()?;
        let graph = load_street_map(&path)
            .with_context(|| format!("failed to load street map from {}", path.display()))?;
        info!(
            path = %path.display(),
            coordinates = graph.coordinate_count(),
            "street map ready"
        );
        Ok(graph)
    }
}

/// Pick the explicit path when present, otherwise the environment value.
pub fn resolve_map_path(explicit: Option<&Path>, env_value: Option<OsString>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    match env_value {
        Some(value) if !value.is_empty() => Ok(PathBuf::from(value)),
        _ => anyhow::bail!("no street map given; pass --map or set {MAP_ENV_VAR}"),
    }
}
