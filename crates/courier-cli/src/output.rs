//! Output formatting for plans and routes.
//!
//! Text and rich renderings come from the library summaries; JSON is the
//! serialised summary itself.

use std::io::{self, Write};

use clap::ValueEnum;
use courier_lib::{PlanSummary, RenderMode, RouteSummary};
use serde::Serialize;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain turn-by-turn text.
    #[default]
    Text,
    /// Markdown-flavoured text.
    Rich,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    fn render_mode(self) -> Option<RenderMode> {
        match self {
            OutputFormat::Text => Some(RenderMode::PlainText),
            OutputFormat::Rich => Some(RenderMode::RichText),
            OutputFormat::Json => None,
        }
    }
}

/// Write a plan summary in the requested format.
pub fn write_plan<W: Write>(out: &mut W, summary: &PlanSummary, format: OutputFormat) -> io::Result<()> {
    match format.render_mode() {
        Some(mode) => out.write_all(summary.render(mode).as_bytes()),
        None => write_json(out, summary),
    }
}

/// Write a route summary in the requested format.
pub fn write_route<W: Write>(
    out: &mut W,
    summary: &RouteSummary,
    format: OutputFormat,
) -> io::Result<()> {
    match format.render_mode() {
        Some(mode) => out.write_all(summary.render(mode).as_bytes()),
        None => write_json(out, summary),
    }
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::other)?;
    out.write_all(b"\n")
}
