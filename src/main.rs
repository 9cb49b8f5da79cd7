//! Chartify Notebook - gallery runner
//!
//! Runs every gallery cell in order, streams each output to stdout as an
//! nbformat `display_data` line and writes the collected outputs to
//! `gallery.ipynb`. Logs go to stderr.

use anyhow::{bail, Context};
use chartify_notebook::display::{JupyterSink, RecordingSink, Tee};
use chartify_notebook::gallery::{Cell, CellContext};
use chartify_notebook::notebook::NotebookReport;
use chartify_notebook::Config;
use std::io;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const REPORT_PATH: &str = "gallery.ipynb";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let ctx = CellContext::new(Config::default()).context("failed to build HTTP client")?;
    let stdout = io::stdout();
    let mut report = NotebookReport::new();
    let mut failed = Vec::new();

    for cell in Cell::ALL {
        let mut sink = Tee::new(JupyterSink::new(stdout.lock()), RecordingSink::new());
        match cell.run_into(&ctx, &mut sink) {
            Ok(()) => info!(cell = cell.name(), "displayed"),
            Err(err) => {
                error!(cell = cell.name(), error = %err, "cell failed");
                failed.push(cell.name());
            }
        }
        let (_, recorded) = sink.into_parts();
        report.push(cell.title(), cell.source(), recorded.into_bundles());
    }

    report
        .write_ipynb(Path::new(REPORT_PATH))
        .with_context(|| format!("failed to write {REPORT_PATH}"))?;

    if !failed.is_empty() {
        bail!("{} cell(s) failed: {}", failed.len(), failed.join(", "));
    }
    Ok(())
}
