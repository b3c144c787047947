//! triagectl library - CLI plumbing, exposed for integration tests

pub mod cli;
pub mod errors;
pub mod logging;
pub mod output;

use anyhow::{Context, Result};
use std::io::Write;
use tracing::debug;

use cli::Cli;
use triage_common::config::limit;
use triage_common::{analyze, render_json, render_text, LogSource, TriageConfig, TriageError};

/// Preset or config file, then command-line overrides.
pub fn resolve_config(cli: &Cli) -> std::result::Result<TriageConfig, TriageError> {
    let mut config = match &cli.config {
        Some(path) => TriageConfig::load(path)?,
        None => TriageConfig::from_preset(cli.preset.unwrap_or_default()),
    };

    if cli.all {
        config.report.max_per_file = None;
    }
    if let Some(n) = cli.per_file {
        config.report.max_per_file = limit(n);
    }
    if let Some(width) = cli.width {
        config.report.message_width = usize::from(width);
    }
    if let Some(n) = cli.top {
        config.report.top_files = limit(n);
    }

    config.validate()?;
    Ok(config)
}

pub fn log_source(cli: &Cli) -> LogSource {
    if cli.sample {
        LogSource::Embedded
    } else {
        LogSource::from_arg(&cli.log)
    }
}

/// Read, analyze and print one report to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W, color: bool) -> Result<()> {
    let config = resolve_config(cli)?;
    let source = log_source(cli);
    debug!(source = %source.describe(), preset = %config.preset, "starting triage");

    let text = source.read()?;
    let analysis = analyze(&text, &config.rules);
    let summary = analysis.summary(&config.report);

    if cli.json {
        let json = render_json(&summary).context("serializing report")?;
        writeln!(out, "{}", json).context("writing report")?;
    } else {
        let mut rendered = String::new();
        render_text(
            &mut rendered,
            &summary,
            &config.report,
            output::painter(color).as_ref(),
        )?;
        out.write_all(rendered.as_bytes()).context("writing report")?;
    }
    out.flush().context("writing report")?;
    Ok(())
}
