//! CLI - Command-line argument parsing
//!
//! Keeps argument parsing separate from execution logic.

use clap::Parser;
use std::path::PathBuf;

use triage_common::{Preset, DEFAULT_LOG_FILE};

/// Summarize Maven/javac compilation errors by root cause
#[derive(Parser, Debug)]
#[command(name = "triagectl")]
#[command(about = "Categorize Java compiler errors from a Maven log", long_about = None)]
#[command(version = env!("TRIAGE_VERSION"))]
pub struct Cli {
    /// Compiler log to analyze ("-" reads stdin)
    #[arg(value_name = "LOG", default_value = DEFAULT_LOG_FILE)]
    pub log: PathBuf,

    /// Analyze the built-in sample log instead of LOG
    #[arg(long, conflicts_with = "log")]
    pub sample: bool,

    /// Rule and layout preset: full, compact or detailed
    #[arg(long, value_name = "NAME", conflicts_with = "config")]
    pub preset: Option<Preset>,

    /// TOML configuration file (rules, layout, notes)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show every record per file
    #[arg(long, conflicts_with = "per_file")]
    pub all: bool,

    /// Records shown per file (0 = all)
    #[arg(long, value_name = "N")]
    pub per_file: Option<usize>,

    /// Characters of each message to show
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub width: Option<u16>,

    /// Length of the most affected files ranking (0 = all)
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["triagectl"]).unwrap();
        assert_eq!(cli.log, PathBuf::from(DEFAULT_LOG_FILE));
        assert!(!cli.sample);
        assert!(cli.preset.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_preset_and_limits() {
        let cli = Cli::try_parse_from([
            "triagectl",
            "build.log",
            "--preset",
            "detailed",
            "--width",
            "120",
            "--top",
            "0",
        ])
        .unwrap();
        assert_eq!(cli.log, PathBuf::from("build.log"));
        assert_eq!(cli.preset, Some(Preset::Detailed));
        assert_eq!(cli.width, Some(120));
        assert_eq!(cli.top, Some(0));
    }

    #[test]
    fn test_bad_preset_rejected() {
        assert!(Cli::try_parse_from(["triagectl", "--preset", "loud"]).is_err());
    }

    #[test]
    fn test_zero_width_rejected() {
        assert!(Cli::try_parse_from(["triagectl", "--width", "0"]).is_err());
    }

    #[test]
    fn test_preset_conflicts_with_config() {
        assert!(
            Cli::try_parse_from(["triagectl", "--preset", "full", "--config", "t.toml"]).is_err()
        );
    }

    #[test]
    fn test_all_conflicts_with_per_file() {
        assert!(Cli::try_parse_from(["triagectl", "--all", "--per-file", "3"]).is_err());
    }
}
