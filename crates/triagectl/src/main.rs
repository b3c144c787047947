//! triagectl - Maven compile error triage
//!
//! Reads a compiler log, buckets each error by root cause and prints a
//! summary report.

use clap::Parser;
use tracing::debug;

use triagectl::cli::Cli;
use triagectl::errors::{error_kind, exit_code_for};
use triagectl::{logging, output};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let color = output::use_color(cli.no_color);
    let mut stdout = std::io::stdout().lock();

    if let Err(err) = triagectl::run(&cli, &mut stdout, color) {
        drop(stdout);
        let kind = error_kind(&err);
        let code = exit_code_for(&err);
        debug!(kind, exit_code = code, "triage failed");

        let message = format!("{:#}", err);
        if cli.json {
            output::display_json_error(kind, &message);
        } else {
            output::display_error(&message, color);
        }
        std::process::exit(code);
    }
}
