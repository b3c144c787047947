//! Output formatting - terminal styling for the triage report
//!
//! Colour is used only on a terminal, never when NO_COLOR is set or
//! `--no-color` is given. Everything else is plain ASCII.

use owo_colors::OwoColorize;
use std::io::IsTerminal;

use triage_common::Painter;

/// Colour decision from flag, environment and stdout
pub fn use_color(no_color_flag: bool) -> bool {
    if no_color_flag || std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return false;
    }
    std::io::stdout().is_terminal()
}

/// Colours for report headings, categories and file names
pub struct ColorPainter;

impl Painter for ColorPainter {
    fn title(&self, text: &str) -> String {
        text.bold().to_string()
    }

    fn heading(&self, text: &str) -> String {
        text.cyan().bold().to_string()
    }

    fn category(&self, text: &str) -> String {
        text.yellow().to_string()
    }

    fn file(&self, text: &str) -> String {
        text.bright_white().to_string()
    }

    fn rule(&self, text: &str) -> String {
        text.dimmed().to_string()
    }
}

/// Painter for the current terminal
pub fn painter(color: bool) -> Box<dyn Painter> {
    if color {
        Box::new(ColorPainter)
    } else {
        Box::new(triage_common::Plain)
    }
}

/// Display an error on stderr
pub fn display_error(message: &str, color: bool) {
    if color {
        eprintln!("[ERROR] {}", message.red());
    } else {
        eprintln!("[ERROR] {}", message);
    }
}

/// `{"error": kind, "message": ...}` for `--json` runs
pub fn json_error(kind: &str, message: &str) -> String {
    serde_json::json!({ "error": kind, "message": message }).to_string()
}

/// Display an error on stderr as one JSON line
pub fn display_json_error(kind: &str, message: &str) {
    eprintln!("{}", json_error(kind, message));
}
