//! compile-triage common library
//!
//! Turns Maven/javac error output into a categorized report:
//! reader -> extractor -> categorizer -> report.

pub mod categorizer;
pub mod config;
pub mod error;
pub mod extractor;
pub mod reader;
pub mod record;
pub mod report;

pub use categorizer::{categorize, Categorized, Category, CategoryRule, RuleSet};
pub use config::{Preset, ReportSettings, TriageConfig};
pub use error::{Result, TriageError};
pub use extractor::{extract, Extraction, MismatchReason, ParseMismatch};
pub use reader::{LogSource, DEFAULT_LOG_FILE, SAMPLE_LOG};
pub use record::ErrorRecord;
pub use report::{render_json, render_text, summarize, Painter, Plain, Summary};

use tracing::info;

/// Extracted and categorized diagnostics of one log
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub extraction: Extraction,
    pub categorized: Categorized,
}

impl Analysis {
    pub fn summary<'a>(&'a self, settings: &'a ReportSettings) -> Summary<'a> {
        summarize(&self.extraction, &self.categorized, settings)
    }
}

/// Parse and categorize raw compiler output.
pub fn analyze(text: &str, rules: &RuleSet) -> Analysis {
    let extraction = extract(text);
    let categorized = categorize(&extraction.records, rules);
    info!(
        errors = extraction.len(),
        skipped = extraction.skipped.len(),
        "analyzed compiler log"
    );
    Analysis {
        extraction,
        categorized,
    }
}
