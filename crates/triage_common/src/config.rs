//! Triage configuration - rule list and report layout.
//!
//! A configuration starts from a named preset and may be adjusted by a TOML
//! file:
//!
//! ```toml
//! preset = "compact"
//!
//! [report]
//! message_width = 120
//! max_per_file = 0      # 0 = show every record
//! top_files = 10        # 0 = rank every file
//! notes = ["UUID/String conversions dominate - fix the DTO ids first"]
//!
//! [[rules]]
//! category = "Method_not_found"
//! contains = ["cannot find symbol", "method"]
//! ```
//!
//! A `rules` array replaces the preset's rules entirely; report keys override
//! one by one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::categorizer::{CategoryRule, RuleSet};
use crate::error::{Result, TriageError};

pub const DEFAULT_TITLE: &str = "COMPILATION ERROR ANALYSIS";

/// Named bundle of rules and report layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Every rule, two records per file, top 10 files
    #[default]
    Full,
    /// Per-file sampling: two records per file, 80 columns, top 10 files
    Compact,
    /// Exhaustive listing: every record, 100 columns, every file
    Detailed,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Full => "full",
            Preset::Compact => "compact",
            Preset::Detailed => "detailed",
        }
    }

    pub fn rules(&self) -> RuleSet {
        match self {
            Preset::Full => RuleSet::full(),
            Preset::Compact => RuleSet::compact(),
            Preset::Detailed => RuleSet::detailed(),
        }
    }

    pub fn report(&self) -> ReportSettings {
        match self {
            Preset::Full | Preset::Compact => ReportSettings::default(),
            Preset::Detailed => ReportSettings {
                max_per_file: None,
                message_width: 100,
                top_files: None,
                ..ReportSettings::default()
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(Preset::Full),
            "compact" => Ok(Preset::Compact),
            "detailed" => Ok(Preset::Detailed),
            other => Err(format!(
                "unknown preset '{}' (expected full, compact or detailed)",
                other
            )),
        }
    }
}

/// Report layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSettings {
    /// Banner title
    pub title: String,
    /// Records listed per file group; `None` lists all
    pub max_per_file: Option<usize>,
    /// Characters of each message shown before the ellipsis
    pub message_width: usize,
    /// Length of the most-affected-files ranking; `None` ranks all
    pub top_files: Option<usize>,
    /// Free-text guidance printed at the end of the report
    pub notes: Vec<String>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            max_per_file: Some(2),
            message_width: 80,
            top_files: Some(10),
            notes: Vec::new(),
        }
    }
}

impl ReportSettings {
    /// Width of the `=`/`-` rules around sections
    pub fn rule_width(&self) -> usize {
        self.message_width
    }
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TriageConfig {
    pub preset: Preset,
    pub rules: RuleSet,
    pub report: ReportSettings,
}

/// On-disk shape; every key optional
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    preset: Option<Preset>,
    #[serde(default)]
    report: ReportOverrides,
    rules: Option<Vec<CategoryRule>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReportOverrides {
    title: Option<String>,
    max_per_file: Option<usize>,
    message_width: Option<usize>,
    top_files: Option<usize>,
    notes: Option<Vec<String>>,
}

/// 0 in files and on the command line means "no limit"
pub fn limit(value: usize) -> Option<usize> {
    (value > 0).then_some(value)
}

impl TriageConfig {
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            preset,
            rules: preset.rules(),
            report: preset.report(),
        }
    }

    /// Load a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| TriageError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(
            path = %path.display(),
            preset = %config.preset,
            rules = config.rules.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(text)?;
        let mut config = Self::from_preset(file.preset.unwrap_or_default());

        if let Some(rules) = file.rules {
            config.rules = RuleSet::new(rules);
        }

        let o = file.report;
        if let Some(title) = o.title {
            config.report.title = title;
        }
        if let Some(n) = o.max_per_file {
            config.report.max_per_file = limit(n);
        }
        if let Some(width) = o.message_width {
            config.report.message_width = width;
        }
        if let Some(n) = o.top_files {
            config.report.top_files = limit(n);
        }
        if let Some(notes) = o.notes {
            config.report.notes = notes;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject rules that could never match and unusable widths.
    pub fn validate(&self) -> Result<()> {
        for (idx, rule) in self.rules.rules().iter().enumerate() {
            if rule.contains.is_empty() || rule.contains.iter().any(|s| s.is_empty()) {
                return Err(TriageError::Config(format!(
                    "rule {} ({}) needs at least one non-empty 'contains' substring",
                    idx + 1,
                    rule.category
                )));
            }
        }
        if self.report.message_width == 0 {
            return Err(TriageError::Config(
                "report.message_width must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
