//! Triage report: per-category breakdown and most affected files.
//!
//! [`summarize`] turns categorized records into a [`Summary`]; the summary is
//! rendered either as console text ([`render_text`]) or as JSON
//! ([`render_json`]). Text rendering takes a [`Painter`] so the CLI can add
//! colour without this crate depending on a terminal library.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Write};

use crate::categorizer::{Categorized, Category};
use crate::config::ReportSettings;
use crate::extractor::Extraction;
use crate::record::ErrorRecord;

/// Ellipsis printed after every message preview
pub const ELLIPSIS: &str = "...";

/// Records of one file inside a category
#[derive(Debug, Clone, Serialize)]
pub struct FileGroup<'a> {
    pub file_name: &'a str,
    pub count: usize,
    pub records: Vec<&'a ErrorRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySection<'a> {
    pub category: Category,
    pub count: usize,
    /// Sorted by file name
    pub files: Vec<FileGroup<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileCount<'a> {
    pub file_name: &'a str,
    pub count: usize,
}

/// Everything the report shows, independent of output format
#[derive(Debug, Clone, Serialize)]
pub struct Summary<'a> {
    pub total: usize,
    pub skipped: usize,
    pub categories: Vec<CategorySection<'a>>,
    pub most_affected: Vec<FileCount<'a>>,
    pub notes: &'a [String],
}

/// Build the report contents. The total always comes from the extraction.
pub fn summarize<'a>(
    extraction: &'a Extraction,
    categorized: &'a Categorized,
    settings: &'a ReportSettings,
) -> Summary<'a> {
    let categories = categorized
        .iter()
        .map(|(category, records)| CategorySection {
            category,
            count: records.len(),
            files: group_by_file(records),
        })
        .collect();

    Summary {
        total: extraction.records.len(),
        skipped: extraction.skipped.len(),
        categories,
        most_affected: rank_files(&extraction.records, settings.top_files),
        notes: &settings.notes,
    }
}

fn group_by_file(records: &[ErrorRecord]) -> Vec<FileGroup<'_>> {
    let mut by_file: BTreeMap<&str, Vec<&ErrorRecord>> = BTreeMap::new();
    for record in records {
        by_file.entry(record.file_name.as_str()).or_default().push(record);
    }
    by_file
        .into_iter()
        .map(|(file_name, records)| FileGroup {
            file_name,
            count: records.len(),
            records,
        })
        .collect()
}

/// Files by descending error count; ties keep first-seen order.
pub fn rank_files(records: &[ErrorRecord], top: Option<usize>) -> Vec<FileCount<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut ranked: Vec<FileCount<'_>> = Vec::new();

    for record in records {
        let name = record.file_name.as_str();
        let i = *index.entry(name).or_insert_with(|| {
            ranked.push(FileCount {
                file_name: name,
                count: 0,
            });
            ranked.len() - 1
        });
        ranked[i].count += 1;
    }

    // sort_by is stable
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    if let Some(n) = top {
        ranked.truncate(n);
    }
    ranked
}

/// First `width` characters of `message` followed by the ellipsis.
pub fn preview(message: &str, width: usize) -> String {
    let mut out: String = message.chars().take(width).collect();
    out.push_str(ELLIPSIS);
    out
}

fn errors(n: usize) -> String {
    if n == 1 {
        "1 error".to_string()
    } else {
        format!("{} errors", n)
    }
}

/// Styling hooks for text output; defaults leave text untouched
pub trait Painter {
    fn title(&self, text: &str) -> String {
        text.to_string()
    }

    fn heading(&self, text: &str) -> String {
        text.to_string()
    }

    fn category(&self, text: &str) -> String {
        text.to_string()
    }

    fn file(&self, text: &str) -> String {
        text.to_string()
    }

    fn rule(&self, text: &str) -> String {
        text.to_string()
    }
}

/// No styling
pub struct Plain;

impl Painter for Plain {}

/// Render the console report.
pub fn render_text<W: Write>(
    out: &mut W,
    summary: &Summary<'_>,
    settings: &ReportSettings,
    painter: &dyn Painter,
) -> fmt::Result {
    let width = settings.rule_width();
    let heavy = painter.rule(&"=".repeat(width));
    let light = painter.rule(&"-".repeat(width));

    writeln!(out, "{}", painter.title(&settings.title))?;
    writeln!(out, "{}", heavy)?;
    writeln!(out, "Total errors found: {}", summary.total)?;
    writeln!(out)?;

    writeln!(out, "{}", painter.heading("ERROR CATEGORIES:"))?;
    writeln!(out, "{}", light)?;
    for section in &summary.categories {
        writeln!(out)?;
        writeln!(
            out,
            "{}: {}",
            painter.category(section.category.as_str()),
            errors(section.count)
        )?;
        for group in &section.files {
            writeln!(out, "  {}: {}", painter.file(group.file_name), errors(group.count))?;
            let shown = settings.max_per_file.unwrap_or(group.records.len());
            for record in group.records.iter().take(shown) {
                writeln!(
                    out,
                    "    Line {}: {}",
                    record.line,
                    preview(&record.message, settings.message_width)
                )?;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", heavy)?;
    writeln!(out, "{}", painter.heading("MOST AFFECTED FILES:"))?;
    writeln!(out, "{}", light)?;
    for file in &summary.most_affected {
        writeln!(out, "{}: {}", painter.file(file.file_name), errors(file.count))?;
    }

    if !summary.notes.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", heavy)?;
        writeln!(out, "{}", painter.heading("CRITICAL PATTERNS TO FIX:"))?;
        writeln!(out, "{}", light)?;
        for (i, note) in summary.notes.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, note)?;
        }
    }

    Ok(())
}

/// Plain-text report as a string.
pub fn to_text(summary: &Summary<'_>, settings: &ReportSettings) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = render_text(&mut out, summary, settings, &Plain);
    out
}

/// Pretty-printed JSON report.
pub fn render_json(summary: &Summary<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorizer::{categorize, RuleSet};
    use crate::extractor::extract;

    fn text_for(log: &str, settings: &ReportSettings) -> String {
        let ex = extract(log);
        let cats = categorize(&ex.records, &RuleSet::full());
        let summary = summarize(&ex, &cats, settings);
        to_text(&summary, settings)
    }

    fn rec(file: &str) -> ErrorRecord {
        ErrorRecord::new(file, 1, 1, "m").unwrap()
    }

    #[test]
    fn test_empty_report() {
        let text = text_for("", &ReportSettings::default());
        assert!(text.contains("Total errors found: 0"));
        assert!(text.contains("ERROR CATEGORIES:"));
        assert!(text.contains("MOST AFFECTED FILES:"));
        assert!(!text.contains("Line "));
        assert!(!text.contains(": 1 error"));
        assert!(!text.contains("CRITICAL PATTERNS"));
    }

    #[test]
    fn test_single_record_report() {
        let text = text_for(
            "[ERROR] Foo.java:[10,5] incompatible types: UUID cannot be converted to java.lang.String",
            &ReportSettings::default(),
        );
        assert!(text.contains("Total errors found: 1"));
        assert!(text.contains("\nUUID_to_String: 1 error\n"));
        assert!(text.contains("  Foo.java: 1 error\n"));
        assert!(text.contains(
            "    Line 10: incompatible types: UUID cannot be converted to java.lang.String..."
        ));
    }

    #[test]
    fn test_counts_are_pluralised() {
        let log = "\
[ERROR] Foo.java:[1,1] incompatible types: UUID cannot be converted to java.lang.String
[ERROR] Foo.java:[2,1] incompatible types: UUID cannot be converted to java.lang.String
[ERROR] Bar.java:[3,1] does not override abstract method run()";
        let text = text_for(log, &ReportSettings::default());
        assert!(text.contains("\nUUID_to_String: 2 errors\n"));
        assert!(text.contains("\nAbstract_method: 1 error\n"));
        assert!(text.contains("\nFoo.java: 2 errors\n"));
        assert!(text.contains("\nBar.java: 1 error\n"));
        assert!(!text.contains("1 errors"));
    }

    #[test]
    fn test_preview_truncates_on_chars() {
        assert_eq!(preview("abcdef", 3), "abc...");
        assert_eq!(preview("ab", 3), "ab...");
        assert_eq!(preview("äöüß", 2), "äö...");
    }

    #[test]
    fn test_rank_is_stable_and_descending() {
        let records = vec![
            rec("B.java"),
            rec("A.java"),
            rec("C.java"),
            rec("A.java"),
            rec("C.java"),
        ];
        let ranked = rank_files(&records, None);
        let names: Vec<_> = ranked.iter().map(|f| f.file_name).collect();
        // A and C tie at 2; A was seen first
        assert_eq!(names, vec!["A.java", "C.java", "B.java"]);
        assert!(ranked.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_rank_respects_top() {
        let records = vec![rec("A.java"), rec("B.java"), rec("C.java")];
        assert_eq!(rank_files(&records, Some(2)).len(), 2);
        assert_eq!(rank_files(&records, None).len(), 3);
    }

    #[test]
    fn test_files_sorted_and_limited_per_group() {
        let log = "\
[ERROR] /x/Zed.java:[1,1] incompatible types: a
[ERROR] /x/Alpha.java:[2,1] incompatible types: b
[ERROR] /x/Alpha.java:[3,1] incompatible types: c
[ERROR] /x/Alpha.java:[4,1] incompatible types: d";
        let compact = text_for(log, &ReportSettings::default());
        let alpha = compact.find("  Alpha.java: 3 errors").unwrap();
        let zed = compact.find("  Zed.java: 1 error").unwrap();
        assert!(alpha < zed);
        assert!(compact.contains("Line 3:"));
        assert!(!compact.contains("Line 4:"));

        let all = ReportSettings {
            max_per_file: None,
            ..ReportSettings::default()
        };
        assert!(text_for(log, &all).contains("Line 4:"));
    }

    #[test]
    fn test_notes_section() {
        let settings = ReportSettings {
            notes: vec!["Fix ids".to_string(), "Split services".to_string()],
            ..ReportSettings::default()
        };
        let text = text_for("", &settings);
        assert!(text.contains("CRITICAL PATTERNS TO FIX:"));
        assert!(text.contains("1. Fix ids\n2. Split services\n"));
    }

    #[test]
    fn test_json_summary() {
        let ex = extract("[ERROR] Foo.java:[1,2] does not override abstract method x()");
        let cats = categorize(&ex.records, &RuleSet::full());
        let settings = ReportSettings::default();
        let json = render_json(&summarize(&ex, &cats, &settings)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total"], 1);
        assert_eq!(value["categories"][0]["category"], "Abstract_method");
        assert_eq!(value["categories"][0]["files"][0]["records"][0]["line"], 1);
        assert_eq!(value["most_affected"][0]["file_name"], "Foo.java");
    }
}
